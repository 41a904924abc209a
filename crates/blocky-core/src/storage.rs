//! Reading templates from and writing rendered content to files

use crate::config::BlockConfig;
use crate::error::{BlockyError, Result};
use crate::template::{BlockId, BlockTree};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Where a template's text comes from
#[derive(Debug, Clone, Copy)]
pub enum TemplateSource<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> TemplateSource<'a> {
    /// Treat `source` as a path when it names an existing file, else as text
    pub fn detect(source: &'a str) -> Self {
        let path = Path::new(source);
        if !source.contains('\n') && path.is_file() {
            TemplateSource::File(path)
        } else {
            TemplateSource::Text(source)
        }
    }

    fn read(self) -> Result<String> {
        match self {
            TemplateSource::Text(text) => Ok(text.to_string()),
            TemplateSource::File(path) => read_template(path),
        }
    }
}

/// Read template text from a UTF-8 file
pub fn read_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| BlockyError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded template");
    Ok(text)
}

/// Write rendered content to a file, replacing it
pub fn write_content(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|source| BlockyError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "saved content");
    Ok(())
}

impl BlockTree {
    /// Create a tree whose root template is read from `path`
    pub fn from_file(path: impl AsRef<Path>, config: Arc<BlockConfig>) -> Result<Self> {
        let text = read_template(path)?;
        Ok(Self::with_config(text, config))
    }

    /// Replace a block's template with text from `source`.
    ///
    /// With `subblock`, only the inner text of that block within the loaded
    /// text becomes the template, and a root block takes the sub-block's name.
    pub fn load_template(
        &mut self,
        id: BlockId,
        source: TemplateSource<'_>,
        subblock: Option<&str>,
    ) -> Result<()> {
        let text = source.read()?;
        let Some(name) = subblock else {
            self.set_template(id, text);
            return Ok(());
        };

        let mut scratch = BlockTree::with_config(text, Arc::clone(self.config()));
        let root = scratch.root();
        let child = scratch
            .subblock(root, name)
            .ok_or_else(|| BlockyError::SubblockNotFound(name.to_string()))?;
        self.set_template(id, scratch.template(child));
        if self.parent(id).is_none() {
            self.block_mut(id).rename(name);
        }
        Ok(())
    }

    /// Write a block's current content to `path`
    pub fn save_content(&self, id: BlockId, path: impl AsRef<Path>) -> Result<()> {
        write_content(path, self.content(id))
    }
}
