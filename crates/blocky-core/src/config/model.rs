use super::consts;
use crate::error::{BlockyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Produces the tag text for each logical tag kind.
///
/// Every method defaults to the standard angle-bracket convention, so an
/// implementation only overrides the kinds it changes.
pub trait TagSyntax: fmt::Debug + Send + Sync {
    fn variable(&self, name: &str) -> String {
        let (begin, end) = consts::tags::VARIABLE;
        format!("{begin}{name}{end}")
    }

    fn block_start(&self, name: &str) -> String {
        let (begin, end) = consts::tags::BLOCK_START;
        format!("{begin}{name}{end}")
    }

    fn block_end(&self, name: &str) -> String {
        let (begin, end) = consts::tags::BLOCK_END;
        format!("{begin}{name}{end}")
    }

    fn block_variation(&self, name: &str) -> String {
        let (begin, end) = consts::tags::BLOCK_VARIATION;
        format!("{begin}{name}{end}")
    }
}

/// The standard `<NAME>` / `</NAME>` / `<^NAME>` convention
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTags;

impl TagSyntax for StandardTags {}

/// Text placed before and after a tag name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub begin: String,
    pub end: String,
}

impl Delimiters {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    fn wrap(&self, name: &str) -> String {
        format!("{}{}{}", self.begin, name, self.end)
    }
}

impl From<(&str, &str)> for Delimiters {
    fn from((begin, end): (&str, &str)) -> Self {
        Self::new(begin, end)
    }
}

/// Tag syntax with per-kind delimiters, loadable from the `[tags]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimitedTags {
    pub variable: Delimiters,
    pub block_start: Delimiters,
    pub block_end: Delimiters,
    pub block_variation: Delimiters,
}

impl Default for DelimitedTags {
    fn default() -> Self {
        Self {
            variable: consts::tags::VARIABLE.into(),
            block_start: consts::tags::BLOCK_START.into(),
            block_end: consts::tags::BLOCK_END.into(),
            block_variation: consts::tags::BLOCK_VARIATION.into(),
        }
    }
}

impl TagSyntax for DelimitedTags {
    fn variable(&self, name: &str) -> String {
        self.variable.wrap(name)
    }

    fn block_start(&self, name: &str) -> String {
        self.block_start.wrap(name)
    }

    fn block_end(&self, name: &str) -> String {
        self.block_end.wrap(name)
    }

    fn block_variation(&self, name: &str) -> String {
        self.block_variation.wrap(name)
    }
}

/// On-disk configuration schema; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub tags: DelimitedTags,
    pub alignment: char,
    pub variant: char,
    pub tab_size: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tags: DelimitedTags::default(),
            alignment: consts::auto::ALIGNMENT,
            variant: consts::auto::VARIANT,
            tab_size: consts::TAB_SIZE,
        }
    }
}

/// Immutable configuration shared by all blocks of a tree
#[derive(Debug, Clone)]
pub struct BlockConfig {
    pub tags: Arc<dyn TagSyntax>,
    /// Name of the alignment auto-tag
    pub alignment: char,
    /// Name of the first/standard/last variant auto-tag
    pub variant: char,
    pub tab_size: usize,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            tags: Arc::new(StandardTags),
            alignment: consts::auto::ALIGNMENT,
            variant: consts::auto::VARIANT,
            tab_size: consts::TAB_SIZE,
        }
    }
}

impl From<ConfigFile> for BlockConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            tags: Arc::new(file.tags),
            alignment: file.alignment,
            variant: file.variant,
            tab_size: file.tab_size,
        }
    }
}

impl BlockConfig {
    pub fn new(tags: impl TagSyntax + 'static) -> Self {
        Self {
            tags: Arc::new(tags),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.into())
    }

    /// Read a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BlockyError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn variable_tag(&self, name: &str) -> String {
        self.tags.variable(name)
    }

    pub fn start_tag(&self, name: &str) -> String {
        self.tags.block_start(name)
    }

    pub fn end_tag(&self, name: &str) -> String {
        self.tags.block_end(name)
    }

    pub fn variation_tag(&self, name: &str) -> String {
        self.tags.block_variation(name)
    }

    /// Marker text of the alignment auto-tag, e.g. `<+>`
    pub fn alignment_tag(&self) -> String {
        self.tags.variable(&self.alignment.to_string())
    }

    /// Start, end and separator tags of the variant auto-tag
    pub fn variant_tags(&self) -> (String, String, String) {
        let name = self.variant.to_string();
        (
            self.tags.block_start(&name),
            self.tags.block_end(&name),
            self.tags.block_variation(&name),
        )
    }
}
