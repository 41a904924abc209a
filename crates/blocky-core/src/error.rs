use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockyError {
    // Storage errors
    #[error("TEMPLATE_READ_ERROR: failed to read template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OUTPUT_WRITE_ERROR: failed to write content to '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Template errors
    #[error("SUBBLOCK_NOT_FOUND: block '{0}' not found in template")]
    SubblockNotFound(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParse(String),

    // Data errors
    #[error("DATA_PARSE_ERROR: {0}")]
    DataParse(String),

    // Config and data file errors
    #[error("FILE_READ_ERROR: failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for BlockyError {
    fn from(err: serde_json::Error) -> Self {
        BlockyError::DataParse(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for BlockyError {
    fn from(err: toml::de::Error) -> Self {
        BlockyError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BlockyError>;
