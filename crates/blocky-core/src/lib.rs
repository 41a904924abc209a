// Core modules
pub mod config;
pub mod data;
pub mod error;
pub mod storage;
pub mod template;

// Re-export commonly used types
pub use config::BlockConfig;
pub use data::{FillHook, Record, Value};
pub use error::{BlockyError, Result};
pub use storage::TemplateSource;
pub use template::{BlockId, BlockTree, CloneMode, CloneOptions, SetOptions};
