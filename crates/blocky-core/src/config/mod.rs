//! Tag syntax and block configuration
//!
//! A [`BlockConfig`] is shared read-only by every block of a tree. Tag text is
//! produced by a [`TagSyntax`] strategy, one method per tag kind. The default
//! convention is:
//!
//! - Variable: `<NAME>`
//! - Block start / end: `<NAME>` / `</NAME>`
//! - Block variation separator: `<^NAME>`
//! - Alignment auto-tag: `<+>`
//! - Variant auto-tag: `<.>STD<^.>LAST<^.>FIRST</.>`

pub mod consts;
pub mod model;

pub use model::{BlockConfig, ConfigFile, DelimitedTags, Delimiters, StandardTags, TagSyntax};
