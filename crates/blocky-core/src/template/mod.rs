//! Template module - block-structured text template engine
//!
//! A template is plain text with named tags. Blocks are regions between a
//! start and an end tag; they are extracted into child blocks, filled by
//! variable substitution, repeated by cloning, and injected back into their
//! parent until the root holds the rendered text.
//!
//! ## Syntax (default convention)
//!
//! - Variable: `<NAME>`
//! - Block: `<NAME>` ... `</NAME>`, with alternate renderings separated by `<^NAME>`
//! - Alignment padding: `<+>` followed by a run of one repeated character
//! - First/standard/last values: `<.>STD<^.>LAST<^.>FIRST</.>`
//!
//! ## Example
//!
//! ```rust
//! use blocky_core::template::{BlockTree, SetOptions};
//!
//! let mut tree = BlockTree::new("<ITEMS>\n* <ITEM>\n</ITEMS>");
//! let items = tree.subblock(tree.root(), "ITEMS").unwrap();
//! tree.set_variables(items, [("ITEM", vec!["apples", "oranges"])], false);
//! tree.set(items, SetOptions::default());
//! assert_eq!(tree.rendered(), "* apples\n* oranges\n");
//! ```

pub mod autotag;
mod block;
mod fill;
pub mod position;
pub mod state;

pub use block::{Block, BlockId, BlockTree, CloneMode, CloneOptions, SetOptions};
pub use state::{ClonePhase, CloneState};
