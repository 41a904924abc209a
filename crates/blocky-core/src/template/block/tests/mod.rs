//! Block tree tests

use super::*;

mod clone;
mod extract;

/// Tree for `template` with `name` extracted from the root
pub(super) fn extracted(template: &str, name: &str) -> (BlockTree, BlockId) {
    let mut tree = BlockTree::new(template);
    let root = tree.root();
    let id = tree.subblock(root, name).unwrap();
    (tree, id)
}
