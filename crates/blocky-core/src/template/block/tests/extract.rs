//! Sub-block extraction tests

use super::*;
use crate::template::ClonePhase;

#[test]
fn test_subblock_takes_inner_lines() {
    let (tree, items) = extracted("head\n<ITEMS>\n* <ITEM>\n</ITEMS>\ntail\n", "ITEMS");
    assert_eq!(tree.template(items), "* <ITEM>\n");
    assert_eq!(tree.content(items), "* <ITEM>\n");
    assert_eq!(tree.parent(items), Some(tree.root()));
    assert_eq!(tree.block(items).name(), "ITEMS");
}

#[test]
fn test_subblock_inline() {
    let (tree, b) = extracted("a <B>bee</B> c", "B");
    assert_eq!(tree.template(b), "bee");
}

#[test]
fn test_subblock_missing_tags() {
    let mut tree = BlockTree::new("Hello <NAME>\n");
    let root = tree.root();
    assert_eq!(tree.subblock(root, "NAME"), None);
    assert_eq!(tree.subblock(root, "OTHER"), None);
    assert_eq!(tree.subblock(root, ""), None);
    assert_eq!(tree.block_count(), 1);
}

#[test]
fn test_subblock_does_not_modify_parent() {
    let template = "<A>\nx\n</A>\n";
    let (tree, _) = extracted(template, "A");
    assert_eq!(tree.rendered(), template);
}

#[test]
fn test_reextraction_reuses_handle() {
    let (mut tree, a) = extracted("<A>1</A>,<A>2</A>", "A");
    tree.set(a, SetOptions::default().with_count(1));
    assert_eq!(tree.rendered(), "1,<A>2</A>");

    let root = tree.root();
    let again = tree.subblock(root, "A").unwrap();
    assert_eq!(again, a);
    assert_eq!(tree.template(a), "2");
    assert_eq!(tree.block_count(), 2);
}

#[test]
fn test_reextraction_resets_grandchildren() {
    let (mut tree, outer) = extracted("<OUTER>[<INNER><V></INNER>]</OUTER>", "OUTER");
    let inner = tree.subblock(outer, "INNER").unwrap();
    tree.set_variables(inner, [("V", 1)], false);
    assert_eq!(tree.content(inner), "1");

    let root = tree.root();
    tree.subblock(root, "OUTER");
    assert_eq!(tree.content(inner), "<V>");
    assert_eq!(tree.block(inner).state().phase(), ClonePhase::Idle);
}

#[test]
fn test_subblocks() {
    let mut tree = BlockTree::new("<A>a</A><B>b</B>");
    let root = tree.root();
    let ids = tree.subblocks(root, &["A", "C", "B"]);
    assert_eq!(ids.len(), 3);
    assert!(ids[0].is_some());
    assert!(ids[1].is_none());
    assert_eq!(ids[2].map(|id| tree.template(id).to_string()), Some("b".to_string()));
    let names: Vec<&str> = tree.block(root).children().map(|(name, _)| name).collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn test_child_lookup() {
    let (tree, a) = extracted("<A>a</A>", "A");
    assert_eq!(tree.child(tree.root(), "A"), Some(a));
    assert_eq!(tree.child(tree.root(), "B"), None);
}

#[test]
fn test_reset_all_subblocks() {
    let (mut tree, outer) = extracted("<OUTER>\n<INNER>-<V>\n</INNER></OUTER>\n", "OUTER");
    let inner = tree.subblock(outer, "INNER").unwrap();
    tree.set_variables(inner, [("V", "x")], false);
    tree.set_variables(outer, [("V", "y")], false);

    tree.reset(outer, false);
    assert_eq!(tree.content(outer), tree.template(outer));
    assert_eq!(tree.content(inner), "-x\n");

    tree.reset(outer, true);
    assert_eq!(tree.content(inner), "-<V>\n");
    assert_eq!(tree.block(inner).state().phase(), ClonePhase::Idle);
}

#[test]
fn test_set_template_restarts_content() {
    let (mut tree, a) = extracted("<A>x<V></A>", "A");
    tree.set_variables(a, [("V", 1)], false);
    tree.set_template(a, "y<V>");
    assert_eq!(tree.content(a), "y<V>");
    assert_eq!(tree.block(a).state().phase(), ClonePhase::Idle);
}
