//! Clone state machine tests

use super::*;
use crate::template::ClonePhase;

#[test]
fn test_deferred_clone_owes_copy() {
    let (mut tree, s) = extracted("<S>\n<V>\n</S>\n", "S");
    tree.set_variables(s, [("V", "a")], false);
    assert_eq!(tree.block(s).state().phase(), ClonePhase::Filled);

    tree.clone_block(s, CloneOptions::default());
    assert_eq!(tree.block(s).state().phase(), ClonePhase::PendingClone);
    assert_eq!(tree.content(s), "a\n");

    tree.set_variables(s, [("V", "b")], false);
    assert_eq!(tree.content(s), "a\nb\n");
    assert_eq!(tree.block(s).state().phase(), ClonePhase::Filled);
}

#[test]
fn test_pending_clone_not_appended_on_set() {
    let (mut tree, s) = extracted("<S>\n<V>\n</S>\n", "S");
    tree.set_variables(s, [("V", "a")], true);
    tree.set(s, SetOptions::default());
    assert_eq!(tree.rendered(), "a\n");
}

#[test]
fn test_passive_clone_without_debt_is_noop() {
    let (mut tree, s) = extracted("<S>\nx\n</S>\n", "S");
    tree.clone_block(s, CloneOptions::passive());
    assert_eq!(tree.content(s), "x\n");
    assert_eq!(tree.block(s).state().phase(), ClonePhase::Idle);
}

#[test]
fn test_forced_clones() {
    let (mut tree, s) = extracted("<S>\nx\n</S>\n", "S");
    for _ in 0..3 {
        tree.clone_block(s, CloneOptions::forced());
    }
    assert!(!tree.block(s).state().is_pending());
    tree.set(s, SetOptions::default());
    assert_eq!(tree.rendered(), "x\n".repeat(4));
}

#[test]
fn test_multiple_copies() {
    let (mut tree, s) = extracted("<S>\nx\n</S>\n", "S");
    tree.clone_block(s, CloneOptions::copies(3));
    assert!(tree.block(s).state().is_pending());
    tree.set(s, SetOptions::default());
    assert_eq!(tree.rendered(), "x\n".repeat(3));
}

#[test]
fn test_clone_resets_children() {
    let (mut tree, outer) = extracted("<OUTER>\n<INNER><V></INNER>\n</OUTER>\n", "OUTER");
    let inner = tree.subblock(outer, "INNER").unwrap();
    tree.set_variables(inner, [("V", "x")], false);
    tree.clone_block(outer, CloneOptions::default());
    assert_eq!(tree.content(inner), "<V>");
}

#[test]
fn test_clone_with_children() {
    let (mut tree, rows) = extracted("<ROWS>\n<ROW>[<V>]</ROW>\n</ROWS>\n", "ROWS");
    let row = tree.subblock(rows, "ROW").unwrap();
    for v in 1..=2 {
        tree.set_variables(row, [("V", v)], false);
        tree.clone_block(rows, CloneOptions::default().with_children());
    }
    tree.set(rows, SetOptions::default());
    assert_eq!(tree.rendered(), "[1]\n[2]\n");
}

#[test]
fn test_first_and_last_variants() {
    let template = "Short list: <ITEMS><ITEM><.>, <^.></.></ITEMS>\n";
    let (mut tree, items) = extracted(template, "ITEMS");
    tree.set_variables(items, [("ITEM", vec!["a", "b", "c"])], false);
    tree.set(items, SetOptions::default());
    assert_eq!(tree.rendered(), "Short list: a, b, c\n");
}

#[test]
fn test_first_variant_segment() {
    let template = "<ITEMS><ITEM><.>, <^.>.<^.>: </.></ITEMS>";
    let (mut tree, items) = extracted(template, "ITEMS");
    tree.set_variables(items, [("ITEM", vec!["a", "b", "c"])], false);
    tree.set(items, SetOptions::default());
    assert_eq!(tree.rendered(), "a: b, c.");
}

#[test]
fn test_single_element_takes_last_variant() {
    let template = "<ITEMS><ITEM><.>, <^.>.<^.>: </.></ITEMS>";
    let (mut tree, items) = extracted(template, "ITEMS");
    tree.set_variables(items, [("ITEM", "a")], true);
    tree.set(items, SetOptions::default());
    assert_eq!(tree.rendered(), "a.");
}
