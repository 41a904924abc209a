//! Data-driven filling of a block tree from a [`Record`]

use super::block::{BlockId, BlockTree, CloneMode, CloneOptions, SetOptions};
use crate::data::{Record, Value};
use tracing::debug;

impl BlockTree {
    /// Render `data` into block `id` and its descendants.
    ///
    /// Field names are upper-cased to form tag names. Fields are visited by
    /// shape so that child blocks exist before scalar substitution reaches the
    /// parent's own tags:
    ///
    /// 1. sequences fill one clone of the same-named child per element; a
    ///    record element is filled recursively, any other element replaces
    ///    the variable named after the block itself (`<ITEMS>` inside the
    ///    `ITEMS` block), so scalar lists use that tag rather than a
    ///    singular one;
    /// 2. records (and nulls) fill and inject the same-named child, or clear
    ///    it; without such a child the same-named variable is cleared;
    /// 3. scalars set or clear a same-named child by truthiness, then are
    ///    substituted as variables;
    /// 4. the record's fill hook runs last.
    ///
    /// Every occurrence of a child's tags present when the field is visited
    /// is processed. Returns the record's variant index (0 when unset).
    pub fn fill(&mut self, id: BlockId, data: &Record) -> i64 {
        debug!(block = %self.block(id).name(), fields = data.len(), "filling block");
        self.fill_at(id, data, 0)
    }

    fn fill_at(&mut self, id: BlockId, data: &Record, index: usize) -> i64 {
        for (field, value) in data.fields() {
            let Value::Sequence(items) = value else {
                continue;
            };
            let name = field.to_uppercase();
            self.for_each_occurrence(id, &name, |tree, child| {
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::Record(record) => {
                            tree.fill_at(child, record, i);
                        }
                        other => tree.set_variables(child, [(name.as_str(), other.clone())], false),
                    }
                    tree.clone_block(child, CloneOptions::default());
                }
                if items.is_empty() {
                    tree.clear(child, Some(1));
                } else {
                    tree.set(child, SetOptions::default().with_count(1));
                }
            });
        }

        for (field, value) in data.fields() {
            if !matches!(value, Value::Record(_) | Value::Null) {
                continue;
            }
            let name = field.to_uppercase();
            let found = self.for_each_occurrence(id, &name, |tree, child| match value {
                Value::Record(record) if record.is_truthy() => {
                    let variant = tree.fill_at(child, record, 0);
                    tree.set(
                        child,
                        SetOptions::default().with_variant(variant).with_count(1),
                    );
                }
                _ => tree.clear(child, Some(1)),
            });
            if !found {
                self.clear_variables(id, [name.as_str()]);
            }
        }

        for (field, value) in data.fields() {
            if !value.is_scalar() {
                continue;
            }
            let name = field.to_uppercase();
            let truthy = value.is_truthy();
            self.for_each_occurrence(id, &name, |tree, child| {
                if truthy {
                    tree.set(child, SetOptions::default().with_count(1));
                } else {
                    tree.clear(child, Some(1));
                }
            });
            self.set_variables(id, [(name.as_str(), value.clone())], false);
        }

        if let Some(hook) = data.hook() {
            hook.call(self, id, data, index);
        }

        data.variant().unwrap_or(0)
    }

    /// Run `f` once per occurrence of `name`'s block tags in `id`'s content.
    ///
    /// The number of start tags counted up front bounds the loop, so content
    /// injected by `f` can never keep it running. Returns whether any block
    /// was found.
    fn for_each_occurrence<F>(&mut self, id: BlockId, name: &str, mut f: F) -> bool
    where
        F: FnMut(&mut BlockTree, BlockId),
    {
        self.clone_once(id, CloneMode::Passive);
        let start_tag = self.config().start_tag(name);
        let limit = self.content(id).matches(start_tag.as_str()).count();

        let mut found = false;
        for _ in 0..limit {
            let Some(child) = self.subblock(id, name) else {
                break;
            };
            f(self, child);
            found = true;
        }
        found
    }
}
