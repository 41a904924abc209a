//! Block tree: extraction, cloning, substitution and injection

use super::autotag::{resolve_alignment, resolve_variants, select_variant, VariantPick};
use super::position::{find_span, find_span_from, Bounds};
use super::state::CloneState;
use crate::config::BlockConfig;
use crate::data::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Handle to a block inside a [`BlockTree`].
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

/// One tagged region of a template
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    template: String,
    content: String,
    parent: Option<BlockId>,
    children: Vec<(String, BlockId)>,
    state: CloneState,
    raw: bool,
}

impl Block {
    fn new(name: impl Into<String>, template: String, parent: Option<BlockId>) -> Self {
        Self {
            name: name.into(),
            content: template.clone(),
            template,
            parent,
            children: Vec::new(),
            state: CloneState::default(),
            raw: false,
        }
    }

    /// Tag name the block was extracted under; empty for the root
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Extracted children, in extraction order
    pub fn children(&self) -> impl Iterator<Item = (&str, BlockId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn state(&self) -> CloneState {
        self.state
    }

    /// Raw blocks skip auto-tag resolution
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// How a single clone request behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneMode {
    /// Materialize an owed copy, then owe a new one
    #[default]
    Deferred,
    /// Only materialize an owed copy
    Passive,
    /// Append a copy now without owing another
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneOptions {
    /// More than one copy always uses [`CloneMode::Deferred`] per copy
    pub copies: usize,
    pub mode: CloneMode,
    /// Inject every child into this block before cloning
    pub set_children: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            mode: CloneMode::Deferred,
            set_children: false,
        }
    }
}

impl CloneOptions {
    pub fn copies(copies: usize) -> Self {
        Self {
            copies,
            ..Self::default()
        }
    }

    pub fn forced() -> Self {
        Self {
            mode: CloneMode::Forced,
            ..Self::default()
        }
    }

    pub fn passive() -> Self {
        Self {
            mode: CloneMode::Passive,
            ..Self::default()
        }
    }

    pub fn with_children(mut self) -> Self {
        self.set_children = true;
        self
    }
}

/// Options for injecting a block into its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Variant segment to inject; negative clears the block instead
    pub variant: i64,
    /// Inject children that owe a clone first
    pub push_children: bool,
    /// Override the block's raw mode
    pub raw: Option<bool>,
    /// Maximum number of tag occurrences to replace; `None` for all
    pub count: Option<usize>,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            variant: 0,
            push_children: false,
            raw: None,
            count: None,
        }
    }
}

impl SetOptions {
    pub fn with_variant(mut self, variant: i64) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_children(mut self) -> Self {
        self.push_children = true;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// A template tree: the root block and every block extracted below it.
///
/// Blocks live in an arena owned by the tree; a child keeps only the
/// [`BlockId`] of its parent.
#[derive(Debug, Clone)]
pub struct BlockTree {
    config: Arc<BlockConfig>,
    blocks: Vec<Block>,
}

impl BlockTree {
    /// Create a tree with the default tag syntax
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_config(template, Arc::new(BlockConfig::default()))
    }

    pub fn with_config(template: impl Into<String>, config: Arc<BlockConfig>) -> Self {
        Self {
            config,
            blocks: vec![Block::new(String::new(), template.into(), None)],
        }
    }

    pub fn config(&self) -> &Arc<BlockConfig> {
        &self.config
    }

    pub fn root(&self) -> BlockId {
        BlockId(0)
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.0]
    }

    pub fn content(&self, id: BlockId) -> &str {
        &self.block(id).content
    }

    pub fn template(&self, id: BlockId) -> &str {
        &self.block(id).template
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).parent
    }

    /// Number of blocks in the tree, root included
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Previously extracted child, without touching any content
    pub fn child(&self, id: BlockId, name: &str) -> Option<BlockId> {
        self.block(id)
            .children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, child)| *child)
    }

    fn child_ids(&self, id: BlockId) -> Vec<BlockId> {
        self.block(id).children.iter().map(|(_, c)| *c).collect()
    }

    /// Rendered text of the root block
    pub fn rendered(&self) -> &str {
        self.content(self.root())
    }

    pub fn into_rendered(mut self) -> String {
        std::mem::take(&mut self.blocks[0].content)
    }

    /// Replace a block's template; its content restarts from the new template
    pub fn set_template(&mut self, id: BlockId, template: impl Into<String>) {
        let block = self.block_mut(id);
        block.template = template.into();
        block.content.clone_from(&block.template);
        block.state.reset();
    }

    pub fn set_raw(&mut self, id: BlockId, raw: bool) {
        self.block_mut(id).raw = raw;
    }

    /// Extract the child block delimited by `name`'s start and end tags.
    ///
    /// The first extraction registers the child under `name`; later calls
    /// return the same handle, re-seeded with the template found at the
    /// first remaining tag occurrence. Returns `None` when the tags are
    /// absent from the content.
    pub fn subblock(&mut self, id: BlockId, name: &str) -> Option<BlockId> {
        self.clone_once(id, CloneMode::Passive);
        if name.is_empty() {
            return None;
        }

        let start_tag = self.config.start_tag(name);
        let end_tag = self.config.end_tag(name);
        let content = &self.block(id).content;
        let span = find_span(content, &start_tag, &end_tag, Bounds::Exclude)?;
        let template = content[span.range()].to_string();

        let child = match self.child(id, name) {
            Some(child) => {
                let block = self.block_mut(child);
                block.template = template;
                block.content.clone_from(&block.template);
                block.state = CloneState::default();
                for grandchild in self.child_ids(child) {
                    self.reset(grandchild, true);
                }
                child
            }
            None => {
                let child = BlockId(self.blocks.len());
                self.blocks.push(Block::new(name, template, Some(id)));
                self.block_mut(id).children.push((name.to_string(), child));
                child
            }
        };

        debug!(parent = %self.block(id).name, block = name, "extracted subblock");
        Some(child)
    }

    /// Extract several children at once
    pub fn subblocks(&mut self, id: BlockId, names: &[&str]) -> Vec<Option<BlockId>> {
        names.iter().map(|name| self.subblock(id, name)).collect()
    }

    /// Restore content to the template, optionally for all descendants too
    pub fn reset(&mut self, id: BlockId, all_subblocks: bool) {
        let block = self.block_mut(id);
        block.content.clone_from(&block.template);
        block.state.reset();
        if all_subblocks {
            for child in self.child_ids(id) {
                self.reset(child, true);
            }
        }
    }

    /// Append template copies to a block's content
    pub fn clone_block(&mut self, id: BlockId, options: CloneOptions) {
        if options.set_children {
            for child in self.child_ids(id) {
                self.set(child, SetOptions::default());
            }
        }

        if options.copies > 1 {
            for _ in 0..options.copies {
                self.clone_once(id, CloneMode::Deferred);
            }
        } else {
            self.clone_once(id, options.mode);
        }
    }

    pub(crate) fn clone_once(&mut self, id: BlockId, mode: CloneMode) {
        let forced = mode == CloneMode::Forced;
        if forced || self.block(id).state.is_pending() {
            self.materialize(id);
        }

        if mode != CloneMode::Passive {
            if !forced {
                self.block_mut(id).state.owe_clone();
            }
            for child in self.child_ids(id) {
                self.reset(child, true);
            }
        }
    }

    fn materialize(&mut self, id: BlockId) {
        let config = Arc::clone(&self.config);
        let block = self.block_mut(id);
        if !block.raw {
            let pick = if block.state.take_first() {
                VariantPick::First
            } else {
                VariantPick::Standard
            };
            let resolved = resolve_variants(&block.content, &config, pick);
            block.content = resolve_alignment(&resolved, &block.template, &config);
        }
        block.content.push_str(&block.template);
        block.state.materialized();
        trace!(block = %block.name, "materialized clone");
    }

    /// Inject a block's content into its parent at the block's tag location
    pub fn set(&mut self, id: BlockId, options: SetOptions) {
        if let Some(raw) = options.raw {
            self.block_mut(id).raw = raw;
        }

        if options.variant < 0 {
            self.block_mut(id).content.clear();
        } else if options.push_children {
            for child in self.child_ids(id) {
                if self.block(child).state.is_pending() {
                    self.set(child, SetOptions { count: None, ..options });
                }
            }
        }

        self.inject(id, usize::try_from(options.variant).unwrap_or(0), options.count);
    }

    /// Empty a block and remove its tags from the parent
    pub fn clear(&mut self, id: BlockId, count: Option<usize>) {
        self.block_mut(id).content.clear();
        self.inject(id, 0, count);
    }

    fn inject(&mut self, id: BlockId, variant: usize, count: Option<usize>) {
        let config = Arc::clone(&self.config);
        let parent = self.block(id).parent;

        if let Some(parent) = parent {
            let block = self.block(id);
            if block.content != block.template {
                self.clone_once(parent, CloneMode::Passive);
            }
        }

        let block = self.block_mut(id);
        if !block.raw {
            let resolved = resolve_variants(&block.content, &config, VariantPick::Last);
            block.state.sequence_closed();
            block.content = resolve_alignment(&resolved, &block.template, &config);
        }

        let Some(parent) = parent else {
            return;
        };

        let block = self.block(id);
        let start_tag = config.start_tag(&block.name);
        let end_tag = config.end_tag(&block.name);
        let value = select_variant(&block.content, &config.variation_tag(&block.name), variant)
            .to_string();

        let target = &mut self.block_mut(parent).content;
        let mut from = 0;
        let mut injected = 0;
        while count.map_or(true, |max| injected < max) {
            let Some(span) = find_span_from(target, from, &start_tag, &end_tag, Bounds::Include)
            else {
                break;
            };
            target.replace_range(span.range(), &value);
            from = span.start + value.len();
            injected += 1;
        }

        debug!(block = %self.block(id).name, injected, "injected block into parent");
    }

    /// Clear the named children, extracting them first if needed
    pub fn clear_subblock(&mut self, id: BlockId, names: &[&str]) {
        for name in names {
            if let Some(child) = self.child(id, name).or_else(|| self.subblock(id, name)) {
                self.clear(child, None);
            }
        }
    }

    /// Inject each given block into its parent
    pub fn set_subblocks(&mut self, ids: &[BlockId]) {
        for &id in ids {
            self.set(id, SetOptions::default());
        }
    }

    /// Substitute variable tags.
    ///
    /// Sequence values fan out over clones: with a longest sequence of
    /// length L > 1 the block is filled and cloned L times, round `i` using
    /// element `i` of each sequence (or its last element) and scalars as-is.
    pub fn set_variables<I, K, V>(&mut self, id: BlockId, vars: I, autoclone: bool)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let vars: Vec<(String, Value)> = vars
            .into_iter()
            .map(|(name, value)| (self.config.variable_tag(name.as_ref()), value.into()))
            .collect();

        let rounds = vars
            .iter()
            .map(|(_, value)| match value {
                Value::Sequence(items) => items.len(),
                _ => 1,
            })
            .max()
            .unwrap_or(1)
            .max(1);

        for round in 0..rounds {
            self.clone_once(id, CloneMode::Passive);
            let block = self.block_mut(id);
            for (tag, value) in &vars {
                let text = match value {
                    Value::Sequence(items) => items
                        .get(round)
                        .or(items.last())
                        .map(Value::text)
                        .unwrap_or_default(),
                    scalar => scalar.text(),
                };
                if block.content.contains(tag.as_str()) {
                    block.content = block.content.replace(tag.as_str(), &text);
                    block.state.mark_filled();
                }
            }

            if rounds > 1 || autoclone {
                self.clone_once(id, CloneMode::Deferred);
            }
        }
    }

    /// Remove variable tags without cloning
    pub fn clear_variables<I, K>(&mut self, id: BlockId, names: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for name in names {
            let tag = self.config.variable_tag(name.as_ref());
            let block = self.block_mut(id);
            if block.content.contains(tag.as_str()) {
                block.content = block.content.replace(tag.as_str(), "");
                block.state.mark_filled();
            }
        }
    }
}

#[cfg(test)]
mod tests;
