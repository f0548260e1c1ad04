//! Nested gloss outlines.
//!
//! Some senses carry a multi-level gloss sequence (outer label, then
//! progressively narrower refinements). Sibling senses sharing an outer
//! label merge under one node, so the accumulator is a tree keyed by literal
//! gloss text at each level. Rendering turns it into list-item/list-container
//! nodes with 1-based numbering that restarts per parent.
use indexmap::IndexMap;

use crate::error::Error;

use super::types::{ContentNode, Gloss, ListType};

/// Nesting deeper than this is pathological source data, not an outline.
const MAX_OUTLINE_DEPTH: usize = 128;

/// Shared outline accumulator for one dictionary entry.
#[derive(Debug, Clone, Default)]
pub struct GlossTree {
    children: IndexMap<String, GlossTree>,
}

impl GlossTree {
    /// Insert one sense's gloss levels, outermost first. Levels already
    /// present merge with the existing node.
    pub fn insert(&mut self, levels: &[String]) {
        let mut node = self;
        for level in levels {
            node = node.children.entry(level.clone()).or_default();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Render the accumulated outline. Each top-level sibling becomes one
    /// structured gloss. Fails with [Error::OutlineDepth] on pathological
    /// nesting; the caller decides what to drop.
    pub fn render(&self) -> Result<Vec<Gloss>, Error> {
        let groups = render_level(&self.children, 1)?;
        Ok(groups.into_iter().map(Gloss::Structured).collect())
    }
}

/// One `Vec<ContentNode>` per sibling: a lone list item for leaves, an item
/// plus its indented ordered-list container for nodes with children.
fn render_level(
    tree: &IndexMap<String, GlossTree>,
    level: usize,
) -> Result<Vec<Vec<ContentNode>>, Error> {
    if level > MAX_OUTLINE_DEPTH {
        return Err(Error::OutlineDepth(MAX_OUTLINE_DEPTH));
    }

    let mut defs = Vec::with_capacity(tree.len());
    for (index, (gloss, node)) in tree.iter().enumerate() {
        let ordinal = index + 1;
        if node.is_empty() {
            // leaves only occur at depth >= 2, where items are numbered
            defs.push(vec![ContentNode::item(
                ListType::Li,
                level,
                format!("{ordinal}. {gloss}"),
            )]);
        } else {
            let children: Vec<ContentNode> = render_level(&node.children, level + 1)?
                .into_iter()
                .flatten()
                .collect();
            let (list_type, text) = if level == 1 {
                (ListType::Li, gloss.clone())
            } else {
                (ListType::Number, format!("{ordinal}. {gloss}"))
            };
            defs.push(vec![
                ContentNode::item(list_type, level, text),
                ContentNode::container(level + 1, children),
            ]);
        }
    }
    Ok(defs)
}
