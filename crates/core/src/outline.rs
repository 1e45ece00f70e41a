//! Heading outlines: flat heading lists to nested trees, and level filtering.

use serde::{Deserialize, Serialize};
use crate::config::HeadingLevelRange;
use std::collections::BTreeMap;

/// Shallowest level that can parent another heading.
const PARENT_LEVEL_FLOOR: u8 = 2;

/// A heading as it appears in the document, before nesting is reconstructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatHeading {
    /// Anchor identifier (slug) of the heading.
    pub id: String,
    /// Heading rank, 1 for `h1` through 6 for `h6`.
    pub level: u8,
    /// Display value; inline HTML that is passed through untouched.
    pub value: String,
}

impl FlatHeading {
    /// Creates a flat heading record.
    pub fn new(id: impl Into<String>, level: u8, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level,
            value: value.into(),
        }
    }
}

/// A heading together with the headings nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Anchor identifier (slug) of the heading.
    pub id: String,
    /// Heading rank, 1 for `h1` through 6 for `h6`.
    pub level: u8,
    /// Display value; inline HTML that is passed through untouched.
    pub value: String,
    /// Nested headings in document order.
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

impl From<&FlatHeading> for HeadingNode {
    fn from(flat: &FlatHeading) -> Self {
        Self {
            id: flat.id.clone(),
            level: flat.level,
            value: flat.value.clone(),
            children: Vec::new(),
        }
    }
}

/// Rebuilds document nesting from heading levels alone.
///
/// A heading's parent is the most recent heading seen at a shallower level
/// from 2 up. Headings without such an ancestor become roots, so a document
/// may start at any level and may skip levels; level 1 and 0 headings are
/// always roots and never parents. Levels are otherwise compared as plain
/// integers and never validated.
///
/// # Examples
///
/// ```
/// use tocline_core::outline::{FlatHeading, build_tree};
///
/// let tree = build_tree(&[
///     FlatHeading::new("a", 2, "A"),
///     FlatHeading::new("b", 3, "B"),
///     FlatHeading::new("c", 2, "C"),
///     FlatHeading::new("d", 4, "D"),
/// ]);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree[0].children[0].id, "b");
/// assert_eq!(tree[1].children[0].id, "d");
/// ```
pub fn build_tree(flat: &[FlatHeading]) -> Vec<HeadingNode> {
    // level -> index of the most recent heading at that level
    let mut latest: BTreeMap<u8, usize> = BTreeMap::new();
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(flat.len());

    for (index, heading) in flat.iter().enumerate() {
        // Only levels 2 and deeper are parent candidates; `h1` is the page title.
        let parent = if heading.level > PARENT_LEVEL_FLOOR {
            latest
                .range(PARENT_LEVEL_FLOOR..heading.level)
                .map(|(_, &candidate)| candidate)
                .max()
        } else {
            None
        };
        parents.push(parent);
        latest.insert(heading.level, index);
    }

    // Parents always precede their children, so attaching in reverse lets
    // every subtree be complete before it is moved into its parent.
    let mut slots: Vec<Option<HeadingNode>> = flat.iter().map(|h| Some(h.into())).collect();
    let mut roots = Vec::new();
    for index in (0..flat.len()).rev() {
        let Some(node) = slots[index].take() else {
            continue;
        };
        match parents[index] {
            Some(parent) => {
                if let Some(parent_node) = slots[parent].as_mut() {
                    parent_node.children.push(node);
                }
            }
            None => roots.push(node),
        }
    }

    roots.reverse();
    reverse_children(&mut roots);
    roots
}

fn reverse_children(nodes: &mut [HeadingNode]) {
    for node in nodes {
        node.children.reverse();
        reverse_children(&mut node.children);
    }
}

/// Prunes a tree to headings whose level lies within `min..=max`.
///
/// Elided headings are replaced by their own (already filtered) children, so
/// descendants are promoted to the elided heading's position and relative
/// document order is kept. Filtering is idempotent, and `1..=6` is the
/// identity on trees produced by [`build_tree`].
pub fn filter_by_level_range(tree: Vec<HeadingNode>, min: u8, max: u8) -> Vec<HeadingNode> {
    let window = HeadingLevelRange::new(min, max);
    let mut filtered = Vec::with_capacity(tree.len());
    for mut node in tree {
        let children = filter_by_level_range(std::mem::take(&mut node.children), min, max);
        if window.contains(node.level) {
            node.children = children;
            filtered.push(node);
        } else {
            filtered.extend(children);
        }
    }
    filtered
}

/// Walks a tree in pre-order, which is document order for built trees.
pub fn flatten(tree: &[HeadingNode]) -> Vec<&HeadingNode> {
    fn walk<'a>(nodes: &'a [HeadingNode], out: &mut Vec<&'a HeadingNode>) {
        for node in nodes {
            out.push(node);
            walk(&node.children, out);
        }
    }

    let mut out = Vec::new();
    walk(tree, &mut out);
    out
}

/// Anchor ids of every heading in the tree, in document order.
pub fn anchor_ids(tree: &[HeadingNode]) -> Vec<String> {
    flatten(tree).into_iter().map(|node| node.id.clone()).collect()
}
