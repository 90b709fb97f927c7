//! # Tree Queries
//!
//! Lookup and structural helpers over an ordered list of top-level nodes.
//! All functions are total: a missing id yields `None`/`false`, never a
//! panic.

use crate::node::Node;
use crate::visitor::{IdCollector, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Deepest allowed container nesting. A top-level container sits at level 1.
pub const MAX_NESTING_DEPTH: usize = 5;

/// The list a node lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ParentRef {
    /// The template's top-level list
    Root,
    /// Children of the container with this id
    Container(String),
}

/// Where a node sits in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub parent: ParentRef,
    pub index: usize,
    /// Number of containers enclosing the node
    pub depth: usize,
}

pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children() {
            if let Some(found) = find_node(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_node_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_node_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(nodes: &[Node], id: &str) -> bool {
    find_node(nodes, id).is_some()
}

pub fn locate(nodes: &[Node], id: &str) -> Option<Location> {
    locate_in(nodes, id, &ParentRef::Root, 0)
}

fn locate_in(nodes: &[Node], id: &str, parent: &ParentRef, depth: usize) -> Option<Location> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some(Location {
                parent: parent.clone(),
                index,
                depth,
            });
        }
        if let Node::Layout(layout) = node {
            let inner = ParentRef::Container(layout.id.clone());
            if let Some(found) = locate_in(&layout.children, id, &inner, depth + 1) {
                return Some(found);
            }
        }
    }
    None
}

/// Children list of `parent`, if it exists and can hold children
pub fn children_of<'a>(nodes: &'a [Node], parent: &ParentRef) -> Option<&'a [Node]> {
    match parent {
        ParentRef::Root => Some(nodes),
        ParentRef::Container(id) => find_node(nodes, id)?.children(),
    }
}

pub fn children_of_mut<'a>(nodes: &'a mut Vec<Node>, parent: &ParentRef) -> Option<&'a mut Vec<Node>> {
    match parent {
        ParentRef::Root => Some(nodes),
        ParentRef::Container(id) => find_node_mut(nodes, id)?.children_mut(),
    }
}

/// Remove a node (and its subtree) from wherever it lives
pub fn remove_node(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = nodes.iter().position(|n| n.id() == id) {
        return Some(nodes.remove(pos));
    }

    for node in nodes.iter_mut() {
        if let Some(children) = node.children_mut() {
            if let Some(removed) = remove_node(children, id) {
                return Some(removed);
            }
        }
    }

    None
}

/// Insert `node` into `parent` at `index` (clamped to the list length).
/// Hands the node back if the parent does not exist.
pub fn insert_node(
    nodes: &mut Vec<Node>,
    parent: &ParentRef,
    index: usize,
    node: Node,
) -> Result<usize, Node> {
    match children_of_mut(nodes, parent) {
        Some(children) => {
            let at = index.min(children.len());
            children.insert(at, node);
            Ok(at)
        }
        None => Err(node),
    }
}

/// Number of container levels inside `node`, counting itself.
/// A leaf is 0, an empty container is 1.
pub fn container_depth(node: &Node) -> usize {
    match node {
        Node::Field(_) => 0,
        Node::Layout(layout) => {
            1 + layout
                .children
                .iter()
                .map(container_depth)
                .max()
                .unwrap_or(0)
        }
    }
}

/// Container level of the list `parent` (root is 0)
pub fn parent_level(nodes: &[Node], parent: &ParentRef) -> Option<usize> {
    match parent {
        ParentRef::Root => Some(0),
        ParentRef::Container(id) => {
            let location = locate(nodes, id)?;
            match find_node(nodes, id)? {
                Node::Layout(_) => Some(location.depth + 1),
                Node::Field(_) => None,
            }
        }
    }
}

/// Whether placing `node` into `parent` keeps every container within
/// [`MAX_NESTING_DEPTH`]
pub fn fits_depth(nodes: &[Node], parent: &ParentRef, node: &Node) -> bool {
    match parent_level(nodes, parent) {
        Some(level) => level + container_depth(node) <= MAX_NESTING_DEPTH,
        None => false,
    }
}

/// Whether `id` lives somewhere below `ancestor_id`
pub fn is_descendant(nodes: &[Node], ancestor_id: &str, id: &str) -> bool {
    match find_node(nodes, ancestor_id).and_then(Node::children) {
        Some(children) => contains(children, id),
        None => false,
    }
}

pub fn collect_ids(nodes: &[Node]) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_nodes(nodes);
    collector.ids
}

pub fn count_nodes(nodes: &[Node]) -> usize {
    collect_ids(nodes).len()
}

/// True when no id appears twice anywhere in the tree
pub fn ids_are_unique(nodes: &[Node]) -> bool {
    let ids = collect_ids(nodes);
    let unique: HashSet<&String> = ids.iter().collect();
    unique.len() == ids.len()
}
