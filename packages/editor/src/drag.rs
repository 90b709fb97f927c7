//! # Drag-End Classification
//!
//! Turns a drag-end event from the drag framework into exactly one
//! [`DropAction`], or into the reason the drop is ignored.
//!
//! Sortable ids registered with the framework:
//!
//! | id                  | meaning                          |
//! |---------------------|----------------------------------|
//! | `canvas`            | top-level drop zone              |
//! | `drop:{containerId}`| a container's inner drop zone    |
//! | any node id         | the sortable node itself         |
//!
//! A container's node id means different things per source. A palette item
//! dropped on it goes inside, as the last child. A canvas node dropped on it
//! takes the container's own slot in the container's parent list, so
//! dragging a child onto its enclosing container lifts it out in front of
//! that container. Use `drop:{containerId}` to move a canvas node inside.

use crate::MutationError;
use rsvpkit_model::tree::{self, ParentRef};
use rsvpkit_model::{ContainerType, FieldType, Node};
use serde::{Deserialize, Serialize};

pub const CANVAS_ID: &str = "canvas";
pub const DROP_ZONE_PREFIX: &str = "drop:";

/// Sortable id of a container's inner drop zone
pub fn drop_zone_id(container_id: &str) -> String {
    format!("{}{}", DROP_ZONE_PREFIX, container_id)
}

/// Palette entry being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum PaletteItem {
    Field(FieldType),
    Layout(ContainerType),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase")]
pub enum DragSource {
    Palette { item: PaletteItem },
    #[serde(rename_all = "camelCase")]
    Canvas { node_id: String },
}

/// Drag-end event: what was dragged and the sortable id under the pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub active: DragSource,
    pub over: Option<String>,
}

impl DragEnd {
    pub fn from_palette(item: PaletteItem, over: impl Into<String>) -> Self {
        Self {
            active: DragSource::Palette { item },
            over: Some(over.into()),
        }
    }

    pub fn from_canvas(node_id: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            active: DragSource::Canvas {
                node_id: node_id.into(),
            },
            over: Some(over.into()),
        }
    }
}

/// Parsed sortable id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget<'a> {
    Canvas,
    Zone(&'a str),
    Node(&'a str),
}

impl<'a> DropTarget<'a> {
    pub fn parse(sortable_id: &'a str) -> Self {
        if sortable_id == CANVAS_ID {
            DropTarget::Canvas
        } else if let Some(container_id) = sortable_id.strip_prefix(DROP_ZONE_PREFIX) {
            DropTarget::Zone(container_id)
        } else {
            DropTarget::Node(sortable_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Construct a node for `item` and add it at the end of `parent`
    Append { item: PaletteItem, parent: ParentRef },

    /// Permute one list: `from` and `to` are indices in `parent`
    Reorder {
        node_id: String,
        parent: ParentRef,
        from: usize,
        to: usize,
    },

    /// Take the node out of its list and insert it into `parent` at `index`
    Move {
        node_id: String,
        parent: ParentRef,
        index: usize,
    },
}

/// Classify a drag-end against the current tree. An `Err` is the reason the
/// drop is a no-op; the tree is never touched here.
pub fn classify(nodes: &[Node], drag: &DragEnd) -> Result<DropAction, MutationError> {
    let over = drag
        .over
        .as_deref()
        .ok_or_else(|| MutationError::NotApplicable("no drop target".to_string()))?;
    let target = DropTarget::parse(over);

    match &drag.active {
        DragSource::Palette { item } => classify_palette(nodes, *item, &target),
        DragSource::Canvas { node_id } => classify_canvas(nodes, node_id, &target),
    }
}

fn classify_palette(
    nodes: &[Node],
    item: PaletteItem,
    target: &DropTarget<'_>,
) -> Result<DropAction, MutationError> {
    let parent = match target {
        DropTarget::Canvas => ParentRef::Root,
        DropTarget::Zone(container_id) => container_parent(nodes, container_id)?,
        DropTarget::Node(node_id) => match tree::find_node(nodes, node_id) {
            Some(Node::Layout(layout)) => ParentRef::Container(layout.id.clone()),
            Some(Node::Field(_)) => {
                tree::locate(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?
                    .parent
            }
            None => return Err(MutationError::NodeNotFound(node_id.to_string())),
        },
    };

    if let PaletteItem::Layout(_) = item {
        // An empty container adds one nesting level below the parent
        let level = tree::parent_level(nodes, &parent).unwrap_or(usize::MAX);
        if level >= rsvpkit_model::MAX_NESTING_DEPTH {
            return Err(MutationError::DepthExceeded);
        }
    }

    Ok(DropAction::Append { item, parent })
}

fn classify_canvas(
    nodes: &[Node],
    node_id: &str,
    target: &DropTarget<'_>,
) -> Result<DropAction, MutationError> {
    let origin =
        tree::locate(nodes, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

    let (parent, to) = match target {
        DropTarget::Canvas => (ParentRef::Root, None),
        DropTarget::Zone(container_id) => {
            if *container_id == node_id {
                return Err(MutationError::CycleDetected);
            }
            (container_parent(nodes, container_id)?, None)
        }
        DropTarget::Node(over_id) => {
            if *over_id == node_id {
                return Err(MutationError::NotApplicable(
                    "dropped onto itself".to_string(),
                ));
            }
            let over = tree::locate(nodes, over_id)
                .ok_or_else(|| MutationError::NodeNotFound(over_id.to_string()))?;
            (over.parent, Some(over.index))
        }
    };

    if let ParentRef::Container(parent_id) = &parent {
        if parent_id == node_id || tree::is_descendant(nodes, node_id, parent_id) {
            return Err(MutationError::CycleDetected);
        }
    }

    if parent == origin.parent {
        let len = tree::children_of(nodes, &parent).map_or(0, <[Node]>::len);
        let to = to.unwrap_or(len.saturating_sub(1));
        if to == origin.index {
            return Err(MutationError::NotApplicable("position unchanged".to_string()));
        }
        return Ok(DropAction::Reorder {
            node_id: node_id.to_string(),
            parent,
            from: origin.index,
            to,
        });
    }

    let node = tree::find_node(nodes, node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    if !tree::fits_depth(nodes, &parent, node) {
        return Err(MutationError::DepthExceeded);
    }

    let index = match to {
        Some(index) => index,
        None => tree::children_of(nodes, &parent).map_or(0, <[Node]>::len),
    };

    Ok(DropAction::Move {
        node_id: node_id.to_string(),
        parent,
        index,
    })
}

fn container_parent(nodes: &[Node], container_id: &str) -> Result<ParentRef, MutationError> {
    match tree::find_node(nodes, container_id) {
        Some(Node::Layout(layout)) => Ok(ParentRef::Container(layout.id.clone())),
        Some(Node::Field(_)) => Err(MutationError::NotAContainer(container_id.to_string())),
        None => Err(MutationError::NodeNotFound(container_id.to_string())),
    }
}
