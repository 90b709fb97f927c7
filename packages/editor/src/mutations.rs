//! # Template Mutations
//!
//! Every change to a template goes through [`Mutation`]: drag-and-drop
//! results, panel commits, inline content commits, translations and
//! template-wide settings.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Removes the node from its current list and inserts it into the target
//!   list at `index`, counted after the removal (clamped to the list end)
//! - Fails if the target is the node itself or one of its descendants
//! - Fails if the result would nest containers deeper than
//!   [`MAX_NESTING_DEPTH`](rsvpkit_model::MAX_NESTING_DEPTH)
//!
//! ### Replace
//! - Swaps a node for a staged copy with the same id and kind
//! - A container keeps its current children
//!
//! ### Remove
//! - Removes the node and all descendants
//!
//! Every mutation validates before touching the tree, so a failed mutation
//! leaves the template exactly as it was.

use rsvpkit_model::tree::{self, ParentRef};
use rsvpkit_model::{
    FieldOption, FieldStyle, LanguageConfig, LayoutProps, Node, Template, TextField, Theme,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Partial update merged into a node. Unset entries are left alone;
/// entries that do not apply to the node's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Merged property by property into the node's own style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_style: Option<FieldStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_props: Option<LayoutProps>,
}

impl FieldPatch {
    pub fn is_empty(&self) -> bool {
        *self == FieldPatch::default()
    }

    pub fn apply_to(&self, node: &mut Node) {
        if let Some(visible) = self.visible {
            node.set_visible(visible);
        }
        if let Some(patch) = &self.field_style {
            node.field_style_mut()
                .get_or_insert_with(FieldStyle::default)
                .merge(patch);
        }

        match node {
            Node::Field(field) => {
                if let Some(label) = &self.label {
                    field.label = label.clone();
                }
                if let Some(name) = &self.name {
                    field.name = name.clone();
                }
                if let Some(placeholder) = &self.placeholder {
                    field.placeholder = Some(placeholder.clone());
                }
                if let Some(required) = self.required {
                    field.required = required;
                }
                if let Some(options) = &self.options {
                    field.options = options.clone();
                }
                if let Some(min) = self.min {
                    field.min = Some(min);
                }
                if let Some(max) = self.max {
                    field.max = Some(max);
                }
                if let Some(content) = &self.content {
                    field.content = Some(content.clone());
                }
                if let Some(level) = self.heading_level {
                    field.heading_level = Some(level.clamp(1, 6));
                }
            }
            Node::Layout(layout) => {
                if let Some(label) = &self.label {
                    layout.label = label.clone();
                }
                if let Some(props) = &self.layout_props {
                    layout.layout_props = props.clone();
                }
            }
        }
    }
}

/// Semantic mutations on a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Add a node at the end of `parent`
    AppendNode { parent: ParentRef, node: Node },

    /// Add a node into `parent` at `index`
    InsertNode {
        parent: ParentRef,
        index: usize,
        node: Node,
    },

    /// Relocate a node, within its list or across parents
    MoveNode {
        node_id: String,
        parent: ParentRef,
        index: usize,
    },

    /// Remove a node and its subtree
    RemoveNode { node_id: String },

    /// Push a staged copy of a node back into the tree
    ReplaceNode { node: Node },

    UpdateField { node_id: String, patch: FieldPatch },

    SetVisibility { node_id: String, visible: bool },

    /// Inline edit of paragraph or heading content
    CommitContent { node_id: String, content: String },

    /// Write one translation; empty `text` removes it
    SetTranslation {
        node_id: String,
        field: TextField,
        language: String,
        text: String,
    },

    SetTheme { theme: Theme },

    SetLanguageConfig { config: LanguageConfig },

    RenameTemplate { title: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Node cannot hold children: {0}")]
    NotAContainer(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Would nest containers deeper than the maximum depth")]
    DepthExceeded,

    #[error("Not applicable: {0}")]
    NotApplicable(String),
}

impl Mutation {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AppendNode { .. } => "append_node",
            Mutation::InsertNode { .. } => "insert_node",
            Mutation::MoveNode { .. } => "move_node",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::ReplaceNode { .. } => "replace_node",
            Mutation::UpdateField { .. } => "update_field",
            Mutation::SetVisibility { .. } => "set_visibility",
            Mutation::CommitContent { .. } => "commit_content",
            Mutation::SetTranslation { .. } => "set_translation",
            Mutation::SetTheme { .. } => "set_theme",
            Mutation::SetLanguageConfig { .. } => "set_language_config",
            Mutation::RenameTemplate { .. } => "rename_template",
        }
    }

    /// Apply mutation to the template with validation
    pub fn apply(&self, template: &mut Template) -> Result<(), MutationError> {
        self.validate(template)?;

        let nodes = &mut template.form_fields;
        match self {
            Mutation::AppendNode { parent, node } => {
                Self::apply_insert(nodes, parent, usize::MAX, node)
            }

            Mutation::InsertNode {
                parent,
                index,
                node,
            } => Self::apply_insert(nodes, parent, *index, node),

            Mutation::MoveNode {
                node_id,
                parent,
                index,
            } => Self::apply_move(nodes, node_id, parent, *index),

            Mutation::RemoveNode { node_id } => tree::remove_node(nodes, node_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::NodeNotFound(node_id.clone())),

            Mutation::ReplaceNode { node } => Self::apply_replace(nodes, node),

            Mutation::UpdateField { node_id, patch } => {
                let target = Self::node_mut(nodes, node_id)?;
                patch.apply_to(target);
                Ok(())
            }

            Mutation::SetVisibility { node_id, visible } => {
                Self::node_mut(nodes, node_id)?.set_visible(*visible);
                Ok(())
            }

            Mutation::CommitContent { node_id, content } => {
                let field = Self::node_mut(nodes, node_id)?
                    .as_field_mut()
                    .ok_or_else(|| MutationError::NotApplicable(node_id.clone()))?;
                field.content = Some(content.clone());
                Ok(())
            }

            Mutation::SetTranslation {
                node_id,
                field,
                language,
                text,
            } => {
                let leaf = Self::node_mut(nodes, node_id)?
                    .as_field_mut()
                    .ok_or_else(|| MutationError::NotApplicable(node_id.clone()))?;
                leaf.set_translation(*field, language, text);
                Ok(())
            }

            Mutation::SetTheme { theme } => {
                template.theme = theme.clone();
                Ok(())
            }

            Mutation::SetLanguageConfig { config } => {
                template.language_config = config.clone();
                Ok(())
            }

            Mutation::RenameTemplate { title } => {
                template.title = title.clone();
                Ok(())
            }
        }
    }

    fn node_mut<'a>(nodes: &'a mut [Node], node_id: &str) -> Result<&'a mut Node, MutationError> {
        tree::find_node_mut(nodes, node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
    }

    fn apply_insert(
        nodes: &mut Vec<Node>,
        parent: &ParentRef,
        index: usize,
        node: &Node,
    ) -> Result<(), MutationError> {
        tree::insert_node(nodes, parent, index, node.clone())
            .map(|_| ())
            .map_err(|_| Self::parent_error(parent))
    }

    fn apply_move(
        nodes: &mut Vec<Node>,
        node_id: &str,
        parent: &ParentRef,
        index: usize,
    ) -> Result<(), MutationError> {
        let origin = tree::locate(nodes, node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
        let node = tree::remove_node(nodes, node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

        match tree::insert_node(nodes, parent, index, node) {
            Ok(_) => Ok(()),
            Err(node) => {
                // Put it back where it was
                let restored = tree::insert_node(nodes, &origin.parent, origin.index, node);
                if let Err(lost) = &restored {
                    warn!(node_id = lost.id(), "Could not restore node after failed move");
                }
                debug_assert!(restored.is_ok(), "origin parent of a moved node must survive");
                Err(Self::parent_error(parent))
            }
        }
    }

    fn apply_replace(nodes: &mut [Node], replacement: &Node) -> Result<(), MutationError> {
        let target = Self::node_mut(nodes, replacement.id())?;
        let mut replacement = replacement.clone();

        if let (Node::Layout(current), Node::Layout(staged)) = (&mut *target, &mut replacement) {
            staged.children = std::mem::take(&mut current.children);
        }

        *target = replacement;
        Ok(())
    }

    fn parent_error(parent: &ParentRef) -> MutationError {
        match parent {
            ParentRef::Root => MutationError::ParentNotFound("root".to_string()),
            ParentRef::Container(id) => MutationError::ParentNotFound(id.clone()),
        }
    }

    /// Check that `parent` exists and can hold children
    fn validate_parent(nodes: &[Node], parent: &ParentRef) -> Result<(), MutationError> {
        match parent {
            ParentRef::Root => Ok(()),
            ParentRef::Container(id) => match tree::find_node(nodes, id) {
                None => Err(MutationError::ParentNotFound(id.clone())),
                Some(Node::Field(_)) => Err(MutationError::NotAContainer(id.clone())),
                Some(Node::Layout(_)) => Ok(()),
            },
        }
    }

    fn validate_new_node(nodes: &[Node], parent: &ParentRef, node: &Node) -> Result<(), MutationError> {
        Self::validate_parent(nodes, parent)?;

        let incoming = std::slice::from_ref(node);
        if !tree::ids_are_unique(incoming) {
            return Err(MutationError::NotApplicable(format!(
                "node {} repeats an id inside its subtree",
                node.id()
            )));
        }
        if let Some(id) = tree::collect_ids(incoming)
            .into_iter()
            .find(|id| tree::contains(nodes, id))
        {
            return Err(MutationError::NotApplicable(format!("id {} already in use", id)));
        }

        if !tree::fits_depth(nodes, parent, node) {
            return Err(MutationError::DepthExceeded);
        }
        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, template: &Template) -> Result<(), MutationError> {
        let nodes = &template.form_fields;

        match self {
            Mutation::AppendNode { parent, node } | Mutation::InsertNode { parent, node, .. } => {
                Self::validate_new_node(nodes, parent, node)
            }

            Mutation::MoveNode {
                node_id, parent, ..
            } => {
                let node = tree::find_node(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

                Self::validate_parent(nodes, parent)?;

                if let ParentRef::Container(parent_id) = parent {
                    if parent_id == node_id || tree::is_descendant(nodes, node_id, parent_id) {
                        return Err(MutationError::CycleDetected);
                    }
                }

                if !tree::fits_depth(nodes, parent, node) {
                    return Err(MutationError::DepthExceeded);
                }
                Ok(())
            }

            Mutation::RemoveNode { node_id }
            | Mutation::UpdateField { node_id, .. }
            | Mutation::SetVisibility { node_id, .. } => {
                tree::find_node(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::ReplaceNode { node } => {
                let current = tree::find_node(nodes, node.id())
                    .ok_or_else(|| MutationError::NodeNotFound(node.id().to_string()))?;
                if current.is_container() != node.is_container() {
                    return Err(MutationError::NotApplicable(format!(
                        "node {} cannot change kind",
                        node.id()
                    )));
                }
                Ok(())
            }

            Mutation::CommitContent { node_id, .. } => {
                let node = tree::find_node(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                match node.as_field() {
                    Some(field) if field.field_type.is_content() => Ok(()),
                    _ => Err(MutationError::NotApplicable(format!(
                        "node {} has no editable content",
                        node_id
                    ))),
                }
            }

            Mutation::SetTranslation {
                node_id, field, ..
            } => {
                let node = tree::find_node(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                match node.as_field() {
                    Some(leaf) if leaf.translatable_fields().contains(field) => Ok(()),
                    _ => Err(MutationError::NotApplicable(format!(
                        "node {} has no translatable {:?}",
                        node_id, field
                    ))),
                }
            }

            Mutation::SetTheme { .. }
            | Mutation::SetLanguageConfig { .. }
            | Mutation::RenameTemplate { .. } => Ok(()),
        }
    }

    /// Mutation that undoes `self` when applied right after it
    pub fn to_inverse(&self, template: &Template) -> Result<Mutation, MutationError> {
        self.validate(template)?;
        let nodes = &template.form_fields;

        let inverse = match self {
            Mutation::AppendNode { node, .. } | Mutation::InsertNode { node, .. } => {
                Mutation::RemoveNode {
                    node_id: node.id().to_string(),
                }
            }

            Mutation::MoveNode { node_id, .. } => {
                let origin = tree::locate(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Mutation::MoveNode {
                    node_id: node_id.clone(),
                    parent: origin.parent,
                    index: origin.index,
                }
            }

            Mutation::RemoveNode { node_id } => {
                let origin = tree::locate(nodes, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let node = Self::snapshot(nodes, node_id)?;
                Mutation::InsertNode {
                    parent: origin.parent,
                    index: origin.index,
                    node,
                }
            }

            Mutation::ReplaceNode { node } => Mutation::ReplaceNode {
                node: Self::snapshot(nodes, node.id())?,
            },

            Mutation::UpdateField { node_id, .. } | Mutation::CommitContent { node_id, .. } => {
                Mutation::ReplaceNode {
                    node: Self::snapshot(nodes, node_id)?,
                }
            }

            Mutation::SetVisibility { node_id, .. } => Mutation::SetVisibility {
                node_id: node_id.clone(),
                visible: Self::snapshot(nodes, node_id)?.visible(),
            },

            Mutation::SetTranslation {
                node_id,
                field,
                language,
                ..
            } => {
                let previous = tree::find_node(nodes, node_id)
                    .and_then(Node::as_field)
                    .and_then(|leaf| leaf.translations(*field).get(language).cloned())
                    .unwrap_or_default();
                Mutation::SetTranslation {
                    node_id: node_id.clone(),
                    field: *field,
                    language: language.clone(),
                    text: previous,
                }
            }

            Mutation::SetTheme { .. } => Mutation::SetTheme {
                theme: template.theme.clone(),
            },

            Mutation::SetLanguageConfig { .. } => Mutation::SetLanguageConfig {
                config: template.language_config.clone(),
            },

            Mutation::RenameTemplate { .. } => Mutation::RenameTemplate {
                title: template.title.clone(),
            },
        };

        Ok(inverse)
    }

    fn snapshot(nodes: &[Node], node_id: &str) -> Result<Node, MutationError> {
        tree::find_node(nodes, node_id)
            .cloned()
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
    }
}
