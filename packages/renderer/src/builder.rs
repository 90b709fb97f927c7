//! Builder-mode render pass.
//!
//! Every node is rendered, hidden ones included (flagged so the canvas
//! can mark them). Paragraph and heading content is editable in place;
//! tokens inside it become non-editable chips. Text is shown in the
//! template's primary language.

use crate::assets::AssetResolver;
use crate::render::document_shell;
use crate::style::resolve_style;
use crate::vdom::{rich_text, NodeFlags, RenderDocument, RenderMode, RenderNode};
use rsvpkit_model::{Node, Template, Theme};
use tracing::{info, instrument};

/// Editor state that influences builder output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderView<'a> {
    /// Node whose config panel is open
    pub selected: Option<&'a str>,
    /// Node the inline editor is focused on
    pub editing: Option<&'a str>,
}

#[instrument(skip_all, fields(nodes = template.form_fields.len(), selected = ?view.selected))]
pub fn render_builder(
    template: &Template,
    view: BuilderView<'_>,
    assets: &dyn AssetResolver,
) -> RenderDocument {
    let nodes: Vec<RenderNode> = template
        .form_fields
        .iter()
        .map(|node| builder_node(&template.theme, node, &view))
        .collect();

    let language = template.language_config.primary_language.clone();
    let document = document_shell(template, RenderMode::Builder, language, assets, nodes);

    info!(nodes = document.node_ids().len(), "Builder render complete");
    document
}

fn builder_node(theme: &Theme, node: &Node, view: &BuilderView<'_>) -> RenderNode {
    let editable = node
        .as_field()
        .map(|field| field.field_type.is_content())
        .unwrap_or(false);

    let flags = NodeFlags {
        hidden: !node.visible(),
        editable,
        selected: view.selected == Some(node.id()),
        editing: view.editing == Some(node.id()),
    };
    let style = resolve_style(theme, node);

    match node {
        Node::Field(field) => RenderNode::Field {
            id: field.id.clone(),
            field_type: field.field_type,
            name: field.name.clone(),
            label: rich_text(&field.label, false),
            placeholder: field.placeholder.clone(),
            required: field.required,
            options: field.options.clone(),
            min: field.min,
            max: field.max,
            heading_level: field.heading_level,
            content: field
                .content
                .as_deref()
                .map(|content| rich_text(content, editable)),
            style,
            flags,
        },
        Node::Layout(layout) => RenderNode::Layout {
            id: layout.id.clone(),
            container_type: layout.container_type,
            label: layout.label.clone(),
            layout: layout.layout_props.clone(),
            style,
            flags,
            children: layout
                .children
                .iter()
                .map(|child| builder_node(theme, child, view))
                .collect(),
        },
    }
}
