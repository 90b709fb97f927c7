//! Runtime-mode render pass.
//!
//! Recipient-facing output. Hidden nodes (and the subtree of a hidden
//! container) are dropped, text goes through the translation overlay for
//! the requested language and then through the token scanner so tokens
//! reach the substitution step as intact literal spans. Nothing is
//! editable.

use crate::assets::AssetResolver;
use crate::render::document_shell;
use crate::style::resolve_style;
use crate::vdom::{rich_text, NodeFlags, RenderDocument, RenderMode, RenderNode};
use rsvpkit_model::{Node, Template, TextField, Theme};
use tracing::{debug, info, instrument};

#[instrument(skip(template, assets), fields(nodes = template.form_fields.len()))]
pub fn render_runtime(
    template: &Template,
    language: &str,
    assets: &dyn AssetResolver,
) -> RenderDocument {
    let language = if language.is_empty() {
        template.language_config.primary_language.as_str()
    } else {
        language
    };

    let nodes = runtime_nodes(&template.theme, &template.form_fields, language);
    let document = document_shell(
        template,
        RenderMode::Runtime,
        language.to_string(),
        assets,
        nodes,
    );

    info!(
        language = %language,
        nodes = document.node_ids().len(),
        "Runtime render complete"
    );
    document
}

fn runtime_nodes(theme: &Theme, nodes: &[Node], language: &str) -> Vec<RenderNode> {
    nodes
        .iter()
        .filter(|node| {
            if !node.visible() {
                debug!(node_id = %node.id(), "Skipping hidden node");
            }
            node.visible()
        })
        .map(|node| runtime_node(theme, node, language))
        .collect()
}

fn runtime_node(theme: &Theme, node: &Node, language: &str) -> RenderNode {
    let style = resolve_style(theme, node);

    match node {
        Node::Field(field) => RenderNode::Field {
            id: field.id.clone(),
            field_type: field.field_type,
            name: field.name.clone(),
            label: rich_text(
                field
                    .resolve_text(TextField::Label, language)
                    .unwrap_or_default(),
                false,
            ),
            placeholder: field
                .resolve_text(TextField::Placeholder, language)
                .map(str::to_string),
            required: field.required,
            options: field.options.clone(),
            min: field.min,
            max: field.max,
            heading_level: field.heading_level,
            content: field
                .resolve_text(TextField::Content, language)
                .map(|content| rich_text(content, false)),
            style,
            flags: NodeFlags::default(),
        },
        Node::Layout(layout) => RenderNode::Layout {
            id: layout.id.clone(),
            container_type: layout.container_type,
            label: layout.label.clone(),
            layout: layout.layout_props.clone(),
            style,
            flags: NodeFlags::default(),
            children: runtime_nodes(theme, &layout.children, language),
        },
    }
}
