use crate::style::ResolvedStyle;
use crate::tokens::{scan, Segment};
use rsvpkit_model::{ContainerType, FieldOption, FieldType, LayoutProps};
use serde::{Deserialize, Serialize};

/// Which render contract produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Builder,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn for_language(lang: &str) -> Self {
        let primary = lang.split(['-', '_']).next().unwrap_or(lang);
        match primary {
            "ar" | "he" | "fa" | "ur" => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Piece of rendered text. Tokens are atomic and never editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TextSpan {
    Literal { text: String, editable: bool },
    Token { raw: String, name: String },
}

pub type RichText = Vec<TextSpan>;

/// Scan `text` into spans, dropping empty boundary literals
pub fn rich_text(text: &str, editable: bool) -> RichText {
    scan(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Literal("") => None,
            Segment::Literal(literal) => Some(TextSpan::Literal {
                text: literal.to_string(),
                editable,
            }),
            Segment::Token { raw, name, .. } => Some(TextSpan::Token {
                raw: raw.to_string(),
                name: name.to_string(),
            }),
        })
        .collect()
}

/// Literal text of a span list, tokens kept verbatim
pub fn plain_text(text: &[TextSpan]) -> String {
    text.iter()
        .map(|span| match span {
            TextSpan::Literal { text, .. } => text.as_str(),
            TextSpan::Token { raw, .. } => raw.as_str(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFlags {
    /// Node has `visible = false` (builder mode only; runtime drops it)
    pub hidden: bool,
    /// Content can be edited in place
    pub editable: bool,
    /// Config panel is open on this node
    pub selected: bool,
    /// Inline editor currently has focus here
    pub editing: bool,
}

/// Rendered template node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderNode {
    Field {
        id: String,
        field_type: FieldType,
        name: String,
        label: RichText,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        required: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        options: Vec<FieldOption>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        heading_level: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<RichText>,
        style: ResolvedStyle,
        flags: NodeFlags,
    },
    Layout {
        id: String,
        container_type: ContainerType,
        label: String,
        layout: LayoutProps,
        style: ResolvedStyle,
        flags: NodeFlags,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    pub fn id(&self) -> &str {
        match self {
            RenderNode::Field { id, .. } | RenderNode::Layout { id, .. } => id,
        }
    }

    pub fn flags(&self) -> NodeFlags {
        match self {
            RenderNode::Field { flags, .. } | RenderNode::Layout { flags, .. } => *flags,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Layout { children, .. } => children,
            RenderNode::Field { .. } => &[],
        }
    }

    /// Content text with tokens intact, if the node carries any
    pub fn content_text(&self) -> Option<String> {
        match self {
            RenderNode::Field {
                content: Some(content),
                ..
            } => Some(plain_text(content)),
            _ => None,
        }
    }

    pub fn label_text(&self) -> String {
        match self {
            RenderNode::Field { label, .. } => plain_text(label),
            RenderNode::Layout { label, .. } => label.clone(),
        }
    }
}

/// Accept/decline controls and the messages shown after responding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOptions {
    pub accept_text: String,
    pub decline_text: String,
    pub success_message: String,
    pub decline_message: String,
    /// Offer a free-text reason when declining
    pub collect_decline_reason: bool,
    pub decline_reason_required: bool,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDocument {
    pub mode: RenderMode,
    pub language: String,
    pub direction: TextDirection,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<RichText>,
    pub submit_text: String,
    pub response: ResponseOptions,
    pub background_color: String,
    pub card_background: String,
    pub primary_color: String,
    pub nodes: Vec<RenderNode>,
}

impl RenderDocument {
    /// Every rendered node id in pre-order
    pub fn node_ids(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [RenderNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(node.id());
                walk(node.children(), out);
            }
        }

        let mut ids = Vec::new();
        walk(&self.nodes, &mut ids);
        ids
    }

    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        fn walk<'a>(nodes: &'a [RenderNode], id: &str) -> Option<&'a RenderNode> {
            for node in nodes {
                if node.id() == id {
                    return Some(node);
                }
                if let Some(found) = walk(node.children(), id) {
                    return Some(found);
                }
            }
            None
        }

        walk(&self.nodes, id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_keeps_tokens_atomic() {
        let spans = rich_text("Hi ((firstname))!", true);
        assert_eq!(
            spans,
            vec![
                TextSpan::Literal {
                    text: "Hi ".to_string(),
                    editable: true
                },
                TextSpan::Token {
                    raw: "((firstname))".to_string(),
                    name: "firstname".to_string()
                },
                TextSpan::Literal {
                    text: "!".to_string(),
                    editable: true
                },
            ]
        );
        assert_eq!(plain_text(&spans), "Hi ((firstname))!");
    }

    #[test]
    fn test_rich_text_drops_empty_literals() {
        let spans = rich_text("{{a}}", false);
        assert_eq!(spans.len(), 1);
        assert!(rich_text("", false).is_empty());
    }

    #[test]
    fn test_direction_for_language() {
        assert_eq!(TextDirection::for_language("ar"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_language("he-IL"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_language("en"), TextDirection::Ltr);
    }
}
