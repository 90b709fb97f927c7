//! # Theme Resolver
//!
//! `resolve_style(theme, node)` computes the effective presentation of a
//! node. It starts from type-aware theme defaults and overlays the node's
//! own `fieldStyle`; any property the node leaves unset falls through to
//! the theme. The function is pure and never mutates its inputs.

use rsvpkit_model::{FieldStyle, FieldType, FontWeight, LeafField, Node, TextAlign, Theme};
use serde::{Deserialize, Serialize};

/// Effective style of one node after theme resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub text_color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    pub padding: u32,
    pub margin: u32,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

const TRANSPARENT: &str = "transparent";

/// Font size in pixels for heading levels 1-6
pub fn heading_font_size(level: u8) -> u32 {
    match level.clamp(1, 6) {
        1 => 32,
        2 => 28,
        3 => 24,
        4 => 20,
        5 => 16,
        _ => 14,
    }
}

fn field_defaults(theme: &Theme, field: &LeafField) -> ResolvedStyle {
    let mut style = ResolvedStyle {
        text_color: theme.text_color.clone(),
        background_color: TRANSPARENT.to_string(),
        border_color: theme.border_color.clone(),
        border_width: 0,
        border_radius: 0,
        padding: 0,
        margin: 0,
        font_size: 16,
        font_weight: FontWeight::Normal,
        text_align: TextAlign::Left,
        font_family: theme.font_family.clone(),
        width: None,
    };

    match field.field_type {
        FieldType::Heading => {
            style.font_size = heading_font_size(field.heading_level.unwrap_or(3));
            style.font_weight = FontWeight::Bold;
        }
        FieldType::Paragraph => {}
        FieldType::Divider => {
            style.border_width = 1;
            style.margin = 16;
        }
        FieldType::Checkbox | FieldType::Radio => {
            style.border_radius = theme.border_radius;
        }
        FieldType::Text
        | FieldType::Phone
        | FieldType::Number
        | FieldType::Date
        | FieldType::Textarea
        | FieldType::Select => {
            style.background_color = theme.input_background.clone();
            style.border_width = 1;
            style.border_radius = theme.border_radius;
            style.padding = theme.field_padding;
        }
    }

    style
}

fn layout_defaults(theme: &Theme, padding: u32) -> ResolvedStyle {
    ResolvedStyle {
        text_color: theme.text_color.clone(),
        background_color: TRANSPARENT.to_string(),
        border_color: theme.border_color.clone(),
        border_width: 0,
        border_radius: theme.border_radius,
        padding,
        margin: 0,
        font_size: 16,
        font_weight: FontWeight::Normal,
        text_align: TextAlign::Left,
        font_family: theme.font_family.clone(),
        width: None,
    }
}

fn overlay(style: &mut ResolvedStyle, own: &FieldStyle) {
    if let Some(color) = &own.text_color {
        style.text_color = color.clone();
    }
    if let Some(color) = &own.background_color {
        style.background_color = color.clone();
    }
    if let Some(color) = &own.border_color {
        style.border_color = color.clone();
    }
    if let Some(width) = own.border_width {
        style.border_width = width;
    }
    if let Some(radius) = own.border_radius {
        style.border_radius = radius;
    }
    if let Some(padding) = own.padding {
        style.padding = padding;
    }
    if let Some(margin) = own.margin {
        style.margin = margin;
    }
    if let Some(size) = own.font_size {
        style.font_size = size;
    }
    if let Some(weight) = own.font_weight {
        style.font_weight = weight;
    }
    if let Some(align) = own.text_align {
        style.text_align = align;
    }
    if let Some(width) = &own.width {
        style.width = Some(width.clone());
    }
}

/// Resolve the effective style of `node` under `theme`
pub fn resolve_style(theme: &Theme, node: &Node) -> ResolvedStyle {
    let mut style = match node {
        Node::Field(field) => field_defaults(theme, field),
        Node::Layout(layout) => layout_defaults(theme, layout.layout_props.padding),
    };

    if let Some(own) = node.field_style() {
        overlay(&mut style, own);
    }

    style
}

impl ResolvedStyle {
    /// CSS declarations in a fixed order
    pub fn to_css(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![
            ("color", self.text_color.clone()),
            ("background-color", self.background_color.clone()),
        ];

        if self.border_width > 0 {
            decls.push((
                "border",
                format!("{}px solid {}", self.border_width, self.border_color),
            ));
        }
        if self.border_radius > 0 {
            decls.push(("border-radius", format!("{}px", self.border_radius)));
        }
        if self.padding > 0 {
            decls.push(("padding", format!("{}px", self.padding)));
        }
        if self.margin > 0 {
            decls.push(("margin", format!("{}px 0", self.margin)));
        }

        decls.push(("font-family", self.font_family.clone()));
        decls.push(("font-size", format!("{}px", self.font_size)));
        decls.push(("font-weight", self.font_weight.as_css().to_string()));
        decls.push(("text-align", self.text_align.as_css().to_string()));

        if let Some(width) = &self.width {
            decls.push(("width", width.clone()));
        }

        decls
    }

    pub fn to_inline_css(&self) -> String {
        self.to_css()
            .into_iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvpkit_model::{create_container, create_field, ContainerType, IdGenerator};

    #[test]
    fn test_resolve_is_deterministic_and_pure() {
        let mut ids = IdGenerator::new("style");
        let mut field = create_field(FieldType::Text, &mut ids);
        field.field_style = Some(FieldStyle {
            border_radius: Some(2),
            ..Default::default()
        });
        let node = Node::Field(field);
        let theme = Theme::default();

        let node_before = node.clone();
        let theme_before = theme.clone();

        let first = resolve_style(&theme, &node);
        let second = resolve_style(&theme, &node);

        assert_eq!(first, second);
        assert_eq!(node, node_before);
        assert_eq!(theme, theme_before);
    }

    #[test]
    fn test_node_style_wins_over_theme() {
        let mut ids = IdGenerator::new("style");
        let mut field = create_field(FieldType::Text, &mut ids);
        field.field_style = Some(FieldStyle {
            text_color: Some("#ff0000".to_string()),
            ..Default::default()
        });
        let theme = Theme {
            text_color: "#00ff00".to_string(),
            border_radius: 10,
            ..Default::default()
        };

        let style = resolve_style(&theme, &Node::Field(field));
        assert_eq!(style.text_color, "#ff0000");
        // unset node properties fall through
        assert_eq!(style.border_radius, 10);
        assert_eq!(style.background_color, theme.input_background);
    }

    #[test]
    fn test_heading_size_follows_level() {
        let mut ids = IdGenerator::new("style");
        let mut heading = create_field(FieldType::Heading, &mut ids);
        heading.heading_level = Some(1);
        let style = resolve_style(&Theme::default(), &Node::Field(heading));
        assert_eq!(style.font_size, 32);
        assert_eq!(style.font_weight, FontWeight::Bold);
        assert_eq!(heading_font_size(9), 14);
    }

    #[test]
    fn test_layout_padding_from_props() {
        let mut ids = IdGenerator::new("style");
        let row = create_container(ContainerType::Row, &mut ids);
        let style = resolve_style(&Theme::default(), &Node::Layout(row));
        assert_eq!(style.padding, 8);
        assert_eq!(style.border_width, 0);

        let css = style.to_inline_css();
        assert!(css.contains("padding: 8px"));
        assert!(!css.contains("border:"));
    }
}
