//! Per-node style overrides.
//!
//! The set of overridable properties is closed, so it is a struct of
//! optional fields rather than an open map. An unset field falls through
//! to the theme when the style is resolved.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "400",
            FontWeight::Medium => "500",
            FontWeight::Semibold => "600",
            FontWeight::Bold => "700",
        }
    }
}

/// Style overrides attached to a single node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Any CSS width value ("50%", "240px")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl FieldStyle {
    pub fn is_empty(&self) -> bool {
        *self == FieldStyle::default()
    }

    /// Overlay every property set in `patch` onto `self`
    pub fn merge(&mut self, patch: &FieldStyle) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field.clone();
                    }
                )*
            };
        }

        take!(
            text_color,
            background_color,
            border_color,
            border_width,
            border_radius,
            padding,
            margin,
            font_size,
            font_weight,
            text_align,
            width
        );
    }
}
