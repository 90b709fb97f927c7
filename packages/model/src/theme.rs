//! Template-wide presentation defaults.
//!
//! A theme is independent of per-node `fieldStyle`; where both describe
//! the same visual property the node wins.

use serde::{Deserialize, Serialize};

/// Image reference as handed over by the asset collaborator. An uploaded
/// handle and a stored URL are interchangeable for the same property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    Url(String),
    Upload { handle: String },
}

impl AssetRef {
    pub fn url(url: impl Into<String>) -> Self {
        AssetRef::Url(url.into())
    }

    pub fn upload(handle: impl Into<String>) -> Self {
        AssetRef::Upload {
            handle: handle.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub text_color: String,
    pub background_color: String,
    pub card_background: String,
    pub input_background: String,
    pub border_color: String,
    /// Pixels
    pub border_radius: u32,
    /// Pixels
    pub field_padding: u32,
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<AssetRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_image: Option<AssetRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    pub submit_button_text: String,
    pub accept_button_text: String,
    pub decline_button_text: String,
    pub success_message: String,
    pub decline_message: String,
    /// Ask declining recipients for a reason
    pub collect_decline_reason: bool,
    pub decline_reason_required: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#4f46e5".to_string(),
            text_color: "#1f2937".to_string(),
            background_color: "#f9fafb".to_string(),
            card_background: "#ffffff".to_string(),
            input_background: "#ffffff".to_string(),
            border_color: "#d1d5db".to_string(),
            border_radius: 8,
            field_padding: 12,
            font_family: "Inter, sans-serif".to_string(),
            banner_image: None,
            footer_image: None,
            footer_text: None,
            submit_button_text: "Submit RSVP".to_string(),
            accept_button_text: "Accept".to_string(),
            decline_button_text: "Decline".to_string(),
            success_message: "Thank you for your response!".to_string(),
            decline_message: "We're sorry you can't make it.".to_string(),
            collect_decline_reason: false,
            decline_reason_required: false,
        }
    }
}
