use crate::node::Node;
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    Single,
    Dual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    pub mode: LanguageMode,
    pub primary_language: String,
    /// Language the translation overlay is authored in when `mode` is dual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_language: Option<String>,
}

/// Translation language of a dual template that names none
pub const DEFAULT_SECONDARY_LANGUAGE: &str = "ar";

impl LanguageConfig {
    pub fn single(primary: impl Into<String>) -> Self {
        Self {
            mode: LanguageMode::Single,
            primary_language: primary.into(),
            secondary_language: None,
        }
    }

    pub fn dual(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            mode: LanguageMode::Dual,
            primary_language: primary.into(),
            secondary_language: Some(secondary.into()),
        }
    }

    pub fn is_dual(&self) -> bool {
        self.mode == LanguageMode::Dual
    }

    /// Language translations are authored in, if any
    pub fn translation_language(&self) -> Option<&str> {
        match self.mode {
            LanguageMode::Single => None,
            LanguageMode::Dual => Some(
                self.secondary_language
                    .as_deref()
                    .unwrap_or(DEFAULT_SECONDARY_LANGUAGE),
            ),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::single("en")
    }
}

/// A complete RSVP template, replaced wholesale on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub form_fields: Vec<Node>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language_config: LanguageConfig,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Template {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            form_fields: Vec::new(),
            theme: Theme::default(),
            language_config: LanguageConfig::default(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_template_json() {
        let template = Template::from_json(r#"{"title":"Gala"}"#).unwrap();
        assert_eq!(template.title, "Gala");
        assert!(template.id.is_none());
        assert!(template.form_fields.is_empty());
        assert_eq!(template.language_config.mode, LanguageMode::Single);
        assert_eq!(template.language_config.translation_language(), None);
    }

    #[test]
    fn test_dual_language_config() {
        let config = LanguageConfig::dual("en", "ar");
        assert!(config.is_dual());
        assert_eq!(config.translation_language(), Some("ar"));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["mode"], "dual");
        assert_eq!(json["primaryLanguage"], "en");
    }

    #[test]
    fn test_single_config_round_trips() {
        let template = Template::new("Gala");
        let json = template.to_json().unwrap();
        assert!(!json.contains("secondaryLanguage"));

        let loaded = Template::from_json(&json).unwrap();
        assert_eq!(loaded, template);
        assert_eq!(loaded.language_config.secondary_language, None);
    }

    #[test]
    fn test_dual_config_round_trips() {
        let mut template = Template::new("Gala");
        template.language_config = LanguageConfig::dual("en", "fr");

        let loaded = Template::from_json(&template.to_json().unwrap()).unwrap();
        assert_eq!(loaded, template);
        assert_eq!(loaded.language_config.translation_language(), Some("fr"));
    }

    #[test]
    fn test_dual_without_secondary_defaults_to_arabic() {
        let config: LanguageConfig =
            serde_json::from_str(r#"{"mode":"dual","primaryLanguage":"en"}"#).unwrap();
        assert_eq!(config.secondary_language, None);
        assert_eq!(config.translation_language(), Some("ar"));
    }
}
