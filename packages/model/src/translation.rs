//! # Translation Overlay
//!
//! Per-language text substitutions layered over a node's primary text.
//!
//! Lookup is a single hop: `node.<field>Translations[lang]`, otherwise the
//! node's own `<field>`. A missing language never chains through another
//! language, whatever language the primary text is written in.

use crate::node::{LayoutContainer, LeafField, Node, TranslationMap};
use crate::visitor::{walk_layout, Visitor};
use serde::{Deserialize, Serialize};

/// Translatable text properties of a leaf field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Label,
    Placeholder,
    Content,
}

impl LeafField {
    pub fn translations(&self, field: TextField) -> &TranslationMap {
        match field {
            TextField::Label => &self.label_translations,
            TextField::Placeholder => &self.placeholder_translations,
            TextField::Content => &self.content_translations,
        }
    }

    pub fn translations_mut(&mut self, field: TextField) -> &mut TranslationMap {
        match field {
            TextField::Label => &mut self.label_translations,
            TextField::Placeholder => &mut self.placeholder_translations,
            TextField::Content => &mut self.content_translations,
        }
    }

    /// Untranslated value of `field`
    pub fn primary_text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Label => Some(&self.label),
            TextField::Placeholder => self.placeholder.as_deref(),
            TextField::Content => self.content.as_deref(),
        }
    }

    /// Text of `field` in `lang`, falling back once to the primary value
    pub fn resolve_text(&self, field: TextField, lang: &str) -> Option<&str> {
        self.translations(field)
            .get(lang)
            .map(String::as_str)
            .or_else(|| self.primary_text(field))
    }

    /// Write a translation; an empty string removes it and restores fallback
    pub fn set_translation(&mut self, field: TextField, lang: &str, text: &str) {
        let map = self.translations_mut(field);
        if text.is_empty() {
            map.remove(lang);
        } else {
            map.insert(lang.to_string(), text.to_string());
        }
    }

    /// Fields an editing surface offers for translation
    pub fn translatable_fields(&self) -> &'static [TextField] {
        if self.field_type.is_content() {
            &[TextField::Content]
        } else if self.field_type.is_input() {
            &[TextField::Label, TextField::Placeholder]
        } else {
            &[]
        }
    }
}

/// Resolve `field` of `node` for `lang`.
///
/// Containers only carry an untranslated label.
pub fn resolve<'a>(node: &'a Node, field: TextField, lang: &str) -> Option<&'a str> {
    match node {
        Node::Field(leaf) => leaf.resolve_text(field, lang),
        Node::Layout(layout) => match field {
            TextField::Label => Some(&layout.label),
            TextField::Placeholder | TextField::Content => None,
        },
    }
}

/// One line of the dual-language editing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRow {
    pub node_id: String,
    pub field: TextField,
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
}

struct RowCollector<'l> {
    lang: &'l str,
    rows: Vec<TranslationRow>,
}

impl Visitor for RowCollector<'_> {
    fn visit_field(&mut self, field: &LeafField) {
        for text_field in field.translatable_fields() {
            self.rows.push(TranslationRow {
                node_id: field.id.clone(),
                field: *text_field,
                primary: field.primary_text(*text_field).unwrap_or_default().to_string(),
                translated: field.translations(*text_field).get(self.lang).cloned(),
            });
        }
    }

    fn visit_layout(&mut self, layout: &LayoutContainer) {
        walk_layout(self, layout);
    }
}

/// Every translatable text in render order, with its current `lang` value
pub fn translation_rows(nodes: &[Node], lang: &str) -> Vec<TranslationRow> {
    let mut collector = RowCollector {
        lang,
        rows: Vec::new(),
    };
    collector.visit_nodes(nodes);
    collector.rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::IdGenerator;
    use crate::node::{create_container, create_field, ContainerType, FieldType};

    #[test]
    fn test_translation_fallback() {
        let mut ids = IdGenerator::new("i18n");

        let mut email = create_field(FieldType::Text, &mut ids);
        email.label = "Email".to_string();
        email
            .label_translations
            .insert("ar".to_string(), "البريد".to_string());
        let email = Node::Field(email);

        assert_eq!(resolve(&email, TextField::Label, "en"), Some("Email"));
        assert_eq!(resolve(&email, TextField::Label, "ar"), Some("البريد"));

        let mut phone = create_field(FieldType::Phone, &mut ids);
        phone.label = "Phone".to_string();
        let phone = Node::Field(phone);
        assert_eq!(resolve(&phone, TextField::Label, "ar"), Some("Phone"));
    }

    #[test]
    fn test_fallback_never_chains() {
        let mut ids = IdGenerator::new("i18n");
        let mut field = create_field(FieldType::Text, &mut ids);
        field.label = "Nom".to_string();
        field
            .label_translations
            .insert("en".to_string(), "Name".to_string());

        // "ar" is missing: falls straight to the primary text, not to "en"
        assert_eq!(field.resolve_text(TextField::Label, "ar"), Some("Nom"));
    }

    #[test]
    fn test_fields_resolve_independently() {
        let mut ids = IdGenerator::new("i18n");
        let mut field = create_field(FieldType::Text, &mut ids);
        field.set_translation(TextField::Label, "ar", "الاسم");

        assert_eq!(field.resolve_text(TextField::Label, "ar"), Some("الاسم"));
        assert_eq!(field.resolve_text(TextField::Placeholder, "ar"), Some("Enter text"));

        field.set_translation(TextField::Label, "ar", "");
        assert!(field.label_translations.is_empty());
    }

    #[test]
    fn test_translation_rows_per_type() {
        let mut ids = IdGenerator::new("rows");
        let heading = create_field(FieldType::Heading, &mut ids);
        let divider = create_field(FieldType::Divider, &mut ids);
        let mut row = create_container(ContainerType::Row, &mut ids);
        let mut select = create_field(FieldType::Select, &mut ids);
        select.set_translation(TextField::Label, "ar", "اختر");
        let select_id = select.id.clone();
        row.children.push(select.into());

        let nodes: Vec<Node> = vec![heading.into(), divider.into(), row.into()];
        let rows = translation_rows(&nodes, "ar");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].field, TextField::Content);
        assert_eq!(rows[1].node_id, select_id);
        assert_eq!(rows[1].field, TextField::Label);
        assert_eq!(rows[1].translated.as_deref(), Some("اختر"));
        assert_eq!(rows[2].field, TextField::Placeholder);
        assert_eq!(rows[2].translated, None);
    }
}
