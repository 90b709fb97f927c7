//! # Variable Tokens
//!
//! Recipient personalization placeholders come in two bracket syntaxes,
//! `((name))` and `{{name}}`. Text is scanned left to right for
//! non-overlapping matches; each match is an atomic token and every span
//! between matches is a literal. Token values are never substituted here.

use once_cell::sync::Lazy;
use rsvpkit_model::{LeafField, Node, TextField, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static TOKEN_PATTERN: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"\(\([^)]+\)\)|\{\{[^}]+\}\}").expect("token pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSyntax {
    /// `((name))`
    Paren,
    /// `{{name}}`
    Brace,
}

/// A borrowed piece of scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Token {
        /// Full match including brackets
        raw: &'a str,
        /// Text between the brackets
        name: &'a str,
        syntax: TokenSyntax,
    },
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Literal(text) => text,
            Segment::Token { raw, .. } => raw,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Segment::Token { .. })
    }
}

/// Split `text` into alternating literal and token segments.
///
/// The result always starts and ends with a literal, so `n` tokens yield
/// `n + 1` literals (some possibly empty). Concatenating every segment
/// yields `text` exactly.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in TOKEN_PATTERN.find_iter(text) {
        segments.push(Segment::Literal(&text[cursor..found.start()]));

        let raw = found.as_str();
        let syntax = if raw.starts_with("((") {
            TokenSyntax::Paren
        } else {
            TokenSyntax::Brace
        };
        segments.push(Segment::Token {
            raw,
            name: &raw[2..raw.len() - 2],
            syntax,
        });

        cursor = found.end();
    }

    segments.push(Segment::Literal(&text[cursor..]));
    segments
}

pub fn has_tokens(text: &str) -> bool {
    TOKEN_PATTERN.is_match(text)
}

struct TokenCollector<'l> {
    languages: &'l [&'l str],
    names: BTreeSet<String>,
}

impl TokenCollector<'_> {
    fn collect(&mut self, text: &str) {
        for segment in scan(text) {
            if let Segment::Token { name, .. } = segment {
                self.names.insert(name.to_string());
            }
        }
    }
}

impl Visitor for TokenCollector<'_> {
    fn visit_field(&mut self, field: &LeafField) {
        for text_field in [TextField::Label, TextField::Placeholder, TextField::Content] {
            if let Some(primary) = field.primary_text(text_field) {
                self.collect(primary);
            }
            for lang in self.languages {
                if let Some(translated) = field.translations(text_field).get(*lang) {
                    self.collect(translated);
                }
            }
        }
    }
}

/// Distinct token names used anywhere in the tree, including the given
/// translation languages
pub fn collect_token_names(nodes: &[Node], languages: &[&str]) -> Vec<String> {
    let mut collector = TokenCollector {
        languages,
        names: BTreeSet::new(),
    };
    collector.visit_nodes(nodes);
    collector.names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvpkit_model::{create_field, FieldType, IdGenerator};

    #[test]
    fn test_token_atomicity() {
        let text = "Hello ((firstname)), visit {{event.link}}";
        let segments = scan(text);

        let tokens: Vec<_> = segments.iter().filter(|s| s.is_token()).collect();
        let literals: Vec<_> = segments.iter().filter(|s| !s.is_token()).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(literals.len(), 3);

        let rebuilt: String = segments.iter().map(|s| s.as_str()).collect();
        assert_eq!(rebuilt, text);

        assert_eq!(
            segments[1],
            Segment::Token {
                raw: "((firstname))",
                name: "firstname",
                syntax: TokenSyntax::Paren
            }
        );
        assert_eq!(
            segments[3],
            Segment::Token {
                raw: "{{event.link}}",
                name: "event.link",
                syntax: TokenSyntax::Brace
            }
        );
    }

    #[test]
    fn test_boundary_literals() {
        let segments = scan("((a)) and {{b}} today");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Literal(""));
        assert_eq!(segments[2], Segment::Literal(" and "));
        assert_eq!(segments[4], Segment::Literal(" today"));
    }

    #[test]
    fn test_unbalanced_brackets_stay_literal() {
        let text = "((open and }} close {{ x";
        let segments = scan(text);
        assert_eq!(segments, vec![Segment::Literal(text)]);
        assert!(!has_tokens(text));
    }

    #[test]
    fn test_syntaxes_do_not_mix() {
        // "((name}}" is not a token in either syntax
        assert!(scan("((name}}").iter().all(|s| !s.is_token()));
        assert_eq!(scan(""), vec![Segment::Literal("")]);
    }

    #[test]
    fn test_adjacent_tokens() {
        let segments = scan("((a)){{b}}");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[2], Segment::Literal(""));
        assert_eq!(segments.iter().filter(|s| s.is_token()).count(), 2);
    }

    #[test]
    fn test_collect_token_names() {
        let mut ids = IdGenerator::new("tokens");
        let mut paragraph = create_field(FieldType::Paragraph, &mut ids);
        paragraph.content = Some("Dear ((firstname)) ((lastname))".to_string());
        paragraph
            .content_translations
            .insert("ar".to_string(), "عزيزي ((firstname)) {{seat}}".to_string());

        let nodes = vec![Node::Field(paragraph)];
        assert_eq!(
            collect_token_names(&nodes, &[]),
            vec!["firstname".to_string(), "lastname".to_string()]
        );
        assert_eq!(
            collect_token_names(&nodes, &["ar"]),
            vec![
                "firstname".to_string(),
                "lastname".to_string(),
                "seat".to_string()
            ]
        );
    }
}
