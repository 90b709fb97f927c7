//! # rsvpkit model
//!
//! Data model for RSVP templates: the recursive node tree, per-node
//! styles, the theme, the template envelope and the translation overlay.
//!
//! ```text
//! Template
//!  ├─ theme            (template-wide defaults)
//!  ├─ languageConfig   (single | dual)
//!  └─ formFields: [Node]
//!        ├─ Field  (text, select, heading, ...)
//!        └─ Layout (container | row | column)
//!              └─ children: [Node]
//! ```

pub mod id_generator;
pub mod node;
pub mod style;
pub mod template;
pub mod theme;
pub mod translation;
pub mod tree;
pub mod visitor;

pub use id_generator::{get_seed, IdGenerator};
pub use node::{
    create_container, create_field, Align, ContainerType, Direction, FieldOption, FieldType,
    Justify, LayoutContainer, LayoutProps, LeafField, Node, TranslationMap,
};
pub use style::{FieldStyle, FontWeight, TextAlign};
pub use template::{LanguageConfig, LanguageMode, Template, DEFAULT_SECONDARY_LANGUAGE};
pub use theme::{AssetRef, Theme};
pub use translation::{resolve, translation_rows, TextField, TranslationRow};
pub use tree::{Location, ParentRef, MAX_NESTING_DEPTH};
pub use visitor::Visitor;
