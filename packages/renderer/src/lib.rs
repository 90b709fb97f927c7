//! # rsvpkit renderer
//!
//! Turns a [`Template`](rsvpkit_model::Template) into a [`RenderDocument`]
//! under one of two contracts:
//!
//! - **builder**: every node (hidden ones flagged), editable content,
//!   tokens shown as non-editable chips, selection markers
//! - **runtime**: hidden subtrees removed, translations applied, tokens
//!   left intact for downstream substitution
//!
//! Both passes share style resolution ([`resolve_style`]) and the token
//! scanner ([`scan`]). [`to_html`] serializes either document.

pub mod assets;
pub mod builder;
pub mod html;
pub mod render;
pub mod runtime;
pub mod style;
pub mod tokens;
pub mod vdom;

pub use assets::{AssetResolver, DefaultAssets};
pub use builder::{render_builder, BuilderView};
pub use html::{to_html, HtmlOptions};
pub use render::{render, RenderRequest};
pub use runtime::render_runtime;
pub use style::{resolve_style, ResolvedStyle};
pub use tokens::{collect_token_names, has_tokens, scan, Segment, TokenSyntax};
pub use vdom::{
    plain_text, rich_text, NodeFlags, RenderDocument, RenderMode, RenderNode, ResponseOptions,
    RichText, TextDirection, TextSpan,
};
