use crate::assets::AssetResolver;
use crate::builder::{render_builder, BuilderView};
use crate::runtime::render_runtime;
use crate::vdom::{
    rich_text, RenderDocument, RenderMode, RenderNode, ResponseOptions, TextDirection,
};
use rsvpkit_model::Template;

/// Explicit mode flag selecting one of the two render passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest<'a> {
    Builder(BuilderView<'a>),
    Runtime { language: &'a str },
}

impl RenderRequest<'_> {
    pub fn mode(&self) -> RenderMode {
        match self {
            RenderRequest::Builder(_) => RenderMode::Builder,
            RenderRequest::Runtime { .. } => RenderMode::Runtime,
        }
    }
}

/// Render `template` with the pass selected by `request`
pub fn render(
    template: &Template,
    request: RenderRequest<'_>,
    assets: &dyn AssetResolver,
) -> RenderDocument {
    match request {
        RenderRequest::Builder(view) => render_builder(template, view, assets),
        RenderRequest::Runtime { language } => render_runtime(template, language, assets),
    }
}

/// Template-level chrome shared by both passes
pub(crate) fn document_shell(
    template: &Template,
    mode: RenderMode,
    language: String,
    assets: &dyn AssetResolver,
    nodes: Vec<RenderNode>,
) -> RenderDocument {
    let theme = &template.theme;

    RenderDocument {
        mode,
        direction: TextDirection::for_language(&language),
        language,
        title: template.title.clone(),
        banner: theme
            .banner_image
            .as_ref()
            .and_then(|asset| assets.resolve(asset)),
        footer_image: theme
            .footer_image
            .as_ref()
            .and_then(|asset| assets.resolve(asset)),
        footer_text: theme
            .footer_text
            .as_deref()
            .map(|text| rich_text(text, false)),
        submit_text: theme.submit_button_text.clone(),
        response: ResponseOptions {
            accept_text: theme.accept_button_text.clone(),
            decline_text: theme.decline_button_text.clone(),
            success_message: theme.success_message.clone(),
            decline_message: theme.decline_message.clone(),
            collect_decline_reason: theme.collect_decline_reason,
            decline_reason_required: theme.decline_reason_required,
        },
        background_color: theme.background_color.clone(),
        card_background: theme.card_background.clone(),
        primary_color: theme.primary_color.clone(),
        nodes,
    }
}
