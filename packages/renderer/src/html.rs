//! HTML serializer for render documents.
//!
//! Builder output carries `data-node-id`, `contenteditable` regions and
//! token chips; runtime output is plain markup with token text left as
//! written for the substitution step.

use crate::vdom::{RenderDocument, RenderMode, RenderNode, ResponseOptions, TextSpan};
use rsvpkit_model::{FieldOption, FieldType, LayoutProps};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Wrap the form in `<!DOCTYPE html>`, `<head>` and `<body>`
    pub full_document: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            full_document: true,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: HtmlOptions,
    mode: RenderMode,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions, mode: RenderMode) -> Self {
        Self {
            options,
            mode,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn is_builder(&self) -> bool {
        self.mode == RenderMode::Builder
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a render document to HTML
pub fn to_html(document: &RenderDocument, options: HtmlOptions) -> String {
    let full = options.full_document;
    let mut ctx = Context::new(options, document.mode);

    if full {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line(&format!(
            "<html lang=\"{}\" dir=\"{}\">",
            escape_html(&document.language),
            document.direction.as_str()
        ));
        ctx.indent();
        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        ctx.add_line(&format!("<title>{}</title>", escape_html(&document.title)));
        ctx.dedent();
        ctx.add_line("</head>");
        ctx.add_line(&format!(
            "<body style=\"background-color: {}\">",
            escape_html(&document.background_color)
        ));
        ctx.indent();
    }

    let mode_class = match document.mode {
        RenderMode::Builder => "rsvp-form rsvp-builder",
        RenderMode::Runtime => "rsvp-form",
    };
    ctx.add_line(&format!(
        "<form class=\"{}\" dir=\"{}\" style=\"background-color: {}\">",
        mode_class,
        document.direction.as_str(),
        escape_html(&document.card_background)
    ));
    ctx.indent();

    if let Some(banner) = &document.banner {
        ctx.add_line(&format!(
            "<img class=\"rsvp-banner\" src=\"{}\" alt=\"\" />",
            escape_html(banner)
        ));
    }

    for node in &document.nodes {
        write_node(node, &mut ctx);
    }

    write_response(&document.response, &mut ctx);

    ctx.add_line(&format!(
        "<button type=\"submit\" class=\"rsvp-submit\" style=\"background-color: {}\">{}</button>",
        escape_html(&document.primary_color),
        escape_html(&document.submit_text)
    ));

    ctx.add_line(&format!(
        "<p class=\"rsvp-message rsvp-success\" hidden>{}</p>",
        escape_html(&document.response.success_message)
    ));
    ctx.add_line(&format!(
        "<p class=\"rsvp-message rsvp-declined\" hidden>{}</p>",
        escape_html(&document.response.decline_message)
    ));

    if let Some(footer_image) = &document.footer_image {
        ctx.add_line(&format!(
            "<img class=\"rsvp-footer-image\" src=\"{}\" alt=\"\" />",
            escape_html(footer_image)
        ));
    }
    if let Some(footer_text) = &document.footer_text {
        let text = spans_html(footer_text, &ctx);
        ctx.add_line(&format!("<footer class=\"rsvp-footer\">{}</footer>", text));
    }

    ctx.dedent();
    ctx.add_line("</form>");

    if full {
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    }

    ctx.get_output()
}

/// Accept/decline choice plus the optional decline reason
fn write_response(response: &ResponseOptions, ctx: &mut Context) {
    ctx.add_line("<fieldset class=\"rsvp-response\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<label class=\"rsvp-accept\"><input type=\"radio\" name=\"rsvp_response\" value=\"accept\" required /> {}</label>",
        escape_html(&response.accept_text)
    ));
    ctx.add_line(&format!(
        "<label class=\"rsvp-decline\"><input type=\"radio\" name=\"rsvp_response\" value=\"decline\" /> {}</label>",
        escape_html(&response.decline_text)
    ));
    if response.collect_decline_reason {
        let required = if response.decline_reason_required {
            " required"
        } else {
            ""
        };
        ctx.add_line(&format!(
            "<textarea class=\"rsvp-decline-reason\" name=\"decline_reason\"{}></textarea>",
            required
        ));
    }
    ctx.dedent();
    ctx.add_line("</fieldset>");
}

/// `data-node-id`, state classes and inline style shared by every node
fn node_attributes(node: &RenderNode, base_class: &str, extra_css: &str, ctx: &Context) -> String {
    let flags = node.flags();
    let mut classes = vec![base_class.to_string()];
    let mut attrs = format!("data-node-id=\"{}\"", escape_html(node.id()));

    if ctx.is_builder() {
        if flags.hidden {
            classes.push("is-hidden".to_string());
            attrs.push_str(" data-hidden=\"true\"");
        }
        if flags.selected {
            classes.push("is-selected".to_string());
        }
        if flags.editing {
            classes.push("is-editing".to_string());
        }
    }

    let style = match node {
        RenderNode::Field { style, .. } | RenderNode::Layout { style, .. } => style.to_inline_css(),
    };
    let style = if extra_css.is_empty() {
        style
    } else {
        format!("{}; {}", extra_css, style)
    };

    format!(
        "class=\"{}\" {} style=\"{}\"",
        classes.join(" "),
        attrs,
        escape_html(&style)
    )
}

fn layout_css(layout: &LayoutProps) -> String {
    format!(
        "display: flex; flex-direction: {}; gap: {}px; justify-content: {}; align-items: {}; flex-wrap: {}",
        layout.direction.as_css(),
        layout.gap,
        layout.justify.as_css(),
        layout.align.as_css(),
        if layout.wrap { "wrap" } else { "nowrap" }
    )
}

fn write_node(node: &RenderNode, ctx: &mut Context) {
    match node {
        RenderNode::Layout {
            container_type,
            layout,
            children,
            ..
        } => {
            let class = format!("rsvp-{}", container_type.as_str());
            let attrs = node_attributes(node, &class, &layout_css(layout), ctx);
            ctx.add_line(&format!("<div {}>", attrs));
            ctx.indent();
            for child in children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line("</div>");
        }
        RenderNode::Field { field_type, .. } => match field_type {
            FieldType::Heading | FieldType::Paragraph => write_content(node, ctx),
            FieldType::Divider => {
                let attrs = node_attributes(node, "rsvp-divider", "", ctx);
                ctx.add_line(&format!("<hr {} />", attrs));
            }
            _ => write_input(node, ctx),
        },
    }
}

fn write_content(node: &RenderNode, ctx: &mut Context) {
    let RenderNode::Field {
        field_type,
        heading_level,
        content,
        flags,
        ..
    } = node
    else {
        return;
    };

    let tag = match field_type {
        FieldType::Heading => format!("h{}", heading_level.unwrap_or(3).clamp(1, 6)),
        _ => "p".to_string(),
    };
    let class = format!("rsvp-{}", field_type.as_str());
    let mut attrs = node_attributes(node, &class, "", ctx);
    if ctx.is_builder() && flags.editable {
        attrs.push_str(" contenteditable=\"true\"");
    }

    let inner = content
        .as_ref()
        .map(|spans| spans_html(spans, ctx))
        .unwrap_or_default();
    ctx.add_line(&format!("<{tag} {attrs}>{inner}</{tag}>"));
}

fn input_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Phone => "tel",
        FieldType::Number => "number",
        FieldType::Date => "date",
        _ => "text",
    }
}

fn write_input(node: &RenderNode, ctx: &mut Context) {
    let RenderNode::Field {
        field_type,
        name,
        label,
        placeholder,
        required,
        options,
        min,
        max,
        ..
    } = node
    else {
        return;
    };

    let attrs = node_attributes(node, "rsvp-field", "", ctx);
    ctx.add_line(&format!("<div {}>", attrs));
    ctx.indent();

    let name = escape_html(name);
    let label_html = spans_html(label, ctx);
    let required_attr = if *required { " required" } else { "" };
    let required_mark = if *required {
        "<span class=\"rsvp-required\">*</span>"
    } else {
        ""
    };
    let placeholder_attr = placeholder
        .as_deref()
        .map(|text| format!(" placeholder=\"{}\"", escape_html(text)))
        .unwrap_or_default();

    match field_type {
        FieldType::Checkbox => {
            ctx.add_line(&format!(
                "<label><input type=\"checkbox\" name=\"{name}\"{required_attr} /> {label_html}{required_mark}</label>"
            ));
        }
        FieldType::Radio => {
            ctx.add_line(&format!("<fieldset><legend>{label_html}{required_mark}</legend>"));
            ctx.indent();
            for option in options {
                write_radio_option(&name, option, required_attr, ctx);
            }
            ctx.dedent();
            ctx.add_line("</fieldset>");
        }
        FieldType::Select => {
            ctx.add_line(&format!("<label for=\"{name}\">{label_html}{required_mark}</label>"));
            ctx.add_line(&format!("<select id=\"{name}\" name=\"{name}\"{required_attr}>"));
            ctx.indent();
            if let Some(text) = placeholder {
                ctx.add_line(&format!(
                    "<option value=\"\" disabled selected>{}</option>",
                    escape_html(text)
                ));
            }
            for option in options {
                ctx.add_line(&format!(
                    "<option value=\"{}\">{}</option>",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            ctx.dedent();
            ctx.add_line("</select>");
        }
        FieldType::Textarea => {
            ctx.add_line(&format!("<label for=\"{name}\">{label_html}{required_mark}</label>"));
            ctx.add_line(&format!(
                "<textarea id=\"{name}\" name=\"{name}\"{placeholder_attr}{required_attr}></textarea>"
            ));
        }
        other => {
            let bounds = [("min", min), ("max", max)]
                .iter()
                .filter_map(|(attr, value)| value.map(|v| format!(" {}=\"{}\"", attr, v)))
                .collect::<String>();
            ctx.add_line(&format!("<label for=\"{name}\">{label_html}{required_mark}</label>"));
            ctx.add_line(&format!(
                "<input type=\"{}\" id=\"{name}\" name=\"{name}\"{placeholder_attr}{bounds}{required_attr} />",
                input_type(*other)
            ));
        }
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

fn write_radio_option(name: &str, option: &FieldOption, required_attr: &str, ctx: &mut Context) {
    ctx.add_line(&format!(
        "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{} /> {}</label>",
        name,
        escape_html(&option.value),
        required_attr,
        escape_html(&option.label)
    ));
}

fn spans_html(spans: &[TextSpan], ctx: &Context) -> String {
    spans
        .iter()
        .map(|span| match span {
            TextSpan::Literal { text, .. } => escape_html(text),
            TextSpan::Token { raw, name } if ctx.is_builder() => format!(
                "<span class=\"token-chip\" contenteditable=\"false\" data-token=\"{}\">{}</span>",
                escape_html(name),
                escape_html(raw)
            ),
            TextSpan::Token { raw, .. } => escape_html(raw),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DefaultAssets;
    use crate::builder::{render_builder, BuilderView};
    use crate::runtime::render_runtime;
    use rsvpkit_model::{IdGenerator, LanguageConfig, Node, Template};

    fn sample_template() -> Template {
        let mut ids = IdGenerator::new("html-test");
        let mut template = Template::new("Gala <Dinner>");

        let mut heading = rsvpkit_model::create_field(FieldType::Heading, &mut ids);
        heading.content = Some("Welcome ((firstname))".to_string());
        heading.heading_level = Some(2);

        let mut phone = rsvpkit_model::create_field(FieldType::Phone, &mut ids);
        phone.required = true;
        phone.visible = false;

        template.form_fields = vec![Node::Field(heading), Node::Field(phone)];
        template
    }

    fn compact() -> HtmlOptions {
        HtmlOptions {
            full_document: false,
            pretty: false,
            indent: String::new(),
        }
    }

    #[test]
    fn test_builder_html_marks_chips_and_hidden_nodes() {
        let template = sample_template();
        let doc = render_builder(&template, BuilderView::default(), &DefaultAssets);
        let html = to_html(&doc, compact());

        assert!(html.contains("<h2 "));
        assert!(html.contains("contenteditable=\"true\""));
        assert!(html.contains(
            "<span class=\"token-chip\" contenteditable=\"false\" data-token=\"firstname\">((firstname))</span>"
        ));
        assert!(html.contains("is-hidden"));
        assert!(html.contains("type=\"tel\""));
    }

    #[test]
    fn test_runtime_html_is_plain() {
        let mut template = sample_template();
        template.language_config = LanguageConfig::dual("en", "ar");
        let doc = render_runtime(&template, "ar", &DefaultAssets);
        let html = to_html(&doc, HtmlOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("<title>Gala &lt;Dinner&gt;</title>"));
        assert!(html.contains("Welcome ((firstname))"));
        assert!(!html.contains("contenteditable"));
        assert!(!html.contains("token-chip"));
        assert!(!html.contains("type=\"tel\""));
    }

    #[test]
    fn test_response_controls_follow_theme() {
        let mut template = sample_template();
        template.theme.accept_button_text = "Count me in".to_string();
        template.theme.decline_button_text = "Can't make it".to_string();
        template.theme.success_message = "See you there!".to_string();
        template.theme.collect_decline_reason = true;
        template.theme.decline_reason_required = true;

        let doc = render_runtime(&template, "en", &DefaultAssets);
        let html = to_html(&doc, compact());

        assert!(html.contains("value=\"accept\" required /> Count me in</label>"));
        assert!(html.contains("Can&#39;t make it"));
        assert!(html.contains("<textarea class=\"rsvp-decline-reason\" name=\"decline_reason\" required>"));
        assert!(html.contains("rsvp-success\" hidden>See you there!</p>"));
    }

    #[test]
    fn test_decline_reason_omitted_by_default() {
        let template = sample_template();
        let doc = render_runtime(&template, "en", &DefaultAssets);
        let html = to_html(&doc, compact());

        assert!(html.contains("rsvp-response"));
        assert!(!html.contains("decline_reason"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
    }
}
