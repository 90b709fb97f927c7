//! WebAssembly bindings. Templates, drag events, patches and render output
//! cross the boundary as JSON strings.

use rsvpkit_editor::{BuilderSession, DragEnd, FieldPatch, PaletteItem, ParentRef};
use rsvpkit_model::{translation_rows, Template, TextField};
use rsvpkit_renderer::{
    render, rich_text, to_html, BuilderView, DefaultAssets, HtmlOptions, RenderDocument,
    RenderRequest,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_template(template_json: &str) -> Result<Template, JsValue> {
    Template::from_json(template_json)
        .map_err(|e| JsValue::from_str(&format!("Template parse error: {}", e)))
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("{} parse error: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn runtime_document(template: &Template, language: &str) -> RenderDocument {
    render(template, RenderRequest::Runtime { language }, &DefaultAssets)
}

/// Render the recipient-facing form as a JSON render document
#[wasm_bindgen(js_name = renderRuntime)]
pub fn render_runtime_js(template_json: &str, language: &str) -> Result<String, JsValue> {
    let template = parse_template(template_json)?;
    to_json(&runtime_document(&template, language))
}

/// Render the recipient-facing form as a standalone HTML page
#[wasm_bindgen(js_name = renderRuntimeHtml)]
pub fn render_runtime_html_js(template_json: &str, language: &str) -> Result<String, JsValue> {
    let template = parse_template(template_json)?;
    Ok(to_html(
        &runtime_document(&template, language),
        HtmlOptions::default(),
    ))
}

/// Render the editing canvas without selection
#[wasm_bindgen(js_name = renderBuilder)]
pub fn render_builder_js(template_json: &str) -> Result<String, JsValue> {
    let template = parse_template(template_json)?;
    let document = render(
        &template,
        RenderRequest::Builder(BuilderView::default()),
        &DefaultAssets,
    );
    to_json(&document)
}

/// Split text into literal and token spans
#[wasm_bindgen(js_name = scanTokens)]
pub fn scan_tokens_js(text: &str) -> Result<String, JsValue> {
    to_json(&rich_text(text, false))
}

#[wasm_bindgen(js_name = translationRows)]
pub fn translation_rows_js(template_json: &str, language: &str) -> Result<String, JsValue> {
    let template = parse_template(template_json)?;
    to_json(&translation_rows(&template.form_fields, language))
}

/// Stateful builder session for the editing canvas
#[wasm_bindgen]
pub struct WasmSession {
    inner: BuilderSession,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(template_json: &str) -> Result<WasmSession, JsValue> {
        Ok(WasmSession {
            inner: BuilderSession::new(parse_template(template_json)?),
        })
    }

    /// Create a session around an empty template
    #[wasm_bindgen(js_name = empty)]
    pub fn empty(title: &str) -> WasmSession {
        WasmSession {
            inner: BuilderSession::new(Template::new(title)),
        }
    }

    #[wasm_bindgen(js_name = templateJson)]
    pub fn template_json(&self) -> Result<String, JsValue> {
        to_json(self.inner.template())
    }

    /// Apply a drag-end event. Returns whether the tree changed.
    #[wasm_bindgen(js_name = handleDragEnd)]
    pub fn handle_drag_end(&mut self, drag_json: &str) -> Result<bool, JsValue> {
        let drag: DragEnd = parse_json(drag_json, "Drag event")?;
        Ok(self.inner.handle_drag_end(&drag).is_applied())
    }

    /// Append a palette item; `parent_id` empty means the top level.
    /// Returns the new node id.
    pub fn append(&mut self, item_json: &str, parent_id: &str) -> Result<Option<String>, JsValue> {
        let item: PaletteItem = parse_json(item_json, "Palette item")?;
        let parent = if parent_id.is_empty() {
            ParentRef::Root
        } else {
            ParentRef::Container(parent_id.to_string())
        };
        Ok(self.inner.append(item, parent))
    }

    #[wasm_bindgen(js_name = updateField)]
    pub fn update_field(&mut self, node_id: &str, patch_json: &str) -> Result<bool, JsValue> {
        let patch: FieldPatch = parse_json(patch_json, "Field patch")?;
        Ok(self.inner.update_field(node_id, patch).is_applied())
    }

    #[wasm_bindgen(js_name = setVisibility)]
    pub fn set_visibility(&mut self, node_id: &str, visible: bool) -> bool {
        self.inner.set_visibility(node_id, visible).is_applied()
    }

    #[wasm_bindgen(js_name = deleteNode)]
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        self.inner.delete_node(node_id).is_applied()
    }

    #[wasm_bindgen(js_name = setTranslation)]
    pub fn set_translation(
        &mut self,
        node_id: &str,
        field: &str,
        language: &str,
        text: &str,
    ) -> Result<bool, JsValue> {
        let field: TextField = parse_json(&format!("\"{}\"", field), "Text field")?;
        Ok(self
            .inner
            .set_translation(node_id, field, language, text)
            .is_applied())
    }

    /// Open the config panel on a node
    pub fn select(&mut self, node_id: &str) -> bool {
        self.inner.select(node_id)
    }

    #[wasm_bindgen(js_name = closePanel)]
    pub fn close_panel(&mut self) {
        self.inner.close_panel();
    }

    #[wasm_bindgen(js_name = focusContent)]
    pub fn focus_content(&mut self, node_id: &str) -> bool {
        self.inner.focus_content(node_id)
    }

    #[wasm_bindgen(js_name = inputContent)]
    pub fn input_content(&mut self, text: &str) {
        self.inner.input_content(text);
    }

    /// Returns whether a content commit was applied
    #[wasm_bindgen(js_name = pressEnter)]
    pub fn press_enter(&mut self, shift: bool) -> bool {
        self.inner
            .press_enter(shift)
            .map(|outcome| outcome.is_applied())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = blurContent)]
    pub fn blur_content(&mut self) -> bool {
        self.inner
            .blur_content()
            .map(|outcome| outcome.is_applied())
            .unwrap_or(false)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(js_name = renderBuilder)]
    pub fn render_builder(&self) -> Result<String, JsValue> {
        to_json(&self.inner.render_builder())
    }

    #[wasm_bindgen(js_name = renderRuntime)]
    pub fn render_runtime(&self, language: &str) -> Result<String, JsValue> {
        to_json(&self.inner.render_runtime(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "title": "Picnic",
        "formFields": [
            {
                "kind": "field",
                "id": "field-1",
                "type": "heading",
                "name": "heading_1",
                "label": "Heading",
                "content": "Hi ((firstname))",
                "headingLevel": 2,
                "visible": true
            }
        ]
    }"#;

    #[test]
    fn test_render_runtime() {
        let json = render_runtime_js(TEMPLATE, "en").unwrap();
        assert!(json.contains("\"mode\":\"runtime\""));
        assert!(json.contains("firstname"));

        let html = render_runtime_html_js(TEMPLATE, "en").unwrap();
        assert!(html.contains("<h2"));
        assert!(html.contains("Hi ((firstname))"));
    }

    #[test]
    fn test_scan_tokens() {
        let json = scan_tokens_js("Hello ((firstname))").unwrap();
        assert!(json.contains("\"type\":\"token\""));
        assert!(json.contains("\"name\":\"firstname\""));
    }

    #[test]
    fn test_session_drag_and_undo() {
        let mut session = WasmSession::empty("Picnic");
        let drag = r#"{
            "active": { "from": "palette", "item": { "kind": "field", "type": "paragraph" } },
            "over": "canvas"
        }"#;

        assert!(session.handle_drag_end(drag).unwrap());
        assert!(session.render_builder().unwrap().contains("Enter your text here"));

        assert!(session.undo());
        assert!(!session.can_undo());
        assert!(session.can_redo());
    }

    #[test]
    fn test_session_append_and_patch() {
        let mut session = WasmSession::new(TEMPLATE).unwrap();
        let id = session
            .append(r#"{ "kind": "field", "type": "text" }"#, "")
            .unwrap()
            .unwrap();

        assert!(session
            .update_field(&id, r#"{ "label": "Guest name" }"#)
            .unwrap());
        assert!(session.set_translation(&id, "label", "ar", "اسم الضيف").unwrap());
        assert!(session.render_runtime("ar").unwrap().contains("اسم الضيف"));
        assert!(session.template_json().unwrap().contains("Guest name"));
    }
}
