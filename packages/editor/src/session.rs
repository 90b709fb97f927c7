//! # Builder Session
//!
//! Owns the one mutable resource of the builder: the current template
//! (node tree, theme, language config), plus the id generator, undo
//! history, the open config panel and the inline editor.
//!
//! Every gesture is turned into a [`Mutation`] and applied through the
//! undo stack. A mutation that cannot apply is skipped and logged; it never
//! surfaces as an error.

use crate::drag::{classify, DragEnd, DropAction, PaletteItem};
use crate::editing::InlineEditor;
use crate::errors::EditorError;
use crate::panel::FieldConfigPanel;
use crate::store::TemplateStore;
use crate::{FieldPatch, Mutation, MutationError, UndoStack};
use rsvpkit_model::tree::{self, ParentRef};
use rsvpkit_model::{
    create_container, create_field, translation_rows, IdGenerator, LanguageConfig, Node, Template,
    TextField, Theme, TranslationRow,
};
use rsvpkit_renderer::{
    render, AssetResolver, BuilderView, DefaultAssets, RenderDocument, RenderRequest,
};
use tracing::{debug, info, instrument, warn};

/// What happened to a requested change
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied,
    /// Nothing changed; the reason is informational only
    Skipped(MutationError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

#[derive(Debug)]
pub struct BuilderSession {
    template: Template,
    ids: IdGenerator,
    history: UndoStack,
    panel: Option<FieldConfigPanel>,
    inline: InlineEditor,
}

impl BuilderSession {
    pub fn new(template: Template) -> Self {
        let seed_source = format!(
            "{}:{}",
            template.id.as_deref().unwrap_or(&template.title),
            template.created_at.timestamp_millis()
        );

        Self {
            ids: IdGenerator::new(&seed_source),
            template,
            history: UndoStack::new(),
            panel: None,
            inline: InlineEditor::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(Self::new(Template::from_json(json)?))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }

    pub fn nodes(&self) -> &[Node] {
        &self.template.form_fields
    }

    /// Apply a mutation through the undo stack
    #[instrument(skip(self, mutation), fields(mutation = mutation.name()))]
    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        match self.history.apply(&mutation, &mut self.template) {
            Ok(()) => {
                self.sync_ui_state();
                debug!(
                    nodes = tree::count_nodes(&self.template.form_fields),
                    "Mutation applied"
                );
                MutationOutcome::Applied
            }
            Err(reason) => {
                debug!(%reason, "Mutation skipped");
                MutationOutcome::Skipped(reason)
            }
        }
    }

    /// Classify and apply a drag-end event from the drag framework
    #[instrument(skip(self), fields(over = ?drag.over))]
    pub fn handle_drag_end(&mut self, drag: &DragEnd) -> MutationOutcome {
        let action = match classify(&self.template.form_fields, drag) {
            Ok(action) => action,
            Err(reason) => {
                debug!(%reason, "Drop ignored");
                return MutationOutcome::Skipped(reason);
            }
        };

        let mutation = match action {
            DropAction::Append { item, parent } => Mutation::AppendNode {
                node: self.fresh_node(item),
                parent,
            },
            DropAction::Reorder {
                node_id,
                parent,
                to,
                ..
            } => Mutation::MoveNode {
                node_id,
                parent,
                index: to,
            },
            DropAction::Move {
                node_id,
                parent,
                index,
            } => Mutation::MoveNode {
                node_id,
                parent,
                index,
            },
        };

        self.apply(mutation)
    }

    /// Append a new palette node at the end of `parent`. Returns its id.
    pub fn append(&mut self, item: PaletteItem, parent: ParentRef) -> Option<String> {
        let node = self.fresh_node(item);
        let id = node.id().to_string();

        match self.apply(Mutation::AppendNode { parent, node }) {
            MutationOutcome::Applied => Some(id),
            MutationOutcome::Skipped(_) => None,
        }
    }

    /// Construct a node whose id is not yet used anywhere in the tree
    fn fresh_node(&mut self, item: PaletteItem) -> Node {
        loop {
            let node: Node = match item {
                PaletteItem::Field(field_type) => create_field(field_type, &mut self.ids).into(),
                PaletteItem::Layout(container_type) => {
                    create_container(container_type, &mut self.ids).into()
                }
            };
            if !tree::contains(&self.template.form_fields, node.id()) {
                return node;
            }
        }
    }

    pub fn update_field(&mut self, node_id: &str, patch: FieldPatch) -> MutationOutcome {
        self.apply(Mutation::UpdateField {
            node_id: node_id.to_string(),
            patch,
        })
    }

    pub fn set_visibility(&mut self, node_id: &str, visible: bool) -> MutationOutcome {
        self.apply(Mutation::SetVisibility {
            node_id: node_id.to_string(),
            visible,
        })
    }

    /// Remove a node with its subtree. A panel open on it closes.
    pub fn delete_node(&mut self, node_id: &str) -> MutationOutcome {
        self.apply(Mutation::RemoveNode {
            node_id: node_id.to_string(),
        })
    }

    // Config panel

    /// Click on a node: open its config panel. Unsaved edits of a panel
    /// open on another node are discarded.
    pub fn select(&mut self, node_id: &str) -> bool {
        match tree::find_node(&self.template.form_fields, node_id) {
            Some(node) => {
                self.panel = Some(FieldConfigPanel::open(node));
                true
            }
            None => {
                debug!(node_id, "Selected node not found");
                false
            }
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.panel.as_ref().map(FieldConfigPanel::node_id)
    }

    pub fn panel(&self) -> Option<&FieldConfigPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut FieldConfigPanel> {
        self.panel.as_mut()
    }

    /// Push the staged node back into the tree and close the panel
    pub fn save_panel(&mut self) -> MutationOutcome {
        let Some(panel) = self.panel.take() else {
            return MutationOutcome::Skipped(MutationError::NotApplicable(
                "no panel open".to_string(),
            ));
        };

        if !panel.is_modified() {
            return MutationOutcome::Skipped(MutationError::NotApplicable(
                "panel has no changes".to_string(),
            ));
        }
        self.apply(panel.commit())
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    // Inline editing

    /// Focus the editable region of a paragraph or heading
    pub fn focus_content(&mut self, node_id: &str) -> bool {
        let committed = match tree::find_node(&self.template.form_fields, node_id)
            .and_then(Node::as_field)
        {
            Some(field) if field.field_type.is_content() => {
                field.content.clone().unwrap_or_default()
            }
            _ => return false,
        };

        if let Some(pending) = self.inline.focus(node_id, &committed) {
            self.apply(pending);
        }
        true
    }

    pub fn input_content(&mut self, text: &str) {
        self.inline.input(text);
    }

    pub fn press_enter(&mut self, shift: bool) -> Option<MutationOutcome> {
        self.inline.enter(shift).map(|commit| self.apply(commit))
    }

    pub fn blur_content(&mut self) -> Option<MutationOutcome> {
        self.inline.blur().map(|commit| self.apply(commit))
    }

    pub fn editing(&self) -> Option<&str> {
        self.inline.editing_id()
    }

    // Translations and template settings

    pub fn set_translation(
        &mut self,
        node_id: &str,
        field: TextField,
        language: &str,
        text: &str,
    ) -> MutationOutcome {
        self.apply(Mutation::SetTranslation {
            node_id: node_id.to_string(),
            field,
            language: language.to_string(),
            text: text.to_string(),
        })
    }

    /// Rows of the dual-language editing surface; empty in single mode
    pub fn translation_rows(&self) -> Vec<TranslationRow> {
        match self.template.language_config.translation_language() {
            Some(language) => translation_rows(&self.template.form_fields, language),
            None => Vec::new(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> MutationOutcome {
        self.apply(Mutation::SetTheme { theme })
    }

    pub fn set_language_config(&mut self, config: LanguageConfig) -> MutationOutcome {
        self.apply(Mutation::SetLanguageConfig { config })
    }

    pub fn rename(&mut self, title: &str) -> MutationOutcome {
        self.apply(Mutation::RenameTemplate {
            title: title.to_string(),
        })
    }

    // History

    /// Run `edit` so every mutation it applies undoes as one step
    pub fn batch<R>(&mut self, description: &str, edit: impl FnOnce(&mut Self) -> R) -> R {
        self.history.begin_batch(description);
        let result = edit(self);
        self.history.end_batch();
        result
    }

    pub fn undo(&mut self) -> bool {
        self.inline.cancel();
        match self.history.undo(&mut self.template) {
            Ok(undone) => {
                self.sync_ui_state();
                undone
            }
            Err(reason) => {
                warn!(%reason, "Undo failed");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        self.inline.cancel();
        match self.history.redo(&mut self.template) {
            Ok(redone) => {
                self.sync_ui_state();
                redone
            }
            Err(reason) => {
                warn!(%reason, "Redo failed");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Close the panel and the inline editor if their node is gone
    fn sync_ui_state(&mut self) {
        let nodes = &self.template.form_fields;

        if let Some(panel) = &self.panel {
            if !tree::contains(nodes, panel.node_id()) {
                debug!(node_id = panel.node_id(), "Closing panel of removed node");
                self.panel = None;
            }
        }
        if let Some(id) = self.inline.editing_id() {
            if !tree::contains(nodes, id) {
                self.inline.cancel();
            }
        }
    }

    // Output

    pub fn render(&self, request: RenderRequest<'_>) -> RenderDocument {
        self.render_with(request, &DefaultAssets)
    }

    pub fn render_with(
        &self,
        request: RenderRequest<'_>,
        assets: &dyn AssetResolver,
    ) -> RenderDocument {
        render(&self.template, request, assets)
    }

    /// Builder render reflecting the current selection and inline editor
    pub fn render_builder(&self) -> RenderDocument {
        self.render(RenderRequest::Builder(BuilderView {
            selected: self.selected(),
            editing: self.editing(),
        }))
    }

    pub fn render_runtime(&self, language: &str) -> RenderDocument {
        self.render(RenderRequest::Runtime { language })
    }

    /// Persist the template; the store assigns an id on first save
    #[instrument(skip_all, fields(title = %self.template.title))]
    pub fn save(&mut self, store: &mut dyn TemplateStore) -> Result<String, EditorError> {
        let id = store.save(&mut self.template)?;
        info!(template_id = %id, "Template saved");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvpkit_model::{ContainerType, FieldType};

    #[test]
    fn test_session_creation() {
        let session = BuilderSession::new(Template::new("Test"));

        assert!(session.nodes().is_empty());
        assert!(!session.can_undo());
        assert!(session.selected().is_none());
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_fresh_ids_skip_existing() {
        let mut first = BuilderSession::new(Template::new("Test"));
        first.append(PaletteItem::Field(FieldType::Text), ParentRef::Root);
        first.append(PaletteItem::Field(FieldType::Text), ParentRef::Root);

        // Same title and timestamp seed the same generator
        let mut second = BuilderSession::new(first.template().clone());
        second.append(PaletteItem::Field(FieldType::Text), ParentRef::Root);

        assert_eq!(second.nodes().len(), 3);
        assert!(tree::ids_are_unique(second.nodes()));
    }

    #[test]
    fn test_delete_closes_panel() {
        let mut session = BuilderSession::new(Template::new("Test"));
        let row = session
            .append(PaletteItem::Layout(ContainerType::Row), ParentRef::Root)
            .unwrap();
        let date = session
            .append(
                PaletteItem::Field(FieldType::Date),
                ParentRef::Container(row.clone()),
            )
            .unwrap();

        assert!(session.select(&date));
        assert_eq!(session.selected(), Some(date.as_str()));

        assert!(session.delete_node(&row).is_applied());
        assert!(session.selected().is_none());
        assert!(session.nodes().is_empty());
    }

    #[test]
    fn test_save_panel_without_changes_is_skipped() {
        let mut session = BuilderSession::new(Template::new("Test"));
        let id = session
            .append(PaletteItem::Field(FieldType::Text), ParentRef::Root)
            .unwrap();

        session.select(&id);
        assert!(!session.save_panel().is_applied());
        assert!(session.panel().is_none());
        assert_eq!(
            session.save_panel(),
            MutationOutcome::Skipped(MutationError::NotApplicable("no panel open".to_string()))
        );
    }

    #[test]
    fn test_batch_undoes_append_and_patch_together() {
        let mut session = BuilderSession::new(Template::new("Test"));

        let heading = session.batch("Add heading", |session| {
            let id = session.append(PaletteItem::Field(FieldType::Heading), ParentRef::Root)?;
            session.update_field(
                &id,
                FieldPatch {
                    content: Some("Welcome".to_string()),
                    ..Default::default()
                },
            );
            Some(id)
        });

        let heading = heading.unwrap();
        let field = tree::find_node(session.nodes(), &heading)
            .and_then(Node::as_field)
            .unwrap();
        assert_eq!(field.content.as_deref(), Some("Welcome"));

        assert!(session.undo());
        assert!(session.nodes().is_empty());
        assert!(!session.can_undo());
    }
}
