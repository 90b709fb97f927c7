//! # Inline Content Editing
//!
//! Per-node state machine for editing paragraph and heading content in
//! place on the builder canvas:
//!
//! ```text
//! Idle ──focus──▶ Editing ──blur / Enter──▶ Idle
//! ```
//!
//! Leaving `Editing` yields a commit only when the draft differs from the
//! last committed value. Enter without Shift commits and leaves; Shift+Enter
//! inserts a line break.

use crate::Mutation;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        node_id: String,
        /// Content last written to the tree
        committed: String,
        draft: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct InlineEditor {
    state: EditState,
}

impl InlineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { node_id, .. } => Some(node_id.as_str()),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft.as_str()),
            EditState::Idle => None,
        }
    }

    /// Start editing `node_id`. Focusing another node while editing first
    /// blurs the current one; its commit, if any, is returned.
    pub fn focus(&mut self, node_id: &str, committed: &str) -> Option<Mutation> {
        if self.editing_id() == Some(node_id) {
            return None;
        }

        let pending = self.blur();
        self.state = EditState::Editing {
            node_id: node_id.to_string(),
            committed: committed.to_string(),
            draft: committed.to_string(),
        };
        pending
    }

    /// Replace the draft with the region's current text
    pub fn input(&mut self, text: &str) {
        if let EditState::Editing { draft, .. } = &mut self.state {
            *draft = text.to_string();
        }
    }

    /// Enter key. Without Shift this commits and blurs.
    pub fn enter(&mut self, shift: bool) -> Option<Mutation> {
        if shift {
            if let EditState::Editing { draft, .. } = &mut self.state {
                draft.push('\n');
            }
            return None;
        }
        self.blur()
    }

    /// Leave `Editing`, producing a commit only if the content changed
    pub fn blur(&mut self) -> Option<Mutation> {
        match std::mem::take(&mut self.state) {
            EditState::Editing {
                node_id,
                committed,
                draft,
            } if draft != committed => Some(Mutation::CommitContent {
                node_id,
                content: draft,
            }),
            _ => None,
        }
    }

    /// Drop the session without committing (node deleted, undo, ...)
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_blur_does_not_commit() {
        let mut editor = InlineEditor::new();
        assert!(editor.focus("p1", "Hello").is_none());
        assert_eq!(editor.editing_id(), Some("p1"));

        editor.input("Hello");
        assert!(editor.blur().is_none());
        assert_eq!(editor.state(), &EditState::Idle);
    }

    #[test]
    fn test_changed_blur_commits() {
        let mut editor = InlineEditor::new();
        editor.focus("p1", "Hello");
        editor.input("Hello ((firstname))");

        assert_eq!(
            editor.blur(),
            Some(Mutation::CommitContent {
                node_id: "p1".to_string(),
                content: "Hello ((firstname))".to_string(),
            })
        );
    }

    #[test]
    fn test_enter_commits_and_blurs() {
        let mut editor = InlineEditor::new();
        editor.focus("h1", "Welcome");
        editor.input("Welcome!");

        let commit = editor.enter(false);
        assert!(matches!(commit, Some(Mutation::CommitContent { .. })));
        assert!(editor.editing_id().is_none());
    }

    #[test]
    fn test_shift_enter_inserts_line_break() {
        let mut editor = InlineEditor::new();
        editor.focus("p1", "Line one");

        assert!(editor.enter(true).is_none());
        assert_eq!(editor.draft(), Some("Line one\n"));
        assert_eq!(editor.editing_id(), Some("p1"));
    }

    #[test]
    fn test_focus_elsewhere_blurs_first() {
        let mut editor = InlineEditor::new();
        editor.focus("p1", "One");
        editor.input("Uno");

        let commit = editor.focus("p2", "Two");
        assert_eq!(
            commit,
            Some(Mutation::CommitContent {
                node_id: "p1".to_string(),
                content: "Uno".to_string(),
            })
        );
        assert_eq!(editor.editing_id(), Some("p2"));
        assert_eq!(editor.draft(), Some("Two"));
    }

    #[test]
    fn test_input_while_idle_is_ignored() {
        let mut editor = InlineEditor::new();
        editor.input("stray");
        assert!(editor.blur().is_none());
    }
}
