//! # Undo/Redo Stack
//!
//! Tracks mutation history for a builder session.
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack; a
//!   batch that fails partway leaves the template and both stacks untouched
//! - Redo reapplies the original mutations
//! - New mutations clear the redo stack
//! - Several mutations can be grouped into one undo step
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.apply(&Mutation::RenameTemplate { title: "Gala".into() }, &mut template)?;
//! stack.undo(&mut template)?;
//! stack.redo(&mut template)?;
//! ```

use crate::{Mutation, MutationError};
use rsvpkit_model::Template;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            description: Some(mutation.name().to_string()),
            mutations: vec![mutation],
            inverses: vec![inverse],
        }
    }

    fn empty() -> Self {
        Self {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        }
    }
}

/// Undo/redo stack over a template
#[derive(Debug)]
pub struct UndoStack {
    /// Applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: &Mutation, template: &mut Template) -> Result<(), MutationError> {
        let inverse = mutation.to_inverse(template)?;
        mutation.apply(template)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation.clone(), inverse));
        }

        Ok(())
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        let mut batch = MutationBatch::empty();
        batch.description = Some(description.into());
        self.current_batch = Some(batch);
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo history
        self.redo_stack.clear();
    }

    /// Undo the most recent batch. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, template: &mut Template) -> Result<bool, MutationError> {
        let Some(batch) = self.undo_stack.last() else {
            return Ok(false);
        };

        *template = Self::replay(&batch.inverses, template)?;
        if let Some(batch) = self.undo_stack.pop() {
            self.redo_stack.push(batch);
        }
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, template: &mut Template) -> Result<bool, MutationError> {
        let Some(batch) = self.redo_stack.last() else {
            return Ok(false);
        };

        *template = Self::replay(&batch.mutations, template)?;
        if let Some(batch) = self.redo_stack.pop() {
            self.undo_stack.push(batch);
        }
        Ok(true)
    }

    /// Apply `mutations` to a copy; the template is only replaced when all succeed
    fn replay(mutations: &[Mutation], template: &Template) -> Result<Template, MutationError> {
        let mut scratch = template.clone();
        for mutation in mutations {
            mutation.apply(&mut scratch)?;
        }
        Ok(scratch)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvpkit_model::tree::ParentRef;
    use rsvpkit_model::{create_field, FieldType, IdGenerator};

    fn rename(title: &str) -> Mutation {
        Mutation::RenameTemplate {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();

        stack.apply(&rename("World"), &mut template).unwrap();
        assert_eq!(template.title, "World");
        assert_eq!(stack.undo_description(), Some("rename_template"));

        assert!(stack.undo(&mut template).unwrap());
        assert_eq!(template.title, "Hello");
        assert!(stack.can_redo());

        assert!(stack.redo(&mut template).unwrap());
        assert_eq!(template.title, "World");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batched_mutations() {
        let mut ids = IdGenerator::new("undo");
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();
        let before = template.clone();

        stack.begin_batch("Add heading");
        let heading = create_field(FieldType::Heading, &mut ids);
        let heading_id = heading.id.clone();
        stack
            .apply(
                &Mutation::AppendNode {
                    parent: ParentRef::Root,
                    node: heading.into(),
                },
                &mut template,
            )
            .unwrap();
        stack
            .apply(
                &Mutation::CommitContent {
                    node_id: heading_id,
                    content: "Welcome".to_string(),
                },
                &mut template,
            )
            .unwrap();
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Add heading"));

        stack.undo(&mut template).unwrap();
        assert_eq!(template, before);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();

        stack.apply(&rename("World"), &mut template).unwrap();
        stack.undo(&mut template).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack.apply(&rename("Everyone"), &mut template).unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            stack.apply(&rename(&format!("Title {}", i)), &mut template).unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();

        let result = stack.apply(
            &Mutation::RemoveNode {
                node_id: "missing".to_string(),
            },
            &mut template,
        );

        assert!(result.is_err());
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_failed_undo_leaves_template_and_history() {
        let mut ids = IdGenerator::new("undo");
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();

        let first: rsvpkit_model::Node = create_field(FieldType::Text, &mut ids).into();
        let second: rsvpkit_model::Node = create_field(FieldType::Date, &mut ids).into();
        let first_id = first.id().to_string();

        stack.begin_batch("Add fields");
        for node in [first, second] {
            stack
                .apply(
                    &Mutation::AppendNode {
                        parent: ParentRef::Root,
                        node,
                    },
                    &mut template,
                )
                .unwrap();
        }
        stack.end_batch();

        // Removed behind the stack's back, so the batch's last inverse fails
        Mutation::RemoveNode { node_id: first_id }
            .apply(&mut template)
            .unwrap();
        let before = template.clone();

        assert!(stack.undo(&mut template).is_err());
        assert_eq!(template, before);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_failed_redo_keeps_batch() {
        let mut ids = IdGenerator::new("undo");
        let mut template = Template::new("Hello");
        let mut stack = UndoStack::new();

        let node: rsvpkit_model::Node = create_field(FieldType::Text, &mut ids).into();
        let append = Mutation::AppendNode {
            parent: ParentRef::Root,
            node: node.clone(),
        };
        stack.apply(&append, &mut template).unwrap();
        stack.undo(&mut template).unwrap();

        // Same id appended again elsewhere; redoing would duplicate it
        append.apply(&mut template).unwrap();
        let before = template.clone();

        assert!(stack.redo(&mut template).is_err());
        assert_eq!(template, before);
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.undo_levels(), 0);
    }
}
