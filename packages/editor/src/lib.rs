//! # rsvpkit Editor
//!
//! Builder engine for RSVP templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ drag framework / panel / inline editor      │
//! └─────────────────────────────────────────────┘
//!                     ↓ gestures
//! ┌─────────────────────────────────────────────┐
//! │ editor: BuilderSession                      │
//! │  - classify drag-end events                 │
//! │  - stage panel edits, commit on save        │
//! │  - inline content editing state machine     │
//! │  - validated mutations + undo/redo          │
//! └─────────────────────────────────────────────┘
//!                     ↓ template snapshot
//! ┌─────────────────────────────────────────────┐
//! │ renderer: builder / runtime RenderDocument  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Template is the source of truth**: render output is always derived
//! 2. **Invalid gestures are no-ops**: stale ids, cycles and over-deep drops
//!    leave the tree untouched and are only logged
//! 3. **Staged editing**: the config panel never live-syncs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rsvpkit_editor::{BuilderSession, DragEnd, PaletteItem};
//! use rsvpkit_model::{FieldType, Template};
//!
//! let mut session = BuilderSession::new(Template::new("Summer Gala"));
//! session.handle_drag_end(&DragEnd::from_palette(
//!     PaletteItem::Field(FieldType::Heading),
//!     "canvas",
//! ));
//!
//! let preview = session.render_runtime("en");
//! ```

mod drag;
mod editing;
mod errors;
mod mutations;
mod panel;
mod session;
mod store;
mod undo_stack;

pub use drag::{
    classify, drop_zone_id, DragEnd, DragSource, DropAction, DropTarget, PaletteItem, CANVAS_ID,
    DROP_ZONE_PREFIX,
};
pub use editing::{EditState, InlineEditor};
pub use errors::{EditorError, StoreError};
pub use mutations::{FieldPatch, Mutation, MutationError};
pub use panel::FieldConfigPanel;
pub use session::{BuilderSession, MutationOutcome};
pub use store::{FileStore, MemoryStore, TemplateStore, TemplateSummary};
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export common types for convenience
pub use rsvpkit_model::tree::ParentRef;
pub use rsvpkit_renderer::{RenderDocument, RenderRequest};
