//! Scribe - the editing core of a rich-text document editor
//!
//! This crate turns raw input-device notifications (keystrokes, pointer
//! actions, drag/drop, paste, selection changes) into a single, ordered
//! edit pipeline that updates an abstract cursor/selection model and
//! records reversible edit transactions against attached "editable"
//! document regions.
//!
//! The load-bearing pieces are:
//!
//! - [`pipeline`]: the fixed chain of interpretation stages every
//!   occurrence flows through
//! - [`registry`]: the editable lifecycle - which regions of the host
//!   document accept edits
//! - [`undo`]: nested transaction scopes grouping edits into undoable steps
//!
//! Everything enters through the [`Editor`] façade: `attach`, `detach` and
//! `dispatch`.

pub mod boundary;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod dom;
pub mod editor;
pub mod errors;
pub mod events;
pub mod logging;
pub mod messages;
pub mod pipeline;
pub mod registry;
pub mod selection;
mod stages;
pub mod undo;

// Re-export commonly used types
pub use boundary::{Boundary, Range};
pub use config::EditorConfig;
pub use context::{ContextKind, EditContext};
pub use dom::{Dom, NodeId};
pub use editor::Editor;
pub use errors::AttachError;
pub use events::InputEvent;
pub use messages::EditIntent;
pub use registry::{Editable, EditableSettings};
pub use undo::{UndoContext, UndoError};
