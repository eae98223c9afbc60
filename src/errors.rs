//! Error types for editable lifecycle operations

use thiserror::Error;

use crate::dom::NodeId;

/// Registry misuse, reported synchronously to the attach/detach caller
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The element already maps to a live editable
    #[error("element #{} is already attached", .0.index())]
    AlreadyAttached(NodeId),
    /// No live editable maps to the element
    #[error("element #{} is not attached", .0.index())]
    NotAttached(NodeId),
}
