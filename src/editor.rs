//! Editor façade - lifecycle entry points and event intake
//!
//! Owns the host document, the editable registry, the ambient selection and
//! the configuration. External code talks to the editor through `attach`,
//! `detach` and `dispatch`; everything else happens inside the pipeline.
//!
//! No hidden singleton: every editor instance is independent, so tests can
//! run several side by side.

use crate::config::EditorConfig;
use crate::context::{ContextKind, EditContext};
use crate::dom::{Dom, NodeId};
use crate::errors::AttachError;
use crate::events::InputEvent;
use crate::pipeline;
use crate::registry::{Editable, EditableRegistry, EditableSettings};
use crate::selection::SelectionState;
use crate::undo::ScopeMeta;

/// The editing core: document, registry, selection and configuration
#[derive(Debug)]
pub struct Editor {
    pub(crate) dom: Dom,
    pub(crate) registry: EditableRegistry,
    pub(crate) selection: SelectionState,
    pub(crate) config: EditorConfig,
}

impl Editor {
    /// Create an editor over a host document with default configuration
    pub fn new(dom: Dom) -> Self {
        Self::with_config(dom, EditorConfig::default())
    }

    pub fn with_config(dom: Dom, config: EditorConfig) -> Self {
        Self {
            dom,
            registry: EditableRegistry::new(),
            selection: SelectionState::new(),
            config,
        }
    }

    // === Lifecycle ===

    /// Turn an element into an editable region
    ///
    /// Opens the editable's root undo scope (external provenance, each edit
    /// its own undo step), marks the element as accepting input, and sends a
    /// synthetic attach occurrence through the pipeline.
    pub fn attach(&mut self, element: NodeId) -> Result<(), AttachError> {
        let settings = self.config.editable_settings();
        self.attach_with(element, settings)
    }

    /// Like [`attach`](Self::attach) with explicit per-editable settings
    pub fn attach_with(
        &mut self,
        element: NodeId,
        settings: EditableSettings,
    ) -> Result<(), AttachError> {
        if self.registry.contains(element) {
            return Err(AttachError::AlreadyAttached(element));
        }
        tracing::debug!(element = element.index(), "attaching editable");

        let mut editable = Editable::new(element, settings);
        let root = editable.undo.enter(ScopeMeta::External, true);
        editable.set_root_scope(root);
        self.registry.insert(editable);
        self.dom.set_editable_flag(element, true);

        pipeline::dispatch(
            self,
            None,
            Some(EditContext::lifecycle(ContextKind::Attach, element)),
        );
        Ok(())
    }

    /// Reverse [`attach`](Self::attach), returning the editable
    ///
    /// The returned editable keeps its undo history; the host may keep
    /// driving it against the document until it drops it.
    pub fn detach(&mut self, element: NodeId) -> Result<Editable, AttachError> {
        let mut editable = self
            .registry
            .remove(element)
            .ok_or(AttachError::NotAttached(element))?;
        tracing::debug!(element = element.index(), "detaching editable");

        editable.is_open = false;
        if let Some(root) = editable.root_scope() {
            if let Err(e) = editable.undo.exit(root) {
                // A collaborator left a nested scope open; the editable is
                // going away regardless, other editables are unaffected.
                tracing::warn!(element = element.index(), error = %e, "root scope close failed");
            }
        }
        self.dom.set_editable_flag(element, false);

        pipeline::dispatch(
            self,
            None,
            Some(EditContext::lifecycle(ContextKind::Detach, element)),
        );
        Ok(editable)
    }

    // === Input intake ===

    /// Feed one raw input occurrence through the pipeline
    ///
    /// Normally wired to the host's native input delivery.
    pub fn dispatch(&mut self, event: InputEvent) {
        pipeline::dispatch(self, Some(event), None);
    }

    // === History ===

    /// Revert the most recent undo step of an attached editable
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, element: NodeId) -> Result<bool, AttachError> {
        let Self {
            dom,
            registry,
            selection,
            ..
        } = self;
        let editable = registry
            .get_mut(element)
            .ok_or(AttachError::NotAttached(element))?;
        match editable.undo.undo(dom) {
            Some(step) => {
                if let Some(range) = step.range_before() {
                    selection.commit(range);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reapply the most recently undone step of an attached editable
    pub fn redo(&mut self, element: NodeId) -> Result<bool, AttachError> {
        let Self {
            dom,
            registry,
            selection,
            ..
        } = self;
        let editable = registry
            .get_mut(element)
            .ok_or(AttachError::NotAttached(element))?;
        match editable.undo.redo(dom) {
            Some(step) => {
                if let Some(range) = step.range_after() {
                    selection.commit(range);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // === Accessors ===

    pub fn document(&self) -> &Dom {
        &self.dom
    }

    pub fn document_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_attached(&self, element: NodeId) -> bool {
        self.registry.contains(element)
    }

    pub fn editable(&self, element: NodeId) -> Option<&Editable> {
        self.registry.get(element)
    }

    pub fn editable_mut(&mut self, element: NodeId) -> Option<&mut Editable> {
        self.registry.get_mut(element)
    }

    /// Number of currently attached editables
    pub fn attached_count(&self) -> usize {
        self.registry.len()
    }
}
