//! Scoped undo transactions
//!
//! Each editable owns an [`UndoContext`]. Scopes nest with strict stack
//! discipline; edits recorded while a scope is open belong to the innermost
//! open scope. A scope opened with `partition_records = true` emits every
//! recorded edit as its own undoable step the moment it is recorded; with
//! `false` it accumulates edits and emits one merged step when it closes.
//! Emitted steps bubble outward through enclosing scopes, accumulating in
//! the nearest non-partitioning one, and land on the step stack only once
//! every enclosing scope partitions.

use thiserror::Error;

use crate::boundary::Range;
use crate::dom::{Dom, NodeId};

/// Undo-manager contract violations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoError {
    /// The handle does not refer to the innermost currently-open scope
    #[error("scope handle does not refer to the innermost open scope")]
    ScopeMismatch,
    /// No scope is open for this editable
    #[error("no undo scope is open")]
    NoOpenScope,
}

/// Provenance tag for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMeta {
    /// Opened by the editable lifecycle (attach)
    External,
    /// Opened on behalf of a user input occurrence
    UserDevice,
    /// Opened by a stage for a recognized gesture (e.g. "drop")
    Gesture(&'static str),
}

/// Token identifying one open scope; required to close exactly that scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeHandle(u64);

/// A primitive reversible mutation of the host document
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Text replacement inside one text node. Pure inserts have an empty
    /// `deleted`, pure deletes an empty `inserted`.
    Text {
        node: NodeId,
        offset: usize,
        deleted: String,
        inserted: String,
    },
    /// A node was inserted at `index` under `parent`
    InsertNode {
        parent: NodeId,
        index: usize,
        node: NodeId,
    },
    /// A node was removed from `index` under `parent`
    RemoveNode {
        parent: NodeId,
        index: usize,
        node: NodeId,
    },
}

impl EditOp {
    pub fn insert_text(node: NodeId, offset: usize, text: impl Into<String>) -> Self {
        EditOp::Text {
            node,
            offset,
            deleted: String::new(),
            inserted: text.into(),
        }
    }

    pub fn delete_text(node: NodeId, offset: usize, text: impl Into<String>) -> Self {
        EditOp::Text {
            node,
            offset,
            deleted: text.into(),
            inserted: String::new(),
        }
    }

    pub fn replace_text(
        node: NodeId,
        offset: usize,
        deleted: impl Into<String>,
        inserted: impl Into<String>,
    ) -> Self {
        EditOp::Text {
            node,
            offset,
            deleted: deleted.into(),
            inserted: inserted.into(),
        }
    }

    pub fn insert_node(parent: NodeId, index: usize, node: NodeId) -> Self {
        EditOp::InsertNode {
            parent,
            index,
            node,
        }
    }

    pub fn remove_node(parent: NodeId, index: usize, node: NodeId) -> Self {
        EditOp::RemoveNode {
            parent,
            index,
            node,
        }
    }

    /// The operation that reverses this one
    pub fn inverse(&self) -> Self {
        match self {
            EditOp::Text {
                node,
                offset,
                deleted,
                inserted,
            } => EditOp::Text {
                node: *node,
                offset: *offset,
                deleted: inserted.clone(),
                inserted: deleted.clone(),
            },
            EditOp::InsertNode {
                parent,
                index,
                node,
            } => EditOp::RemoveNode {
                parent: *parent,
                index: *index,
                node: *node,
            },
            EditOp::RemoveNode {
                parent,
                index,
                node,
            } => EditOp::InsertNode {
                parent: *parent,
                index: *index,
                node: *node,
            },
        }
    }

    /// Apply this operation to the document
    pub fn apply(&self, dom: &mut Dom) {
        match self {
            EditOp::Text {
                node,
                offset,
                deleted,
                inserted,
            } => {
                if !deleted.is_empty() {
                    dom.remove_text(*node, *offset..*offset + deleted.chars().count());
                }
                if !inserted.is_empty() {
                    dom.insert_text(*node, *offset, inserted);
                }
            }
            EditOp::InsertNode {
                parent,
                index,
                node,
            } => {
                dom.insert_child(*parent, *index, *node);
            }
            EditOp::RemoveNode { parent, node, .. } => {
                dom.remove_child(*parent, *node);
            }
        }
    }
}

/// A reversible edit description with the selections around it
#[derive(Debug, Clone, PartialEq)]
pub struct EditRecord {
    pub op: EditOp,
    /// Selection before the edit (restored by undo)
    pub range_before: Option<Range>,
    /// Selection after the edit (restored by redo)
    pub range_after: Option<Range>,
}

impl EditRecord {
    pub fn new(op: EditOp) -> Self {
        Self {
            op,
            range_before: None,
            range_after: None,
        }
    }

    /// Set the selection before the edit (builder pattern)
    pub fn with_range_before(mut self, range: Range) -> Self {
        self.range_before = Some(range);
        self
    }

    /// Set the selection after the edit (builder pattern)
    pub fn with_range_after(mut self, range: Range) -> Self {
        self.range_after = Some(range);
        self
    }

    /// The record that reverses this one
    pub fn inverse(&self) -> Self {
        Self {
            op: self.op.inverse(),
            range_before: self.range_after,
            range_after: self.range_before,
        }
    }
}

/// One fully-closed undoable step: one or more records applied atomically
#[derive(Debug, Clone, PartialEq)]
pub struct UndoStep {
    pub meta: ScopeMeta,
    pub records: Vec<EditRecord>,
}

impl UndoStep {
    /// Selection to restore when this step is undone
    pub fn range_before(&self) -> Option<Range> {
        self.records.first().and_then(|r| r.range_before)
    }

    /// Selection to restore when this step is redone
    pub fn range_after(&self) -> Option<Range> {
        self.records.last().and_then(|r| r.range_after)
    }
}

#[derive(Debug, Clone)]
struct Scope {
    handle: ScopeHandle,
    meta: ScopeMeta,
    partition_records: bool,
    /// Records waiting to merge into one step (non-partitioning scopes only)
    pending: Vec<EditRecord>,
}

/// Per-editable undo transaction manager
#[derive(Debug, Clone)]
pub struct UndoContext {
    scopes: Vec<Scope>,
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    next_handle: u64,
    max_steps: usize,
}

impl Default for UndoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoContext {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            next_handle: 0,
            max_steps: 1000,
        }
    }

    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Self::new()
        }
    }

    /// Open a nested scope; the handle closes exactly this scope
    pub fn enter(&mut self, meta: ScopeMeta, partition_records: bool) -> ScopeHandle {
        let handle = ScopeHandle(self.next_handle);
        self.next_handle += 1;
        self.scopes.push(Scope {
            handle,
            meta,
            partition_records,
            pending: Vec::new(),
        });
        tracing::trace!(?handle, ?meta, partition_records, "undo scope opened");
        handle
    }

    /// Close the scope identified by `handle`
    ///
    /// Strict stack discipline: only the innermost open scope may close.
    pub fn exit(&mut self, handle: ScopeHandle) -> Result<(), UndoError> {
        let innermost = self.scopes.last().ok_or(UndoError::NoOpenScope)?;
        if innermost.handle != handle {
            return Err(UndoError::ScopeMismatch);
        }
        let Some(scope) = self.scopes.pop() else {
            return Err(UndoError::NoOpenScope);
        };
        tracing::trace!(?handle, "undo scope closed");
        if !scope.partition_records && !scope.pending.is_empty() {
            let step = UndoStep {
                meta: scope.meta,
                records: scope.pending,
            };
            let below = self.scopes.len();
            self.deliver(below, step);
        }
        Ok(())
    }

    /// Append a reversible edit to the innermost open scope
    pub fn record(&mut self, record: EditRecord) -> Result<(), UndoError> {
        let depth = self.scopes.len();
        let innermost = self.scopes.last_mut().ok_or(UndoError::NoOpenScope)?;
        self.redo_stack.clear();
        if innermost.partition_records {
            let step = UndoStep {
                meta: innermost.meta,
                records: vec![record],
            };
            self.deliver(depth - 1, step);
        } else {
            innermost.pending.push(record);
        }
        Ok(())
    }

    /// Hand a completed step to the enclosing scopes, outermost-bound.
    ///
    /// Only the `below` innermost-to-outermost scopes may still capture it;
    /// the nearest non-partitioning one absorbs the records, otherwise the
    /// step lands on the undo stack.
    fn deliver(&mut self, below: usize, step: UndoStep) {
        for scope in self.scopes[..below].iter_mut().rev() {
            if !scope.partition_records {
                scope.pending.extend(step.records);
                return;
            }
        }
        self.undo_stack.push(step);
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the most recent fully-closed step, returning it
    pub fn undo(&mut self, dom: &mut Dom) -> Option<UndoStep> {
        let step = self.undo_stack.pop()?;
        for record in step.records.iter().rev() {
            record.op.inverse().apply(dom);
        }
        self.redo_stack.push(step.clone());
        Some(step)
    }

    /// Reapply the most recently undone step, returning it
    pub fn redo(&mut self, dom: &mut Dom) -> Option<UndoStep> {
        let step = self.redo_stack.pop()?;
        for record in &step.records {
            record.op.apply(dom);
        }
        self.undo_stack.push(step.clone());
        Some(step)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Number of currently open scopes
    pub fn open_scopes(&self) -> usize {
        self.scopes.len()
    }

    /// Drop all history and open scopes
    pub fn clear(&mut self) {
        self.scopes.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_doc() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let text = dom.create_text("");
        (dom, text)
    }

    /// Apply an insert through the dom and record it
    fn type_text(dom: &mut Dom, undo: &mut UndoContext, node: NodeId, offset: usize, s: &str) {
        dom.insert_text(node, offset, s);
        undo.record(EditRecord::new(EditOp::insert_text(node, offset, s)))
            .unwrap();
    }

    // ========================================================================
    // EditOp tests
    // ========================================================================

    #[test]
    fn test_text_op_inverse() {
        let (_, node) = text_doc();
        let op = EditOp::replace_text(node, 2, "old", "new");
        let inv = op.inverse();
        assert_eq!(inv, EditOp::replace_text(node, 2, "new", "old"));
    }

    #[test]
    fn test_node_op_inverse_round_trip() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let child = dom.create_element("span");

        let op = EditOp::insert_node(root, 0, child);
        op.apply(&mut dom);
        assert_eq!(dom.children(root), &[child]);

        op.inverse().apply(&mut dom);
        assert!(dom.children(root).is_empty());
        assert_eq!(op.inverse().inverse(), op);
    }

    #[test]
    fn test_text_op_apply_replace() {
        let mut dom = Dom::new();
        let node = dom.create_text("hello world");
        EditOp::replace_text(node, 6, "world", "there").apply(&mut dom);
        assert_eq!(dom.text(node), "hello there");
    }

    // ========================================================================
    // Scope discipline tests
    // ========================================================================

    #[test]
    fn test_exit_requires_innermost_handle() {
        let mut undo = UndoContext::new();
        let outer = undo.enter(ScopeMeta::External, false);
        let inner = undo.enter(ScopeMeta::UserDevice, true);

        assert_eq!(undo.exit(outer), Err(UndoError::ScopeMismatch));
        assert_eq!(undo.open_scopes(), 2);

        assert_eq!(undo.exit(inner), Ok(()));
        assert_eq!(undo.exit(outer), Ok(()));
        assert_eq!(undo.open_scopes(), 0);
    }

    #[test]
    fn test_exit_without_open_scope() {
        let mut undo = UndoContext::new();
        let handle = undo.enter(ScopeMeta::External, true);
        undo.exit(handle).unwrap();
        assert_eq!(undo.exit(handle), Err(UndoError::NoOpenScope));
    }

    #[test]
    fn test_record_without_open_scope() {
        let (_, node) = text_doc();
        let mut undo = UndoContext::new();
        let result = undo.record(EditRecord::new(EditOp::insert_text(node, 0, "a")));
        assert_eq!(result, Err(UndoError::NoOpenScope));
    }

    // ========================================================================
    // Partitioning tests
    // ========================================================================

    #[test]
    fn test_merged_scope_undoes_atomically() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        let scope = undo.enter(ScopeMeta::Gesture("paste"), false);
        type_text(&mut dom, &mut undo, node, 0, "a");
        type_text(&mut dom, &mut undo, node, 1, "b");
        type_text(&mut dom, &mut undo, node, 2, "c");
        assert_eq!(undo.undo_count(), 0); // nothing closed yet
        undo.exit(scope).unwrap();

        assert_eq!(undo.undo_count(), 1);
        assert_eq!(dom.text(node), "abc");

        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "");
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_partitioned_scope_undoes_stepwise() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        let scope = undo.enter(ScopeMeta::External, true);
        type_text(&mut dom, &mut undo, node, 0, "a");
        type_text(&mut dom, &mut undo, node, 1, "b");
        type_text(&mut dom, &mut undo, node, 2, "c");

        // Each record is its own step, undoable while the scope stays open
        assert_eq!(undo.undo_count(), 3);

        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "ab");
        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "a");
        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "");
        assert!(undo.undo(&mut dom).is_none());

        undo.exit(scope).unwrap();
    }

    #[test]
    fn test_nested_merged_scope_collapses_into_one_step() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        // Root partitions; a nested gesture merges its three edits
        let root = undo.enter(ScopeMeta::External, true);
        let gesture = undo.enter(ScopeMeta::Gesture("drop"), false);
        type_text(&mut dom, &mut undo, node, 0, "x");
        type_text(&mut dom, &mut undo, node, 1, "y");
        type_text(&mut dom, &mut undo, node, 2, "z");
        undo.exit(gesture).unwrap();

        assert_eq!(undo.undo_count(), 1);
        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "");

        undo.exit(root).unwrap();
    }

    #[test]
    fn test_partitioned_steps_accumulate_in_enclosing_merge_scope() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        // A partitioning scope inside a merging one: the inner steps still
        // collapse into the outer gesture's single step
        let outer = undo.enter(ScopeMeta::Gesture("composite"), false);
        let inner = undo.enter(ScopeMeta::UserDevice, true);
        type_text(&mut dom, &mut undo, node, 0, "1");
        type_text(&mut dom, &mut undo, node, 1, "2");
        undo.exit(inner).unwrap();
        undo.exit(outer).unwrap();

        assert_eq!(undo.undo_count(), 1);
        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "");
    }

    #[test]
    fn test_empty_merged_scope_emits_no_step() {
        let mut undo = UndoContext::new();
        let scope = undo.enter(ScopeMeta::Gesture("noop"), false);
        undo.exit(scope).unwrap();
        assert!(!undo.can_undo());
    }

    // ========================================================================
    // Undo/redo stack tests
    // ========================================================================

    #[test]
    fn test_undo_redo_round_trip() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        let scope = undo.enter(ScopeMeta::External, true);
        type_text(&mut dom, &mut undo, node, 0, "hi");
        undo.exit(scope).unwrap();

        undo.undo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "");
        assert!(undo.can_redo());

        undo.redo(&mut dom).unwrap();
        assert_eq!(dom.text(node), "hi");
        assert!(undo.can_undo());
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();

        let scope = undo.enter(ScopeMeta::External, true);
        type_text(&mut dom, &mut undo, node, 0, "a");
        undo.undo(&mut dom).unwrap();
        assert!(undo.can_redo());

        type_text(&mut dom, &mut undo, node, 0, "b");
        assert!(!undo.can_redo());

        undo.exit(scope).unwrap();
    }

    #[test]
    fn test_max_steps_trims_oldest() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::with_max_steps(3);

        let scope = undo.enter(ScopeMeta::External, true);
        for i in 0..5 {
            type_text(&mut dom, &mut undo, node, i, "x");
        }
        assert_eq!(undo.undo_count(), 3);
        undo.exit(scope).unwrap();
    }

    #[test]
    fn test_step_selection_restore_points() {
        let (mut dom, node) = text_doc();
        let mut undo = UndoContext::new();
        let before = crate::boundary::Range::caret(crate::boundary::Boundary::new(node, 0));
        let after = crate::boundary::Range::caret(crate::boundary::Boundary::new(node, 1));

        let scope = undo.enter(ScopeMeta::External, true);
        dom.insert_text(node, 0, "a");
        undo.record(
            EditRecord::new(EditOp::insert_text(node, 0, "a"))
                .with_range_before(before)
                .with_range_after(after),
        )
        .unwrap();

        let step = undo.undo(&mut dom).unwrap();
        assert_eq!(step.range_before(), Some(before));

        let step = undo.redo(&mut dom).unwrap();
        assert_eq!(step.range_after(), Some(after));

        undo.exit(scope).unwrap();
    }
}
