//! Ambient selection state
//!
//! Stands in for the host's native selection. Only the final pipeline stage
//! writes to it; everything else reads.

use crate::boundary::Range;

/// The committed, externally visible selection
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Option<Range>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently committed range, if any
    pub fn current(&self) -> Option<Range> {
        self.current
    }

    /// Replace the committed selection
    pub fn commit(&mut self, range: Range) {
        tracing::trace!(?range, "selection committed");
        self.current = Some(range);
    }

    /// Drop the committed selection
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use crate::dom::Dom;

    #[test]
    fn test_commit_and_clear() {
        let mut dom = Dom::new();
        let text = dom.create_text("abc");
        let range = Range::caret(Boundary::new(text, 1));

        let mut selection = SelectionState::new();
        assert_eq!(selection.current(), None);

        selection.commit(range);
        assert_eq!(selection.current(), Some(range));

        selection.clear();
        assert_eq!(selection.current(), None);
    }
}
