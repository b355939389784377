//! Linear undo/redo history of committed buffers.
//!
//! History is kept as two explicit stacks:
//!
//! - `past` holds every committed state, oldest first. Its last element is the
//!   current state and its first element is the loaded image, which can never
//!   be undone.
//! - `future` holds undone states, most recently undone last, so redo pops
//!   from the end.
//!
//! Committing a new edit clears `future`. There is no branching.
//!
//! Snapshots are stored behind [`Arc`] so a caller can hold the current
//! state (for example to encode it on another thread) while the stack keeps
//! moving. Stored buffers are never mutated.

use std::sync::Arc;

use crate::error::EditError;
use crate::raster::RasterBuffer;

#[derive(Debug, Clone)]
pub struct HistoryStack {
    past: Vec<Arc<RasterBuffer>>,
    future: Vec<Arc<RasterBuffer>>,
}

impl HistoryStack {
    /// Start a history whose first, permanent entry is `initial`.
    pub fn new(initial: RasterBuffer) -> Self {
        Self::from_snapshot(Arc::new(initial))
    }

    pub(crate) fn from_snapshot(initial: Arc<RasterBuffer>) -> Self {
        Self {
            past: vec![initial],
            future: Vec::new(),
        }
    }

    /// Commit `buffer` as the new current state and discard any redo states.
    pub fn push(&mut self, buffer: RasterBuffer) {
        self.past.push(Arc::new(buffer));
        self.future.clear();
    }

    /// Step back one state and return the new current state.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NothingToUndo`] when only the initial state is
    /// left. The stack is unchanged in that case.
    pub fn undo(&mut self) -> Result<&RasterBuffer, EditError> {
        if self.past.len() <= 1 {
            return Err(EditError::NothingToUndo);
        }
        if let Some(top) = self.past.pop() {
            self.future.push(top);
        }
        Ok(self.current())
    }

    /// Re-apply the most recently undone state and return it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NothingToRedo`] when nothing has been undone
    /// since the last commit.
    pub fn redo(&mut self) -> Result<&RasterBuffer, EditError> {
        let next = self.future.pop().ok_or(EditError::NothingToRedo)?;
        self.past.push(next);
        Ok(self.current())
    }

    /// The current state: the top of `past`.
    pub fn current(&self) -> &RasterBuffer {
        self.current_snapshot()
    }

    /// Shared handle to the current state.
    pub fn current_snapshot(&self) -> &Arc<RasterBuffer> {
        // `past` is created with one entry and undo never pops the last one
        &self.past[self.past.len() - 1]
    }

    /// Number of committed states, including the initial one.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of undone states available for redo.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Push),
            Just(Op::Undo),
            Just(Op::Redo),
        ]
    }

    proptest! {
        /// Property: The stack behaves like a cursor over a truncated list.
        #[test]
        fn prop_matches_cursor_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut history = HistoryStack::new(RasterBuffer::filled(1, 1, [0; 3]));
            let mut model: Vec<u8> = vec![0];
            let mut cursor = 0usize;

            for op in ops {
                match op {
                    Op::Push(v) => {
                        history.push(RasterBuffer::filled(1, 1, [v; 3]));
                        model.truncate(cursor + 1);
                        model.push(v);
                        cursor += 1;
                    }
                    Op::Undo => {
                        let result = history.undo();
                        if cursor == 0 {
                            prop_assert_eq!(result, Err(EditError::NothingToUndo));
                        } else {
                            prop_assert!(result.is_ok());
                            cursor -= 1;
                        }
                    }
                    Op::Redo => {
                        let result = history.redo();
                        if cursor + 1 == model.len() {
                            prop_assert_eq!(result, Err(EditError::NothingToRedo));
                        } else {
                            prop_assert!(result.is_ok());
                            cursor += 1;
                        }
                    }
                }

                prop_assert_eq!(history.current().pixel(0, 0), [model[cursor]; 3]);
                prop_assert_eq!(history.past_len(), cursor + 1);
                prop_assert_eq!(history.future_len(), model.len() - cursor - 1);
                prop_assert!(history.past_len() >= 1);
            }
        }
    }
}
