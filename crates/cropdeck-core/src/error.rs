//! Error taxonomy for edit-session operations.

use thiserror::Error;

/// Errors produced by the geometry engine, raster operations, history and
/// the edit session.
///
/// Every variant except [`EditError::OutOfBounds`] is recoverable: the failed
/// call leaves history and the working buffer exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The dragged region has zero width or height after clamping.
    #[error("Invalid crop region: selection has zero width or height")]
    InvalidRegion,

    /// A region or mask does not fit the buffer it was applied to.
    #[error("Region {x1},{y1}..{x2},{y2} exceeds buffer of {width}x{height}")]
    OutOfBounds {
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        width: u32,
        height: u32,
    },

    /// Undo requested with only the loaded image on the history stack.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo requested with no undone edits pending.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Scale outside 10..=200 percent, or one that collapses a dimension to 0.
    #[error("Invalid scale: {0}%")]
    InvalidScale(u32),

    /// A pointer event arrived while no drag was in progress.
    #[error("No drag in progress")]
    NotDragging,

    /// A drag was started while another was still in progress.
    #[error("A drag is already in progress")]
    AlreadyDragging,

    /// The image could not be read or decoded.
    #[error("Unreadable image file: {0}")]
    UnreadableFile(String),

    /// The image could not be encoded or written.
    #[error("Failed to write image: {0}")]
    WriteFailure(String),

    /// Editor configuration could not be parsed or is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EditError {
    /// Returns false only for contract violations that indicate a bug.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EditError::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(EditError::NothingToUndo.to_string(), "Nothing to undo");
        assert_eq!(EditError::InvalidScale(0).to_string(), "Invalid scale: 0%");

        let err = EditError::OutOfBounds {
            x1: 0,
            y1: 0,
            x2: 20,
            y2: 10,
            width: 10,
            height: 10,
        };
        assert_eq!(err.to_string(), "Region 0,0..20,10 exceeds buffer of 10x10");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(EditError::InvalidRegion.is_recoverable());
        assert!(EditError::NothingToRedo.is_recoverable());
        assert!(EditError::UnreadableFile("x".into()).is_recoverable());
        assert!(!EditError::OutOfBounds {
            x1: 0,
            y1: 0,
            x2: 1,
            y2: 1,
            width: 0,
            height: 0,
        }
        .is_recoverable());
    }
}
