//! Error types for gradebook mutations.

use thiserror::Error;

/// Errors from add/update/delete on a [`crate::Gradebook`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// Row index past the end of the subject's grade list.
    #[error("Grade index {index} out of range for {subject} ({len} grades)")]
    IndexOutOfRange {
        subject: String,
        index: usize,
        len: usize,
    },
}
