//! Gradebook and calculation error types.
//!
//! Validation failures are not errors of the computation itself: they are
//! collected by [`crate::validate`] and surfaced together as [`InvalidInput`].

use thiserror::Error;

use crate::validate::ValidationIssue;

/// Errors raised by editing operations on a [`crate::model::Gradebook`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradebookError {
    /// Removing the subject would leave the gradebook empty.
    #[error("at least one subject required")]
    LastSubject,

    /// No subject has the given id.
    #[error("subject {0} not found")]
    UnknownSubject(u32),

    /// Two subjects share an id.
    #[error("duplicate subject id: {0}")]
    DuplicateId(u32),

    /// A gradebook was built without any subject.
    #[error("gradebook must contain at least one subject")]
    Empty,

    /// A per-subject KKM edit while the global KKM is in force.
    #[error("KKM of subject {0} follows the global KKM; disable use_global_kkm first")]
    KkmLocked(u32),

    /// The largest subject id is `u32::MAX`, so no new id can be assigned.
    #[error("no subject id left to assign after {}", u32::MAX)]
    IdSpaceExhausted,

    /// The global KKM is outside [0, 100].
    #[error("global KKM must be between 0-100, got {0}")]
    KkmOutOfRange(i64),
}

/// The input failed validation; the statistics engine was not run.
#[derive(Debug, Clone, Error)]
#[error("input has {} validation error(s)", issues.len())]
pub struct InvalidInput {
    /// Every issue found, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl InvalidInput {
    /// The human-readable messages, in discovery order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }
}
