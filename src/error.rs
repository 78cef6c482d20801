//! Error types.
//!
//! Absence (no subject, no conjunct, ...) is never an error; it is an
//! `Option::None` at the call site. Errors are reserved for malformed input
//! trees, which are rejected before any transformation runs, and for failures
//! of the external parsing/completion collaborators.

use std::time::Duration;

use thiserror::Error;

/// A sentence tree violated one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("sentence tree has no tokens")]
    Empty,

    #[error("token at index {index} carries position {position}; positions must be contiguous from 0")]
    NonContiguous { index: usize, position: usize },

    #[error("token {position} points at head {head}, which is outside the sentence")]
    DanglingHead { position: usize, head: usize },

    #[error("sentence tree has no ROOT token")]
    NoRoot,

    #[error("sentence tree has several ROOT tokens (positions {positions:?})")]
    MultipleRoots { positions: Vec<usize> },

    #[error("token {position} is its own head but is labeled {label}")]
    SelfHeadedNonRoot { position: usize, label: String },

    #[error("token {position} is labeled ROOT but hangs under token {head}")]
    HeadedRoot { position: usize, head: usize },

    #[error("token {position} does not reach ROOT (head cycle)")]
    Cycle { position: usize },

    #[error("unknown {kind} tag '{tag}'")]
    UnknownTag { kind: &'static str, tag: String },

    #[error("malformed tree document: {0}")]
    Json(String),
}

/// Failure of the parsing or completion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator did not answer within {limit:?}")]
    Timeout { limit: Duration },

    #[error("malformed collaborator response: {0}")]
    Malformed(String),
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_token() {
        let err = TreeError::DanglingHead { position: 3, head: 9 };
        assert_eq!(err.to_string(), "token 3 points at head 9, which is outside the sentence");

        let err = TreeError::MultipleRoots { positions: vec![1, 4] };
        assert_eq!(err.to_string(), "sentence tree has several ROOT tokens (positions [1, 4])");

        let err = TreeError::SelfHeadedNonRoot { position: 2, label: "nsubj".into() };
        assert_eq!(err.to_string(), "token 2 is its own head but is labeled nsubj");
    }

    #[test]
    fn collaborator_errors_stay_distinct_from_tree_errors() {
        let err: Error = CollaboratorError::Timeout { limit: Duration::from_secs(2) }.into();
        assert!(matches!(err, Error::Collaborator(CollaboratorError::Timeout { .. })));
        assert_eq!(err.to_string(), "collaborator did not answer within 2s");
    }
}
