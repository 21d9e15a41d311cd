//! Error types for policy parsing, validation and loading.

use std::path::PathBuf;
use thiserror::Error;

/// The policy text could not be turned into a [`Policy`](crate::Policy).
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed JSON, or a field with the wrong type.
    #[error("Invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed JSON that is not a policy document.
    #[error("Unexpected policy shape: {0}")]
    Shape(String),
}

impl ParseError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        ParseError::Shape(msg.into())
    }
}

/// A structural or numeric contradiction inside a policy.
///
/// `path` points at the offending node, e.g. `rules[2].charset_requirements[digits]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {reason}")]
pub struct ConsistencyError {
    pub path: String,
    pub reason: String,
}

impl ConsistencyError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Policy file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read policy file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Policy file is empty")]
    EmptyFile,
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Inconsistent policy: {0}")]
    Consistency(#[from] ConsistencyError),
}
