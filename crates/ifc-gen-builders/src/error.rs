// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for element building and batch compilation

use crate::color::ColorError;
use ifc_gen_document::DocumentError;
use std::fmt;
use thiserror::Error;

/// Element building result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a single element
#[derive(Error, Debug)]
pub enum Error {
    /// No builder registered for the tag
    #[error("No builder registered for type '{tag}'. Available types: {available:?}")]
    UnknownElementType { tag: String, available: Vec<String> },

    /// Recognized type without a working builder
    #[error("{element_type} elements are not implemented yet")]
    Unimplemented { element_type: String },

    /// Any other construction failure
    #[error("Build error: {0}")]
    Build(String),

    /// Builder received a payload for another element type
    #[error("Builder for {expected} received a {actual} payload")]
    PayloadMismatch { expected: String, actual: String },

    /// Colour decoding failed
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Document construction failed
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl Error {
    /// Create a build error
    pub fn build(msg: impl Into<String>) -> Self {
        Error::Build(msg.into())
    }

    /// Create an unimplemented error
    pub fn unimplemented(element_type: impl Into<String>) -> Self {
        Error::Unimplemented {
            element_type: element_type.into(),
        }
    }

    /// Create a payload mismatch error
    pub fn payload_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::PayloadMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Category reported for this error in a batch
    pub fn kind(&self) -> ElementErrorKind {
        match self {
            Error::UnknownElementType { .. } => ElementErrorKind::UnknownElementType,
            Error::Unimplemented { .. } => ElementErrorKind::Unimplemented,
            _ => ElementErrorKind::Build,
        }
    }
}

/// Category of a per-element failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementErrorKind {
    UnknownElementType,
    Unimplemented,
    Build,
}

impl ElementErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementErrorKind::UnknownElementType => "UnknownElementType",
            ElementErrorKind::Unimplemented => "Unimplemented",
            ElementErrorKind::Build => "BuildError",
        }
    }

    /// Level a batch logs this failure at
    pub fn log_level(&self) -> log::Level {
        match self {
            ElementErrorKind::Unimplemented => log::Level::Warn,
            _ => log::Level::Error,
        }
    }
}

/// A failure of one element in a batch
///
/// Renders as `Element #<index> (<TYPE>): <message>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementError {
    pub index: usize,
    pub element_type: String,
    pub kind: ElementErrorKind,
    pub message: String,
}

impl ElementError {
    /// Wrap a builder error for the element at `index`
    pub fn new(index: usize, element_type: impl Into<String>, error: &Error) -> Self {
        Self {
            index,
            element_type: element_type.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Element #{} ({}): {}",
            self.index, self.element_type, self.message
        )
    }
}

impl std::error::Error for ElementError {}

/// Batch-level failures
#[derive(Error, Debug)]
pub enum CompileError {
    /// The empty document could not be created
    #[error("Failed to bootstrap document: {0}")]
    BootstrapFailure(#[source] DocumentError),

    /// No element was created
    #[error("No elements could be built.")]
    BatchEmpty { errors: Vec<ElementError> },
}

impl CompileError {
    /// Per-element errors carried by the failure
    pub fn element_errors(&self) -> &[ElementError] {
        match self {
            CompileError::BatchEmpty { errors } => errors,
            CompileError::BootstrapFailure(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_error_display() {
        let error = ElementError::new(3, "WINDOW", &Error::unimplemented("WINDOW"));
        assert_eq!(error.kind, ElementErrorKind::Unimplemented);
        assert_eq!(
            error.to_string(),
            "Element #3 (WINDOW): WINDOW elements are not implemented yet"
        );
    }

    #[test]
    fn test_kinds() {
        let unknown = Error::UnknownElementType {
            tag: "ROOF".to_string(),
            available: vec!["WALL".to_string()],
        };
        assert_eq!(unknown.kind(), ElementErrorKind::UnknownElementType);
        assert_eq!(
            unknown.to_string(),
            "No builder registered for type 'ROOF'. Available types: [\"WALL\"]"
        );
        assert_eq!(Error::build("bad").kind(), ElementErrorKind::Build);
        assert_eq!(
            Error::payload_mismatch("WALL", "DOOR").kind(),
            ElementErrorKind::Build
        );
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(ElementErrorKind::Unimplemented.log_level(), log::Level::Warn);
        assert_eq!(ElementErrorKind::UnknownElementType.log_level(), log::Level::Error);
        assert_eq!(ElementErrorKind::Build.log_level(), log::Level::Error);
    }
}
