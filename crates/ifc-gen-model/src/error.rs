// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for payload validation

use thiserror::Error;

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while decoding or validating a generate request
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Body is not valid JSON or does not match the request shape
    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    /// A field violates its constraint
    #[error("Invalid value at {path}: {message}")]
    Invalid { path: String, message: String },
}

impl SchemaError {
    /// Create a new constraint violation
    pub fn invalid(path: impl Into<String>, msg: impl Into<String>) -> Self {
        SchemaError::Invalid {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Path of the offending field, if known
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::Invalid { path, .. } => Some(path),
            SchemaError::Json(_) => None,
        }
    }
}
