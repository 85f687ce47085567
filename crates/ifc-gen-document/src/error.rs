// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document construction

use ifc_gen_model::{EntityId, IfcType};
use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while building a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// Attribute index past the end of the entity's attribute list
    #[error("Attribute {index} out of range on entity {entity}")]
    AttributeOutOfRange { entity: EntityId, index: usize },

    /// Entity has a different type than the operation requires
    #[error("Entity {entity} is {actual}, expected {expected}")]
    UnexpectedType {
        entity: EntityId,
        expected: String,
        actual: String,
    },

    /// Type cannot be created as a rooted entity
    #[error("{0} is not a rooted entity type")]
    NotRooted(IfcType),

    /// Operation needs the IfcProject, which has not been created yet
    #[error("Document has no IfcProject")]
    MissingProject,

    /// Style list does not fit the representation's items
    #[error("Cannot assign {styles} styles to a representation with {items} items")]
    StyleCountMismatch { items: usize, styles: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Create an unexpected type error
    pub fn unexpected_type(entity: EntityId, expected: &IfcType, actual: &IfcType) -> Self {
        DocumentError::UnexpectedType {
            entity,
            expected: expected.name().to_string(),
            actual: actual.name().to_string(),
        }
    }
}
