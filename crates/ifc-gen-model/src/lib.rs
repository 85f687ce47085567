// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Gen Model - Shared types and traits for IFC document generation
//!
//! This crate provides the vocabulary every other IFC-Gen crate speaks:
//! entity identifiers and attribute values for the in-memory document, the
//! element payload schemas sent by design front ends, and read-only traits
//! for walking a finished document.
//!
//! # Architecture
//!
//! - [`EntityResolver`] - Entity lookup by id and by type
//! - [`ElementPayload`] - Tagged union of wall / door / window payloads
//! - [`GenerateRequest`] - A validated batch of payloads plus project metadata
//! - [`SpatialNode`] - Project → Site → Building → Storey → element tree
//!
//! # Example
//!
//! ```ignore
//! use ifc_gen_model::GenerateRequest;
//!
//! let request = GenerateRequest::from_json(body)?;
//! for element in &request.elements {
//!     println!("{} element", element.tag());
//! }
//! ```

pub mod error;
pub mod payload;
pub mod resolver;
pub mod spatial;
pub mod types;

// Re-export all public types
pub use error::*;
pub use payload::*;
pub use resolver::*;
pub use spatial::*;
pub use types::*;
