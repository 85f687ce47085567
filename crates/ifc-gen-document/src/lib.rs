// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Gen Document - In-memory IFC4 document construction
//!
//! This crate owns the entity store every element builder writes into and
//! the serializer that turns it into an ISO-10303-21 (STEP) exchange file.
//!
//! # Features
//!
//! - **Entity store** with per-type index, implementing `EntityResolver`
//! - **Spatial bootstrap**: units, representation contexts and the
//!   Project → Site → Building → Storey chain
//! - **Relationship helpers** that reuse an existing relationship for the
//!   same relating object instead of creating duplicates
//! - **Surface styles** and styled representation items
//! - **STEP writer** with IFC string and real encoding
//!
//! # Example
//!
//! ```ignore
//! use ifc_gen_document::bootstrap;
//!
//! let scaffold = bootstrap::create("Project", "Site", "Building", "Ground Floor")?;
//! let text = scaffold.document.to_step_string();
//! assert!(text.starts_with("ISO-10303-21;"));
//! ```

pub mod bootstrap;
mod context;
mod document;
pub mod error;
mod geometry;
pub mod guid;
mod relations;
pub mod spatial;
mod style;
pub mod units;
pub mod writer;

pub use bootstrap::{Bootstrap, SpatialHierarchy};
pub use document::{SpatialDocument, SCHEMA_IDENTIFIER};
pub use error::{DocumentError, Result};
pub use spatial::{containing_storey, spatial_tree};
pub use units::{extract_unit_scale, UnitKind};
pub use writer::{StepHeader, StepWriter};
