// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Gen Builders
//!
//! Turns element payloads into products of a [`SpatialDocument`].
//!
//! ## Overview
//!
//! - **Coordinates**: client payloads are Y-up, the document is Z-up
//! - **Colours**: packed `0xRRGGBB` integers and `#RRGGBB` strings
//! - **Builders**: one [`ElementBuilder`] per element type tag
//! - **Registry**: tag → builder table, filled once at startup
//! - **Compiler**: runs a batch, collecting per-element failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_gen_builders::compile;
//! use ifc_gen_model::GenerateRequest;
//!
//! let request = GenerateRequest::from_json(body)?;
//! let batch = compile(&request.elements, &request.metadata_or_default())?;
//! for id in batch.created_identifiers() {
//!     println!("{}", id);
//! }
//! ```
//!
//! [`SpatialDocument`]: ifc_gen_document::SpatialDocument

pub mod color;
pub mod compile;
pub mod coords;
pub mod door;
pub mod error;
pub mod profile;
pub mod registry;
pub mod wall;
pub mod window;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

// Re-export main types
pub use color::{hex_to_rgb, int_to_rgb, rgb_to_hex, rgb_to_int, ColorError};
pub use compile::{compile, compile_with, BatchResult, CreatedElement};
pub use coords::{from_document_space, to_document_space};
pub use door::DoorBuilder;
pub use error::{CompileError, ElementError, ElementErrorKind, Error, Result};
pub use profile::Profile2D;
pub use registry::{global_registry, BuilderRegistry, ElementBuilder};
pub use wall::{wall_segments, WallBuilder, WallSegment};
pub use window::WindowBuilder;
