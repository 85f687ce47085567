// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window builder (placeholder)

use crate::registry::ElementBuilder;
use crate::{Error, Result};
use ifc_gen_document::SpatialDocument;
use ifc_gen_model::{ElementPayload, EntityId};

/// Accepts window payloads but builds nothing
///
/// Always fails with `Unimplemented`, which keeps windows distinct from
/// unknown element types in batch reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowBuilder;

impl ElementBuilder for WindowBuilder {
    fn build(
        &self,
        _document: &mut SpatialDocument,
        _body_context: EntityId,
        _storey: EntityId,
        payload: &ElementPayload,
    ) -> Result<Vec<EntityId>> {
        match payload {
            ElementPayload::Window(window) => {
                log::warn!("Window '{}' skipped: no window geometry", window.name);
                Err(Error::unimplemented("WINDOW"))
            }
            other => Err(Error::payload_mismatch("WINDOW", other.tag())),
        }
    }
}
