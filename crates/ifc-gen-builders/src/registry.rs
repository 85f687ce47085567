// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder Registry - Dispatch from element type tags to builders
//!
//! Tags are upper-cased on registration and lookup. The process-wide
//! registry is filled once on first use and read-only afterwards.

use crate::{DoorBuilder, Error, Result, WallBuilder, WindowBuilder};
use ifc_gen_document::SpatialDocument;
use ifc_gen_model::{ElementPayload, EntityId};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Element builder trait
///
/// Each builder turns one payload kind into products of the document.
pub trait ElementBuilder: Send + Sync {
    /// Build the payload into `document`
    ///
    /// # Arguments
    /// * `document` - Document receiving the new entities
    /// * `body_context` - 'Body' sub-context for every shape representation
    /// * `storey` - Spatial container for the created products
    /// * `payload` - Validated element payload
    ///
    /// # Returns
    /// Every product created, in creation order
    fn build(
        &self,
        document: &mut SpatialDocument,
        body_context: EntityId,
        storey: EntityId,
        payload: &ElementPayload,
    ) -> Result<Vec<EntityId>>;
}

/// Tag → builder table
#[derive(Default)]
pub struct BuilderRegistry {
    builders: FxHashMap<String, Arc<dyn ElementBuilder>>,
}

impl BuilderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the WALL, DOOR and WINDOW builders
    pub fn with_default_builders() -> Self {
        let mut registry = Self::new();
        registry.register("WALL", Arc::new(WallBuilder));
        registry.register("DOOR", Arc::new(DoorBuilder));
        registry.register("WINDOW", Arc::new(WindowBuilder));
        registry
    }

    /// Insert or replace the builder for a tag
    pub fn register(&mut self, tag: &str, builder: Arc<dyn ElementBuilder>) {
        let tag = tag.to_uppercase();
        if self.builders.insert(tag.clone(), builder).is_some() {
            log::debug!("Replaced builder for {}", tag);
        }
    }

    /// Builder for a tag (case-insensitive)
    pub fn lookup(&self, tag: &str) -> Result<Arc<dyn ElementBuilder>> {
        self.builders
            .get(&tag.to_uppercase())
            .map(Arc::clone)
            .ok_or_else(|| Error::UnknownElementType {
                tag: tag.to_string(),
                available: self.available_tags(),
            })
    }

    /// Registered tags, sorted
    pub fn available_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.builders.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Check if a tag has a builder
    pub fn contains(&self, tag: &str) -> bool {
        self.builders.contains_key(&tag.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

static GLOBAL_REGISTRY: Lazy<BuilderRegistry> = Lazy::new(BuilderRegistry::with_default_builders);

/// Process-wide registry with the default builders
pub fn global_registry() -> &'static BuilderRegistry {
    &GLOBAL_REGISTRY
}
