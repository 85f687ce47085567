// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up entities in a document

use crate::{AttributeValue, Entity, EntityId, IfcType};

/// Entity lookup and reference resolution
///
/// Implementations should provide O(1) lookup by entity ID.
///
/// # Example
///
/// ```ignore
/// use ifc_gen_model::{EntityResolver, IfcType};
///
/// fn count_walls(resolver: &dyn EntityResolver) -> usize {
///     resolver.count_by_type(&IfcType::IfcWall)
/// }
/// ```
pub trait EntityResolver {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// Resolve an entity reference from an attribute value
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<&Entity> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references
    ///
    /// Returns an empty vector if the attribute is not a list.
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<&Entity> {
        match attr {
            AttributeValue::List(items) => items
                .iter()
                .filter_map(|item| self.resolve_ref(item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get all entities of a specific type, in creation order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&Entity>;

    /// Count entities of a specific type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.entities_by_type(ifc_type).len()
    }

    /// Get all entity IDs in the document
    fn all_ids(&self) -> Vec<EntityId>;

    /// Get total entity count
    fn entity_count(&self) -> usize {
        self.all_ids().len()
    }
}

/// Extension methods for EntityResolver
pub trait EntityResolverExt: EntityResolver {
    /// Check if an entity exists
    fn exists(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Find rooted entities of a type by their Name attribute
    fn find_named(&self, ifc_type: &IfcType, name: &str) -> Vec<&Entity> {
        self.entities_by_type(ifc_type)
            .into_iter()
            .filter(|e| e.name() == Some(name))
            .collect()
    }
}

// Blanket implementation for all EntityResolver types
impl<T: EntityResolver + ?Sized> EntityResolverExt for T {}
