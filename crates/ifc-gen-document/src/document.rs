// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory entity store

use crate::error::{DocumentError, Result};
use crate::writer::{StepHeader, StepWriter};
use ifc_gen_model::{AttributeValue, Entity, EntityId, EntityResolver, IfcType};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Schema identifier written to FILE_SCHEMA
pub const SCHEMA_IDENTIFIER: &str = "IFC4";

/// A document under construction
///
/// Entities are numbered `#1..#n` in creation order and never removed.
/// One document belongs to exactly one compile call.
#[derive(Debug, Clone)]
pub struct SpatialDocument {
    schema: String,
    entities: Vec<Entity>,
    /// Type -> entity IDs index
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
}

impl Default for SpatialDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialDocument {
    /// Create an empty IFC4 document
    pub fn new() -> Self {
        Self {
            schema: SCHEMA_IDENTIFIER.to_string(),
            entities: Vec::new(),
            type_index: FxHashMap::default(),
        }
    }

    /// Schema identifier
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Append an entity and return its id
    pub fn add(&mut self, ifc_type: IfcType, attributes: Vec<AttributeValue>) -> EntityId {
        let id = EntityId(self.entities.len() as u32 + 1);
        log::trace!("{}={}", id, ifc_type);
        self.type_index
            .entry(ifc_type.clone())
            .or_default()
            .push(id);
        self.entities.push(Entity {
            id,
            ifc_type,
            attributes,
        });
        id
    }

    /// Entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// The project, if created
    pub fn project(&self) -> Option<EntityId> {
        self.type_index
            .get(&IfcType::IfcProject)
            .and_then(|ids| ids.first().copied())
    }

    /// Look up an entity, failing when absent
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.get(id).ok_or(DocumentError::EntityNotFound(id))
    }

    /// Look up an entity and check its type
    pub fn entity_of_type(&self, id: EntityId, expected: &IfcType) -> Result<&Entity> {
        let entity = self.entity(id)?;
        if &entity.ifc_type != expected {
            return Err(DocumentError::unexpected_type(id, expected, &entity.ifc_type));
        }
        Ok(entity)
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        let index = (id.0 as usize)
            .checked_sub(1)
            .ok_or(DocumentError::EntityNotFound(id))?;
        self.entities
            .get_mut(index)
            .ok_or(DocumentError::EntityNotFound(id))
    }

    fn attribute_mut(&mut self, id: EntityId, index: usize) -> Result<&mut AttributeValue> {
        self.entity_mut(id)?
            .attributes
            .get_mut(index)
            .ok_or(DocumentError::AttributeOutOfRange { entity: id, index })
    }

    /// Overwrite one attribute
    pub fn set_attribute(
        &mut self,
        id: EntityId,
        index: usize,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        *self.attribute_mut(id, index)? = value.into();
        Ok(())
    }

    /// Append to a list attribute, turning `$` into a one-element list
    pub fn push_to_list(
        &mut self,
        id: EntityId,
        index: usize,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        let slot = self.attribute_mut(id, index)?;
        match slot {
            AttributeValue::List(items) => items.push(value.into()),
            AttributeValue::Null => *slot = AttributeValue::List(vec![value.into()]),
            _ => return Err(DocumentError::AttributeOutOfRange { entity: id, index }),
        }
        Ok(())
    }

    /// Serialize with a default header
    pub fn to_step_string(&self) -> String {
        StepWriter::new(StepHeader::default()).write(self)
    }

    /// Serialized bytes (UTF-8 STEP text)
    pub fn to_encoded_bytes(&self) -> Vec<u8> {
        self.to_step_string().into_bytes()
    }

    /// Serialize to a file, naming it in the header
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = StepWriter::new(StepHeader::named(name)).write(self);
        std::fs::write(path, text)?;
        log::debug!("Wrote {} entities to {}", self.entities.len(), path.display());
        Ok(())
    }
}

impl EntityResolver for SpatialDocument {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.entities.get(index))
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&Entity> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index.get(ifc_type).map(|v| v.len()).unwrap_or(0)
    }

    fn all_ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_creation_order() {
        let mut doc = SpatialDocument::new();
        let a = doc.add(IfcType::IfcCartesianPoint, vec![AttributeValue::floats(&[0.0])]);
        let b = doc.add(IfcType::IfcDirection, vec![AttributeValue::floats(&[1.0])]);
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert_eq!(doc.entity_count(), 2);
        assert_eq!(doc.count_by_type(&IfcType::IfcDirection), 1);
        assert!(doc.get(EntityId(0)).is_none());
        assert!(doc.get(EntityId(3)).is_none());
    }

    #[test]
    fn test_push_to_list_promotes_null() {
        let mut doc = SpatialDocument::new();
        let id = doc.add(IfcType::IfcUnitAssignment, vec![AttributeValue::Null]);
        doc.push_to_list(id, 0, EntityId(9)).unwrap();
        doc.push_to_list(id, 0, EntityId(10)).unwrap();
        assert_eq!(
            doc.entity(id).unwrap().get_refs(0),
            Some(vec![EntityId(9), EntityId(10)])
        );
    }

    #[test]
    fn test_attribute_errors() {
        let mut doc = SpatialDocument::new();
        let id = doc.add(IfcType::IfcMaterial, vec![AttributeValue::string("WOOD")]);
        assert!(matches!(
            doc.set_attribute(id, 4, AttributeValue::Null),
            Err(DocumentError::AttributeOutOfRange { index: 4, .. })
        ));
        assert!(matches!(
            doc.push_to_list(id, 0, EntityId(1)),
            Err(DocumentError::AttributeOutOfRange { .. })
        ));
        assert!(matches!(
            doc.entity_of_type(id, &IfcType::IfcWall),
            Err(DocumentError::UnexpectedType { .. })
        ));
        assert!(matches!(
            doc.set_attribute(EntityId(42), 0, AttributeValue::Null),
            Err(DocumentError::EntityNotFound(EntityId(42)))
        ));
    }

    #[test]
    fn test_write_to_file() {
        let mut doc = SpatialDocument::new();
        doc.add(IfcType::IfcMaterial, vec![AttributeValue::string("WOOD")]);
        let path = std::env::temp_dir().join(format!("ifc-gen-doc-{}.ifc", std::process::id()));
        doc.write_to(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("#1=IFCMATERIAL('WOOD');"));
        assert!(text.contains(&format!("FILE_NAME('ifc-gen-doc-{}.ifc'", std::process::id())));
    }
}
