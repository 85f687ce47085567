// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooted entities and the relationships between them

use crate::document::SpatialDocument;
use crate::error::{DocumentError, Result};
use crate::guid::new_global_id;
use ifc_gen_model::{AttributeValue, EntityId, EntityResolver, EntityResolverExt, IfcType};
use nalgebra::{Point3, Vector3};

// Attribute positions shared by IfcRoot / IfcProduct subtypes
const NAME: usize = 2;
const OBJECT_PLACEMENT: usize = 5;
const REPRESENTATION: usize = 6;
const COMPOSITION_TYPE: usize = 8;

impl SpatialDocument {
    /// Create a rooted entity with a fresh GlobalId and a name
    ///
    /// Every other attribute starts as `$`; spatial structure elements get
    /// `.ELEMENT.` as their composition type.
    pub fn create_rooted(&mut self, ifc_type: IfcType, name: Option<&str>) -> Result<EntityId> {
        let count = ifc_type
            .rooted_attribute_count()
            .ok_or_else(|| DocumentError::NotRooted(ifc_type.clone()))?;
        let mut attributes = vec![AttributeValue::Null; count];
        attributes[0] = AttributeValue::String(new_global_id());
        if let Some(name) = name {
            attributes[NAME] = AttributeValue::string(name);
        }
        if matches!(
            ifc_type,
            IfcType::IfcSite | IfcType::IfcBuilding | IfcType::IfcBuildingStorey
        ) {
            attributes[COMPOSITION_TYPE] = AttributeValue::enumeration("ELEMENT");
        }
        let id = self.add(ifc_type, attributes);
        log::debug!("Created {} {:?}", id, name);
        Ok(id)
    }

    fn require_product(&self, id: EntityId) -> Result<()> {
        let entity = self.entity(id)?;
        if entity.ifc_type.is_element() || entity.ifc_type.is_spatial() {
            Ok(())
        } else {
            Err(DocumentError::UnexpectedType {
                entity: id,
                expected: "a product".to_string(),
                actual: entity.ifc_type.name().to_string(),
            })
        }
    }

    /// First relationship of `rel_type` whose `slot` references `relating`
    fn find_relationship(&self, rel_type: &IfcType, slot: usize, relating: EntityId) -> Option<EntityId> {
        self.entities_by_type(rel_type)
            .into_iter()
            .find(|rel| rel.get_ref(slot) == Some(relating))
            .map(|rel| rel.id)
    }

    /// Append `related` to the relationship at `rel`'s list slot
    fn extend_relationship(&mut self, rel: EntityId, slot: usize, related: &[EntityId]) -> Result<()> {
        for &id in related {
            self.push_to_list(rel, slot, id)?;
        }
        Ok(())
    }

    /// Aggregate `related` under `relating` (IfcRelAggregates)
    ///
    /// Reuses the relationship already decomposing `relating`.
    pub fn aggregate(&mut self, relating: EntityId, related: &[EntityId]) -> Result<EntityId> {
        self.require_product(relating)?;
        for &id in related {
            self.require_product(id)?;
        }
        if let Some(rel) = self.find_relationship(&IfcType::IfcRelAggregates, 4, relating) {
            self.extend_relationship(rel, 5, related)?;
            return Ok(rel);
        }
        let rel = self.create_rooted(IfcType::IfcRelAggregates, None)?;
        self.set_attribute(rel, 4, relating)?;
        self.set_attribute(rel, 5, AttributeValue::refs(related))?;
        Ok(rel)
    }

    /// Place `products` in a spatial structure (IfcRelContainedInSpatialStructure)
    ///
    /// Reuses the relationship already owned by `structure`.
    pub fn assign_container(&mut self, structure: EntityId, products: &[EntityId]) -> Result<EntityId> {
        let entity = self.entity(structure)?;
        if !entity.ifc_type.is_spatial() || entity.ifc_type == IfcType::IfcProject {
            return Err(DocumentError::unexpected_type(
                structure,
                &IfcType::IfcBuildingStorey,
                &entity.ifc_type,
            ));
        }
        for &id in products {
            self.require_product(id)?;
        }
        if let Some(rel) =
            self.find_relationship(&IfcType::IfcRelContainedInSpatialStructure, 5, structure)
        {
            self.extend_relationship(rel, 4, products)?;
            return Ok(rel);
        }
        let rel = self.create_rooted(IfcType::IfcRelContainedInSpatialStructure, None)?;
        self.set_attribute(rel, 4, AttributeValue::refs(products))?;
        self.set_attribute(rel, 5, structure)?;
        Ok(rel)
    }

    /// Attach a shape representation through an IfcProductDefinitionShape
    pub fn assign_representation(&mut self, product: EntityId, shape: EntityId) -> Result<EntityId> {
        self.require_product(product)?;
        self.entity_of_type(shape, &IfcType::IfcShapeRepresentation)?;
        let definition = self.add(
            IfcType::IfcProductDefinitionShape,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs(&[shape]),
            ],
        );
        self.set_attribute(product, REPRESENTATION, definition)?;
        Ok(definition)
    }

    /// Set an absolute IfcLocalPlacement on a product
    pub fn set_object_placement(
        &mut self,
        product: EntityId,
        location: &Point3<f64>,
        axis: &Vector3<f64>,
        ref_direction: &Vector3<f64>,
    ) -> Result<EntityId> {
        self.require_product(product)?;
        let relative = self.add_axis2_placement_3d(location, Some(axis), Some(ref_direction));
        let placement = self.add(
            IfcType::IfcLocalPlacement,
            vec![AttributeValue::Null, relative.into()],
        );
        self.set_attribute(product, OBJECT_PLACEMENT, placement)?;
        Ok(placement)
    }

    /// Associate a named IfcMaterial with a product
    ///
    /// Materials are shared by name, and each material keeps one
    /// IfcRelAssociatesMaterial.
    pub fn associate_material(&mut self, product: EntityId, name: &str) -> Result<EntityId> {
        self.require_product(product)?;
        let existing = self
            .find_named_material(name)
            .and_then(|m| self.find_relationship(&IfcType::IfcRelAssociatesMaterial, 5, m));
        if let Some(rel) = existing {
            self.extend_relationship(rel, 4, &[product])?;
            return Ok(rel);
        }
        let material = match self.find_named_material(name) {
            Some(m) => m,
            None => self.add(
                IfcType::IfcMaterial,
                vec![
                    AttributeValue::string(name),
                    AttributeValue::Null,
                    AttributeValue::Null,
                ],
            ),
        };
        let rel = self.create_rooted(IfcType::IfcRelAssociatesMaterial, None)?;
        self.set_attribute(rel, 4, AttributeValue::refs(&[product]))?;
        self.set_attribute(rel, 5, material)?;
        Ok(rel)
    }

    fn find_named_material(&self, name: &str) -> Option<EntityId> {
        self.entities_by_type(&IfcType::IfcMaterial)
            .into_iter()
            .find(|m| m.get_string(0) == Some(name))
            .map(|m| m.id)
    }

    /// Products with the given name
    pub fn products_named(&self, ifc_type: &IfcType, name: &str) -> Vec<EntityId> {
        self.find_named(ifc_type, name).iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guid::GLOBAL_ID_LEN;

    #[test]
    fn test_create_rooted() {
        let mut doc = SpatialDocument::new();
        let storey = doc
            .create_rooted(IfcType::IfcBuildingStorey, Some("Ground Floor"))
            .unwrap();
        let entity = doc.get(storey).unwrap();
        assert_eq!(entity.attributes.len(), 10);
        assert_eq!(entity.get_string(0).map(str::len), Some(GLOBAL_ID_LEN));
        assert_eq!(entity.name(), Some("Ground Floor"));
        assert_eq!(entity.get_enum(8), Some("ELEMENT"));

        assert!(matches!(
            doc.create_rooted(IfcType::IfcCartesianPoint, None),
            Err(DocumentError::NotRooted(_))
        ));
    }

    #[test]
    fn test_aggregate_reuses_relationship() {
        let mut doc = SpatialDocument::new();
        let site = doc.create_rooted(IfcType::IfcSite, Some("Site")).unwrap();
        let a = doc.create_rooted(IfcType::IfcBuilding, Some("A")).unwrap();
        let b = doc.create_rooted(IfcType::IfcBuilding, Some("B")).unwrap();
        let first = doc.aggregate(site, &[a]).unwrap();
        let second = doc.aggregate(site, &[b]).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.count_by_type(&IfcType::IfcRelAggregates), 1);
        assert_eq!(doc.get(first).unwrap().get_refs(5), Some(vec![a, b]));
    }

    #[test]
    fn test_assign_container() {
        let mut doc = SpatialDocument::new();
        let storey = doc.create_rooted(IfcType::IfcBuildingStorey, None).unwrap();
        let w1 = doc.create_rooted(IfcType::IfcWall, Some("Wall_1")).unwrap();
        let w2 = doc.create_rooted(IfcType::IfcWall, Some("Wall_2")).unwrap();
        doc.assign_container(storey, &[w1]).unwrap();
        let rel = doc.assign_container(storey, &[w2]).unwrap();
        assert_eq!(doc.count_by_type(&IfcType::IfcRelContainedInSpatialStructure), 1);
        assert_eq!(doc.get(rel).unwrap().get_refs(4), Some(vec![w1, w2]));
        assert_eq!(doc.get(rel).unwrap().get_ref(5), Some(storey));

        assert!(doc.assign_container(w1, &[w2]).is_err());
    }

    #[test]
    fn test_placement_and_representation() {
        let mut doc = SpatialDocument::new();
        let wall = doc.create_rooted(IfcType::IfcWall, Some("Wall_1")).unwrap();
        let placement = doc
            .set_object_placement(wall, &Point3::new(1.0, 2.0, 0.0), &Vector3::z(), &Vector3::x())
            .unwrap();
        assert_eq!(doc.get(wall).unwrap().get_ref(5), Some(placement));
        assert!(doc.get(placement).unwrap().get(0).unwrap().is_null());

        let context = doc.add(IfcType::IfcGeometricRepresentationContext, vec![]);
        let shape = doc
            .add_shape_representation(context, "Body", "SweptSolid", &[])
            .unwrap();
        let definition = doc.assign_representation(wall, shape).unwrap();
        assert_eq!(doc.get(wall).unwrap().get_ref(6), Some(definition));

        assert!(doc.assign_representation(wall, context).is_err());
        assert!(doc.set_object_placement(shape, &Point3::origin(), &Vector3::z(), &Vector3::x()).is_err());
    }

    #[test]
    fn test_materials_shared_by_name() {
        let mut doc = SpatialDocument::new();
        let d1 = doc.create_rooted(IfcType::IfcDoor, Some("Door")).unwrap();
        let d2 = doc.create_rooted(IfcType::IfcDoor, Some("Door")).unwrap();
        let r1 = doc.associate_material(d1, "WOOD").unwrap();
        let r2 = doc.associate_material(d2, "WOOD").unwrap();
        doc.associate_material(d2, "STEEL").unwrap();
        assert_eq!(r1, r2);
        assert_eq!(doc.count_by_type(&IfcType::IfcMaterial), 2);
        assert_eq!(doc.get(r1).unwrap().get_refs(4), Some(vec![d1, d2]));
        assert_eq!(doc.products_named(&IfcType::IfcDoor, "Door"), vec![d1, d2]);
    }
}
