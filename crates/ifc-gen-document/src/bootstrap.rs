// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Empty document scaffold
//!
//! Builds, in order: the project, SI units (metres), the 'Model' context
//! with its 'Body' sub-context, then site, building and storey, each
//! aggregated into its predecessor right after creation.

use crate::document::SpatialDocument;
use crate::error::Result;
use crate::units::UnitKind;
use ifc_gen_model::{EntityId, IfcType, ProjectMetadata};

/// The four-level containment chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialHierarchy {
    pub project: EntityId,
    pub site: EntityId,
    pub building: EntityId,
    pub storey: EntityId,
}

/// A freshly bootstrapped document and its handles
#[derive(Debug)]
pub struct Bootstrap {
    pub document: SpatialDocument,
    pub hierarchy: SpatialHierarchy,
    /// 'Body' sub-context every solid must reference
    pub body_context: EntityId,
}

impl Bootstrap {
    /// Storey that receives every built element
    pub fn storey(&self) -> EntityId {
        self.hierarchy.storey
    }
}

/// Create an empty document with its spatial hierarchy
///
/// Any failure aborts; there is no partially bootstrapped document.
pub fn create(
    project_name: &str,
    site_name: &str,
    building_name: &str,
    storey_name: &str,
) -> Result<Bootstrap> {
    let mut document = SpatialDocument::new();

    let project = document.create_rooted(IfcType::IfcProject, Some(project_name))?;
    document.assign_units(&[UnitKind::Length, UnitKind::Area, UnitKind::Volume])?;

    let model = document.add_context("Model")?;
    let body_context = document.add_sub_context(model, "Body", "MODEL_VIEW")?;

    let site = document.create_rooted(IfcType::IfcSite, Some(site_name))?;
    document.aggregate(project, &[site])?;
    let building = document.create_rooted(IfcType::IfcBuilding, Some(building_name))?;
    document.aggregate(site, &[building])?;
    let storey = document.create_rooted(IfcType::IfcBuildingStorey, Some(storey_name))?;
    document.aggregate(building, &[storey])?;

    log::debug!(
        "Bootstrapped '{}' with {} entities",
        project_name,
        document.entities().count()
    );

    Ok(Bootstrap {
        document,
        hierarchy: SpatialHierarchy {
            project,
            site,
            building,
            storey,
        },
        body_context,
    })
}

/// Create an empty document named after request metadata
pub fn from_metadata(metadata: &ProjectMetadata) -> Result<Bootstrap> {
    create(
        &metadata.project_name,
        &metadata.site_name,
        &metadata.building_name,
        &metadata.storey_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::spatial_tree;
    use crate::units::extract_unit_scale;
    use ifc_gen_model::{EntityResolver, SpatialNodeType};

    #[test]
    fn test_one_of_each_level() {
        let scaffold = create("P", "S", "B", "Ground Floor").unwrap();
        let doc = &scaffold.document;
        for ty in [
            IfcType::IfcProject,
            IfcType::IfcSite,
            IfcType::IfcBuilding,
            IfcType::IfcBuildingStorey,
        ] {
            assert_eq!(doc.count_by_type(&ty), 1, "{}", ty);
        }
        assert_eq!(doc.count_by_type(&IfcType::IfcRelAggregates), 3);
        assert_eq!(doc.get(scaffold.storey()).unwrap().name(), Some("Ground Floor"));
    }

    #[test]
    fn test_creation_order() {
        let scaffold = create("P", "S", "B", "L0").unwrap();
        let h = scaffold.hierarchy;
        assert_eq!(h.project, EntityId(1));
        assert!(h.project.0 < h.site.0);
        assert!(h.site.0 < h.building.0);
        assert!(h.building.0 < h.storey.0);
    }

    #[test]
    fn test_chain_and_units() {
        let scaffold = from_metadata(&ProjectMetadata::default()).unwrap();
        let doc = &scaffold.document;
        let tree = spatial_tree(doc).unwrap();
        assert_eq!(tree.name, "OpenPlans BIM Project");
        assert_eq!(tree.spatial_depth(), 4);
        assert_eq!(tree.children[0].node_type, SpatialNodeType::Site);
        assert_eq!(tree.children[0].children[0].children[0].id, scaffold.storey());
        assert_eq!(extract_unit_scale(doc), 1.0);
    }

    #[test]
    fn test_body_context() {
        let scaffold = create("P", "S", "B", "L0").unwrap();
        let body = scaffold.document.get(scaffold.body_context).unwrap();
        assert_eq!(body.ifc_type, IfcType::IfcGeometricRepresentationSubContext);
        assert_eq!(body.get_string(0), Some("Body"));
    }
}
