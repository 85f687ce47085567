// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric representation contexts

use crate::document::SpatialDocument;
use crate::error::{DocumentError, Result};
use ifc_gen_model::{AttributeValue, EntityId, IfcType};
use nalgebra::Point3;

/// Project attribute listing representation contexts
const REPRESENTATION_CONTEXTS: usize = 7;

/// Model precision in metres
const PRECISION: f64 = 1.0e-5;

impl SpatialDocument {
    /// Top-level 3D context registered on the project
    ///
    /// IFCGEOMETRICREPRESENTATIONCONTEXT($,'Model',3,1.E-5,#wcs,$)
    pub fn add_context(&mut self, context_type: &str) -> Result<EntityId> {
        let project = self.project().ok_or(DocumentError::MissingProject)?;
        let wcs = self.add_axis2_placement_3d(&Point3::origin(), None, None);
        let context = self.add(
            IfcType::IfcGeometricRepresentationContext,
            vec![
                AttributeValue::Null,
                AttributeValue::string(context_type),
                AttributeValue::Integer(3),
                PRECISION.into(),
                wcs.into(),
                AttributeValue::Null,
            ],
        );
        self.push_to_list(project, REPRESENTATION_CONTEXTS, context)?;
        Ok(context)
    }

    /// Sub-context of `parent`, e.g. 'Body' with target view MODEL_VIEW
    pub fn add_sub_context(
        &mut self,
        parent: EntityId,
        identifier: &str,
        target_view: &str,
    ) -> Result<EntityId> {
        let context_type = self
            .entity_of_type(parent, &IfcType::IfcGeometricRepresentationContext)?
            .get_string(1)
            .unwrap_or("Model")
            .to_string();
        Ok(self.add(
            IfcType::IfcGeometricRepresentationSubContext,
            vec![
                AttributeValue::string(identifier),
                AttributeValue::String(context_type),
                AttributeValue::Derived,
                AttributeValue::Derived,
                AttributeValue::Derived,
                AttributeValue::Derived,
                parent.into(),
                AttributeValue::Null,
                AttributeValue::enumeration(target_view),
                AttributeValue::Null,
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_gen_model::EntityResolver;

    #[test]
    fn test_body_sub_context() {
        let mut doc = SpatialDocument::new();
        let project = doc.create_rooted(IfcType::IfcProject, Some("P")).unwrap();
        let model = doc.add_context("Model").unwrap();
        let body = doc.add_sub_context(model, "Body", "MODEL_VIEW").unwrap();

        assert_eq!(doc.get(project).unwrap().get_refs(7), Some(vec![model]));
        let sub = doc.get(body).unwrap();
        assert_eq!(sub.get_string(0), Some("Body"));
        assert_eq!(sub.get_string(1), Some("Model"));
        assert_eq!(sub.get_ref(6), Some(model));
        assert_eq!(sub.get_enum(8), Some("MODEL_VIEW"));
    }

    #[test]
    fn test_sub_context_needs_context_parent() {
        let mut doc = SpatialDocument::new();
        let project = doc.create_rooted(IfcType::IfcProject, None).unwrap();
        assert!(doc.add_sub_context(project, "Body", "MODEL_VIEW").is_err());
    }
}
