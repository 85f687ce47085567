// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric resource entities: points, placements, profiles and solids

use crate::document::SpatialDocument;
use crate::error::Result;
use ifc_gen_model::{AttributeValue, EntityId, IfcType};
use nalgebra::{Point2, Point3, Vector2, Vector3};

impl SpatialDocument {
    /// IFCCARTESIANPOINT((x,y,z))
    pub fn add_cartesian_point(&mut self, point: &Point3<f64>) -> EntityId {
        self.add(
            IfcType::IfcCartesianPoint,
            vec![AttributeValue::floats(&[point.x, point.y, point.z])],
        )
    }

    /// IFCCARTESIANPOINT((x,y))
    pub fn add_cartesian_point_2d(&mut self, point: &Point2<f64>) -> EntityId {
        self.add(
            IfcType::IfcCartesianPoint,
            vec![AttributeValue::floats(&[point.x, point.y])],
        )
    }

    /// IFCDIRECTION((x,y,z))
    pub fn add_direction(&mut self, direction: &Vector3<f64>) -> EntityId {
        self.add(
            IfcType::IfcDirection,
            vec![AttributeValue::floats(&[direction.x, direction.y, direction.z])],
        )
    }

    /// IFCDIRECTION((x,y))
    pub fn add_direction_2d(&mut self, direction: &Vector2<f64>) -> EntityId {
        self.add(
            IfcType::IfcDirection,
            vec![AttributeValue::floats(&[direction.x, direction.y])],
        )
    }

    /// IFCAXIS2PLACEMENT3D(Location, Axis, RefDirection)
    ///
    /// Omitted directions are written as `$` and default to +Z / +X.
    pub fn add_axis2_placement_3d(
        &mut self,
        location: &Point3<f64>,
        axis: Option<&Vector3<f64>>,
        ref_direction: Option<&Vector3<f64>>,
    ) -> EntityId {
        let location = self.add_cartesian_point(location);
        let axis = axis.map(|a| self.add_direction(a));
        let ref_direction = ref_direction.map(|r| self.add_direction(r));
        self.add(
            IfcType::IfcAxis2Placement3D,
            vec![location.into(), axis.into(), ref_direction.into()],
        )
    }

    /// IFCAXIS2PLACEMENT2D(Location, RefDirection)
    pub fn add_axis2_placement_2d(
        &mut self,
        location: &Point2<f64>,
        ref_direction: Option<&Vector2<f64>>,
    ) -> EntityId {
        let location = self.add_cartesian_point_2d(location);
        let ref_direction = ref_direction.map(|r| self.add_direction_2d(r));
        self.add(
            IfcType::IfcAxis2Placement2D,
            vec![location.into(), ref_direction.into()],
        )
    }

    /// IFCRECTANGLEPROFILEDEF(.AREA.,$,Position,XDim,YDim)
    ///
    /// `center` is the rectangle centre in the profile plane.
    pub fn add_rectangle_profile(&mut self, center: &Point2<f64>, x_dim: f64, y_dim: f64) -> EntityId {
        let position = self.add_axis2_placement_2d(center, None);
        self.add(
            IfcType::IfcRectangleProfileDef,
            vec![
                AttributeValue::enumeration("AREA"),
                AttributeValue::Null,
                position.into(),
                x_dim.into(),
                y_dim.into(),
            ],
        )
    }

    /// Closed IFCPOLYLINE; the first point is repeated at the end
    pub fn add_closed_polyline(&mut self, points: &[Point2<f64>]) -> EntityId {
        let mut ids: Vec<EntityId> = points
            .iter()
            .map(|p| self.add_cartesian_point_2d(p))
            .collect();
        if let Some(&first) = ids.first() {
            ids.push(first);
        }
        self.add(IfcType::IfcPolyline, vec![AttributeValue::refs(&ids)])
    }

    /// IFCARBITRARYCLOSEDPROFILEDEF(.AREA.,$,OuterCurve)
    pub fn add_arbitrary_profile(&mut self, points: &[Point2<f64>]) -> EntityId {
        let curve = self.add_closed_polyline(points);
        self.add(
            IfcType::IfcArbitraryClosedProfileDef,
            vec![
                AttributeValue::enumeration("AREA"),
                AttributeValue::Null,
                curve.into(),
            ],
        )
    }

    /// IFCEXTRUDEDAREASOLID(SweptArea,Position,ExtrudedDirection,Depth)
    pub fn add_extruded_area_solid(
        &mut self,
        profile: EntityId,
        position: EntityId,
        direction: &Vector3<f64>,
        depth: f64,
    ) -> EntityId {
        let direction = self.add_direction(direction);
        self.add(
            IfcType::IfcExtrudedAreaSolid,
            vec![profile.into(), position.into(), direction.into(), depth.into()],
        )
    }

    /// IFCSHAPEREPRESENTATION(Context,Identifier,Type,Items)
    pub fn add_shape_representation(
        &mut self,
        context: EntityId,
        identifier: &str,
        representation_type: &str,
        items: &[EntityId],
    ) -> Result<EntityId> {
        self.entity(context)?;
        Ok(self.add(
            IfcType::IfcShapeRepresentation,
            vec![
                context.into(),
                AttributeValue::string(identifier),
                AttributeValue::string(representation_type),
                AttributeValue::refs(items),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_gen_model::EntityResolver;

    #[test]
    fn test_axis2_placement_3d() {
        let mut doc = SpatialDocument::new();
        let placement = doc.add_axis2_placement_3d(
            &Point3::new(4.0, 0.0, 0.0),
            Some(&Vector3::z()),
            Some(&Vector3::new(0.0, -1.0, 0.0)),
        );
        let entity = doc.get(placement).unwrap();
        let location = doc.get(entity.get_ref(0).unwrap()).unwrap();
        let ref_dir = doc.get(entity.get_ref(2).unwrap()).unwrap();
        assert_eq!(location.get_triple(0), Some([4.0, 0.0, 0.0]));
        assert_eq!(ref_dir.get_triple(0), Some([0.0, -1.0, 0.0]));
    }

    #[test]
    fn test_placement_without_directions() {
        let mut doc = SpatialDocument::new();
        let placement = doc.add_axis2_placement_3d(&Point3::origin(), None, None);
        let entity = doc.get(placement).unwrap();
        assert!(entity.get(1).unwrap().is_null());
        assert!(entity.get(2).unwrap().is_null());
        assert_eq!(doc.count_by_type(&IfcType::IfcDirection), 0);
    }

    #[test]
    fn test_closed_polyline_repeats_first_point() {
        let mut doc = SpatialDocument::new();
        let polyline = doc.add_closed_polyline(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ]);
        let refs = doc.get(polyline).unwrap().get_refs(0).unwrap();
        assert_eq!(refs.len(), 4);
        assert_eq!(refs.first(), refs.last());
    }

    #[test]
    fn test_rectangle_profile() {
        let mut doc = SpatialDocument::new();
        let profile = doc.add_rectangle_profile(&Point2::new(2.0, 0.0), 4.0, 0.2);
        let entity = doc.get(profile).unwrap();
        assert_eq!(entity.get_enum(0), Some("AREA"));
        assert_eq!(entity.get_float(3), Some(4.0));
        assert_eq!(entity.get_float(4), Some(0.2));
    }

    #[test]
    fn test_shape_representation_requires_context() {
        let mut doc = SpatialDocument::new();
        assert!(doc
            .add_shape_representation(EntityId(99), "Body", "SweptSolid", &[])
            .is_err());
    }
}
