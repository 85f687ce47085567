// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall builder
//!
//! A wall payload is an open polyline: `n` vertices give `n - 1` straight
//! segments, each its own IfcWall. The chain is not closed back to the
//! first vertex.
//!
//! Every segment is a rectangle of `length × thickness` extruded upward by
//! the wall height. The rectangle is offset by `-thickness / 2` across the
//! axis, so the solid is centred on the line `p[i] → p[i+1]` and adjacent
//! segments meet at shared vertices.

use crate::color::hex_to_rgb;
use crate::coords::to_document_space;
use crate::registry::ElementBuilder;
use crate::{Error, Result};
use ifc_gen_document::SpatialDocument;
use ifc_gen_model::{ColourRgb, ElementPayload, EntityId, IfcType, WallPayload};
use nalgebra::{Point2, Point3, Vector3};

/// One straight wall segment in document space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    /// Horizontal distance between the endpoints
    pub length: f64,
    /// Direction angle in the horizontal plane, radians
    pub angle: f64,
}

impl WallSegment {
    fn between(start: Point3<f64>, end: Point3<f64>) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        Self {
            start,
            end,
            length: dx.hypot(dy),
            angle: dy.atan2(dx),
        }
    }

    /// Unit direction of the segment axis (`(cos θ, sin θ, 0)`)
    pub fn direction(&self) -> Vector3<f64> {
        Vector3::new(self.angle.cos(), self.angle.sin(), 0.0)
    }

    /// Offset of the profile's inner edge from the axis line
    pub fn offset(thickness: f64) -> f64 {
        -thickness / 2.0
    }
}

/// Segments of an open chain of document-space vertices
pub fn wall_segments(points: &[Point3<f64>]) -> Vec<WallSegment> {
    points
        .windows(2)
        .map(|pair| WallSegment::between(pair[0], pair[1]))
        .collect()
}

/// Builds one IfcWall per polyline segment
#[derive(Debug, Default, Clone, Copy)]
pub struct WallBuilder;

impl WallBuilder {
    fn build_segment(
        &self,
        document: &mut SpatialDocument,
        body_context: EntityId,
        wall: &WallPayload,
        colour: ColourRgb,
        segment: &WallSegment,
        name: &str,
    ) -> Result<EntityId> {
        let product = document.create_rooted(IfcType::IfcWall, Some(name))?;

        // Profile in segment-local XY: x along the axis, y across it
        let t = wall.wall_thickness;
        let offset = WallSegment::offset(t);
        let center = Point2::new(segment.length / 2.0, offset + t / 2.0);
        let profile = document.add_rectangle_profile(&center, segment.length, t);
        let position = document.add_axis2_placement_3d(&Point3::origin(), None, None);
        let solid =
            document.add_extruded_area_solid(profile, position, &Vector3::z(), wall.wall_height);
        let shape =
            document.add_shape_representation(body_context, "Body", "SweptSolid", &[solid])?;
        document.assign_representation(product, shape)?;

        document.set_object_placement(
            product,
            &segment.start,
            &Vector3::z(),
            &segment.direction(),
        )?;

        let style = document.add_style(&format!("{}_style", name));
        document.add_surface_shading(style, colour, Some(&wall.wall_color), 0.0)?;
        document.assign_representation_styles(shape, &[style])?;

        Ok(product)
    }
}

impl ElementBuilder for WallBuilder {
    fn build(
        &self,
        document: &mut SpatialDocument,
        body_context: EntityId,
        storey: EntityId,
        payload: &ElementPayload,
    ) -> Result<Vec<EntityId>> {
        let ElementPayload::Wall(wall) = payload else {
            return Err(Error::payload_mismatch("WALL", payload.tag()));
        };

        let points: Vec<Point3<f64>> = wall.points.iter().map(to_document_space).collect();
        let segments = wall_segments(&points);
        if segments.is_empty() {
            return Err(Error::build("Wall needs at least 2 points"));
        }
        let colour = hex_to_rgb(&wall.wall_color)?;

        let mut products = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let name = format!("{}_{}", wall.name, i + 1);
            if segment.length <= f64::EPSILON {
                log::warn!("Wall segment {} has zero length", name);
            }
            let product = self.build_segment(document, body_context, wall, colour, segment, &name)?;
            log::debug!(
                "Wall segment {} length {:.3} angle {:.3}",
                name,
                segment.length,
                segment.angle
            );
            products.push(product);
        }
        document.assign_container(storey, &products)?;

        log::info!("Built wall '{}' with {} segments", wall.name, products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ifc_gen_document::bootstrap;
    use ifc_gen_model::{EntityResolver, Point3D};

    fn wall(points: &[(f64, f64, f64)]) -> WallPayload {
        WallPayload {
            name: "Wall".to_string(),
            points: points.iter().map(|&(x, y, z)| Point3D::new(x, y, z)).collect(),
            wall_thickness: 0.2,
            wall_height: 3.0,
            wall_color: "#CCCCCC".to_string(),
        }
    }

    fn build(payload: WallPayload) -> (bootstrap::Bootstrap, Vec<EntityId>) {
        let mut scaffold = bootstrap::create("P", "S", "B", "L0").unwrap();
        let storey = scaffold.storey();
        let products = WallBuilder
            .build(
                &mut scaffold.document,
                scaffold.body_context,
                storey,
                &ElementPayload::Wall(payload),
            )
            .unwrap();
        (scaffold, products)
    }

    #[test]
    fn test_segment_lengths_and_angles() {
        let points: Vec<_> = [(0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (4.0, 0.0, 3.0)]
            .iter()
            .map(|&(x, y, z)| to_document_space(&Point3D::new(x, y, z)))
            .collect();
        let segments = wall_segments(&points);
        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].length, 4.0);
        assert_relative_eq!(segments[0].angle, 0.0);
        assert_relative_eq!(segments[1].length, 3.0);
        // Client +Z points to document -Y
        assert_relative_eq!(segments[1].angle, -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_large_coordinates_keep_finite_length() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(1e200, 1e200, 0.0)];
        let segment = &wall_segments(&points)[0];
        assert!(segment.length.is_finite());
        assert_relative_eq!(segment.length, 1e200 * std::f64::consts::SQRT_2, max_relative = 1e-12);
        assert_relative_eq!(segment.angle, std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_open_chain_not_closed() {
        let points: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| Point3::new(x, y, 0.0))
            .collect();
        assert_eq!(wall_segments(&points).len(), 3);
        assert!(wall_segments(&points[..1]).is_empty());
    }

    #[test]
    fn test_builds_one_wall_per_segment() {
        let (scaffold, products) = build(wall(&[(0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (4.0, 0.0, 3.0)]));
        let doc = &scaffold.document;
        assert_eq!(products.len(), 2);
        assert_eq!(doc.count_by_type(&IfcType::IfcWall), 2);
        let names: Vec<_> = products
            .iter()
            .map(|id| doc.get(*id).unwrap().name().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Wall_1", "Wall_2"]);
        for product in &products {
            assert_eq!(
                ifc_gen_document::containing_storey(doc, *product),
                Some(scaffold.storey())
            );
        }
        assert_eq!(doc.count_by_type(&IfcType::IfcRelContainedInSpatialStructure), 1);
        assert_eq!(doc.count_by_type(&IfcType::IfcSurfaceStyle), 2);
    }

    #[test]
    fn test_profile_centred_on_axis() {
        let (scaffold, products) = build(wall(&[(1.0, 0.0, 0.0), (1.0, 0.0, -2.5)]));
        let doc = &scaffold.document;
        let product = doc.get(products[0]).unwrap();

        let definition = doc.get(product.get_ref(6).unwrap()).unwrap();
        let shape = doc.get(definition.get_refs(2).unwrap()[0]).unwrap();
        let solid = doc.get(shape.get_refs(3).unwrap()[0]).unwrap();
        assert_relative_eq!(solid.get_float(3).unwrap(), 3.0);

        let profile = doc.get(solid.get_ref(0).unwrap()).unwrap();
        let length = profile.get_float(3).unwrap();
        let thickness = profile.get_float(4).unwrap();
        assert_relative_eq!(length, 2.5);
        assert_relative_eq!(thickness, 0.2);
        let position = doc.get(profile.get_ref(2).unwrap()).unwrap();
        let center = doc.get(position.get_ref(0).unwrap()).unwrap().get_triple(0).unwrap();
        // Across-axis extent is [offset, offset + t] = [-t/2, t/2]
        assert_relative_eq!(center[1] - thickness / 2.0, -0.1);
        assert_relative_eq!(center[1] + thickness / 2.0, 0.1);
        assert_relative_eq!(center[0], 1.25);

        let placement = doc.get(product.get_ref(5).unwrap()).unwrap();
        let axes = doc.get(placement.get_ref(1).unwrap()).unwrap();
        let origin = doc.get(axes.get_ref(0).unwrap()).unwrap().get_triple(0).unwrap();
        let axis = doc.get(axes.get_ref(1).unwrap()).unwrap().get_triple(0).unwrap();
        let ref_dir = doc.get(axes.get_ref(2).unwrap()).unwrap().get_triple(0).unwrap();
        assert_eq!(origin, [1.0, 0.0, 0.0]);
        assert_eq!(axis, [0.0, 0.0, 1.0]);
        // Client -Z is document +Y
        assert_relative_eq!(ref_dir[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(ref_dir[1], 1.0);
    }

    #[test]
    fn test_zero_length_segment_kept() {
        let (_, products) = build(wall(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (2.0, 0.0, 0.0)]));
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn test_failed_wall_leaves_no_contained_segments() {
        let mut scaffold = bootstrap::create("P", "S", "B", "L0").unwrap();
        let not_a_storey = scaffold.body_context;
        let result = WallBuilder.build(
            &mut scaffold.document,
            scaffold.body_context,
            not_a_storey,
            &ElementPayload::Wall(wall(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 0.0, 1.0)])),
        );
        assert!(result.is_err());
        let doc = &scaffold.document;
        let walls = doc.entities_by_type(&IfcType::IfcWall);
        assert_eq!(walls.len(), 2);
        for w in walls {
            assert_eq!(ifc_gen_document::containing_storey(doc, w.id), None);
        }
        assert_eq!(doc.count_by_type(&IfcType::IfcRelContainedInSpatialStructure), 0);
    }

    #[test]
    fn test_rejects_other_payloads() {
        let mut scaffold = bootstrap::create("P", "S", "B", "L0").unwrap();
        let storey = scaffold.storey();
        let result = WallBuilder.build(
            &mut scaffold.document,
            scaffold.body_context,
            storey,
            &ElementPayload::Unrecognized {
                tag: "ROOF".to_string(),
            },
        );
        assert!(matches!(result, Err(Error::PayloadMismatch { .. })));
    }

    #[test]
    fn test_bad_colour_is_build_failure() {
        let mut payload = wall(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        payload.wall_color = "grey".to_string();
        let mut scaffold = bootstrap::create("P", "S", "B", "L0").unwrap();
        let storey = scaffold.storey();
        let err = WallBuilder
            .build(
                &mut scaffold.document,
                scaffold.body_context,
                storey,
                &ElementPayload::Wall(payload),
            )
            .unwrap_err();
        assert_eq!(err.kind(), crate::ElementErrorKind::Build);
        assert_eq!(scaffold.document.count_by_type(&IfcType::IfcWall), 0);
    }
}
