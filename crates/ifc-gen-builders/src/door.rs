// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door builder
//!
//! A door is one IfcDoor with a two-item body: item 0 is the panel, item 1
//! the U-shaped lining. In door-local axes x runs along the width, y
//! through the wall (lining depth) and z up.
//!
//! | Payload field              | Parameter         |
//! |----------------------------|-------------------|
//! | `doorDimensions.width`     | overall width     |
//! | `doorDimensions.height`    | overall height    |
//! | `doorDimensions.thickness` | panel depth       |
//! | `frameDimensions.width`    | lining thickness  |
//! | `frameDimensions.thickness`| lining depth      |

use crate::color::int_to_rgb;
use crate::coords::to_document_space;
use crate::profile::Profile2D;
use crate::registry::ElementBuilder;
use crate::{Error, Result};
use ifc_gen_document::{DocumentError, SpatialDocument};
use ifc_gen_model::{AttributeValue, DoorPayload, ElementPayload, EntityId, IfcType};
use nalgebra::{Point2, Point3, Vector3};

// IfcDoor attribute positions
const OVERALL_HEIGHT: usize = 8;
const OVERALL_WIDTH: usize = 9;
const PREDEFINED_TYPE: usize = 10;
const OPERATION_TYPE: usize = 11;

const OPERATION: &str = "SINGLE_SWING_LEFT";

/// Resolved door geometry parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    pub overall_width: f64,
    pub overall_height: f64,
    pub lining_thickness: f64,
    pub lining_depth: f64,
    pub panel_depth: f64,
}

impl DoorGeometry {
    /// Read and check the payload dimensions
    pub fn from_payload(door: &DoorPayload) -> Result<Self> {
        let geometry = Self {
            overall_width: door.door_dimensions.width,
            overall_height: door.door_dimensions.height,
            lining_thickness: door.frame_dimensions.width,
            lining_depth: door.frame_dimensions.thickness,
            panel_depth: door.door_dimensions.thickness,
        };
        // Also rejects frames that leave no opening
        geometry.lining_profile()?;
        Ok(geometry)
    }

    /// Front outline of the lining
    pub fn lining_profile(&self) -> Result<Profile2D> {
        Profile2D::door_lining(self.overall_width, self.overall_height, self.lining_thickness)
    }

    /// Front outline of the panel, filling the lining's opening
    pub fn panel_profile(&self) -> Profile2D {
        let t = self.lining_thickness;
        Profile2D::rectangle(
            Point2::new(t, 0.0),
            self.overall_width - 2.0 * t,
            self.overall_height - t,
        )
    }

    /// Depth range `[front, back]` of the panel, centred in the lining
    pub fn panel_depth_range(&self) -> (f64, f64) {
        let mid = self.lining_depth / 2.0;
        (mid - self.panel_depth / 2.0, mid + self.panel_depth / 2.0)
    }
}

/// Builds an IfcDoor with panel and lining solids
#[derive(Debug, Default, Clone, Copy)]
pub struct DoorBuilder;

impl DoorBuilder {
    /// Extrude a front-view outline through the wall from `y_back` to `y_back - depth`
    fn extrude_front(
        document: &mut SpatialDocument,
        outline: &Profile2D,
        y_back: f64,
        depth: f64,
    ) -> EntityId {
        let profile = document.add_arbitrary_profile(&outline.outer);
        // Local z points to -y, local x stays x, so local y is world up
        let position = document.add_axis2_placement_3d(
            &Point3::new(0.0, y_back, 0.0),
            Some(&Vector3::new(0.0, -1.0, 0.0)),
            Some(&Vector3::x()),
        );
        document.add_extruded_area_solid(profile, position, &Vector3::z(), depth)
    }

    fn representation(
        document: &mut SpatialDocument,
        body_context: EntityId,
        geometry: &DoorGeometry,
    ) -> Result<EntityId> {
        let (_, panel_back) = geometry.panel_depth_range();
        let panel = Self::extrude_front(
            document,
            &geometry.panel_profile(),
            panel_back,
            geometry.panel_depth,
        );
        let lining = Self::extrude_front(
            document,
            &geometry.lining_profile()?,
            geometry.lining_depth,
            geometry.lining_depth,
        );
        Ok(document.add_shape_representation(
            body_context,
            "Body",
            "SweptSolid",
            &[panel, lining],
        )?)
    }
}

/// Attach panel and frame styles, falling back to the panel style alone
///
/// Returns the styles actually attached.
pub fn attach_door_styles(
    document: &mut SpatialDocument,
    shape: EntityId,
    panel_style: EntityId,
    frame_style: EntityId,
) -> Result<Vec<EntityId>> {
    match document.assign_representation_styles(shape, &[panel_style, frame_style]) {
        Ok(_) => Ok(vec![panel_style, frame_style]),
        Err(DocumentError::StyleCountMismatch { items, styles }) => {
            log::warn!(
                "Cannot style {} items with {} styles, applying panel style only",
                items,
                styles
            );
            document.assign_representation_styles(shape, &[panel_style])?;
            Ok(vec![panel_style])
        }
        Err(e) => Err(e.into()),
    }
}

impl ElementBuilder for DoorBuilder {
    fn build(
        &self,
        document: &mut SpatialDocument,
        body_context: EntityId,
        storey: EntityId,
        payload: &ElementPayload,
    ) -> Result<Vec<EntityId>> {
        let ElementPayload::Door(door) = payload else {
            return Err(Error::payload_mismatch("DOOR", payload.tag()));
        };

        let geometry = DoorGeometry::from_payload(door)?;
        let position = to_document_space(&door.door_position);
        let name = door.display_name();
        if door.swing_rotation != 0.0 || door.is_open {
            log::debug!(
                "Door '{}': swingRotation {} / isOpen {} do not affect geometry",
                name,
                door.swing_rotation,
                door.is_open
            );
        }

        let product = document.create_rooted(IfcType::IfcDoor, Some(&name))?;
        document.set_attribute(product, OVERALL_HEIGHT, geometry.overall_height)?;
        document.set_attribute(product, OVERALL_WIDTH, geometry.overall_width)?;
        document.set_attribute(product, PREDEFINED_TYPE, AttributeValue::enumeration("DOOR"))?;
        document.set_attribute(product, OPERATION_TYPE, AttributeValue::enumeration(OPERATION))?;

        let shape = Self::representation(document, body_context, &geometry)?;
        document.assign_representation(product, shape)?;
        document.set_object_placement(product, &position, &Vector3::z(), &Vector3::x())?;

        let panel_style = document.add_style(&format!("{}_PanelStyle", name));
        document.add_surface_shading(panel_style, int_to_rgb(door.door_color), Some("DoorColor"), 0.0)?;
        let frame_style = document.add_style(&format!("{}_FrameStyle", name));
        document.add_surface_shading(frame_style, int_to_rgb(door.frame_color), Some("FrameColor"), 0.0)?;
        attach_door_styles(document, shape, panel_style, frame_style)?;

        document.associate_material(product, &door.door_material)?;
        document.assign_container(storey, &[product])?;

        log::info!("Built door '{}'", name);
        Ok(vec![product])
    }
}
