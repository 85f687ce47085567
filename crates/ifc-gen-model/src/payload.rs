// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element payload schemas
//!
//! Payloads arrive from design front ends as JSON objects discriminated by a
//! `type` field. Coordinates are stored exactly as the client sent them
//! (Y-up); the conversion to the document's Z-up convention happens in the
//! builders, never here.

use crate::{Result, SchemaError};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

/// A point in client coordinate space (Y-up)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn validate(&self, path: &str) -> Result<()> {
        for (axis, v) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !v.is_finite() {
                return Err(SchemaError::invalid(format!("{path}.{axis}"), "must be finite"));
            }
        }
        Ok(())
    }
}

/// Width / height / thickness triple, all strictly positive
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions3D {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

impl Dimensions3D {
    pub fn new(width: f64, height: f64, thickness: f64) -> Self {
        Self {
            width,
            height,
            thickness,
        }
    }

    fn validate(&self, path: &str) -> Result<()> {
        positive(&format!("{path}.width"), self.width)?;
        positive(&format!("{path}.height"), self.height)?;
        positive(&format!("{path}.thickness"), self.thickness)
    }
}

/// Wall defined by an ordered list of vertices
///
/// Each consecutive pair of vertices becomes one wall segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallPayload {
    #[serde(default = "default_wall_name")]
    pub name: String,
    pub points: Vec<Point3D>,
    pub wall_thickness: f64,
    #[serde(default = "default_wall_height")]
    pub wall_height: f64,
    #[serde(default = "default_wall_color")]
    pub wall_color: String,
}

/// Door with a frame (lining) and a panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorPayload {
    #[serde(default = "default_door_label")]
    pub label_name: String,
    #[serde(default)]
    pub door_position: Point3D,
    pub door_dimensions: Dimensions3D,
    pub frame_dimensions: Dimensions3D,
    /// Packed 0xRRGGBB frame colour
    #[serde(default)]
    pub frame_color: u32,
    /// Packed 0xRRGGBB panel colour
    #[serde(default = "default_door_color")]
    pub door_color: u32,
    #[serde(default)]
    pub swing_rotation: f64,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default = "default_door_material")]
    pub door_material: String,
    /// External unique id, appended to the display name when present
    #[serde(default)]
    pub ogid: Option<String>,
}

/// Window payload (accepted, not yet buildable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPayload {
    #[serde(default = "default_window_name")]
    pub name: String,
    #[serde(default = "default_window_width")]
    pub width: f64,
    #[serde(default = "default_window_height")]
    pub height: f64,
    #[serde(default = "default_sill_height")]
    pub sill_height: f64,
    #[serde(default)]
    pub position: Point3D,
}

/// Tagged union over every element kind
///
/// Known tags (`WALL`, `DOOR`, `WINDOW`, case-insensitive) decode into their
/// schema. Any other tag decodes to [`ElementPayload::Unrecognized`] so that
/// a batch can reject that one element instead of the whole request.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementPayload {
    Wall(WallPayload),
    Door(DoorPayload),
    Window(WindowPayload),
    Unrecognized { tag: String },
}

impl ElementPayload {
    /// Upper-case type tag
    pub fn tag(&self) -> &str {
        match self {
            ElementPayload::Wall(_) => "WALL",
            ElementPayload::Door(_) => "DOOR",
            ElementPayload::Window(_) => "WINDOW",
            ElementPayload::Unrecognized { tag } => tag,
        }
    }

    /// Check field constraints
    pub fn validate(&self, path: &str) -> Result<()> {
        match self {
            ElementPayload::Wall(wall) => wall.validate(path),
            ElementPayload::Door(door) => door.validate(path),
            ElementPayload::Window(window) => window.validate(path),
            ElementPayload::Unrecognized { .. } => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for ElementPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_uppercase();

        match tag.as_str() {
            "WALL" => serde_json::from_value(value)
                .map(ElementPayload::Wall)
                .map_err(D::Error::custom),
            "DOOR" => serde_json::from_value(value)
                .map(ElementPayload::Door)
                .map_err(D::Error::custom),
            "WINDOW" => serde_json::from_value(value)
                .map(ElementPayload::Window)
                .map_err(D::Error::custom),
            _ => Ok(ElementPayload::Unrecognized { tag }),
        }
    }
}

impl WallPayload {
    fn validate(&self, path: &str) -> Result<()> {
        if self.points.len() < 2 {
            return Err(SchemaError::invalid(
                format!("{path}.points"),
                format!("at least 2 points required, got {}", self.points.len()),
            ));
        }
        for (i, p) in self.points.iter().enumerate() {
            p.validate(&format!("{path}.points[{i}]"))?;
        }
        positive(&format!("{path}.wallThickness"), self.wall_thickness)?;
        positive(&format!("{path}.wallHeight"), self.wall_height)?;
        if !is_hex_colour(&self.wall_color) {
            return Err(SchemaError::invalid(
                format!("{path}.wallColor"),
                format!("'{}' does not match #RRGGBB", self.wall_color),
            ));
        }
        Ok(())
    }
}

impl DoorPayload {
    fn validate(&self, path: &str) -> Result<()> {
        self.door_position.validate(&format!("{path}.doorPosition"))?;
        self.door_dimensions
            .validate(&format!("{path}.doorDimensions"))?;
        self.frame_dimensions
            .validate(&format!("{path}.frameDimensions"))?;
        if !self.swing_rotation.is_finite() {
            return Err(SchemaError::invalid(
                format!("{path}.swingRotation"),
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Display name, suffixed with the external id when present
    pub fn display_name(&self) -> String {
        match &self.ogid {
            Some(ogid) => format!("{}_{}", self.label_name, ogid),
            None => self.label_name.clone(),
        }
    }
}

impl WindowPayload {
    fn validate(&self, path: &str) -> Result<()> {
        positive(&format!("{path}.width"), self.width)?;
        positive(&format!("{path}.height"), self.height)?;
        if !(self.sill_height.is_finite() && self.sill_height >= 0.0) {
            return Err(SchemaError::invalid(
                format!("{path}.sillHeight"),
                "must be >= 0",
            ));
        }
        self.position.validate(&format!("{path}.position"))
    }
}

/// Names given to the spatial hierarchy of a generated document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub site_name: String,
    pub building_name: String,
    pub storey_name: String,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            project_name: "OpenPlans BIM Project".to_string(),
            site_name: "Default Site".to_string(),
            building_name: "Default Building".to_string(),
            storey_name: "Ground Floor".to_string(),
        }
    }
}

/// Top-level generate request: one or more element payloads
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerateRequest {
    pub elements: Vec<ElementPayload>,
    #[serde(default)]
    pub metadata: Option<ProjectMetadata>,
}

impl GenerateRequest {
    /// Decode and validate a JSON request body
    pub fn from_json(body: &str) -> Result<Self> {
        let request: GenerateRequest = serde_json::from_str(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Check every element's constraints
    pub fn validate(&self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(SchemaError::invalid("elements", "at least 1 element required"));
        }
        for (i, element) in self.elements.iter().enumerate() {
            element.validate(&format!("elements[{i}]"))?;
        }
        Ok(())
    }

    /// Metadata, falling back to the defaults
    pub fn metadata_or_default(&self) -> ProjectMetadata {
        self.metadata.clone().unwrap_or_default()
    }
}

/// Check for `#RRGGBB` (case-insensitive)
pub fn is_hex_colour(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn positive(path: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SchemaError::invalid(path, format!("must be > 0, got {v}")))
    }
}

fn default_wall_name() -> String {
    "Wall".to_string()
}

fn default_wall_height() -> f64 {
    3.0
}

fn default_wall_color() -> String {
    "#CCCCCC".to_string()
}

fn default_door_label() -> String {
    "Door".to_string()
}

fn default_door_color() -> u32 {
    0xC7C7C7
}

fn default_door_material() -> String {
    "WOOD".to_string()
}

fn default_window_name() -> String {
    "Window".to_string()
}

fn default_window_width() -> f64 {
    1.2
}

fn default_window_height() -> f64 {
    1.5
}

fn default_sill_height() -> f64 {
    0.9
}
