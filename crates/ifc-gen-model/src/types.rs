// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC document representation
//!
//! This module defines the fundamental types used to build an IFC document
//! in memory before it is handed to a serializer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the instance number of an entity (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// IFC entity type enumeration
///
/// Covers the IFC4 entity types the generator emits. Unknown types are
/// captured with their original string representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IfcType {
    // ========================================================================
    // Spatial Structure
    // ========================================================================
    IfcProject,
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,

    // ========================================================================
    // Building Elements
    // ========================================================================
    IfcWall,
    IfcDoor,
    IfcWindow,

    // ========================================================================
    // Geometry Representations
    // ========================================================================
    IfcExtrudedAreaSolid,
    IfcRectangleProfileDef,
    IfcArbitraryClosedProfileDef,
    IfcPolyline,

    // ========================================================================
    // Points, Directions and Placements
    // ========================================================================
    IfcCartesianPoint,
    IfcDirection,
    IfcAxis2Placement2D,
    IfcAxis2Placement3D,
    IfcLocalPlacement,

    // ========================================================================
    // Representations and Contexts
    // ========================================================================
    IfcShapeRepresentation,
    IfcProductDefinitionShape,
    IfcGeometricRepresentationContext,
    IfcGeometricRepresentationSubContext,

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelAggregates,
    IfcRelContainedInSpatialStructure,
    IfcRelAssociatesMaterial,

    // ========================================================================
    // Materials and Presentation
    // ========================================================================
    IfcMaterial,
    IfcStyledItem,
    IfcSurfaceStyle,
    IfcSurfaceStyleShading,
    IfcColourRgb,

    // ========================================================================
    // Units
    // ========================================================================
    IfcUnitAssignment,
    IfcSIUnit,

    /// Unknown type - stores the original type name string
    Unknown(String),
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Parse a type name string into an IfcType
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IFCPROJECT" => IfcType::IfcProject,
            "IFCSITE" => IfcType::IfcSite,
            "IFCBUILDING" => IfcType::IfcBuilding,
            "IFCBUILDINGSTOREY" => IfcType::IfcBuildingStorey,
            "IFCWALL" => IfcType::IfcWall,
            "IFCDOOR" => IfcType::IfcDoor,
            "IFCWINDOW" => IfcType::IfcWindow,
            "IFCEXTRUDEDAREASOLID" => IfcType::IfcExtrudedAreaSolid,
            "IFCRECTANGLEPROFILEDEF" => IfcType::IfcRectangleProfileDef,
            "IFCARBITRARYCLOSEDPROFILEDEF" => IfcType::IfcArbitraryClosedProfileDef,
            "IFCPOLYLINE" => IfcType::IfcPolyline,
            "IFCCARTESIANPOINT" => IfcType::IfcCartesianPoint,
            "IFCDIRECTION" => IfcType::IfcDirection,
            "IFCAXIS2PLACEMENT2D" => IfcType::IfcAxis2Placement2D,
            "IFCAXIS2PLACEMENT3D" => IfcType::IfcAxis2Placement3D,
            "IFCLOCALPLACEMENT" => IfcType::IfcLocalPlacement,
            "IFCSHAPEREPRESENTATION" => IfcType::IfcShapeRepresentation,
            "IFCPRODUCTDEFINITIONSHAPE" => IfcType::IfcProductDefinitionShape,
            "IFCGEOMETRICREPRESENTATIONCONTEXT" => IfcType::IfcGeometricRepresentationContext,
            "IFCGEOMETRICREPRESENTATIONSUBCONTEXT" => {
                IfcType::IfcGeometricRepresentationSubContext
            }
            "IFCRELAGGREGATES" => IfcType::IfcRelAggregates,
            "IFCRELCONTAINEDINSPATIALSTRUCTURE" => IfcType::IfcRelContainedInSpatialStructure,
            "IFCRELASSOCIATESMATERIAL" => IfcType::IfcRelAssociatesMaterial,
            "IFCMATERIAL" => IfcType::IfcMaterial,
            "IFCSTYLEDITEM" => IfcType::IfcStyledItem,
            "IFCSURFACESTYLE" => IfcType::IfcSurfaceStyle,
            "IFCSURFACESTYLESHADING" => IfcType::IfcSurfaceStyleShading,
            "IFCCOLOURRGB" => IfcType::IfcColourRgb,
            "IFCUNITASSIGNMENT" => IfcType::IfcUnitAssignment,
            "IFCSIUNIT" => IfcType::IfcSIUnit,
            _ => IfcType::Unknown(s.to_string()),
        }
    }

    /// Get the STEP type name (upper case, as written in the DATA section)
    pub fn name(&self) -> &str {
        match self {
            IfcType::IfcProject => "IFCPROJECT",
            IfcType::IfcSite => "IFCSITE",
            IfcType::IfcBuilding => "IFCBUILDING",
            IfcType::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            IfcType::IfcWall => "IFCWALL",
            IfcType::IfcDoor => "IFCDOOR",
            IfcType::IfcWindow => "IFCWINDOW",
            IfcType::IfcExtrudedAreaSolid => "IFCEXTRUDEDAREASOLID",
            IfcType::IfcRectangleProfileDef => "IFCRECTANGLEPROFILEDEF",
            IfcType::IfcArbitraryClosedProfileDef => "IFCARBITRARYCLOSEDPROFILEDEF",
            IfcType::IfcPolyline => "IFCPOLYLINE",
            IfcType::IfcCartesianPoint => "IFCCARTESIANPOINT",
            IfcType::IfcDirection => "IFCDIRECTION",
            IfcType::IfcAxis2Placement2D => "IFCAXIS2PLACEMENT2D",
            IfcType::IfcAxis2Placement3D => "IFCAXIS2PLACEMENT3D",
            IfcType::IfcLocalPlacement => "IFCLOCALPLACEMENT",
            IfcType::IfcShapeRepresentation => "IFCSHAPEREPRESENTATION",
            IfcType::IfcProductDefinitionShape => "IFCPRODUCTDEFINITIONSHAPE",
            IfcType::IfcGeometricRepresentationContext => "IFCGEOMETRICREPRESENTATIONCONTEXT",
            IfcType::IfcGeometricRepresentationSubContext => {
                "IFCGEOMETRICREPRESENTATIONSUBCONTEXT"
            }
            IfcType::IfcRelAggregates => "IFCRELAGGREGATES",
            IfcType::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            IfcType::IfcRelAssociatesMaterial => "IFCRELASSOCIATESMATERIAL",
            IfcType::IfcMaterial => "IFCMATERIAL",
            IfcType::IfcStyledItem => "IFCSTYLEDITEM",
            IfcType::IfcSurfaceStyle => "IFCSURFACESTYLE",
            IfcType::IfcSurfaceStyleShading => "IFCSURFACESTYLESHADING",
            IfcType::IfcColourRgb => "IFCCOLOURRGB",
            IfcType::IfcUnitAssignment => "IFCUNITASSIGNMENT",
            IfcType::IfcSIUnit => "IFCSIUNIT",
            IfcType::Unknown(s) => s,
        }
    }

    /// Number of explicit attributes of a rooted entity in IFC4
    ///
    /// Returns `None` for types that do not derive from IfcRoot.
    pub fn rooted_attribute_count(&self) -> Option<usize> {
        match self {
            IfcType::IfcProject => Some(9),
            IfcType::IfcSite => Some(14),
            IfcType::IfcBuilding => Some(12),
            IfcType::IfcBuildingStorey => Some(10),
            IfcType::IfcWall => Some(9),
            IfcType::IfcDoor | IfcType::IfcWindow => Some(13),
            IfcType::IfcRelAggregates
            | IfcType::IfcRelContainedInSpatialStructure
            | IfcType::IfcRelAssociatesMaterial => Some(6),
            _ => None,
        }
    }

    /// Check if this type is a building element placed in a storey
    pub fn is_element(&self) -> bool {
        matches!(self, IfcType::IfcWall | IfcType::IfcDoor | IfcType::IfcWindow)
    }

    /// Check if this type is a spatial structure element
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            IfcType::IfcProject | IfcType::IfcSite | IfcType::IfcBuilding | IfcType::IfcBuildingStorey
        )
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Build a string value
    pub fn string(s: impl Into<String>) -> Self {
        AttributeValue::String(s.into())
    }

    /// Build an enumeration value (without the surrounding dots)
    pub fn enumeration(s: impl Into<String>) -> Self {
        AttributeValue::Enum(s.into())
    }

    /// Build a list of entity references
    pub fn refs(ids: &[EntityId]) -> Self {
        AttributeValue::List(ids.iter().map(|id| AttributeValue::EntityRef(*id)).collect())
    }

    /// Build a list of reals
    pub fn floats(values: &[f64]) -> Self {
        AttributeValue::List(values.iter().map(|v| AttributeValue::Float(*v)).collect())
    }

    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl From<EntityId> for AttributeValue {
    fn from(id: EntityId) -> Self {
        AttributeValue::EntityRef(id)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<Option<EntityId>> for AttributeValue {
    fn from(id: Option<EntityId>) -> Self {
        id.map(AttributeValue::EntityRef).unwrap_or_default()
    }
}

/// IFC entity instance
///
/// An entity with its instance id, type, and attribute values in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl Entity {
    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get enum string at index
    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_enum())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }

    /// Get three reals from a coordinate list at index (missing values read as 0)
    pub fn get_triple(&self, index: usize) -> Option<[f64; 3]> {
        let list = self.get_list(index)?;
        let at = |i: usize| list.get(i).and_then(|v| v.as_float()).unwrap_or(0.0);
        Some([at(0), at(1), at(2)])
    }

    /// Name of a rooted entity (attribute 2)
    pub fn name(&self) -> Option<&str> {
        if self.ifc_type.rooted_attribute_count().is_some() {
            self.get_string(2)
        } else {
            None
        }
    }
}

/// Normalized RGB colour, each channel in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ColourRgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ColourRgb {
    /// Create a colour from normalized channels
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_round_trip() {
        for ty in [
            IfcType::IfcProject,
            IfcType::IfcBuildingStorey,
            IfcType::IfcWall,
            IfcType::IfcGeometricRepresentationSubContext,
            IfcType::IfcRelContainedInSpatialStructure,
            IfcType::IfcSIUnit,
        ] {
            assert_eq!(IfcType::parse(ty.name()), ty);
        }
        assert_eq!(IfcType::parse("IfcWall"), IfcType::IfcWall);
        assert_eq!(
            IfcType::parse("IFCROOF"),
            IfcType::Unknown("IFCROOF".to_string())
        );
    }

    #[test]
    fn test_rooted_attribute_counts() {
        assert_eq!(IfcType::IfcWall.rooted_attribute_count(), Some(9));
        assert_eq!(IfcType::IfcDoor.rooted_attribute_count(), Some(13));
        assert_eq!(IfcType::IfcCartesianPoint.rooted_attribute_count(), None);
    }

    #[test]
    fn test_entity_accessors() {
        let entity = Entity {
            id: EntityId(7),
            ifc_type: IfcType::IfcCartesianPoint,
            attributes: vec![AttributeValue::floats(&[1.0, 2.0])],
        };
        assert_eq!(entity.get_triple(0), Some([1.0, 2.0, 0.0]));
        assert_eq!(entity.name(), None);
        assert_eq!(entity.id.to_string(), "#7");
    }
}
