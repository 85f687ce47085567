// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SI unit assignment and length unit readback

use crate::document::SpatialDocument;
use crate::error::{DocumentError, Result};
use ifc_gen_model::{AttributeValue, Entity, EntityId, EntityResolver, IfcType};

/// Project attribute holding the unit assignment
const UNITS_IN_CONTEXT: usize = 8;

/// SI units the generator assigns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Length,
    Area,
    Volume,
}

impl UnitKind {
    /// IfcUnitEnum value
    pub fn unit_type(&self) -> &'static str {
        match self {
            UnitKind::Length => "LENGTHUNIT",
            UnitKind::Area => "AREAUNIT",
            UnitKind::Volume => "VOLUMEUNIT",
        }
    }

    /// IfcSIUnitName value
    pub fn si_name(&self) -> &'static str {
        match self {
            UnitKind::Length => "METRE",
            UnitKind::Area => "SQUARE_METRE",
            UnitKind::Volume => "CUBIC_METRE",
        }
    }
}

impl SpatialDocument {
    /// IFCSIUNIT(*,.LENGTHUNIT.,$,.METRE.) and friends, without prefix
    pub fn add_si_unit(&mut self, kind: UnitKind) -> EntityId {
        self.add(
            IfcType::IfcSIUnit,
            vec![
                AttributeValue::Derived,
                AttributeValue::enumeration(kind.unit_type()),
                AttributeValue::Null,
                AttributeValue::enumeration(kind.si_name()),
            ],
        )
    }

    /// Create the unit assignment and attach it to the project
    pub fn assign_units(&mut self, kinds: &[UnitKind]) -> Result<EntityId> {
        let project = self.project().ok_or(DocumentError::MissingProject)?;
        let units: Vec<EntityId> = kinds.iter().map(|&k| self.add_si_unit(k)).collect();
        let assignment = self.add(IfcType::IfcUnitAssignment, vec![AttributeValue::refs(&units)]);
        self.set_attribute(project, UNITS_IN_CONTEXT, assignment)?;
        Ok(assignment)
    }
}

/// Length unit scale of a document, in metres per unit
///
/// Returns 1.0 when no length unit is assigned.
pub fn extract_unit_scale(resolver: &dyn EntityResolver) -> f64 {
    let Some(project) = resolver.entities_by_type(&IfcType::IfcProject).into_iter().next() else {
        return 1.0;
    };
    let Some(assignment) = project
        .get_ref(UNITS_IN_CONTEXT)
        .and_then(|id| resolver.get(id))
    else {
        return 1.0;
    };
    assignment
        .get_refs(0)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|id| resolver.get(id))
        .find_map(si_length_scale)
        .unwrap_or(1.0)
}

/// Scale of an IFCSIUNIT(*, .LENGTHUNIT., Prefix, .METRE.)
fn si_length_scale(unit: &Entity) -> Option<f64> {
    if unit.ifc_type != IfcType::IfcSIUnit || unit.get_enum(1)? != "LENGTHUNIT" {
        return None;
    }
    if unit.get_enum(3)? != "METRE" {
        return None;
    }
    let prefix = match unit.get_enum(2) {
        Some("KILO") => 1e3,
        Some("HECTO") => 1e2,
        Some("DECA") => 1e1,
        Some("DECI") => 1e-1,
        Some("CENTI") => 1e-2,
        Some("MILLI") => 1e-3,
        Some("MICRO") => 1e-6,
        _ => 1.0,
    };
    Some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_assign_units_needs_project() {
        let mut doc = SpatialDocument::new();
        assert!(matches!(
            doc.assign_units(&[UnitKind::Length]),
            Err(DocumentError::MissingProject)
        ));
    }

    #[test]
    fn test_metres_read_back() {
        let mut doc = SpatialDocument::new();
        let project = doc.create_rooted(IfcType::IfcProject, Some("P")).unwrap();
        let assignment = doc
            .assign_units(&[UnitKind::Length, UnitKind::Area, UnitKind::Volume])
            .unwrap();
        assert_eq!(doc.get(project).unwrap().get_ref(8), Some(assignment));
        assert_eq!(doc.count_by_type(&IfcType::IfcSIUnit), 3);
        assert_relative_eq!(extract_unit_scale(&doc), 1.0);

        let names: Vec<_> = doc
            .entities_by_type(&IfcType::IfcSIUnit)
            .iter()
            .filter_map(|u| u.get_enum(3))
            .collect();
        assert_eq!(names, ["METRE", "SQUARE_METRE", "CUBIC_METRE"]);
    }

    #[test]
    fn test_prefixed_length_unit() {
        let mut doc = SpatialDocument::new();
        doc.create_rooted(IfcType::IfcProject, None).unwrap();
        let assignment = doc.assign_units(&[UnitKind::Length]).unwrap();
        let unit = doc.get(assignment).unwrap().get_refs(0).unwrap()[0];
        doc.set_attribute(unit, 2, AttributeValue::enumeration("MILLI"))
            .unwrap();
        assert_relative_eq!(extract_unit_scale(&doc), 0.001);
    }

    #[test]
    fn test_no_units_defaults_to_metres() {
        let doc = SpatialDocument::new();
        assert_relative_eq!(extract_unit_scale(&doc), 1.0);
    }
}
