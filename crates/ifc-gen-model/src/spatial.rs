// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial structure tree types

use crate::{EntityId, IfcType};
use serde::{Deserialize, Serialize};

/// Type of spatial structure node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialNodeType {
    /// IfcProject - root of the hierarchy
    Project,
    /// IfcSite - geographic site
    Site,
    /// IfcBuilding - a building structure
    Building,
    /// IfcBuildingStorey - a floor/level
    Storey,
    /// Building element (wall, door, etc.)
    Element,
}

impl SpatialNodeType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SpatialNodeType::Project => "Project",
            SpatialNodeType::Site => "Site",
            SpatialNodeType::Building => "Building",
            SpatialNodeType::Storey => "Storey",
            SpatialNodeType::Element => "Element",
        }
    }

    /// Determine node type from IFC type
    pub fn from_ifc_type(ifc_type: &IfcType) -> Self {
        match ifc_type {
            IfcType::IfcProject => SpatialNodeType::Project,
            IfcType::IfcSite => SpatialNodeType::Site,
            IfcType::IfcBuilding => SpatialNodeType::Building,
            IfcType::IfcBuildingStorey => SpatialNodeType::Storey,
            _ => SpatialNodeType::Element,
        }
    }
}

/// Node in the spatial hierarchy tree
///
/// The tree follows: Project → Site → Building → Storey → Elements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialNode {
    /// Entity ID
    pub id: EntityId,
    /// Type of spatial node
    pub node_type: SpatialNodeType,
    /// Display name
    pub name: String,
    /// IFC entity type name (e.g., "IFCWALL")
    pub entity_type: String,
    /// Child nodes
    pub children: Vec<SpatialNode>,
    /// Whether this entity has a representation
    pub has_geometry: bool,
}

impl SpatialNode {
    /// Create a new spatial node
    pub fn new(
        id: EntityId,
        node_type: SpatialNodeType,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            node_type,
            name: name.into(),
            entity_type: entity_type.into(),
            children: Vec::new(),
            has_geometry: false,
        }
    }

    /// Set has_geometry flag
    pub fn with_geometry(mut self, has_geometry: bool) -> Self {
        self.has_geometry = has_geometry;
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: SpatialNode) {
        self.children.push(child);
    }

    /// Get total element count (recursive)
    pub fn element_count(&self) -> usize {
        self.iter()
            .filter(|n| n.node_type == SpatialNodeType::Element)
            .count()
    }

    /// Find a node by ID (recursive)
    pub fn find(&self, id: EntityId) -> Option<&SpatialNode> {
        self.iter().find(|n| n.id == id)
    }

    /// Iterate all nodes (depth-first)
    pub fn iter(&self) -> SpatialNodeIter<'_> {
        SpatialNodeIter { stack: vec![self] }
    }

    /// Get all element IDs in this subtree
    pub fn element_ids(&self) -> Vec<EntityId> {
        self.iter()
            .filter(|n| n.node_type == SpatialNodeType::Element)
            .map(|n| n.id)
            .collect()
    }

    /// Depth of the spatial chain below (and including) this node
    ///
    /// Elements do not count as levels.
    pub fn spatial_depth(&self) -> usize {
        if self.node_type == SpatialNodeType::Element {
            return 0;
        }
        1 + self
            .children
            .iter()
            .map(|c| c.spatial_depth())
            .max()
            .unwrap_or(0)
    }
}

/// Iterator over spatial nodes (depth-first)
pub struct SpatialNodeIter<'a> {
    stack: Vec<&'a SpatialNode>,
}

impl<'a> Iterator for SpatialNodeIter<'a> {
    type Item = &'a SpatialNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Add children in reverse order so first child is processed first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> SpatialNode {
        let mut storey = SpatialNode::new(EntityId(4), SpatialNodeType::Storey, "L0", "IFCBUILDINGSTOREY");
        storey.add_child(
            SpatialNode::new(EntityId(10), SpatialNodeType::Element, "Wall_1", "IFCWALL")
                .with_geometry(true),
        );
        storey.add_child(SpatialNode::new(EntityId(11), SpatialNodeType::Element, "Door", "IFCDOOR"));
        let mut building = SpatialNode::new(EntityId(3), SpatialNodeType::Building, "B", "IFCBUILDING");
        building.add_child(storey);
        let mut site = SpatialNode::new(EntityId(2), SpatialNodeType::Site, "S", "IFCSITE");
        site.add_child(building);
        let mut project = SpatialNode::new(EntityId(1), SpatialNodeType::Project, "P", "IFCPROJECT");
        project.add_child(site);
        project
    }

    #[test]
    fn test_element_count_and_depth() {
        let tree = chain();
        assert_eq!(tree.element_count(), 2);
        assert_eq!(tree.spatial_depth(), 4);
        assert_eq!(tree.element_ids(), vec![EntityId(10), EntityId(11)]);
    }

    #[test]
    fn test_find() {
        let tree = chain();
        assert_eq!(tree.find(EntityId(3)).map(|n| n.name.as_str()), Some("B"));
        assert!(tree.find(EntityId(99)).is_none());
    }
}
