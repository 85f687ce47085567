// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hierarchy extraction
//!
//! Walks IfcRelAggregates and IfcRelContainedInSpatialStructure from the
//! project down to the contained elements.

use ifc_gen_model::{Entity, EntityId, EntityResolver, IfcType, SpatialNode, SpatialNodeType};
use rustc_hash::{FxHashMap, FxHashSet};

/// Build the spatial tree rooted at the first IfcProject
pub fn spatial_tree(resolver: &dyn EntityResolver) -> Option<SpatialNode> {
    let project = resolver
        .entities_by_type(&IfcType::IfcProject)
        .into_iter()
        .next()?;

    let decomposes = relation_map(resolver, &IfcType::IfcRelAggregates, 4, 5);
    let contains = relation_map(resolver, &IfcType::IfcRelContainedInSpatialStructure, 5, 4);

    let mut visited = FxHashSet::default();
    Some(build_node(resolver, project, &decomposes, &contains, &mut visited))
}

/// Storey (or other structure) that directly contains `element`
pub fn containing_storey(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    resolver
        .entities_by_type(&IfcType::IfcRelContainedInSpatialStructure)
        .into_iter()
        .find(|rel| rel.get_refs(4).is_some_and(|ids| ids.contains(&element)))
        .and_then(|rel| rel.get_ref(5))
}

/// relating -> related ids for one relationship type
fn relation_map(
    resolver: &dyn EntityResolver,
    rel_type: &IfcType,
    relating_slot: usize,
    related_slot: usize,
) -> FxHashMap<EntityId, Vec<EntityId>> {
    let mut map: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();
    for rel in resolver.entities_by_type(rel_type) {
        if let (Some(relating), Some(related)) =
            (rel.get_ref(relating_slot), rel.get_refs(related_slot))
        {
            map.entry(relating).or_default().extend(related);
        }
    }
    map
}

fn build_node(
    resolver: &dyn EntityResolver,
    entity: &Entity,
    decomposes: &FxHashMap<EntityId, Vec<EntityId>>,
    contains: &FxHashMap<EntityId, Vec<EntityId>>,
    visited: &mut FxHashSet<EntityId>,
) -> SpatialNode {
    visited.insert(entity.id);
    let node_type = SpatialNodeType::from_ifc_type(&entity.ifc_type);
    let name = entity.name().unwrap_or(node_type.display_name());
    let has_geometry = entity
        .get(6)
        .is_some_and(|rep| !rep.is_null() && node_type == SpatialNodeType::Element);
    let mut node = SpatialNode::new(entity.id, node_type, name, entity.ifc_type.name())
        .with_geometry(has_geometry);

    let children = decomposes
        .get(&entity.id)
        .into_iter()
        .chain(contains.get(&entity.id))
        .flatten();
    for child_id in children {
        // Guard against cycles in malformed relationship graphs
        if visited.contains(child_id) {
            continue;
        }
        if let Some(child) = resolver.get(*child_id) {
            node.add_child(build_node(resolver, child, decomposes, contains, visited));
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap;

    #[test]
    fn test_elements_under_storey() {
        let mut scaffold = bootstrap::create("P", "S", "B", "L0").unwrap();
        let storey = scaffold.storey();
        let wall = scaffold
            .document
            .create_rooted(IfcType::IfcWall, Some("Wall_1"))
            .unwrap();
        let door = scaffold
            .document
            .create_rooted(IfcType::IfcDoor, Some("Door"))
            .unwrap();
        scaffold.document.assign_container(storey, &[wall, door]).unwrap();

        let doc = &scaffold.document;
        let tree = spatial_tree(doc).unwrap();
        assert_eq!(tree.element_count(), 2);
        assert_eq!(tree.element_ids(), vec![wall, door]);
        let storey_node = tree.find(storey).unwrap();
        assert_eq!(storey_node.children.len(), 2);
        assert_eq!(storey_node.children[0].name, "Wall_1");
        assert!(!storey_node.children[0].has_geometry);

        assert_eq!(containing_storey(doc, door), Some(storey));
        assert_eq!(containing_storey(doc, storey), None);
    }

    #[test]
    fn test_no_project() {
        let doc = crate::SpatialDocument::new();
        assert!(spatial_tree(&doc).is_none());
    }
}
