// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface styles and styled representation items

use crate::document::SpatialDocument;
use crate::error::{DocumentError, Result};
use ifc_gen_model::{AttributeValue, ColourRgb, EntityId, IfcType};

impl SpatialDocument {
    /// IFCSURFACESTYLE('name',.BOTH.,())
    pub fn add_style(&mut self, name: &str) -> EntityId {
        self.add(
            IfcType::IfcSurfaceStyle,
            vec![
                AttributeValue::string(name),
                AttributeValue::enumeration("BOTH"),
                AttributeValue::List(Vec::new()),
            ],
        )
    }

    /// Add a shading element with a surface colour to a style
    ///
    /// `transparency` is 0.0 for opaque, 1.0 for fully transparent.
    pub fn add_surface_shading(
        &mut self,
        style: EntityId,
        colour: ColourRgb,
        colour_name: Option<&str>,
        transparency: f64,
    ) -> Result<EntityId> {
        self.entity_of_type(style, &IfcType::IfcSurfaceStyle)?;
        let rgb = self.add(
            IfcType::IfcColourRgb,
            vec![
                colour_name.map(AttributeValue::string).unwrap_or_default(),
                colour.red.into(),
                colour.green.into(),
                colour.blue.into(),
            ],
        );
        let shading = self.add(
            IfcType::IfcSurfaceStyleShading,
            vec![rgb.into(), transparency.into()],
        );
        self.push_to_list(style, 2, shading)?;
        Ok(shading)
    }

    /// Style the items of a shape representation
    ///
    /// One style is applied to every item; N styles for N items are applied
    /// pairwise. Any other combination fails with `StyleCountMismatch`
    /// before anything is created.
    pub fn assign_representation_styles(
        &mut self,
        shape: EntityId,
        styles: &[EntityId],
    ) -> Result<Vec<EntityId>> {
        let items = self
            .entity_of_type(shape, &IfcType::IfcShapeRepresentation)?
            .get_refs(3)
            .unwrap_or_default();
        let pairs: Vec<(EntityId, EntityId)> = match (items.len(), styles.len()) {
            (_, 1) => items.iter().map(|&item| (item, styles[0])).collect(),
            (n, m) if n == m && n > 0 => items.iter().copied().zip(styles.iter().copied()).collect(),
            (n, m) => return Err(DocumentError::StyleCountMismatch { items: n, styles: m }),
        };
        for &style in styles {
            self.entity_of_type(style, &IfcType::IfcSurfaceStyle)?;
        }
        Ok(pairs
            .into_iter()
            .map(|(item, style)| {
                self.add(
                    IfcType::IfcStyledItem,
                    vec![item.into(), AttributeValue::refs(&[style]), AttributeValue::Null],
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_gen_model::EntityResolver;

    fn shape_with_items(doc: &mut SpatialDocument, n: u32) -> EntityId {
        let context = doc.add(IfcType::IfcGeometricRepresentationContext, vec![]);
        let items: Vec<EntityId> = (0..n)
            .map(|_| doc.add(IfcType::IfcExtrudedAreaSolid, vec![]))
            .collect();
        doc.add_shape_representation(context, "Body", "SweptSolid", &items)
            .unwrap()
    }

    #[test]
    fn test_style_with_shading() {
        let mut doc = SpatialDocument::new();
        let style = doc.add_style("Wall_1_style");
        let shading = doc
            .add_surface_shading(style, ColourRgb::new(0.8, 0.8, 0.8), Some("#CCCCCC"), 0.0)
            .unwrap();
        assert_eq!(doc.get(style).unwrap().get_refs(2), Some(vec![shading]));
        let rgb = doc.get(doc.get(shading).unwrap().get_ref(0).unwrap()).unwrap();
        assert_eq!(rgb.get_string(0), Some("#CCCCCC"));
        assert_eq!(rgb.get_float(1), Some(0.8));
    }

    #[test]
    fn test_single_style_covers_all_items() {
        let mut doc = SpatialDocument::new();
        let shape = shape_with_items(&mut doc, 2);
        let style = doc.add_style("s");
        let styled = doc.assign_representation_styles(shape, &[style]).unwrap();
        assert_eq!(styled.len(), 2);
    }

    #[test]
    fn test_styles_pairwise_or_mismatch() {
        let mut doc = SpatialDocument::new();
        let shape = shape_with_items(&mut doc, 2);
        let a = doc.add_style("a");
        let b = doc.add_style("b");
        let styled = doc.assign_representation_styles(shape, &[a, b]).unwrap();
        let second = doc.get(styled[1]).unwrap();
        assert_eq!(second.get_refs(1), Some(vec![b]));

        let single = shape_with_items(&mut doc, 1);
        let before = doc.count_by_type(&IfcType::IfcStyledItem);
        assert!(matches!(
            doc.assign_representation_styles(single, &[a, b]),
            Err(DocumentError::StyleCountMismatch { items: 1, styles: 2 })
        ));
        assert_eq!(doc.count_by_type(&IfcType::IfcStyledItem), before);
    }
}
