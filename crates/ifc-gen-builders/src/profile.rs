// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D profile outlines for extruded solids

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Closed 2D outline (counter-clockwise, last point not repeated)
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    pub outer: Vec<Point2<f64>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self { outer }
    }

    /// Axis-aligned rectangle with its minimum corner at `origin`
    pub fn rectangle(origin: Point2<f64>, width: f64, height: f64) -> Self {
        Self::new(vec![
            origin,
            Point2::new(origin.x + width, origin.y),
            Point2::new(origin.x + width, origin.y + height),
            Point2::new(origin.x, origin.y + height),
        ])
    }

    /// U-shaped door lining seen from the front
    ///
    /// Two jambs of `thickness` and a head of `thickness` on top, open at
    /// the bottom. Fails when the jambs or head leave no opening.
    pub fn door_lining(width: f64, height: f64, thickness: f64) -> Result<Self> {
        if thickness <= 0.0 {
            return Err(Error::build("Lining thickness must be positive"));
        }
        if width <= 2.0 * thickness {
            return Err(Error::build(format!(
                "Door width {} leaves no opening between {} jambs",
                width, thickness
            )));
        }
        if height <= thickness {
            return Err(Error::build(format!(
                "Door height {} does not exceed lining thickness {}",
                height, thickness
            )));
        }
        let t = thickness;
        Ok(Self::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(t, 0.0),
            Point2::new(t, height - t),
            Point2::new(width - t, height - t),
            Point2::new(width - t, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, height),
            Point2::new(0.0, height),
        ]))
    }

    /// Signed area (positive when counter-clockwise)
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        (0..n)
            .map(|i| {
                let a = self.outer[i];
                let b = self.outer[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    /// Bounding box as (min, max)
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.outer.first()?;
        Some(self.outer.iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}
