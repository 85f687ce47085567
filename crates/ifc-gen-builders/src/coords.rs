// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client (Y-up) to document (Z-up) coordinates
//!
//! Apply exactly once to every raw payload vertex or position.

use ifc_gen_model::Point3D;
use nalgebra::Point3;

/// `(x, y, z) -> (x, -z, y)`
#[inline]
pub fn to_document_space(p: &Point3D) -> Point3<f64> {
    Point3::new(p.x, -p.z, p.y)
}

/// Inverse of [`to_document_space`]: `(x, y, z) -> (x, z, -y)`
#[inline]
pub fn from_document_space(p: &Point3<f64>) -> Point3D {
    Point3D::new(p.x, p.z, -p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_axis_swap() {
        let p = to_document_space(&Point3D::new(1.0, 3.0, 2.0));
        assert_eq!(p, Point3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_bijection() {
        let samples = [
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(4.0, 0.0, 3.0),
            Point3D::new(-1.5, 2.25, -7.0),
            Point3D::new(1e9, -1e-9, 0.125),
        ];
        for p in samples {
            assert_eq!(from_document_space(&to_document_space(&p)), p);
            let q = Point3::new(p.x, p.y, p.z);
            assert_eq!(to_document_space(&from_document_space(&q)), q);
        }
    }
}
