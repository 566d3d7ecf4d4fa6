//! Region label geometry
//!
//! Labels live in the same pixel space as cell centers. A label's anchor
//! always resolves, through `hex::to_axial`, to a cell of the region that
//! produced it.

use std::collections::HashSet;

use crate::hex::{self, Axial};
use crate::regions::RegionKind;

/// A named label drawn over a region.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Degrees in `(-90, 90]`
    pub angle: f64,
    pub kind: RegionKind,
}

/// Where and how a label sits, before it is named.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl Placement {
    pub fn into_label(self, text: String, kind: RegionKind) -> Label {
        Label {
            text,
            x: self.x,
            y: self.y,
            angle: self.angle,
            kind,
        }
    }
}

/// Fold an angle in degrees into `(-90, 90]` so text never reads upside down.
pub fn upright_angle(mut degrees: f64) -> f64 {
    if degrees > 90.0 {
        degrees -= 180.0;
    } else if degrees <= -90.0 {
        degrees += 180.0;
    }
    degrees
}

/// Angle of the segment `from -> to`, in degrees, folded upright.
pub fn segment_angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    upright_angle((to.1 - from.1).atan2(to.0 - from.0).to_degrees())
}

/// Indices of the two points furthest apart.
///
/// Exhaustive pairwise search; the first pair found wins ties. A single
/// point pairs with itself. `None` for an empty slice.
pub fn diameter_endpoints(points: &[(f64, f64)]) -> Option<(usize, usize)> {
    if points.is_empty() {
        return None;
    }
    let mut best = (0, 0);
    let mut best_dist = 0.0;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let dx = points[j].0 - points[i].0;
            let dy = points[j].1 - points[i].1;
            let dist = dx * dx + dy * dy;
            if dist > best_dist {
                best_dist = dist;
                best = (i, j);
            }
        }
    }
    Some(best)
}

/// Label along the pixel diameter of `members`, anchored at its midpoint.
///
/// If the midpoint falls outside the region (concave shapes), the anchor
/// snaps to the member whose center is nearest the midpoint; the angle
/// still follows the diameter.
pub fn diameter_placement(members: &[Axial], size: f64) -> Option<Placement> {
    let points: Vec<(f64, f64)> = members.iter().map(|c| c.to_pixel(size)).collect();
    let (i, j) = diameter_endpoints(&points)?;
    let (p1, p2) = (points[i], points[j]);
    let mid = ((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0);
    let angle = segment_angle(p1, p2);

    let member_set: HashSet<Axial> = members.iter().copied().collect();
    let (x, y) = if member_set.contains(&hex::to_axial(mid.0, mid.1, size)) {
        mid
    } else {
        nearest_point(&points, mid)
    };
    Some(Placement { x, y, angle })
}

/// Label on a single cell's center, oriented along the direction to `toward`.
pub fn directed_placement(cell: Axial, toward: (f64, f64), size: f64) -> Placement {
    let (x, y) = cell.to_pixel(size);
    let angle = if (toward.0 - x).abs() < f64::EPSILON && (toward.1 - y).abs() < f64::EPSILON {
        0.0
    } else {
        segment_angle((x, y), toward)
    };
    Placement { x, y, angle }
}

/// Mean pixel position of `members`.
pub fn pixel_centroid(members: &[Axial], size: f64) -> Option<(f64, f64)> {
    if members.is_empty() {
        return None;
    }
    let (sx, sy) = members.iter().fold((0.0, 0.0), |(sx, sy), c| {
        let (x, y) = c.to_pixel(size);
        (sx + x, sy + y)
    });
    let n = members.len() as f64;
    Some((sx / n, sy / n))
}

fn nearest_point(points: &[(f64, f64)], target: (f64, f64)) -> (f64, f64) {
    let mut best = points[0];
    let mut best_dist = f64::INFINITY;
    for &p in points {
        let d = (p.0 - target.0).powi(2) + (p.1 - target.1).powi(2);
        if d < best_dist {
            best_dist = d;
            best = p;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upright_angle_range() {
        assert_eq!(upright_angle(0.0), 0.0);
        assert_eq!(upright_angle(90.0), 90.0);
        assert_eq!(upright_angle(-90.0), 90.0);
        assert_eq!(upright_angle(180.0), 0.0);
        assert_eq!(upright_angle(-180.0), 0.0);
        assert_eq!(upright_angle(135.0), -45.0);
        assert_eq!(upright_angle(-120.0), 60.0);
        for step in -360..=360 {
            let a = upright_angle((step as f64 / 2.0).clamp(-180.0, 180.0));
            assert!(a > -90.0 && a <= 90.0, "{}", a);
        }
    }

    #[test]
    fn test_segment_angle_ignores_direction() {
        assert_eq!(segment_angle((0.0, 0.0), (1.0, 1.0)), segment_angle((1.0, 1.0), (0.0, 0.0)));
        assert_eq!(segment_angle((0.0, 0.0), (0.0, 5.0)), 90.0);
        assert_eq!(segment_angle((0.0, 5.0), (0.0, 0.0)), 90.0);
    }

    #[test]
    fn test_diameter_endpoints() {
        assert_eq!(diameter_endpoints(&[]), None);
        assert_eq!(diameter_endpoints(&[(3.0, 4.0)]), Some((0, 0)));
        let pts = [(0.0, 0.0), (1.0, 0.0), (10.0, 0.0), (5.0, 1.0)];
        assert_eq!(diameter_endpoints(&pts), Some((0, 2)));
    }

    #[test]
    fn test_horizontal_strip_label() {
        let members: Vec<Axial> = (-3..=3).map(|q| Axial::new(q, 0)).collect();
        let p = diameter_placement(&members, 10.0).unwrap();
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_concave_region_anchor_snaps_to_member() {
        // A "C" shape whose diameter midpoint lands in the hole
        let members = vec![
            Axial::new(0, -2),
            Axial::new(-1, -1),
            Axial::new(-1, 0),
            Axial::new(-1, 1),
            Axial::new(0, 1),
            Axial::new(1, -2),
            Axial::new(1, 0),
        ];
        let size = 12.0;
        let p = diameter_placement(&members, size).unwrap();
        assert!(members.contains(&hex::to_axial(p.x, p.y, size)));
    }

    #[test]
    fn test_directed_placement() {
        let p = directed_placement(Axial::new(2, 0), (0.0, 0.0), 10.0);
        assert_eq!((p.x, p.y), Axial::new(2, 0).to_pixel(10.0));
        assert_eq!(p.angle, 0.0);

        let same = directed_placement(Axial::ORIGIN, (0.0, 0.0), 10.0);
        assert_eq!(same.angle, 0.0);
    }

    #[test]
    fn test_pixel_centroid() {
        assert_eq!(pixel_centroid(&[], 1.0), None);
        let c = pixel_centroid(&[Axial::new(1, 0), Axial::new(-1, 0)], 5.0).unwrap();
        assert!(c.0.abs() < 1e-9 && c.1.abs() < 1e-9);
    }
}
