//! Axial hex coordinates (pointy-top layout)
//!
//! Cells are addressed by `(q, r)` with the implicit cube axis `s = -q - r`.
//! `size` is the pixel distance from a hex center to any of its corners.

use std::ops::{Add, Sub};
use std::str::FromStr;

/// sqrt(3), not yet a stable constant in `std::f64::consts`.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// The six neighbor offsets in fixed order: E, NE, NW, W, SW, SE.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Run directions used to walk one ring of the spiral, starting from `(0, -k)`.
const SPIRAL_RUNS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Axial coordinate of a hex cell. The pair is the primary key of every cell.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub const ORIGIN: Axial = Axial { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube axis.
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// All six neighbors in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(&self) -> [Axial; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| self.saturating_offset(dq, dr))
    }

    /// The neighbor one step away in `dir`.
    pub fn step(&self, dir: HexDirection) -> Axial {
        let (dq, dr) = dir.delta();
        self.saturating_offset(dq, dr)
    }

    /// `self + (dq, dr)`, or `None` if either axis overflows.
    pub fn checked_offset(&self, dq: i32, dr: i32) -> Option<Axial> {
        Some(Axial::new(self.q.checked_add(dq)?, self.r.checked_add(dr)?))
    }

    fn saturating_offset(&self, dq: i32, dr: i32) -> Axial {
        Axial::new(self.q.saturating_add(dq), self.r.saturating_add(dr))
    }

    /// Hex distance: `(|dq| + |dr| + |dq + dr|) / 2`.
    pub fn distance(&self, other: Axial) -> i32 {
        distance(*self, other)
    }

    /// Ring index around the origin.
    pub fn ring(&self) -> i32 {
        self.distance(Axial::ORIGIN)
    }

    /// `ring` without clamping, for coordinates near the `i32` limits.
    pub fn wide_ring(&self) -> i64 {
        wide_distance(*self, Axial::ORIGIN)
    }

    /// Pixel center of this cell.
    pub fn to_pixel(&self, size: f64) -> (f64, f64) {
        to_pixel(self.q, self.r, size)
    }

    /// Cell containing the pixel position `(x, y)`.
    pub fn from_pixel(x: f64, y: f64, size: f64) -> Axial {
        to_axial(x, y, size)
    }

    /// Back-to-front draw key: ascending `r`, then descending `q` within a row
    /// so western cells overlap their eastern neighbors.
    pub fn draw_order_key(&self) -> (i32, i32) {
        (self.r, -self.q)
    }
}

impl Add for Axial {
    type Output = Axial;

    #[inline]
    fn add(self, other: Axial) -> Axial {
        Axial::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Axial {
    type Output = Axial;

    #[inline]
    fn sub(self, other: Axial) -> Axial {
        Axial::new(self.q - other.q, self.r - other.r)
    }
}

impl From<(i32, i32)> for Axial {
    fn from((q, r): (i32, i32)) -> Self {
        Axial::new(q, r)
    }
}

impl std::fmt::Display for Axial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Neighbor coordinates of `(q, r)`.
pub fn neighbors(q: i32, r: i32) -> [Axial; 6] {
    Axial::new(q, r).neighbors()
}

/// Axial to pixel: `x = size * (sqrt3 * q + sqrt3/2 * r)`, `y = size * 3/2 * r`.
pub fn to_pixel(q: i32, r: i32, size: f64) -> (f64, f64) {
    let q = q as f64;
    let r = r as f64;
    let x = size * (SQRT_3 * q + SQRT_3 / 2.0 * r);
    let y = size * (1.5 * r);
    (x, y)
}

/// Inverse of `to_pixel` without rounding.
pub fn pixel_to_fractional(x: f64, y: f64, size: f64) -> (f64, f64) {
    let q = (SQRT_3 / 3.0 * x - y / 3.0) / size;
    let r = (2.0 / 3.0 * y) / size;
    (q, r)
}

/// Pixel to the axial coordinate of the containing cell.
pub fn to_axial(x: f64, y: f64, size: f64) -> Axial {
    let (q, r) = pixel_to_fractional(x, y, size);
    cube_round(q, r)
}

/// Snap fractional axial coordinates to the nearest cell.
///
/// Rounds the three cube components independently, then recomputes the one
/// with the largest rounding error from the other two so `x + y + z == 0`.
/// Total for every input: NaN collapses to zero and infinities saturate.
pub fn cube_round(q: f64, r: f64) -> Axial {
    let (x, y, z) = (q, -q - r, r);

    let mut rx = x.round();
    let ry = y.round();
    let mut rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy <= dz {
        rz = -rx - ry;
    }
    // Otherwise s carries the largest error and is implied by q and r.

    Axial::new(rx as i32, rz as i32)
}

/// Integer hex distance between two cells, clamped to `i32::MAX`.
pub fn distance(a: Axial, b: Axial) -> i32 {
    i32::try_from(wide_distance(a, b)).unwrap_or(i32::MAX)
}

/// Exact hex distance for any pair of coordinates.
pub fn wide_distance(a: Axial, b: Axial) -> i64 {
    let (aq, ar, bq, br) = (i64::from(a.q), i64::from(a.r), i64::from(b.q), i64::from(b.r));
    let dq = (aq - bq).abs();
    let dr = (ar - br).abs();
    let ds = (aq + ar - bq - br).abs();
    (dq + dr + ds) / 2
}

/// Number of cells within `radius` rings of the origin, inclusive.
pub fn hex_count(radius: u32) -> usize {
    let r = radius as usize;
    1 + 3 * r * (r + 1)
}

/// Coordinates in spiral order: the origin, then each ring `k` walked as six
/// straight runs of length `k` starting from `(0, -k)`.
pub fn spiral(radius: u32) -> Vec<Axial> {
    let mut coords = Vec::with_capacity(hex_count(radius));
    coords.push(Axial::ORIGIN);

    for k in 1..=radius as i32 {
        let mut cur = Axial::new(0, -k);
        for (dq, dr) in SPIRAL_RUNS {
            for _ in 0..k {
                cur = Axial::new(cur.q + dq, cur.r + dr);
                coords.push(cur);
            }
        }
    }

    coords
}

/// Six movement directions on a pointy-top grid, in neighbor-offset order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

/// Analog input below this magnitude produces no movement.
pub const STICK_DEAD_ZONE: f64 = 0.3;

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// `(dq, dr)` movement vector.
    pub fn delta(self) -> (i32, i32) {
        NEIGHBOR_OFFSETS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            HexDirection::East => "E",
            HexDirection::NorthEast => "NE",
            HexDirection::NorthWest => "NW",
            HexDirection::West => "W",
            HexDirection::SouthWest => "SW",
            HexDirection::SouthEast => "SE",
        }
    }

    /// Map an analog stick vector (y up) to the nearest 60 degree sector.
    pub fn from_stick(x: f64, y: f64) -> Option<HexDirection> {
        if (x * x + y * y).sqrt() < STICK_DEAD_ZONE {
            return None;
        }
        let angle = y.atan2(x).to_degrees().rem_euclid(360.0);
        let sector = (angle / 60.0).round() as usize % 6;
        Some(Self::ALL[sector])
    }
}

impl HexDirection {
    /// Keyboard binding: numpad 7/9/4/6/1/3 by screen position, plus the
    /// left and right arrows. Numpad 8 and 2 have no hex direction.
    pub fn from_key(key: &str) -> Option<HexDirection> {
        let key = key.strip_prefix("KP_").unwrap_or(key);
        match key {
            "7" => Some(HexDirection::NorthWest),
            "9" => Some(HexDirection::NorthEast),
            "4" | "Left" => Some(HexDirection::West),
            "6" | "Right" => Some(HexDirection::East),
            "1" => Some(HexDirection::SouthWest),
            "3" => Some(HexDirection::SouthEast),
            _ => None,
        }
    }
}

impl FromStr for HexDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "east" => Ok(HexDirection::East),
            "ne" | "northeast" => Ok(HexDirection::NorthEast),
            "nw" | "northwest" => Ok(HexDirection::NorthWest),
            "w" | "west" => Ok(HexDirection::West),
            "sw" | "southwest" => Ok(HexDirection::SouthWest),
            "se" | "southeast" => Ok(HexDirection::SouthEast),
            other => Err(format!("unknown hex direction '{}'", other)),
        }
    }
}

/// Convert a screen click to the cell under it.
///
/// `camera_offset` is added to world coordinates when drawing, so it is
/// subtracted here together with the canvas center.
pub fn screen_to_axial(
    screen: (f64, f64),
    canvas_center: (f64, f64),
    camera_offset: (f64, f64),
    size: f64,
) -> Axial {
    let world_x = screen.0 - canvas_center.0 - camera_offset.0;
    let world_y = screen.1 - canvas_center.1 - camera_offset.1;
    to_axial(world_x, world_y, size)
}
