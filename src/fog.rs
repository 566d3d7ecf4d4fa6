//! Fog of war
//!
//! Each cell carries an `explored` and a `visible` flag. A reveal sets both
//! together and nothing ever clears them, so a cell that has been seen once
//! stays on the map for good.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::grid::HexGrid;
use crate::hex::{self, Axial};

/// Display state of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FogState {
    /// Never revealed
    #[default]
    Hidden,
    /// Revealed before but not currently lit
    Explored,
    Visible,
}

impl FogState {
    pub fn of(explored: bool, visible: bool) -> Self {
        match (explored, visible) {
            (_, true) => FogState::Visible,
            (true, false) => FogState::Explored,
            (false, false) => FogState::Hidden,
        }
    }

    pub fn is_revealed(&self) -> bool {
        !matches!(self, FogState::Hidden)
    }
}

/// Reveal every existing cell within `radius` steps of `center`.
///
/// Breadth-first over coordinates, so the walk does not stop at holes in
/// the grid. A disc at least as wide as the grid is resolved by scanning
/// the cells instead. Returns how many cells were explored for the first
/// time.
pub fn reveal(grid: &mut HexGrid, center: Axial, radius: u32) -> usize {
    let grid_radius = i64::from(grid.radius());
    let center_ring = center.wide_ring();
    // Every cell lies within these distances of the center
    let nearest = center_ring - grid_radius;
    let farthest = center_ring + grid_radius;
    let radius = i64::from(radius).min(farthest);

    let newly_explored = if nearest > radius {
        0
    } else if radius >= grid_radius {
        reveal_by_scan(grid, center, radius)
    } else {
        reveal_by_walk(grid, center, radius)
    };

    trace!(q = center.q, r = center.r, radius, newly_explored, "Revealed");
    newly_explored
}

fn reveal_by_walk(grid: &mut HexGrid, center: Axial, radius: i64) -> usize {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut newly_explored = 0;

    seen.insert(center);
    queue.push_back((center, 0i64));
    while let Some((coord, depth)) = queue.pop_front() {
        if let Some(cell) = grid.get_mut(coord) {
            if cell.mark_seen() {
                newly_explored += 1;
            }
        }
        if depth >= radius {
            continue;
        }
        for n in coord.neighbors() {
            if seen.insert(n) {
                queue.push_back((n, depth + 1));
            }
        }
    }
    newly_explored
}

fn reveal_by_scan(grid: &mut HexGrid, center: Axial, radius: i64) -> usize {
    let in_range: Vec<Axial> = grid
        .cells()
        .map(|c| c.coord())
        .filter(|c| hex::wide_distance(*c, center) <= radius)
        .collect();
    in_range
        .into_iter()
        .filter(|c| grid.get_mut(*c).map_or(false, |cell| cell.mark_seen()))
        .count()
}

/// Cell counts per fog state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FogCounts {
    pub hidden: usize,
    pub explored: usize,
    pub visible: usize,
}

impl FogCounts {
    pub fn total(&self) -> usize {
        self.hidden + self.explored + self.visible
    }

    /// Share of cells revealed at least once.
    pub fn revealed_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => (self.explored + self.visible) as f64 / total as f64,
        }
    }
}

pub fn fog_counts(grid: &HexGrid) -> FogCounts {
    let mut counts = FogCounts::default();
    for cell in grid.cells() {
        match cell.fog_state() {
            FogState::Hidden => counts.hidden += 1,
            FogState::Explored => counts.explored += 1,
            FogState::Visible => counts.visible += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use crate::terrain::TerrainKind;

    fn blank(radius: i32) -> HexGrid {
        HexGrid::from_fn(radius, 10.0, |_| TerrainKind::Grass).unwrap()
    }

    #[test]
    fn test_fog_state_of() {
        assert_eq!(FogState::of(false, false), FogState::Hidden);
        assert_eq!(FogState::of(true, false), FogState::Explored);
        assert_eq!(FogState::of(true, true), FogState::Visible);
        assert!(!FogState::Hidden.is_revealed());
    }

    #[test]
    fn test_reveal_radius_counts() {
        let mut grid = blank(6);
        assert_eq!(reveal(&mut grid, Axial::ORIGIN, 2), hex::hex_count(2));
        // Revealing the same area again finds nothing new
        assert_eq!(reveal(&mut grid, Axial::ORIGIN, 2), 0);
        assert_eq!(reveal(&mut grid, Axial::ORIGIN, 0), 0);

        let counts = fog_counts(&grid);
        assert_eq!(counts.visible, 19);
        assert_eq!(counts.hidden, grid.len() - 19);
        assert_eq!(counts.total(), grid.len());
    }

    #[test]
    fn test_reveal_is_exactly_the_hex_disc() {
        let mut grid = blank(6);
        let center = Axial::new(1, -2);
        reveal(&mut grid, center, 3);
        for cell in grid.cells() {
            assert_eq!(cell.is_explored(), cell.coord().distance(center) <= 3, "{}", cell.coord());
            assert_eq!(cell.is_explored(), cell.is_visible());
        }
    }

    #[test]
    fn test_reveal_at_edge_only_touches_existing() {
        let mut grid = blank(2);
        let newly = reveal(&mut grid, Axial::new(2, 0), 1);
        assert_eq!(newly, 4);
        assert!(grid.get(Axial::new(3, 0)).is_none());
    }

    #[test]
    fn test_reveal_off_grid_crosses_void() {
        let mut grid = blank(2);
        // Center outside the grid still reaches cells within range
        let newly = reveal(&mut grid, Axial::new(4, 0), 2);
        assert_eq!(newly, 1);
        assert!(grid.get(Axial::new(2, 0)).unwrap().is_explored());
    }

    #[test]
    fn test_reveal_with_huge_radius_covers_grid() {
        let mut grid = blank(1);
        assert_eq!(reveal(&mut grid, Axial::ORIGIN, u32::MAX), 7);
        assert_eq!(reveal(&mut grid, Axial::ORIGIN, u32::MAX), 0);

        let mut grid = blank(3);
        assert_eq!(reveal(&mut grid, Axial::new(-40, 10), i32::MAX as u32 + 1), grid.len());
        assert_eq!(fog_counts(&grid).hidden, 0);
    }

    #[test]
    fn test_reveal_far_from_grid() {
        let mut grid = blank(2);
        assert_eq!(reveal(&mut grid, Axial::new(i32::MAX, i32::MIN), 5), 0);
        assert_eq!(reveal(&mut grid, Axial::new(i32::MIN, i32::MIN), 1000), 0);
        assert_eq!(fog_counts(&grid).hidden, grid.len());
        assert_eq!(reveal(&mut grid, Axial::new(i32::MAX, 0), u32::MAX), hex::hex_count(2));
    }

    #[test]
    fn test_walk_and_scan_agree() {
        let center = Axial::new(2, -1);
        for radius in 0..6 {
            let mut walked = blank(4);
            let walked_count = reveal_by_walk(&mut walked, center, radius);
            let mut scanned = blank(4);
            let scanned_count = reveal_by_scan(&mut scanned, center, radius);
            assert_eq!(walked_count, scanned_count, "radius {}", radius);
            for cell in walked.cells() {
                assert_eq!(cell.is_explored(), scanned.get(cell.coord()).unwrap().is_explored());
            }
        }
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut grid = HexGrid::generate(&GridConfig {
            radius: 12,
            ..GridConfig::default()
        })
        .unwrap();
        let mut explored: HashSet<Axial> = HashSet::new();
        let walk = [(0, 0), (3, -1), (5, -4), (-2, 6), (-8, 1), (0, 0)];
        for (q, r) in walk {
            reveal(&mut grid, Axial::new(q, r), 2);
            let now: HashSet<Axial> = grid.cells().filter(|c| c.is_explored()).map(|c| c.coord()).collect();
            assert!(explored.is_subset(&now));
            explored = now;
        }
        assert!(fog_counts(&grid).revealed_fraction() > 0.0);
    }
}
