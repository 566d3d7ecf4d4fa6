//! Region detection and labeling
//!
//! Groups edge-connected cells of the same terrain into regions with a
//! breadth-first flood fill, then places named labels on the regions large
//! enough to deserve one. Water regions are further split into oceans
//! (touching the map edge, or very wide) and lakes.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::grid::HexGrid;
use crate::hex::Axial;
use crate::labels::{self, Label};
use crate::naming::RegionNamer;
use crate::terrain::TerrainKind;

/// Terrain kinds that get labels, in labeling order.
pub const LABELED_TERRAIN: [TerrainKind; 3] = [TerrainKind::Forest, TerrainKind::Desert, TerrainKind::Water];

/// Grid-distance width at which an enclosed water region counts as an ocean.
pub const OCEAN_WIDTH: i32 = 10;

/// Minimum grid distance between two labels of the same ocean.
pub const OCEAN_LABEL_SPACING: i32 = 3;

/// What a labeled region is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum RegionKind {
    Forest,
    Desert,
    Ocean,
    Lake,
}

impl RegionKind {
    pub const ALL: [RegionKind; 4] = [RegionKind::Forest, RegionKind::Desert, RegionKind::Ocean, RegionKind::Lake];

    pub fn display_name(&self) -> &'static str {
        match self {
            RegionKind::Forest => "Forest",
            RegionKind::Desert => "Desert",
            RegionKind::Ocean => "Ocean",
            RegionKind::Lake => "Lake",
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, RegionKind::Ocean | RegionKind::Lake)
    }
}

/// Smallest region of `terrain` that gets a label, or `None` if the
/// terrain is never labeled.
pub fn min_region_size(terrain: TerrainKind) -> Option<usize> {
    match terrain {
        TerrainKind::Forest | TerrainKind::Desert => Some(5),
        TerrainKind::Water => Some(3),
        _ => None,
    }
}

/// A connected group of same-terrain cells, in flood-fill order.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    terrain: TerrainKind,
    cells: Vec<Axial>,
}

impl Region {
    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn cells(&self) -> &[Axial] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Largest grid distance between two members.
    pub fn width(&self) -> i32 {
        let mut width = 0;
        for (i, a) in self.cells.iter().enumerate() {
            for b in &self.cells[i + 1..] {
                width = width.max(a.distance(*b));
            }
        }
        width
    }

    /// `width() >= span`, stopping at the first pair that reaches it.
    pub fn spans_at_least(&self, span: i32) -> bool {
        if span <= 0 {
            return true;
        }
        self.cells
            .iter()
            .enumerate()
            .any(|(i, a)| self.cells[i + 1..].iter().any(|b| a.distance(*b) >= span))
    }

    /// Whether any member has a neighbor coordinate outside the grid.
    pub fn touches_edge(&self, grid: &HexGrid) -> bool {
        self.cells
            .iter()
            .any(|c| c.neighbors().iter().any(|n| !grid.contains(*n)))
    }

    /// Members with at least one neighbor that is missing or of another terrain.
    pub fn boundary_cells(&self, grid: &HexGrid) -> Vec<Axial> {
        self.cells
            .iter()
            .copied()
            .filter(|c| {
                c.neighbors()
                    .iter()
                    .any(|n| grid.get(*n).map_or(true, |cell| cell.terrain() != self.terrain))
            })
            .collect()
    }

    /// Label category, or `None` for terrain that is never labeled.
    pub fn kind(&self, grid: &HexGrid) -> Option<RegionKind> {
        match self.terrain {
            TerrainKind::Forest => Some(RegionKind::Forest),
            TerrainKind::Desert => Some(RegionKind::Desert),
            TerrainKind::Water => {
                if self.touches_edge(grid) || self.spans_at_least(OCEAN_WIDTH) {
                    Some(RegionKind::Ocean)
                } else {
                    Some(RegionKind::Lake)
                }
            }
            _ => None,
        }
    }

    /// Meets the minimum size for its terrain.
    pub fn qualifies(&self) -> bool {
        min_region_size(self.terrain).is_some_and(|min| self.len() >= min)
    }
}

/// Collect the region containing `start`, marking its members in `visited`.
///
/// `None` if `start` is absent or already visited.
pub fn flood_fill(grid: &HexGrid, start: Axial, visited: &mut HashSet<Axial>) -> Option<Region> {
    let terrain = grid.get(start)?.terrain();
    if !visited.insert(start) {
        return None;
    }

    let mut cells = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(coord) = queue.pop_front() {
        cells.push(coord);
        for n in coord.neighbors() {
            let same = grid.get(n).is_some_and(|c| c.terrain() == terrain);
            if same && visited.insert(n) {
                queue.push_back(n);
            }
        }
    }

    Some(Region { terrain, cells })
}

/// Every region of `terrain`, in the grid's spiral order of discovery.
pub fn find_regions(grid: &HexGrid, terrain: TerrainKind) -> Vec<Region> {
    let mut visited = HashSet::new();
    let mut regions = Vec::new();
    for cell in grid.cells().filter(|c| c.terrain() == terrain) {
        if let Some(region) = flood_fill(grid, cell.coord(), &mut visited) {
            regions.push(region);
        }
    }
    regions
}

/// Per-kind region counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct KindStats {
    /// Regions found, labeled or not
    pub regions: usize,
    /// Regions large enough to label
    pub labeled: usize,
    pub labels: usize,
    pub cells: usize,
    pub largest: usize,
}

impl KindStats {
    fn record(&mut self, region: &Region, labels: usize) {
        self.regions += 1;
        self.cells += region.len();
        self.largest = self.largest.max(region.len());
        if labels > 0 {
            self.labeled += 1;
            self.labels += labels;
        }
    }
}

/// Region statistics for one grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RegionStats {
    pub forest: KindStats,
    pub desert: KindStats,
    pub ocean: KindStats,
    pub lake: KindStats,
}

impl RegionStats {
    pub fn get(&self, kind: RegionKind) -> &KindStats {
        match kind {
            RegionKind::Forest => &self.forest,
            RegionKind::Desert => &self.desert,
            RegionKind::Ocean => &self.ocean,
            RegionKind::Lake => &self.lake,
        }
    }

    fn get_mut(&mut self, kind: RegionKind) -> &mut KindStats {
        match kind {
            RegionKind::Forest => &mut self.forest,
            RegionKind::Desert => &mut self.desert,
            RegionKind::Ocean => &mut self.ocean,
            RegionKind::Lake => &mut self.lake,
        }
    }

    pub fn total_labels(&self) -> usize {
        RegionKind::ALL.iter().map(|k| self.get(*k).labels).sum()
    }
}

/// Result of clustering and labeling a grid.
#[derive(Clone, Debug, Default)]
pub struct RegionAnalysis {
    pub labels: Vec<Label>,
    pub stats: RegionStats,
}

/// Find every labeled-terrain region and place its labels.
///
/// The namer is called once per label. Undersized regions are counted in
/// the stats but get no label.
pub fn analyze(grid: &HexGrid, namer: &mut dyn RegionNamer) -> RegionAnalysis {
    let mut analysis = RegionAnalysis::default();

    for terrain in LABELED_TERRAIN {
        for region in find_regions(grid, terrain) {
            let Some(kind) = region.kind(grid) else {
                continue;
            };
            let labels = if region.qualifies() {
                label_region(grid, &region, kind, namer)
            } else {
                Vec::new()
            };
            debug!(
                kind = kind.display_name(),
                cells = region.len(),
                labels = labels.len(),
                "Clustered region"
            );
            analysis.stats.get_mut(kind).record(&region, labels.len());
            analysis.labels.extend(labels);
        }
    }

    info!(
        labels = analysis.labels.len(),
        forests = analysis.stats.forest.labeled,
        deserts = analysis.stats.desert.labeled,
        oceans = analysis.stats.ocean.labeled,
        lakes = analysis.stats.lake.labeled,
        "Labeled regions"
    );
    analysis
}

/// Labels for one qualifying region.
pub fn label_region(grid: &HexGrid, region: &Region, kind: RegionKind, namer: &mut dyn RegionNamer) -> Vec<Label> {
    let size = grid.hex_size();
    // Narrow oceans that only qualify by touching the edge get one label
    if kind == RegionKind::Ocean && region.spans_at_least(OCEAN_WIDTH) {
        let placements = ocean_placements(grid, region);
        if !placements.is_empty() {
            return placements
                .into_iter()
                .map(|p| p.into_label(namer.generate_region_name(kind), kind))
                .collect();
        }
    }
    labels::diameter_placement(region.cells(), size)
        .map(|p| vec![p.into_label(namer.generate_region_name(kind), kind)])
        .unwrap_or_default()
}

/// Greedy spread of labels over an ocean's shoreline.
///
/// Boundary cells are taken in flood-fill order; each is kept if it is at
/// least `OCEAN_LABEL_SPACING` from every label already kept. Each label
/// is angled toward the region's pixel centroid.
fn ocean_placements(grid: &HexGrid, region: &Region) -> Vec<labels::Placement> {
    let size = grid.hex_size();
    let Some(centroid) = labels::pixel_centroid(region.cells(), size) else {
        return Vec::new();
    };

    let mut placed: Vec<Axial> = Vec::new();
    for cell in region.boundary_cells(grid) {
        if placed.iter().all(|p| p.distance(cell) >= OCEAN_LABEL_SPACING) {
            placed.push(cell);
        }
    }
    placed
        .into_iter()
        .map(|cell| labels::directed_placement(cell, centroid, size))
        .collect()
}

impl HexGrid {
    /// Cluster the finished grid and store its labels, replacing any
    /// previous ones.
    pub fn label_regions(&mut self, namer: &mut dyn RegionNamer) -> RegionStats {
        let analysis = analyze(self, namer);
        self.set_labels(analysis.labels);
        analysis.stats
    }
}
