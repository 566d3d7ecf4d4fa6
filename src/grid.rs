//! Sparse hex grid store
//!
//! Owns every generated cell keyed by axial coordinate, remembers spiral
//! order for deterministic iteration, and answers the point, neighbor and
//! viewport queries used by movement and rendering.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rayon::prelude::*;
use tracing::info;

use crate::field::{Field, FieldKind};
use crate::fog::FogState;
use crate::hex::{self, Axial};
use crate::labels::Label;
use crate::seeds::{self, GridSeeds};
use crate::terrain::{self, TerrainConfig, TerrainKind, SAFE_START};

/// Largest radius accepted by `GridConfig::validate` (~50M cells).
pub const MAX_RADIUS: i32 = 4096;

/// Pixel margin added around a viewport so oversized sprites are not culled early.
pub const VIEWPORT_PADDING: f64 = 200.0;

/// Number of sprite variants per terrain kind.
pub const VARIANT_COUNT: u8 = 4;

/// Generation misconfiguration. Raised before any cell is created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid radius must be non-negative, got {0}")]
    NegativeRadius(i32),
    #[error("grid radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge { radius: i32, max: i32 },
    #[error("hex size must be a positive finite number of pixels, got {0}")]
    InvalidHexSize(f64),
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidScale { name: &'static str, value: f64 },
    #[error("jitter amplitude must be a non-negative finite number, got {0}")]
    InvalidJitter(f64),
    #[error("biome thresholds must ascend strictly within [0, 1], got {0:?}")]
    UnorderedThresholds([f64; 5]),
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

/// Grid generation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of hex rings around the origin
    pub radius: i32,
    /// Pixel distance from a hex center to a corner
    pub hex_size: f64,
    /// Master seed for jitter, decorations, variants, names and seeded fields
    pub seed: u64,
    /// Blur biome edges with per-cell jitter
    pub jitter: bool,
    /// Assign terrain on the rayon thread pool
    pub parallel: bool,
    /// Field backing terrain generation
    pub field: FieldKind,
    pub terrain: TerrainConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            hex_size: 74.0,
            seed: 0,
            jitter: true,
            parallel: false,
            field: FieldKind::Trig,
            terrain: TerrainConfig::default(),
        }
    }
}

impl GridConfig {
    /// Check every setting, failing on the first bad one.
    pub fn validate(&self) -> Result<(), GridError> {
        validate_shape(self.radius, self.hex_size)?;

        let t = &self.terrain;
        for (name, value) in [("ridge_scale", t.ridge_scale), ("biome_scale", t.biome_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::InvalidScale { name, value });
            }
        }
        if !t.jitter_amplitude.is_finite() || t.jitter_amplitude < 0.0 {
            return Err(GridError::InvalidJitter(t.jitter_amplitude));
        }
        let th = t.biome_thresholds;
        let in_unit = th.iter().all(|v| (0.0..=1.0).contains(v));
        if !in_unit || th.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GridError::UnorderedThresholds(th));
        }
        if !(0.0..=1.0).contains(&t.decoration_chance) {
            return Err(GridError::InvalidProbability {
                name: "decoration_chance",
                value: t.decoration_chance,
            });
        }
        Ok(())
    }

    pub fn seeds(&self) -> GridSeeds {
        GridSeeds::from_master(self.seed)
    }
}

fn validate_shape(radius: i32, hex_size: f64) -> Result<u32, GridError> {
    if radius < 0 {
        return Err(GridError::NegativeRadius(radius));
    }
    if radius > MAX_RADIUS {
        return Err(GridError::RadiusTooLarge { radius, max: MAX_RADIUS });
    }
    if !hex_size.is_finite() || hex_size <= 0.0 {
        return Err(GridError::InvalidHexSize(hex_size));
    }
    Ok(radius as u32)
}

/// A single hex cell.
///
/// Terrain, decorations and variant are fixed at creation. The fog flags
/// only ever go from `false` to `true`, through `crate::fog::reveal`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Cell {
    coord: Axial,
    terrain: TerrainKind,
    decorations: Vec<String>,
    explored: bool,
    visible: bool,
    variant_id: u8,
}

impl Cell {
    pub(crate) fn new(coord: Axial, terrain: TerrainKind, decorations: Vec<String>, variant_id: u8) -> Self {
        Self {
            coord,
            terrain,
            decorations,
            explored: false,
            visible: false,
            variant_id,
        }
    }

    /// The origin cell: safe-start terrain, already explored and visible.
    fn safe_start() -> Self {
        Self {
            explored: true,
            visible: true,
            ..Self::new(Axial::ORIGIN, SAFE_START, Vec::new(), 0)
        }
    }

    pub fn coord(&self) -> Axial {
        self.coord
    }

    pub fn q(&self) -> i32 {
        self.coord.q
    }

    pub fn r(&self) -> i32 {
        self.coord.r
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn decorations(&self) -> &[String] {
        &self.decorations
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sprite variant in `0..VARIANT_COUNT`, only meaningful to renderers.
    pub fn variant_id(&self) -> u8 {
        self.variant_id
    }

    pub fn fog_state(&self) -> FogState {
        FogState::of(self.explored, self.visible)
    }

    pub fn to_pixel(&self, size: f64) -> (f64, f64) {
        self.coord.to_pixel(size)
    }

    pub(crate) fn mark_seen(&mut self) -> bool {
        let newly = !self.explored;
        self.explored = true;
        self.visible = true;
        newly
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ViewRect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// A `width` x `height` rectangle centered on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, cx + width / 2.0, cy + height / 2.0)
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self::new(self.min_x - pad, self.min_y - pad, self.max_x + pad, self.max_y + pad)
    }

    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }
}

/// Inclusive axial bounding box `[q_min, q_max] x [r_min, r_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxialBounds {
    pub q_min: i32,
    pub q_max: i32,
    pub r_min: i32,
    pub r_max: i32,
}

impl AxialBounds {
    /// Bounding box of the axial images of the rectangle's corners, widened
    /// by one cell on every side. Axial is a linear transform of pixel
    /// space, so the corners bound the whole rectangle.
    pub fn from_rect(rect: &ViewRect, size: f64) -> Self {
        let mut q_lo = f64::INFINITY;
        let mut q_hi = f64::NEG_INFINITY;
        let mut r_lo = f64::INFINITY;
        let mut r_hi = f64::NEG_INFINITY;
        for (x, y) in rect.corners() {
            let (q, r) = hex::pixel_to_fractional(x, y, size);
            q_lo = q_lo.min(q);
            q_hi = q_hi.max(q);
            r_lo = r_lo.min(r);
            r_hi = r_hi.max(r);
        }
        Self {
            q_min: (q_lo.floor() as i32).saturating_sub(1),
            q_max: (q_hi.ceil() as i32).saturating_add(1),
            r_min: (r_lo.floor() as i32).saturating_sub(1),
            r_max: (r_hi.ceil() as i32).saturating_add(1),
        }
    }

    /// Intersection with the square `[-radius, radius]` on both axes.
    pub fn clamp_to_radius(&self, radius: u32) -> Self {
        let radius = radius as i32;
        Self {
            q_min: self.q_min.max(-radius),
            q_max: self.q_max.min(radius),
            r_min: self.r_min.max(-radius),
            r_max: self.r_max.min(radius),
        }
    }

    pub fn contains(&self, coord: Axial) -> bool {
        (self.q_min..=self.q_max).contains(&coord.q) && (self.r_min..=self.r_max).contains(&coord.r)
    }

    /// Coordinates row by row (`r` outer, `q` inner).
    pub fn iter(&self) -> impl Iterator<Item = Axial> + '_ {
        (self.r_min..=self.r_max).flat_map(move |r| (self.q_min..=self.q_max).map(move |q| Axial::new(q, r)))
    }
}

/// The world grid: cells keyed by coordinate plus the region labels.
#[derive(Clone, Debug)]
pub struct HexGrid {
    radius: u32,
    hex_size: f64,
    cells: HashMap<Axial, Cell>,
    /// Insertion (spiral) order, used for every deterministic iteration
    order: Vec<Axial>,
    labels: Vec<Label>,
}

impl HexGrid {
    /// An empty grid of fixed radius, ready to be populated.
    pub fn new(radius: i32, hex_size: f64) -> Result<Self, GridError> {
        let radius = validate_shape(radius, hex_size)?;
        Ok(Self {
            radius,
            hex_size,
            cells: HashMap::with_capacity(hex::hex_count(radius)),
            order: Vec::with_capacity(hex::hex_count(radius)),
            labels: Vec::new(),
        })
    }

    /// Generate every cell from the configured field.
    pub fn generate(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let seeds = config.seeds();
        let field = config.field.build(seeds.field);
        let mut grid = Self::new(config.radius, config.hex_size)?;
        grid.populate(field.as_ref(), config, &seeds);
        Ok(grid)
    }

    /// Generate with an explicit field, e.g. a `ConstantField` to force terrain.
    pub fn generate_with_field(config: &GridConfig, field: &dyn Field) -> Result<Self, GridError> {
        config.validate()?;
        let seeds = config.seeds();
        let mut grid = Self::new(config.radius, config.hex_size)?;
        grid.populate(field, config, &seeds);
        Ok(grid)
    }

    /// Build a grid from hand-authored terrain, origin included.
    ///
    /// Skips the safe-start rule and leaves every cell hidden; meant for
    /// prepared maps and tests.
    pub fn from_fn(radius: i32, hex_size: f64, mut terrain_at: impl FnMut(Axial) -> TerrainKind) -> Result<Self, GridError> {
        let mut grid = Self::new(radius, hex_size)?;
        for coord in hex::spiral(grid.radius) {
            grid.insert(Cell::new(coord, terrain_at(coord), Vec::new(), 0));
        }
        Ok(grid)
    }

    /// Fill the grid in spiral order.
    ///
    /// Terrain is a pure function of the coordinate plus that cell's own RNG
    /// streams, so no rule reads a neighbor; spiral order is kept so rules
    /// that do read already generated neighbors can be added later.
    fn populate(&mut self, field: &dyn Field, config: &GridConfig, seeds: &GridSeeds) {
        let coords = hex::spiral(self.radius);
        let build = |coord: &Axial| generate_cell(*coord, field, config, seeds);

        let cells: Vec<Cell> = if config.parallel {
            coords.par_iter().map(build).collect()
        } else {
            coords.iter().map(build).collect()
        };
        for cell in cells {
            self.insert(cell);
        }

        info!(
            radius = self.radius,
            cells = self.cells.len(),
            parallel = config.parallel,
            "Generated hex grid"
        );
    }

    fn insert(&mut self, cell: Cell) {
        let coord = cell.coord;
        if self.cells.insert(coord, cell).is_none() {
            self.order.push(coord);
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn hex_size(&self) -> f64 {
        self.hex_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coord: Axial) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Point lookup. Absent coordinates are void and impassable.
    pub fn lookup(&self, q: i32, r: i32) -> Option<&Cell> {
        self.get(Axial::new(q, r))
    }

    pub(crate) fn get_mut(&mut self, coord: Axial) -> Option<&mut Cell> {
        self.cells.get_mut(&coord)
    }

    pub fn contains(&self, coord: Axial) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Existing neighbors, in neighbor-offset order.
    pub fn neighbors_of(&self, coord: Axial) -> Vec<&Cell> {
        coord.neighbors().iter().filter_map(|n| self.cells.get(n)).collect()
    }

    /// `false` for absent cells and impassable terrain.
    pub fn is_passable(&self, coord: Axial) -> bool {
        self.get(coord).is_some_and(|c| c.terrain.is_passable())
    }

    /// All cells in spiral order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.order.iter().filter_map(move |c| self.cells.get(c))
    }

    /// Cell counts per terrain kind.
    pub fn census(&self) -> BTreeMap<TerrainKind, usize> {
        let mut counts = BTreeMap::new();
        for cell in self.cells.values() {
            *counts.entry(cell.terrain).or_insert(0) += 1;
        }
        counts
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub(crate) fn set_labels(&mut self, labels: Vec<Label>) {
        self.labels = labels;
    }

    /// Cell under a pixel position.
    pub fn cell_at_pixel(&self, x: f64, y: f64) -> Option<&Cell> {
        self.get(hex::to_axial(x, y, self.hex_size))
    }

    /// Axial range a renderer must enumerate for `rect`, padded by
    /// `VIEWPORT_PADDING` and clipped to the grid.
    pub fn view_bounds(&self, rect: &ViewRect) -> AxialBounds {
        AxialBounds::from_rect(&rect.padded(VIEWPORT_PADDING), self.hex_size).clamp_to_radius(self.radius)
    }

    /// Cells inside the padded viewport, back to front (ascending `r`, then
    /// descending `q`).
    pub fn cells_in_view(&self, rect: &ViewRect) -> Vec<&Cell> {
        let bounds = self.view_bounds(rect);
        let mut cells: Vec<&Cell> = bounds.iter().filter_map(|c| self.cells.get(&c)).collect();
        cells.sort_by_key(|c| c.coord.draw_order_key());
        cells
    }

    /// Whether the cell nearest the label's anchor is currently visible.
    pub fn label_is_visible(&self, label: &Label) -> bool {
        self.cell_at_pixel(label.x, label.y).is_some_and(|c| c.visible)
    }
}

fn generate_cell(coord: Axial, field: &dyn Field, config: &GridConfig, seeds: &GridSeeds) -> Cell {
    if coord == Axial::ORIGIN {
        return Cell::safe_start();
    }

    let jitter = if config.jitter {
        terrain::draw_jitter(&config.terrain, &mut seeds::cell_rng(seeds.terrain, coord))
    } else {
        0.0
    };
    let kind = terrain::classify(field, coord, &config.terrain, jitter);
    let decorations = terrain::decorations(
        kind,
        config.terrain.decoration_chance,
        &mut seeds::cell_rng(seeds.decorations, coord),
    );
    let variant_id = seeds::cell_rng(seeds.variants, coord).gen_range(0..VARIANT_COUNT);

    Cell::new(coord, kind, decorations, variant_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ConstantField;
    use crate::regions::RegionKind;

    fn small_config(radius: i32) -> GridConfig {
        GridConfig {
            radius,
            seed: 42,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_radius_zero_is_single_safe_cell() {
        let grid = HexGrid::generate(&small_config(0)).unwrap();
        assert_eq!(grid.len(), 1);
        let origin = grid.lookup(0, 0).unwrap();
        assert_eq!(origin.terrain(), SAFE_START);
        assert!(origin.is_explored());
        assert!(origin.is_visible());
    }

    #[test]
    fn test_cell_count_and_bounds() {
        let grid = HexGrid::generate(&small_config(6)).unwrap();
        assert_eq!(grid.len(), hex::hex_count(6));
        for cell in grid.cells() {
            assert!(cell.coord().ring() <= 6);
            assert!(cell.variant_id() < VARIANT_COUNT);
        }
        assert_eq!(grid.lookup(0, 0).unwrap().terrain(), SAFE_START);
    }

    #[test]
    fn test_only_origin_starts_explored() {
        let grid = HexGrid::generate(&small_config(4)).unwrap();
        let explored: Vec<_> = grid.cells().filter(|c| c.is_explored()).map(|c| c.coord()).collect();
        assert_eq!(explored, vec![Axial::ORIGIN]);
    }

    #[test]
    fn test_large_grid() {
        let grid = HexGrid::generate(&small_config(100)).unwrap();
        assert_eq!(grid.len(), 30_301);
        assert!(grid.lookup(100, -100).is_some());
        assert!(grid.lookup(101, 0).is_none());
    }

    #[test]
    fn test_invalid_configs_fail_fast() {
        assert_eq!(HexGrid::generate(&small_config(-1)).unwrap_err(), GridError::NegativeRadius(-1));
        assert!(matches!(
            HexGrid::generate(&small_config(MAX_RADIUS + 1)),
            Err(GridError::RadiusTooLarge { .. })
        ));

        let bad_size = GridConfig {
            hex_size: 0.0,
            ..GridConfig::default()
        };
        assert_eq!(HexGrid::generate(&bad_size).unwrap_err(), GridError::InvalidHexSize(0.0));

        let mut bad_thresholds = GridConfig::default();
        bad_thresholds.terrain.biome_thresholds = [0.18, 0.5, 0.28, 0.72, 0.88];
        assert!(matches!(bad_thresholds.validate(), Err(GridError::UnorderedThresholds(_))));

        let mut bad_scale = GridConfig::default();
        bad_scale.terrain.biome_scale = f64::NAN;
        assert!(matches!(bad_scale.validate(), Err(GridError::InvalidScale { name: "biome_scale", .. })));

        let mut bad_chance = GridConfig::default();
        bad_chance.terrain.decoration_chance = 1.5;
        assert!(matches!(bad_chance.validate(), Err(GridError::InvalidProbability { .. })));

        let mut bad_jitter = GridConfig::default();
        bad_jitter.terrain.jitter_amplitude = -0.1;
        assert_eq!(bad_jitter.validate(), Err(GridError::InvalidJitter(-0.1)));
    }

    #[test]
    fn test_error_messages_name_the_value() {
        let msg = GridError::NegativeRadius(-3).to_string();
        assert!(msg.contains("-3"));
        let msg = GridError::InvalidScale { name: "ridge_scale", value: 0.0 }.to_string();
        assert!(msg.contains("ridge_scale"));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = HexGrid::generate(&small_config(12)).unwrap();
        let b = HexGrid::generate(&small_config(12)).unwrap();
        assert!(a.cells().eq(b.cells()));
    }

    #[test]
    fn test_terrain_without_jitter_ignores_seed() {
        let mut a_config = small_config(12);
        a_config.jitter = false;
        let mut b_config = a_config.clone();
        b_config.seed = 9_999;

        let a = HexGrid::generate(&a_config).unwrap();
        let b = HexGrid::generate(&b_config).unwrap();
        for cell in a.cells() {
            assert_eq!(Some(cell.terrain()), b.get(cell.coord()).map(|c| c.terrain()));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = HexGrid::generate(&small_config(20)).unwrap();
        let parallel = HexGrid::generate(&GridConfig {
            parallel: true,
            ..small_config(20)
        })
        .unwrap();
        assert!(sequential.cells().eq(parallel.cells()));
    }

    #[test]
    fn test_perlin_field_generates() {
        let grid = HexGrid::generate(&GridConfig {
            field: FieldKind::Perlin,
            ..small_config(15)
        })
        .unwrap();
        assert_eq!(grid.len(), hex::hex_count(15));
        assert!(grid.census().len() > 2);
    }

    #[test]
    fn test_constant_field_forces_terrain_except_origin() {
        let grid = HexGrid::generate_with_field(&small_config(3), &ConstantField(-0.2)).unwrap();
        for cell in grid.cells() {
            if cell.coord() == Axial::ORIGIN {
                assert_eq!(cell.terrain(), SAFE_START);
            } else {
                assert_eq!(cell.terrain(), TerrainKind::Forest);
            }
        }
    }

    #[test]
    fn test_from_fn_covers_origin() {
        let grid = HexGrid::from_fn(2, 10.0, |_| TerrainKind::Forest).unwrap();
        assert_eq!(grid.len(), 19);
        assert!(grid.cells().all(|c| c.terrain() == TerrainKind::Forest && !c.is_explored()));
    }

    #[test]
    fn test_neighbors_of_edge_cell() {
        let grid = HexGrid::from_fn(2, 10.0, |_| TerrainKind::Grass).unwrap();
        assert_eq!(grid.neighbors_of(Axial::ORIGIN).len(), 6);
        assert_eq!(grid.neighbors_of(Axial::new(2, 0)).len(), 3);
        assert_eq!(grid.neighbors_of(Axial::new(2, -1)).len(), 4);
        assert!(grid.neighbors_of(Axial::new(9, 9)).is_empty());
    }

    #[test]
    fn test_absent_and_water_are_impassable() {
        let grid = HexGrid::from_fn(1, 10.0, |c| {
            if c == Axial::new(1, 0) {
                TerrainKind::Water
            } else {
                TerrainKind::Grass
            }
        })
        .unwrap();
        assert!(grid.is_passable(Axial::ORIGIN));
        assert!(!grid.is_passable(Axial::new(1, 0)));
        assert!(!grid.is_passable(Axial::new(5, 5)));
        assert!(grid.lookup(5, 5).is_none());
    }

    #[test]
    fn test_census_sums_to_len() {
        let grid = HexGrid::generate(&small_config(10)).unwrap();
        let census = grid.census();
        assert_eq!(census.values().sum::<usize>(), grid.len());
        assert_eq!(census.get(&SAFE_START), Some(&1));
    }

    #[test]
    fn test_view_bounds_cover_visible_cells() {
        let grid = HexGrid::generate(&small_config(30)).unwrap();
        let rect = ViewRect::centered(0.0, 0.0, 1024.0, 768.0);
        let bounds = grid.view_bounds(&rect);
        let padded = rect.padded(VIEWPORT_PADDING);

        // Every cell whose center lies in the padded rectangle is enumerated
        for cell in grid.cells() {
            let (x, y) = cell.to_pixel(grid.hex_size());
            if x >= padded.min_x && x <= padded.max_x && y >= padded.min_y && y <= padded.max_y {
                assert!(bounds.contains(cell.coord()), "{} missing", cell.coord());
            }
        }
        // And the query stays local
        assert!(grid.cells_in_view(&rect).len() < grid.len());
    }

    #[test]
    fn test_cells_in_view_draw_order() {
        let grid = HexGrid::generate(&small_config(8)).unwrap();
        let rect = ViewRect::centered(0.0, 0.0, 400.0, 300.0);
        let cells = grid.cells_in_view(&rect);
        assert!(!cells.is_empty());
        for w in cells.windows(2) {
            let (a, b) = (w[0].coord(), w[1].coord());
            assert!(a.r < b.r || (a.r == b.r && a.q > b.q));
        }
    }

    #[test]
    fn test_view_bounds_clamped_to_grid() {
        let grid = HexGrid::generate(&small_config(5)).unwrap();
        let huge = ViewRect::centered(0.0, 0.0, 1e7, 1e7);
        let bounds = grid.view_bounds(&huge);
        assert_eq!(bounds, AxialBounds { q_min: -5, q_max: 5, r_min: -5, r_max: 5 });
        assert_eq!(grid.cells_in_view(&huge).len(), grid.len());
    }

    #[test]
    fn test_view_bounds_saturate_for_enormous_rects() {
        let vast = ViewRect::new(-1e15, -1e15, 1e15, 1e15);
        let bounds = AxialBounds::from_rect(&vast, 10.0);
        assert_eq!(bounds, AxialBounds { q_min: i32::MIN, q_max: i32::MAX, r_min: i32::MIN, r_max: i32::MAX });

        let grid = HexGrid::generate(&small_config(4)).unwrap();
        assert_eq!(grid.cells_in_view(&vast).len(), grid.len());
        let far_away = ViewRect::new(1e15, 1e15, 2e15, 2e15);
        assert!(grid.cells_in_view(&far_away).is_empty());
    }

    #[test]
    fn test_label_visibility_follows_fog() {
        let mut grid = HexGrid::from_fn(3, 20.0, |_| TerrainKind::Desert).unwrap();
        let (x, y) = Axial::new(2, -1).to_pixel(20.0);
        let label = Label {
            text: "The Parched Reaches".to_string(),
            x,
            y,
            angle: 0.0,
            kind: RegionKind::Desert,
        };
        assert!(!grid.label_is_visible(&label));
        crate::fog::reveal(&mut grid, Axial::new(2, -1), 0);
        assert!(grid.label_is_visible(&label));

        let off_map = Label { x: 1e5, ..label };
        assert!(!grid.label_is_visible(&off_map));
    }
}
