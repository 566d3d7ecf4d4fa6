//! Terrain kinds and terrain assignment
//!
//! Each cell outside the origin is classified from two field signals:
//! a ridge signal that carves narrow mountain bands, and a broad biome
//! signal mapped through an ordered palette so neighboring value bands are
//! also neighbors in the logical adjacency of biomes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::field::Field;
use crate::hex::Axial;

/// Movement cost reported for impassable terrain.
pub const IMPASSABLE_COST: u32 = 999;

/// Closed set of terrain kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum TerrainKind {
    Grass,
    Forest,
    Mountain,
    Water,
    Swamp,
    Hills,
    Desert,
    Town,
    Dungeon,
}

/// Terrain placed at the origin of every generated grid.
pub const SAFE_START: TerrainKind = TerrainKind::Town;

/// Biome palette from the wettest to the driest band.
pub const BIOME_PALETTE: [TerrainKind; 6] = [
    TerrainKind::Water,
    TerrainKind::Swamp,
    TerrainKind::Forest,
    TerrainKind::Grass,
    TerrainKind::Hills,
    TerrainKind::Desert,
];

/// Static attributes of a terrain kind.
#[derive(Debug)]
pub struct TerrainAttributes {
    pub display_name: &'static str,
    /// Single character used by the ASCII preview
    pub glyph: char,
    /// Relative generation weight (special sites are rare)
    pub base_weight: f32,
    pub passable: bool,
    pub movement_cost: u32,
    /// Cosmetic decoration tags for the renderer
    pub decorations: &'static [&'static str],
}

// Indexed by `TerrainKind as usize`.
const ATTRIBUTES: [TerrainAttributes; 9] = [
    TerrainAttributes {
        display_name: "Grass",
        glyph: '"',
        base_weight: 1.0,
        passable: true,
        movement_cost: 1,
        decorations: &["grass_tuft", "wildflowers", "small_rock"],
    },
    TerrainAttributes {
        display_name: "Forest",
        glyph: 'T',
        base_weight: 1.0,
        passable: true,
        movement_cost: 2,
        decorations: &["oak", "pine", "tree_group", "tall_tree"],
    },
    TerrainAttributes {
        display_name: "Mountain",
        glyph: '^',
        base_weight: 1.0,
        passable: true,
        movement_cost: 3,
        decorations: &["peak", "twin_peak", "small_peak"],
    },
    TerrainAttributes {
        display_name: "Water",
        glyph: '~',
        base_weight: 1.0,
        passable: false,
        movement_cost: IMPASSABLE_COST,
        decorations: &["waves", "lilypad"],
    },
    TerrainAttributes {
        display_name: "Swamp",
        glyph: '%',
        base_weight: 1.0,
        passable: true,
        movement_cost: 3,
        decorations: &["dead_tree", "reeds"],
    },
    TerrainAttributes {
        display_name: "Hills",
        glyph: 'n',
        base_weight: 1.0,
        passable: true,
        movement_cost: 2,
        decorations: &["knoll", "barrow"],
    },
    TerrainAttributes {
        display_name: "Desert",
        glyph: '.',
        base_weight: 1.0,
        passable: true,
        movement_cost: 2,
        decorations: &["cactus", "rocks", "dune"],
    },
    TerrainAttributes {
        display_name: "Town",
        glyph: 'H',
        base_weight: 0.02,
        passable: true,
        movement_cost: 0,
        decorations: &["house", "tower"],
    },
    TerrainAttributes {
        display_name: "Dungeon",
        glyph: 'D',
        base_weight: 0.02,
        passable: true,
        movement_cost: 0,
        decorations: &["ruins", "cave_mouth"],
    },
];

impl TerrainKind {
    pub const ALL: [TerrainKind; 9] = [
        TerrainKind::Grass,
        TerrainKind::Forest,
        TerrainKind::Mountain,
        TerrainKind::Water,
        TerrainKind::Swamp,
        TerrainKind::Hills,
        TerrainKind::Desert,
        TerrainKind::Town,
        TerrainKind::Dungeon,
    ];

    pub fn attributes(self) -> &'static TerrainAttributes {
        &ATTRIBUTES[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.attributes().display_name
    }

    pub fn is_passable(self) -> bool {
        self.attributes().passable
    }

    pub fn movement_cost(self) -> u32 {
        self.attributes().movement_cost
    }

    pub fn glyph(self) -> char {
        self.attributes().glyph
    }
}

/// Tunables for terrain assignment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Field scale of the mountain ridge signal
    pub ridge_scale: f64,
    /// Coordinate offset applied before sampling the ridge signal
    pub ridge_offset: (i32, i32),
    /// Ridge values strictly above this become mountains
    pub ridge_threshold: f64,
    /// Field scale of the biome signal
    pub biome_scale: f64,
    /// Half-width of the uniform jitter added to the biome signal
    pub jitter_amplitude: f64,
    /// Exclusive upper bounds for the first five palette bands
    pub biome_thresholds: [f64; 5],
    /// Chance that a cell carries decorations
    pub decoration_chance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            ridge_scale: 0.45,
            ridge_offset: (123, -456),
            ridge_threshold: 0.88,
            biome_scale: 0.35,
            jitter_amplitude: 0.15,
            biome_thresholds: [0.18, 0.28, 0.50, 0.72, 0.88],
            decoration_chance: 0.4,
        }
    }
}

/// `1 - |field|` at the offset coordinate. Peaks along the zero crossings of the field.
pub fn ridge_value(field: &dyn Field, coord: Axial, config: &TerrainConfig) -> f64 {
    let v = field.sample_offset(coord.q as f64, coord.r as f64, config.ridge_offset, config.ridge_scale);
    1.0 - v.abs()
}

/// Biome signal plus jitter, normalised and clamped to `[0, 1]`.
pub fn biome_value(field: &dyn Field, coord: Axial, config: &TerrainConfig, jitter: f64) -> f64 {
    let v = field.sample(coord.q as f64, coord.r as f64, config.biome_scale) + jitter;
    ((v + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Map a normalised biome value onto the palette.
///
/// Thresholds are exclusive upper bounds checked in ascending order, so a
/// value sitting exactly on a boundary falls into the higher band.
pub fn biome_for_value(value: f64, thresholds: &[f64; 5]) -> TerrainKind {
    thresholds
        .iter()
        .position(|&t| value < t)
        .map(|band| BIOME_PALETTE[band])
        .unwrap_or(TerrainKind::Desert)
}

/// Draw the biome jitter for one cell.
pub fn draw_jitter(config: &TerrainConfig, rng: &mut impl Rng) -> f64 {
    if config.jitter_amplitude > 0.0 {
        rng.gen_range(-config.jitter_amplitude..=config.jitter_amplitude)
    } else {
        0.0
    }
}

/// Classify one cell. `jitter` is added to the biome signal only.
pub fn classify(field: &dyn Field, coord: Axial, config: &TerrainConfig, jitter: f64) -> TerrainKind {
    if ridge_value(field, coord, config) > config.ridge_threshold {
        return TerrainKind::Mountain;
    }
    biome_for_value(biome_value(field, coord, config, jitter), &config.biome_thresholds)
}

/// Pick 1-2 decoration tags from the terrain's pool, or none.
pub fn decorations(kind: TerrainKind, chance: f64, rng: &mut impl Rng) -> Vec<String> {
    let pool = kind.attributes().decorations;
    if pool.is_empty() || !rng.gen_bool(chance) {
        return Vec::new();
    }
    let count = rng.gen_range(1..=2);
    (0..count)
        .filter_map(|_| pool.choose(rng))
        .map(|tag| tag.to_string())
        .collect()
}
