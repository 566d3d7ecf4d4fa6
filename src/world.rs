//! World container module
//!
//! Bundles the generated grid, its labels and the player's position into a
//! single struct, and turns movement events into reveals.

use tracing::debug;

use crate::fog;
use crate::grid::{Cell, GridConfig, GridError, HexGrid};
use crate::hex::{Axial, HexDirection};
use crate::labels::Label;
use crate::naming::{PlaceNameGenerator, RegionNamer};
use crate::regions::RegionStats;
use crate::seeds::GridSeeds;

/// Everything needed to build a playable world.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub grid: GridConfig,
    /// Cells revealed around the player at start and after every move
    pub reveal_radius: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            reveal_radius: 2,
        }
    }
}

/// A generated world with a player in it
pub struct World {
    /// Seeds used for generation (allows recreation)
    pub seeds: GridSeeds,
    grid: HexGrid,
    player: Axial,
    reveal_radius: u32,
    region_stats: RegionStats,
}

impl World {
    /// Generate grid and labels, then reveal around the origin.
    pub fn generate(config: &WorldConfig) -> Result<Self, GridError> {
        let seeds = config.grid.seeds();
        let mut namer = PlaceNameGenerator::new(seeds.names);
        Self::generate_with_namer(config, &mut namer)
    }

    /// As `generate`, naming regions with `namer`.
    pub fn generate_with_namer(config: &WorldConfig, namer: &mut dyn RegionNamer) -> Result<Self, GridError> {
        let grid = HexGrid::generate(&config.grid)?;
        Ok(Self::from_grid(grid, config.grid.seeds(), config.reveal_radius, namer))
    }

    /// Wrap an already populated grid. Clusters it and reveals the origin.
    pub fn from_grid(mut grid: HexGrid, seeds: GridSeeds, reveal_radius: u32, namer: &mut dyn RegionNamer) -> Self {
        let region_stats = grid.label_regions(namer);
        fog::reveal(&mut grid, Axial::ORIGIN, reveal_radius);
        Self {
            seeds,
            grid,
            player: Axial::ORIGIN,
            reveal_radius,
            region_stats,
        }
    }

    /// Convenience accessor for master seed
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn player(&self) -> Axial {
        self.player
    }

    pub fn player_cell(&self) -> Option<&Cell> {
        self.grid.get(self.player)
    }

    pub fn reveal_radius(&self) -> u32 {
        self.reveal_radius
    }

    pub fn region_stats(&self) -> &RegionStats {
        &self.region_stats
    }

    pub fn labels(&self) -> &[Label] {
        self.grid.labels()
    }

    /// Labels whose anchor cell is currently visible.
    pub fn visible_labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.grid.labels().iter().filter(move |l| self.grid.label_is_visible(l))
    }

    /// Move one cell in `dir`.
    pub fn step(&mut self, dir: HexDirection) -> bool {
        self.move_to(self.player.step(dir))
    }

    /// Move by an axial delta. Deltas that leave the coordinate range are
    /// blocked like any other move off the map.
    pub fn move_by(&mut self, dq: i32, dr: i32) -> bool {
        match self.player.checked_offset(dq, dr) {
            Some(target) => self.move_to(target),
            None => {
                debug!(dq, dr, "Move out of coordinate range");
                false
            }
        }
    }

    /// Move to `target` if it exists and is passable, then reveal around it.
    ///
    /// Blocked moves leave the world untouched and return `false`.
    pub fn move_to(&mut self, target: Axial) -> bool {
        if !self.grid.is_passable(target) {
            debug!(q = target.q, r = target.r, "Move blocked");
            return false;
        }
        self.player = target;
        let newly = fog::reveal(&mut self.grid, target, self.reveal_radius);
        debug!(q = target.q, r = target.r, newly_explored = newly, "Moved");
        true
    }
}
