//! Seed management for grid generation
//!
//! Provides separate seeds for each random draw made during generation and
//! naming. Per-cell draws use an RNG seeded from the subsystem seed and the
//! cell coordinate, so the result never depends on traversal order or on
//! whether cells are generated in parallel.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::hex::Axial;

/// Seeds for all random subsystems of one grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Biome edge jitter
    pub terrain: u64,
    /// Decoration tags
    pub decorations: u64,
    /// Sprite variant ids
    pub variants: u64,
    /// Region label names
    pub names: u64,
    /// Seeded noise fields
    pub field: u64,
}

impl GridSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            terrain: derive_seed(master, "terrain"),
            decorations: derive_seed(master, "decorations"),
            variants: derive_seed(master, "variants"),
            names: derive_seed(master, "names"),
            field: derive_seed(master, "field"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> GridSeedsBuilder {
        GridSeedsBuilder::new(master)
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct GridSeedsBuilder {
    seeds: GridSeeds,
}

impl GridSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: GridSeeds::from_master(master),
        }
    }

    /// Override the terrain jitter seed
    pub fn terrain(mut self, seed: u64) -> Self {
        self.seeds.terrain = seed;
        self
    }

    /// Override the decorations seed
    pub fn decorations(mut self, seed: u64) -> Self {
        self.seeds.decorations = seed;
        self
    }

    /// Override the sprite variant seed
    pub fn variants(mut self, seed: u64) -> Self {
        self.seeds.variants = seed;
        self
    }

    /// Override the place-name seed
    pub fn names(mut self, seed: u64) -> Self {
        self.seeds.names = seed;
        self
    }

    /// Override the noise field seed
    pub fn field(mut self, seed: u64) -> Self {
        self.seeds.field = seed;
        self
    }

    /// Build the final GridSeeds
    pub fn build(self) -> GridSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

/// Seed for one cell's draws within a subsystem.
pub fn cell_seed(seed: u64, coord: Axial) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    coord.q.hash(&mut hasher);
    coord.r.hash(&mut hasher);
    hasher.finish()
}

/// Fresh RNG stream for one cell within a subsystem.
pub fn cell_rng(seed: u64, coord: Axial) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(cell_seed(seed, coord))
}

impl std::fmt::Display for GridSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GridSeeds {{ master: {}, terrain: {}, decorations: {}, variants: {}, names: {}, field: {} }}",
            self.master, self.terrain, self.decorations, self.variants, self.names, self.field,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = GridSeeds::from_master(12345);
        let seeds2 = GridSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = GridSeeds::from_master(12345);
        assert_ne!(seeds.terrain, seeds.decorations);
        assert_ne!(seeds.decorations, seeds.variants);
        assert_ne!(seeds.variants, seeds.names);
    }

    #[test]
    fn test_builder_override() {
        let seeds = GridSeeds::builder(12345).names(99999).build();
        assert_eq!(seeds.names, 99999);

        let default_seeds = GridSeeds::from_master(12345);
        assert_eq!(seeds.terrain, default_seeds.terrain);
        assert_eq!(seeds.variants, default_seeds.variants);
    }

    #[test]
    fn test_cell_rng_is_per_coordinate() {
        let a: u64 = cell_rng(7, Axial::new(3, -1)).gen();
        let b: u64 = cell_rng(7, Axial::new(3, -1)).gen();
        let c: u64 = cell_rng(7, Axial::new(-1, 3)).gen();
        let d: u64 = cell_rng(8, Axial::new(3, -1)).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
