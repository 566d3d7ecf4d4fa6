//! Procedural hex world library
//!
//! Axial hex coordinates, terrain generation over a sparse grid, region
//! labeling and fog of war. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod field;
pub mod fog;
pub mod grid;
pub mod hex;
pub mod labels;
pub mod naming;
pub mod regions;
pub mod seeds;
pub mod terrain;
pub mod world;

pub use grid::{Cell, GridConfig, GridError, HexGrid};
pub use hex::{Axial, HexDirection};
pub use labels::Label;
pub use regions::{Region, RegionKind};
pub use terrain::TerrainKind;
pub use world::{World, WorldConfig};
