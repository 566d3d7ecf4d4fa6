//! Deterministic scalar fields over axial coordinates
//!
//! A field maps `(q, r, scale)` to a value in roughly `[-1, 1]`. Every
//! implementation is a pure function of its inputs, so terrain can be
//! regenerated or sampled lazily in any order without caching.

use noise::{NoiseFn, Perlin};
use std::str::FromStr;

/// A pure, thread-safe scalar field.
pub trait Field: Send + Sync {
    fn sample(&self, q: f64, r: f64, scale: f64) -> f64;

    /// Sample with `(q, r)` shifted by `offset`, used to decorrelate two
    /// signals drawn from the same field.
    fn sample_offset(&self, q: f64, r: f64, offset: (i32, i32), scale: f64) -> f64 {
        self.sample(q + offset.0 as f64, r + offset.1 as f64, scale)
    }
}

/// Fixed sin/cos combination, normalised roughly to `[-1, 1]`.
pub fn field(q: f64, r: f64, scale: f64) -> f64 {
    let mut val = (q * scale).sin() + (r * scale * 1.1).cos();
    val += 0.5 * ((q + r) * scale * 1.7).sin();
    val / 2.5
}

/// The default trigonometric field. Needs no seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrigField;

impl Field for TrigField {
    fn sample(&self, q: f64, r: f64, scale: f64) -> f64 {
        field(q, r, scale)
    }
}

/// Seeded gradient noise from the `noise` crate.
#[derive(Clone, Debug)]
pub struct PerlinField {
    perlin: Perlin,
}

impl PerlinField {
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
        }
    }
}

impl Field for PerlinField {
    fn sample(&self, q: f64, r: f64, scale: f64) -> f64 {
        // Perlin is zero on integer lattice points; a small irrational skew
        // keeps integer coordinates off the lattice.
        self.perlin.get([q * scale + 0.318, r * scale + 0.614]).clamp(-1.0, 1.0)
    }
}

/// A field that returns the same value everywhere. Used to force uniform terrain.
#[derive(Clone, Copy, Debug)]
pub struct ConstantField(pub f64);

impl Field for ConstantField {
    fn sample(&self, _q: f64, _r: f64, _scale: f64) -> f64 {
        self.0
    }
}

/// Selects which field backs terrain generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Trig,
    Perlin,
}

impl FieldKind {
    /// Build the field. The seed only matters for `Perlin`.
    pub fn build(self, seed: u64) -> Box<dyn Field> {
        match self {
            FieldKind::Trig => Box::new(TrigField),
            FieldKind::Perlin => Box::new(PerlinField::new(seed)),
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trig" => Ok(FieldKind::Trig),
            "perlin" => Ok(FieldKind::Perlin),
            other => Err(format!("unknown field kind '{}' (expected trig or perlin)", other)),
        }
    }
}
