//! Particle fields: point sets sampled once at mount, then moved as a rigid group.
//!
//! Each point gets a radius drawn from a band, an angle around the field axis,
//! and a position along that axis (symmetric jitter for swirls, negative-only
//! depth for tunnels). After generation the points never change; motion comes
//! from `Spin`/`Conveyor` on the single field entity, so per-frame cost does
//! not depend on the particle count.

use bevy::prelude::*;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Which local axis the field is arranged around.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldAxis {
    /// Rings lie in the x/z plane, jitter along y.
    Vertical,
    /// Rings lie in the x/y plane, depth along z.
    Depth,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DepthBand {
    /// Uniform in `[-half_extent, half_extent]`.
    Symmetric { half_extent: f32 },
    /// Uniform in `[-depth, 0]`, for fields that stream toward the camera.
    Trailing { depth: f32 },
}

impl DepthBand {
    pub fn range(&self) -> (f32, f32) {
        match *self {
            DepthBand::Symmetric { half_extent } => (-half_extent.abs(), half_extent.abs()),
            DepthBand::Trailing { depth } => (-depth.abs(), 0.0),
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            DepthBand::Symmetric { half_extent } => half_extent.is_finite(),
            DepthBand::Trailing { depth } => depth.is_finite(),
        }
    }

    /// Same band shape collapsed onto the axis origin.
    fn collapsed(&self) -> Self {
        match *self {
            DepthBand::Symmetric { .. } => DepthBand::Symmetric { half_extent: 0.0 },
            DepthBand::Trailing { .. } => DepthBand::Trailing { depth: 0.0 },
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ParticleFieldConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub axis: FieldAxis,
    pub depth: DepthBand,
    pub color: Color,
    /// `None` draws a fresh seed from the OS on every mount.
    pub seed: Option<u64>,
}

impl ParticleFieldConfig {
    /// Repair bands that cannot be sampled: non-finite extents, negative radii and inverted bounds.
    pub fn sanitized(mut self) -> Self {
        if !self.min_radius.is_finite() || !self.max_radius.is_finite() {
            warn!(
                "Particle field radius band [{}, {}] is not finite, non-finite bounds set to 0",
                self.min_radius, self.max_radius
            );
            self.min_radius = finite_or_zero(self.min_radius);
            self.max_radius = finite_or_zero(self.max_radius);
        }
        if !self.depth.is_finite() {
            warn!("Particle field depth band {:?} is not finite, collapsed to 0", self.depth);
            self.depth = self.depth.collapsed();
        }

        let min = self.min_radius.abs();
        let max = self.max_radius.abs();
        if min > max || self.min_radius < 0.0 || self.max_radius < 0.0 {
            warn!(
                "Particle field radius band [{}, {}] adjusted to [{}, {}]",
                self.min_radius,
                self.max_radius,
                min.min(max),
                min.max(max)
            );
        }
        self.min_radius = min.min(max);
        self.max_radius = min.max(max);
        self
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Immutable point set owned by one field actor.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSet {
    points: Vec<Vec3>,
}

impl ParticleSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Sample `config.count` points. Pure apart from the supplied rng.
pub fn generate_particles(config: &ParticleFieldConfig, rng: &mut impl Rng) -> ParticleSet {
    let config = config.clone().sanitized();
    let (low, high) = config.depth.range();

    let points = (0..config.count)
        .map(|_| {
            let radius = rng.gen_range(config.min_radius..=config.max_radius);
            let angle = rng.gen_range(0.0..TAU);
            let along = rng.gen_range(low..=high);
            let (sin, cos) = angle.sin_cos();
            match config.axis {
                FieldAxis::Vertical => Vec3::new(radius * cos, along, radius * sin),
                FieldAxis::Depth => Vec3::new(radius * cos, radius * sin, along),
            }
        })
        .collect();

    ParticleSet { points }
}

/// Seed from the config when given, otherwise from entropy.
pub fn sample_particles(config: &ParticleFieldConfig) -> ParticleSet {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_particles(config, &mut rng)
}

/// Attached to the field entity; keeps the sampled set for diagnostics.
#[derive(Component, Debug)]
pub struct ParticleField {
    pub particles: ParticleSet,
}
