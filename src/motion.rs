//! Periodic motion actors: constant per-frame increments.
//!
//! - `Spin` accumulates an angle about a fixed axis
//! - `Conveyor` pushes a coordinate along an axis and loops it inside a band
//!
//! Neither uses randomness after construction, and both advance once per
//! rendered frame regardless of frame duration.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::math_utils::wrap_cycle;
use crate::types::{FrameStats, Frozen};

// ============================================================================
// COMPONENTS
// ============================================================================

#[derive(Component, Clone, Copy, Debug)]
pub struct Spin {
    pub axis: Vec3,
    pub per_frame: f32,
    pub angle: f32,
}

impl Spin {
    pub fn new(axis: Vec3, per_frame: f32) -> Self {
        Self {
            axis: axis.try_normalize().unwrap_or(Vec3::Y),
            per_frame,
            angle: 0.0,
        }
    }

    /// Advance one frame and return the accumulated angle in `[0, TAU)`.
    pub fn step(&mut self) -> f32 {
        let angle = (self.angle + self.per_frame).rem_euclid(TAU);
        // rem_euclid rounds up to TAU for tiny negative sums
        self.angle = if angle >= TAU { 0.0 } else { angle };
        self.angle
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Conveyor {
    pub axis: Vec3,
    pub base: Vec3,
    pub offset: f32,
    pub per_frame: f32,
    pub lower: f32,
    pub upper: f32,
}

impl Conveyor {
    /// `offset` starts clamped into the band so the loop invariant holds from frame 0.
    pub fn new(axis: Vec3, base: Vec3, offset: f32, per_frame: f32, lower: f32, upper: f32) -> Self {
        let (lower, upper) = if lower <= upper { (lower, upper) } else { (upper, lower) };
        Self {
            axis: axis.try_normalize().unwrap_or(Vec3::Y),
            base,
            offset: offset.clamp(lower, upper),
            per_frame,
            lower,
            upper,
        }
    }

    pub fn step(&mut self) -> f32 {
        self.offset = wrap_cycle(self.offset + self.per_frame, self.lower, self.upper);
        self.offset
    }

    pub fn translation(&self) -> Vec3 {
        self.base + self.axis * self.offset
    }
}

// ============================================================================
// SYSTEMS
// ============================================================================

pub fn spin_actors(
    mut stats: ResMut<FrameStats>,
    mut query: Query<(&mut Spin, &mut Transform), Without<Frozen>>,
) {
    for (mut spin, mut transform) in query.iter_mut() {
        spin.step();
        transform.rotation = spin.rotation();
        stats.actor_updates += 1;
    }
}

pub fn advance_conveyors(
    mut stats: ResMut<FrameStats>,
    mut query: Query<(&mut Conveyor, &mut Transform), Without<Frozen>>,
) {
    for (mut conveyor, mut transform) in query.iter_mut() {
        conveyor.step();
        transform.translation = conveyor.translation();
        stats.actor_updates += 1;
    }
}
