// Oscillating actors: a perpetual sinusoidal sweep plus a one-shot scale intro
use bevy::prelude::*;

use crate::math_utils::{oscillate, ramp_to_one};
use crate::types::{FrameStats, Frozen};

/// Smallest scale written to a transform; a zero scale has no inverse for lighting.
const MIN_RENDER_SCALE: f32 = 1e-4;

#[derive(Component, Clone, Copy, Debug)]
pub struct Oscillator {
    pub axis: Vec3,
    pub origin: Vec3,
    pub speed: f32,
    pub range: f32,
    pub phase: f32,
    pub elapsed: f32,
}

impl Oscillator {
    pub fn new(axis: Vec3, origin: Vec3, speed: f32, range: f32, phase: f32) -> Self {
        Self {
            axis: axis.try_normalize().unwrap_or(Vec3::X),
            origin,
            speed,
            range: range.abs(),
            phase,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn step(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        self.position()
    }

    pub fn position(&self) -> Vec3 {
        self.origin + self.axis * oscillate(self.elapsed, self.speed, self.phase, self.range)
    }
}

/// Intro ramp that grows from 0 to 1, one step per frame, then holds.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScaleRamp {
    pub value: f32,
    pub step: f32,
}

impl ScaleRamp {
    pub fn new(step: f32) -> Self {
        Self { value: 0.0, step }
    }

    pub fn step(&mut self) -> f32 {
        self.value = ramp_to_one(self.value, self.step);
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.value >= 1.0
    }
}

pub fn sweep_oscillators(
    time: Res<Time>,
    mut stats: ResMut<FrameStats>,
    mut query: Query<(&mut Oscillator, &mut Transform), Without<Frozen>>,
) {
    let dt = time.delta_secs();
    for (mut oscillator, mut transform) in query.iter_mut() {
        transform.translation = oscillator.step(dt);
        stats.actor_updates += 1;
    }
}

/// Ramps stretch the actor along its local Y (beam length).
pub fn grow_scale_ramps(
    mut stats: ResMut<FrameStats>,
    mut query: Query<(&mut ScaleRamp, &mut Transform), Without<Frozen>>,
) {
    for (mut ramp, mut transform) in query.iter_mut() {
        if ramp.is_settled() {
            continue;
        }
        let value = ramp.step();
        transform.scale.y = value.max(MIN_RENDER_SCALE);
        stats.actor_updates += 1;
    }
}
