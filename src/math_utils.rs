/// Cycle a coordinate through `[lower, upper]`.
/// Past the upper bound it restarts at the lower bound, and below the lower
/// bound it restarts at the upper one, so a conveyor loops in either direction.
#[inline]
pub fn wrap_cycle(value: f32, lower: f32, upper: f32) -> f32 {
    if value > upper {
        lower
    } else if value < lower {
        upper
    } else {
        value
    }
}

/// Sinusoidal offset for an oscillating actor.
#[inline]
pub fn oscillate(elapsed: f32, speed: f32, phase: f32, range: f32) -> f32 {
    (elapsed * speed + phase).sin() * range
}

/// One step of a 0 -> 1 intro ramp. Never decreases and never exceeds 1.
#[inline]
pub fn ramp_to_one(value: f32, step: f32) -> f32 {
    (value + step.max(0.0)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_cycle_resets_past_upper_bound() {
        assert_eq!(wrap_cycle(6.01, -6.0, 6.0), -6.0);
        assert_eq!(wrap_cycle(6.0, -6.0, 6.0), 6.0);
        assert_eq!(wrap_cycle(0.5, -6.0, 6.0), 0.5);
    }

    #[test]
    fn wrap_cycle_resets_below_lower_bound() {
        assert_eq!(wrap_cycle(-6.5, -6.0, 6.0), 6.0);
    }

    #[test]
    fn oscillate_stays_within_range() {
        for i in 0..1_000 {
            let v = oscillate(i as f32 * 0.016, 1.5, 0.3, 2.0);
            assert!(v.abs() <= 2.0);
        }
    }

    #[test]
    fn ramp_clamps_at_one_and_ignores_negative_steps() {
        assert_eq!(ramp_to_one(0.99, 0.05), 1.0);
        assert_eq!(ramp_to_one(1.0, 0.05), 1.0);
        assert_eq!(ramp_to_one(0.4, -0.1), 0.4);
    }
}
