// Splash intro lifecycle: animate for a fixed delay, then fade to nothing
use bevy::prelude::*;
use std::time::Duration;

use crate::types::{Actor, Frozen, SplashSettled};

/// Shortest fade period accepted; a zero-length repeating timer would fire unboundedly.
const MIN_FADE_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroPhase {
    Animating,
    Settling,
    Done,
}

/// Timer-driven state machine: `Animating -> Settling -> Done`.
///
/// Driven by `advance`, so it can run against `Time` in the app or a simulated
/// clock in tests. Removing the component cancels both timers.
#[derive(Component, Debug)]
pub struct IntroLifecycle {
    phase: IntroPhase,
    settle_delay: Timer,
    fade: Timer,
    opacity: f32,
    step: f32,
    fade_steps: u32,
    fade_ticks: u32,
}

impl IntroLifecycle {
    pub fn new(settle_delay: Duration, fade_period: Duration, step: f32) -> Self {
        let step = step.clamp(f32::EPSILON, 1.0);
        Self {
            phase: IntroPhase::Animating,
            settle_delay: Timer::new(settle_delay, TimerMode::Once),
            fade: Timer::new(fade_period.max(MIN_FADE_PERIOD), TimerMode::Repeating),
            opacity: 1.0,
            step,
            fade_steps: fade_steps_for(step),
            fade_ticks: 0,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn fade_ticks(&self) -> u32 {
        self.fade_ticks
    }

    /// Number of fade ticks from full opacity to zero.
    pub fn fade_steps(&self) -> u32 {
        self.fade_steps
    }

    /// Advance the clock by `delta`. Returns the new phase when a transition happens.
    ///
    /// Time left over after the settle delay carries into the fade, so the
    /// outcome does not depend on how a span of time is split into steps. A
    /// single large step may go straight from `Animating` to `Done`.
    pub fn advance(&mut self, delta: Duration) -> Option<IntroPhase> {
        match self.phase {
            IntroPhase::Animating => {
                let overflow = delta.saturating_sub(self.settle_delay.remaining());
                self.settle_delay.tick(delta);
                if !self.settle_delay.finished() {
                    return None;
                }
                self.phase = IntroPhase::Settling;
                if self.tick_fade(overflow) {
                    return Some(IntroPhase::Done);
                }
                Some(IntroPhase::Settling)
            }
            IntroPhase::Settling => self.tick_fade(delta).then_some(IntroPhase::Done),
            IntroPhase::Done => None,
        }
    }

    /// Returns true when this tick finished the fade.
    fn tick_fade(&mut self, delta: Duration) -> bool {
        self.fade.tick(delta);
        for _ in 0..self.fade.times_finished_this_tick() {
            if self.fade_once() {
                return true;
            }
        }
        false
    }

    /// One fade tick. Returns true when opacity has reached zero.
    fn fade_once(&mut self) -> bool {
        self.fade_ticks += 1;
        if self.fade_ticks >= self.fade_steps {
            self.opacity = 0.0;
            self.phase = IntroPhase::Done;
            return true;
        }
        self.opacity = (1.0 - self.fade_ticks as f32 * self.step).clamp(0.0, 1.0);
        false
    }
}

fn fade_steps_for(step: f32) -> u32 {
    ((1.0 / step).ceil() as u32).max(1)
}

/// Advances every host lifecycle by the frame delta and applies its effects to the host's actors.
pub fn drive_intro_lifecycles(
    mut commands: Commands,
    time: Res<Time>,
    mut hosts: Query<(Entity, &mut IntroLifecycle)>,
    actors: Query<(Entity, &Actor, Option<&MeshMaterial3d<StandardMaterial>>)>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut settled: EventWriter<SplashSettled>,
) {
    for (host, mut lifecycle) in hosts.iter_mut() {
        let before = lifecycle.opacity();
        let transition = lifecycle.advance(time.delta());
        let owned = actors.iter().filter(|(_, actor, _)| actor.host == host);

        match transition {
            Some(IntroPhase::Settling) => {
                info!("🌅 Splash {:?} settling, fading out over {} ticks", host, lifecycle.fade_steps());
                for (entity, _, _) in owned {
                    commands.entity(entity).insert(Frozen);
                }
            }
            Some(IntroPhase::Done) => {
                info!("✅ Splash {:?} finished after {} fade ticks", host, lifecycle.fade_ticks());
                // A long frame can skip Settling entirely, so freeze here too.
                for (entity, _, _) in owned {
                    commands.entity(entity).insert((Frozen, Visibility::Hidden));
                }
                settled.write(SplashSettled(host));
            }
            _ => {}
        }

        if lifecycle.opacity() == before {
            continue;
        }
        let Some(materials) = materials.as_mut() else {
            continue;
        };
        let opacity = lifecycle.opacity();
        for (_, actor, material) in actors.iter() {
            if actor.host != host {
                continue;
            }
            let Some(material) = material.and_then(|handle| materials.get_mut(&handle.0)) else {
                continue;
            };
            material.base_color = material.base_color.with_alpha(opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;

    fn splash() -> IntroLifecycle {
        IntroLifecycle::new(Duration::from_secs(5), Duration::from_millis(50), 0.05)
    }

    fn settle(lifecycle: &mut IntroLifecycle) {
        assert_eq!(lifecycle.advance(Duration::from_secs(5)), Some(IntroPhase::Settling));
    }

    #[test]
    fn starts_animating_at_full_opacity() {
        let lifecycle = splash();
        assert_eq!(lifecycle.phase(), IntroPhase::Animating);
        assert_eq!(lifecycle.opacity(), 1.0);
        assert_eq!(lifecycle.fade_steps(), 20);
    }

    #[test]
    fn stays_animating_until_delay_elapses() {
        let mut lifecycle = splash();
        for _ in 0..49 {
            assert_eq!(lifecycle.advance(Duration::from_millis(100)), None);
        }
        assert_eq!(lifecycle.phase(), IntroPhase::Animating);
        assert_eq!(lifecycle.advance(Duration::from_millis(100)), Some(IntroPhase::Settling));
        assert_eq!(lifecycle.opacity(), 1.0);
    }

    #[test]
    fn fade_reaches_exactly_zero_in_bounded_ticks() {
        let mut lifecycle = splash();
        settle(&mut lifecycle);
        let bound = (1.0_f32 / 0.05).ceil() as u32;
        let mut previous = lifecycle.opacity();
        let mut ticks = 0;
        while lifecycle.phase() != IntroPhase::Done {
            lifecycle.advance(Duration::from_millis(50));
            ticks += 1;
            assert!(lifecycle.opacity() <= previous);
            assert!(lifecycle.opacity() >= 0.0);
            previous = lifecycle.opacity();
            assert!(ticks <= bound, "fade exceeded {bound} ticks");
        }
        assert_eq!(lifecycle.opacity(), 0.0);
        assert_eq!(lifecycle.fade_ticks(), bound);
    }

    #[test]
    fn overshooting_step_clamps_to_zero() {
        let mut lifecycle = IntroLifecycle::new(Duration::ZERO, Duration::from_millis(10), 0.3);
        settle_immediately(&mut lifecycle);
        let mut seen = Vec::new();
        for _ in 0..4 {
            lifecycle.advance(Duration::from_millis(10));
            seen.push(lifecycle.opacity());
        }
        assert_eq!(lifecycle.phase(), IntroPhase::Done);
        assert_eq!(*seen.last().unwrap(), 0.0);
        assert!(seen.iter().all(|o| *o >= 0.0));
        assert!((seen[2] - 0.1).abs() < 1e-5);
    }

    fn settle_immediately(lifecycle: &mut IntroLifecycle) {
        assert_eq!(lifecycle.advance(Duration::ZERO), Some(IntroPhase::Settling));
    }

    #[test]
    fn large_delta_fires_several_fade_ticks() {
        let mut lifecycle = splash();
        settle(&mut lifecycle);
        assert_eq!(lifecycle.advance(Duration::from_millis(200)), None);
        assert_eq!(lifecycle.fade_ticks(), 4);
        assert!((lifecycle.opacity() - 0.8).abs() < 1e-5);
        assert_eq!(lifecycle.advance(Duration::from_secs(10)), Some(IntroPhase::Done));
        assert_eq!(lifecycle.fade_ticks(), lifecycle.fade_steps());
    }

    #[test]
    fn no_timer_fires_after_done() {
        let mut lifecycle = splash();
        settle(&mut lifecycle);
        lifecycle.advance(Duration::from_secs(2));
        assert_eq!(lifecycle.phase(), IntroPhase::Done);
        let ticks = lifecycle.fade_ticks();
        for _ in 0..100 {
            assert_eq!(lifecycle.advance(Duration::from_millis(50)), None);
        }
        assert_eq!(lifecycle.fade_ticks(), ticks);
        assert_eq!(lifecycle.opacity(), 0.0);
    }

    #[test]
    fn time_past_the_delay_carries_into_the_fade() {
        let mut partial = splash();
        assert_eq!(partial.advance(Duration::from_millis(5_200)), Some(IntroPhase::Settling));
        assert_eq!(partial.fade_ticks(), 4);
        assert!((partial.opacity() - 0.8).abs() < 1e-5);

        let mut whole = splash();
        assert_eq!(whole.advance(Duration::from_secs(6)), Some(IntroPhase::Done));
        assert_eq!(whole.opacity(), 0.0);
        assert_eq!(whole.fade_ticks(), 20);
    }

    #[test]
    fn one_large_step_matches_many_small_ones() {
        let mut stepped = splash();
        for _ in 0..52 {
            stepped.advance(Duration::from_millis(100));
        }
        let mut jumped = splash();
        jumped.advance(Duration::from_millis(5_200));
        assert_eq!(stepped.phase(), jumped.phase());
        assert_eq!(stepped.fade_ticks(), jumped.fade_ticks());
        assert_eq!(stepped.opacity(), jumped.opacity());
    }

    #[test]
    fn system_freezes_and_hides_when_one_frame_skips_settling() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(10)))
            .init_resource::<SettledCount>()
            .add_event::<SplashSettled>()
            .add_systems(Update, (drive_intro_lifecycles, count_settled).chain());
        app.world_mut().resource_mut::<Time<Virtual>>().set_max_delta(Duration::from_secs(60));
        let host = app
            .world_mut()
            .spawn(IntroLifecycle::new(Duration::from_millis(200), Duration::from_millis(100), 0.5))
            .id();
        let actor = app.world_mut().spawn((Actor { host }, Visibility::Visible)).id();

        for _ in 0..3 {
            app.update();
        }
        assert_eq!(app.world().get::<IntroLifecycle>(host).map(|l| l.phase()), Some(IntroPhase::Done));
        assert!(app.world().get::<Frozen>(actor).is_some());
        assert_eq!(app.world().get::<Visibility>(actor), Some(&Visibility::Hidden));
        assert_eq!(app.world().resource::<SettledCount>().0, 1);
    }

    #[derive(Resource, Default)]
    struct SettledCount(u32);

    fn count_settled(mut events: EventReader<SplashSettled>, mut count: ResMut<SettledCount>) {
        count.0 += events.read().count() as u32;
    }

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<SettledCount>()
            .add_event::<SplashSettled>()
            .add_systems(Update, (drive_intro_lifecycles, count_settled).chain());
        app
    }

    #[test]
    fn system_freezes_actors_then_hides_them_and_reports_once() {
        let mut app = lifecycle_app();
        let host = app
            .world_mut()
            .spawn(IntroLifecycle::new(Duration::from_millis(200), Duration::from_millis(100), 0.5))
            .id();
        let actor = app.world_mut().spawn((Actor { host }, Visibility::Visible)).id();

        for _ in 0..3 {
            app.update();
        }
        assert!(app.world().get::<Frozen>(actor).is_some());

        for _ in 0..10 {
            app.update();
        }
        let lifecycle = app.world().get::<IntroLifecycle>(host).unwrap();
        assert_eq!(lifecycle.phase(), IntroPhase::Done);
        assert_eq!(app.world().get::<Visibility>(actor), Some(&Visibility::Hidden));
        assert_eq!(app.world().resource::<SettledCount>().0, 1);
    }

    #[test]
    fn unmounting_mid_sequence_cancels_everything() {
        let mut app = lifecycle_app();
        let host = app
            .world_mut()
            .spawn(IntroLifecycle::new(Duration::from_millis(200), Duration::from_millis(100), 0.5))
            .id();
        let actor = app.world_mut().spawn((Actor { host }, ChildOf(host))).id();

        app.update();
        app.update();
        app.world_mut().entity_mut(host).despawn();
        assert!(app.world().get_entity(actor).is_err());

        for _ in 0..20 {
            app.update();
        }
        assert_eq!(app.world().resource::<SettledCount>().0, 0);
        assert!(app.world().get_entity(host).is_err());
    }
}
