use bevy::prelude::*;

/// The six backdrop effects a landing page can mount.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Backdrop {
    SpinningModel,
    RisingColumns,
    LaserBeams,
    GoldSwirl,
    NeonTunnel,
    SplashTunnel,
}

impl Backdrop {
    pub const ALL: [Backdrop; 6] = [
        Backdrop::SpinningModel,
        Backdrop::RisingColumns,
        Backdrop::LaserBeams,
        Backdrop::GoldSwirl,
        Backdrop::NeonTunnel,
        Backdrop::SplashTunnel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Backdrop::SpinningModel => "Spinning Model",
            Backdrop::RisingColumns => "Rising Columns",
            Backdrop::LaserBeams => "Laser Beams",
            Backdrop::GoldSwirl => "Gold Swirl",
            Backdrop::NeonTunnel => "Neon Tunnel",
            Backdrop::SplashTunnel => "Splash Tunnel",
        }
    }

    /// Number keys 1-6 select a backdrop in the showcase.
    pub fn from_key(key: KeyCode) -> Option<Backdrop> {
        let index = match key {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            _ => return None,
        };
        Some(Self::ALL[index])
    }
}

/// Every procedural actor records the host that owns it.
#[derive(Component, Clone, Copy, Debug)]
pub struct Actor {
    pub host: Entity,
}

/// Actor updates cease while this marker is present.
#[derive(Component)]
pub struct Frozen;

/// Per-frame counters, reset in `First`.
#[derive(Resource, Default, Debug)]
pub struct FrameStats {
    pub frame: u64,
    pub actor_updates: u32,
}

/// Fired once when a splash host finishes fading out.
#[derive(Event, Clone, Copy, Debug)]
pub struct SplashSettled(pub Entity);
