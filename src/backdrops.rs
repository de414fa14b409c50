//! The six concrete backdrop effects and the plugin that animates them.
//!
//! Every effect is populated under its own `SceneHost`:
//! - Spinning model: external glTF scene turning about Y
//! - Rising columns: cylinders on a looping vertical conveyor
//! - Laser beams: sweeping beams with a one-shot length intro
//! - Gold swirl: particle ring rotating about Y
//! - Neon tunnel: particle tube twisting and streaming toward the camera
//! - Splash tunnel: neon tunnel governed by the intro lifecycle

use bevy::prelude::*;
use rand::prelude::*;
use std::time::Duration;

use crate::constants::*;
use crate::lifecycle::{drive_intro_lifecycles, IntroLifecycle};
use crate::model_asset::{spawn_model_actor, watch_model_loads, ModelConfig};
use crate::motion::{advance_conveyors, spin_actors, Conveyor, Spin};
use crate::oscillation::{grow_scale_ramps, sweep_oscillators, Oscillator, ScaleRamp};
use crate::particle_field::{sample_particles, DepthBand, FieldAxis, ParticleField, ParticleFieldConfig};
use crate::procedural_meshes::create_particle_cloud_mesh;
use crate::scene_host::{BackdropSet, SceneHostPlugin};
use crate::types::{Actor, Backdrop, SplashSettled};

// ============================================================================
// PLUGIN
// ============================================================================

pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SceneHostPlugin)
            .add_event::<SplashSettled>()
            .add_systems(
                Update,
                (
                    (drive_intro_lifecycles, watch_model_loads).in_set(BackdropSet::Lifecycle),
                    (spin_actors, advance_conveyors, sweep_oscillators, grow_scale_ramps)
                        .chain()
                        .in_set(BackdropSet::Animate),
                ),
            );
    }
}

// ============================================================================
// EFFECT CONFIGURATION
// ============================================================================

#[derive(Clone, Debug)]
pub struct ColumnsConfig {
    pub count: usize,
    pub radius: f32,
    pub height: f32,
    pub spread: f32,
    pub rise_per_frame: f32,
    pub lower: f32,
    pub upper: f32,
    pub color: Color,
    pub seed: Option<u64>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            count: COLUMN_COUNT,
            radius: COLUMN_RADIUS,
            height: COLUMN_HEIGHT,
            spread: COLUMN_SPREAD,
            rise_per_frame: COLUMN_RISE_PER_FRAME,
            lower: COLUMN_LOWER_BOUND,
            upper: COLUMN_UPPER_BOUND,
            color: COLUMN_COLOR,
            seed: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BeamSpec {
    /// Long axis of the beam.
    pub direction: Vec3,
    /// Axis the beam sweeps along.
    pub sweep_axis: Vec3,
    pub origin: Vec3,
    pub color: Color,
    pub phase: f32,
}

#[derive(Clone, Debug)]
pub struct LaserConfig {
    pub beams: Vec<BeamSpec>,
    pub length: f32,
    pub thickness: f32,
    pub speed: f32,
    pub range: f32,
    pub scale_step: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        let beams = vec![
            BeamSpec {
                direction: Vec3::X,
                sweep_axis: Vec3::Y,
                origin: Vec3::new(0.0, 0.5, -1.0),
                color: LASER_COLORS[0],
                phase: 0.0,
            },
            BeamSpec {
                direction: Vec3::X,
                sweep_axis: Vec3::Y,
                origin: Vec3::new(0.0, -0.5, -1.5),
                color: LASER_COLORS[1],
                phase: std::f32::consts::PI,
            },
            BeamSpec {
                direction: Vec3::Y,
                sweep_axis: Vec3::X,
                origin: Vec3::new(0.0, 0.0, -2.0),
                color: LASER_COLORS[2],
                phase: std::f32::consts::FRAC_PI_2,
            },
            BeamSpec {
                direction: Vec3::new(1.0, 1.0, 0.0),
                sweep_axis: Vec3::new(1.0, -1.0, 0.0),
                origin: Vec3::new(0.0, 0.0, -2.5),
                color: LASER_COLORS[3],
                phase: -std::f32::consts::FRAC_PI_2,
            },
        ];

        Self {
            beams,
            length: LASER_LENGTH,
            thickness: LASER_THICKNESS,
            speed: LASER_SPEED,
            range: LASER_RANGE,
            scale_step: LASER_SCALE_STEP,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SwirlConfig {
    pub field: ParticleFieldConfig,
    pub spin_per_frame: f32,
    pub particle_size: f32,
}

impl Default for SwirlConfig {
    fn default() -> Self {
        Self {
            field: ParticleFieldConfig {
                count: GOLD_PARTICLE_COUNT,
                min_radius: GOLD_MIN_RADIUS,
                max_radius: GOLD_MAX_RADIUS,
                axis: FieldAxis::Vertical,
                depth: DepthBand::Symmetric {
                    half_extent: GOLD_HEIGHT_JITTER,
                },
                color: GOLD_COLOR,
                seed: None,
            },
            spin_per_frame: GOLD_SPIN_PER_FRAME,
            particle_size: 0.03,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TunnelConfig {
    pub field: ParticleFieldConfig,
    pub speed_per_frame: f32,
    pub twist_per_frame: f32,
    pub loop_length: f32,
    pub particle_size: f32,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            field: ParticleFieldConfig {
                count: TUNNEL_PARTICLE_COUNT,
                min_radius: TUNNEL_MIN_RADIUS,
                max_radius: TUNNEL_MAX_RADIUS,
                axis: FieldAxis::Depth,
                depth: DepthBand::Trailing { depth: TUNNEL_DEPTH },
                color: TUNNEL_COLOR,
                seed: None,
            },
            speed_per_frame: TUNNEL_SPEED_PER_FRAME,
            twist_per_frame: TUNNEL_TWIST_PER_FRAME,
            loop_length: TUNNEL_LOOP_LENGTH,
            particle_size: 0.05,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SplashConfig {
    pub tunnel: TunnelConfig,
    pub settle_delay: Duration,
    pub fade_period: Duration,
    pub fade_step: f32,
}

impl Default for SplashConfig {
    fn default() -> Self {
        let mut tunnel = TunnelConfig::default();
        tunnel.field.color = SPLASH_COLOR;
        Self {
            tunnel,
            settle_delay: Duration::from_secs_f32(SPLASH_SETTLE_DELAY_SECS),
            fade_period: Duration::from_millis(SPLASH_FADE_PERIOD_MS),
            fade_step: SPLASH_FADE_STEP,
        }
    }
}

// ============================================================================
// POPULATION
// ============================================================================

/// Spawn the actors for `backdrop` under `host`. Returns how many were spawned.
pub fn populate_backdrop(
    commands: &mut Commands,
    host: Entity,
    backdrop: Backdrop,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    model_loader: Option<&AssetServer>,
) -> usize {
    match backdrop {
        Backdrop::SpinningModel => {
            let Some(asset_server) = model_loader else {
                warn!("⚠️ Scene assets unavailable, model backdrop renders nothing");
                return 0;
            };
            spawn_model_actor(commands, host, asset_server, &ModelConfig::default());
            1
        }
        Backdrop::RisingColumns => spawn_columns(commands, host, meshes, materials, &ColumnsConfig::default()),
        Backdrop::LaserBeams => spawn_lasers(commands, host, meshes, materials, &LaserConfig::default()),
        Backdrop::GoldSwirl => spawn_swirl(commands, host, meshes, materials, &SwirlConfig::default()),
        Backdrop::NeonTunnel => spawn_tunnel(commands, host, meshes, materials, &TunnelConfig::default()),
        Backdrop::SplashTunnel => spawn_splash(commands, host, meshes, materials, &SplashConfig::default()),
    }
}

fn glow_material(materials: &mut Assets<StandardMaterial>, color: Color, intensity: f32) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        emissive: LinearRgba::from(color) * intensity,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    })
}

pub fn spawn_columns(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ColumnsConfig,
) -> usize {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mesh = meshes.add(Cylinder::new(config.radius, config.height));
    let material = materials.add(StandardMaterial {
        base_color: config.color,
        emissive: LinearRgba::from(config.color) * 0.6,
        metallic: 0.2,
        perceptual_roughness: 0.4,
        ..default()
    });

    let half_spread = config.spread.abs() * 0.5;
    let (lower, upper) = (config.lower.min(config.upper), config.lower.max(config.upper));
    for index in 0..config.count {
        let base = Vec3::new(
            rng.gen_range(-half_spread..=half_spread),
            0.0,
            rng.gen_range(-half_spread..=half_spread) - half_spread,
        );
        let conveyor = Conveyor::new(Vec3::Y, base, rng.gen_range(lower..=upper), config.rise_per_frame, lower, upper);

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(conveyor.translation()),
            conveyor,
            Actor { host },
            ChildOf(host),
            Name::new(format!("Column_{}", index)),
        ));
    }

    config.count
}

pub fn spawn_lasers(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &LaserConfig,
) -> usize {
    let mesh = meshes.add(Cylinder::new(config.thickness, config.length));

    for (index, beam) in config.beams.iter().enumerate() {
        let direction = beam.direction.try_normalize().unwrap_or(Vec3::X);
        let oscillator = Oscillator::new(beam.sweep_axis, beam.origin, config.speed, config.range, beam.phase);

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(glow_material(materials, beam.color, 4.0)),
            Transform {
                translation: oscillator.position(),
                rotation: Quat::from_rotation_arc(Vec3::Y, direction),
                scale: Vec3::new(1.0, 1e-4, 1.0),
            },
            oscillator,
            ScaleRamp::new(config.scale_step),
            Actor { host },
            ChildOf(host),
            Name::new(format!("LaserBeam_{}", index)),
        ));
    }

    config.beams.len()
}

fn spawn_field(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    field: &ParticleFieldConfig,
    particle_size: f32,
) -> Entity {
    let particles = sample_particles(field);
    debug!("Sampled {} particles for field under {:?}", particles.len(), host);
    let mesh = meshes.add(create_particle_cloud_mesh(&particles, particle_size));

    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(glow_material(materials, field.color, 2.5)),
            Transform::default(),
            ParticleField { particles },
            Actor { host },
            ChildOf(host),
        ))
        .id()
}

pub fn spawn_swirl(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &SwirlConfig,
) -> usize {
    let field = spawn_field(commands, host, meshes, materials, &config.field, config.particle_size);
    commands
        .entity(field)
        .insert((Spin::new(Vec3::Y, config.spin_per_frame), Name::new("GoldSwirl")));
    1
}

pub fn spawn_tunnel(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &TunnelConfig,
) -> usize {
    let field = spawn_field(commands, host, meshes, materials, &config.field, config.particle_size);
    commands.entity(field).insert((
        Spin::new(Vec3::Z, config.twist_per_frame),
        Conveyor::new(Vec3::Z, Vec3::ZERO, 0.0, config.speed_per_frame, 0.0, config.loop_length),
        Name::new("NeonTunnel"),
    ));
    1
}

pub fn spawn_splash(
    commands: &mut Commands,
    host: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &SplashConfig,
) -> usize {
    let spawned = spawn_tunnel(commands, host, meshes, materials, &config.tunnel);
    commands
        .entity(host)
        .insert(IntroLifecycle::new(config.settle_delay, config.fade_period, config.fade_step));
    spawned
}
