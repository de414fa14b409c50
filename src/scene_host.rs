// Scene host: camera, lights and actor population for one mounted backdrop
use bevy::prelude::*;
use bevy::render::camera::Viewport;

use crate::backdrops::populate_backdrop;
use crate::constants::*;
use crate::types::{Backdrop, FrameStats};

// ============================================================================
// PLUGIN
// ============================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackdropSet {
    Mount,
    Lifecycle,
    Animate,
}

pub struct SceneHostPlugin;

impl Plugin for SceneHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameStats>()
            .configure_sets(
                Update,
                (BackdropSet::Mount, BackdropSet::Lifecycle, BackdropSet::Animate).chain(),
            )
            .add_systems(First, begin_frame_stats)
            .add_systems(Update, mount_scene_hosts.in_set(BackdropSet::Mount))
            .add_observer(log_host_disposal);
    }
}

// ============================================================================
// COMPONENTS
// ============================================================================

/// Screen-space rectangle (physical pixels) a host renders into.
#[allow(dead_code)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContainerRect {
    pub position: UVec2,
    pub size: UVec2,
}

/// Root of one mounted backdrop. Camera, lights and actors are its children,
/// so despawning it disposes everything the backdrop owns.
#[derive(Component, Debug)]
#[require(Transform, Visibility)]
pub struct SceneHost {
    pub backdrop: Backdrop,
    /// `None` fills the window.
    pub container: Option<ContainerRect>,
    pub order: isize,
}

/// Host has finished its one-time mount.
#[derive(Component)]
pub struct Mounted;

/// Host mounted without a render backend and draws nothing.
#[derive(Component)]
pub struct Degraded;

#[derive(Component)]
pub struct HostCamera;

#[derive(Component)]
pub struct HostLight;

#[derive(Clone, Debug)]
pub struct PointLightSpec {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

/// Camera and lighting for a host.
#[derive(Clone, Debug)]
pub struct HostConfig {
    pub camera_position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
    pub clear_color: Color,
    pub ambient_color: Color,
    pub ambient_brightness: f32,
    pub lights: Vec<PointLightSpec>,
}

impl HostConfig {
    pub fn for_backdrop(backdrop: Backdrop) -> Self {
        let base = Self {
            camera_position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            look_at: Vec3::ZERO,
            fov_degrees: CAMERA_FOV_DEGREES,
            clear_color: BACKGROUND_COLOR,
            ambient_color: AMBIENT_COLOR,
            ambient_brightness: AMBIENT_BRIGHTNESS,
            lights: vec![
                PointLightSpec {
                    position: Vec3::new(2.0, 3.0, 4.0),
                    color: Color::WHITE,
                    intensity: KEY_LIGHT_INTENSITY,
                },
                PointLightSpec {
                    position: Vec3::new(-3.0, -1.0, -2.0),
                    color: Color::srgb(0.5, 0.6, 1.0),
                    intensity: RIM_LIGHT_INTENSITY,
                },
            ],
        };

        match backdrop {
            Backdrop::GoldSwirl => Self {
                camera_position: Vec3::new(0.0, 2.5, 6.0),
                ..base
            },
            Backdrop::RisingColumns => Self {
                camera_position: Vec3::new(0.0, 0.0, 8.0),
                ..base
            },
            // Tunnels look straight down the depth axis.
            Backdrop::NeonTunnel | Backdrop::SplashTunnel => Self {
                camera_position: Vec3::new(0.0, 0.0, 1.0),
                look_at: Vec3::new(0.0, 0.0, -10.0),
                fov_degrees: 90.0,
                lights: Vec::new(),
                ..base
            },
            Backdrop::SpinningModel | Backdrop::LaserBeams => base,
        }
    }
}

// ============================================================================
// MOUNT / UNMOUNT
// ============================================================================

/// Mount a backdrop. The scene is built on the next `Update`.
pub fn spawn_scene_host(commands: &mut Commands, backdrop: Backdrop, container: Option<ContainerRect>) -> Entity {
    commands
        .spawn((
            SceneHost {
                backdrop,
                container,
                order: 0,
            },
            Name::new(format!("SceneHost_{}", backdrop.label())),
        ))
        .id()
}

/// Dispose a host with its camera, lights, actors and any pending timers.
pub fn unmount_scene_host(commands: &mut Commands, host: Entity) {
    if let Ok(mut entity) = commands.get_entity(host) {
        entity.try_despawn();
    }
}

fn begin_frame_stats(mut stats: ResMut<FrameStats>) {
    stats.frame += 1;
    stats.actor_updates = 0;
}

pub fn mount_scene_hosts(
    mut commands: Commands,
    hosts: Query<(Entity, &SceneHost), Without<Mounted>>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    asset_server: Option<Res<AssetServer>>,
    scenes: Option<Res<Assets<Scene>>>,
) {
    // Models can only load when glTF scenes are registered.
    let model_loader = asset_server.as_deref().filter(|_| scenes.is_some());

    for (host, scene_host) in hosts.iter() {
        let (Some(meshes), Some(materials)) = (meshes.as_deref_mut(), materials.as_deref_mut()) else {
            warn!(
                "⚠️ No render backend available, '{}' backdrop will render nothing",
                scene_host.backdrop.label()
            );
            commands.entity(host).insert((Mounted, Degraded));
            continue;
        };

        let config = HostConfig::for_backdrop(scene_host.backdrop);
        spawn_camera(&mut commands, host, scene_host, &config);
        spawn_lights(&mut commands, host, &config);
        commands.insert_resource(AmbientLight {
            color: config.ambient_color,
            brightness: config.ambient_brightness,
            affects_lightmapped_meshes: false,
        });

        let actors = populate_backdrop(&mut commands, host, scene_host.backdrop, meshes, materials, model_loader);
        commands.entity(host).insert(Mounted);

        info!("🎬 Mounted '{}' backdrop with {} actors", scene_host.backdrop.label(), actors);
    }
}

fn spawn_camera(commands: &mut Commands, host: Entity, scene_host: &SceneHost, config: &HostConfig) {
    let viewport = scene_host.container.map(|rect| Viewport {
        physical_position: rect.position,
        physical_size: rect.size.max(UVec2::ONE),
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: scene_host.order,
            viewport,
            clear_color: ClearColorConfig::Custom(config.clear_color),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(config.camera_position).looking_at(config.look_at, Vec3::Y),
        HostCamera,
        ChildOf(host),
    ));
}

fn spawn_lights(commands: &mut Commands, host: Entity, config: &HostConfig) {
    for light in &config.lights {
        commands.spawn((
            PointLight {
                color: light.color,
                intensity: light.intensity,
                range: 40.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(light.position),
            HostLight,
            ChildOf(host),
        ));
    }
}

fn log_host_disposal(trigger: Trigger<OnRemove, SceneHost>, hosts: Query<&SceneHost>) {
    if let Ok(host) = hosts.get(trigger.target()) {
        debug!("🧹 Disposed '{}' backdrop {:?}", host.backdrop.label(), trigger.target());
    }
}
