// Externally loaded 3D model actor (glTF scene) with failure handling
use bevy::prelude::*;
use bevy::asset::LoadState;

use crate::constants::*;
use crate::motion::Spin;
use crate::types::{Actor, Frozen};

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub path: String,
    pub spin_per_frame: f32,
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: MODEL_PATH.to_string(),
            spin_per_frame: MODEL_SPIN_PER_FRAME,
            scale: MODEL_SCALE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModelLoad {
    Pending,
    Ready,
    Failed,
}

impl ModelLoad {
    pub fn from_load_state(state: &LoadState) -> Self {
        match state {
            LoadState::Loaded => ModelLoad::Ready,
            LoadState::Failed(_) => ModelLoad::Failed,
            LoadState::NotLoaded | LoadState::Loading => ModelLoad::Pending,
        }
    }
}

#[derive(Component, Debug)]
pub struct ModelActor {
    pub path: String,
    pub scene: Handle<Scene>,
    pub load: ModelLoad,
}

/// Starts the asynchronous load; the actor stays empty until the scene resolves.
pub fn spawn_model_actor(
    commands: &mut Commands,
    host: Entity,
    asset_server: &AssetServer,
    config: &ModelConfig,
) -> Entity {
    let scene: Handle<Scene> = asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.path.clone()));
    debug!("Loading backdrop model '{}'", config.path);

    commands
        .spawn((
            SceneRoot(scene.clone()),
            ModelActor {
                path: config.path.clone(),
                scene,
                load: ModelLoad::Pending,
            },
            Spin::new(Vec3::Y, config.spin_per_frame),
            Transform::from_scale(Vec3::splat(config.scale)),
            Actor { host },
            ChildOf(host),
            Name::new("BackdropModel"),
        ))
        .id()
}

/// A failed load is final for that actor: no retry, it just never renders.
pub fn watch_model_loads(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    mut models: Query<(Entity, &mut ModelActor)>,
) {
    let Some(asset_server) = asset_server else {
        return;
    };

    for (entity, mut model) in models.iter_mut() {
        if model.load != ModelLoad::Pending {
            continue;
        }

        let state = asset_server.load_state(&model.scene);
        match ModelLoad::from_load_state(&state) {
            ModelLoad::Pending => {}
            ModelLoad::Ready => {
                info!("🗿 Backdrop model '{}' ready", model.path);
                model.load = ModelLoad::Ready;
            }
            ModelLoad::Failed => {
                if let LoadState::Failed(error) = &state {
                    warn!("⚠️ Backdrop model '{}' failed to load: {}", model.path, error);
                }
                model.load = ModelLoad::Failed;
                commands.entity(entity).remove::<SceneRoot>().insert((Frozen, Visibility::Hidden));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::spin_actors;
    use crate::types::FrameStats;
    use std::time::Duration;

    /// Scene assets are registered but no glTF loader is, so every model load fails.
    fn model_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Scene>()
            .init_resource::<FrameStats>()
            .add_systems(Update, (watch_model_loads, spin_actors).chain());
        app
    }

    fn spawn_missing_model(app: &mut App) -> Entity {
        let host = app.world_mut().spawn_empty().id();
        let config = ModelConfig {
            path: "models/does_not_exist.gltf".to_string(),
            ..default()
        };
        let asset_server = app.world().resource::<AssetServer>().clone();
        let actor = {
            let mut commands = app.world_mut().commands();
            spawn_model_actor(&mut commands, host, &asset_server, &config)
        };
        app.world_mut().flush();
        actor
    }

    fn load_of(app: &App, actor: Entity) -> Option<ModelLoad> {
        app.world().get::<ModelActor>(actor).map(|model| model.load)
    }

    #[test]
    fn failed_load_drops_scene_and_freezes_actor() {
        let mut app = model_app();
        let actor = spawn_missing_model(&mut app);
        assert_eq!(load_of(&app, actor), Some(ModelLoad::Pending));
        assert!(app.world().get::<SceneRoot>(actor).is_some());

        // Loading runs on the IO task pool, give it a few frames to report.
        for _ in 0..500 {
            app.update();
            if load_of(&app, actor) != Some(ModelLoad::Pending) {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        app.update();

        assert_eq!(load_of(&app, actor), Some(ModelLoad::Failed));
        assert!(app.world().get::<SceneRoot>(actor).is_none());
        assert!(app.world().get::<Frozen>(actor).is_some());
        assert_eq!(app.world().get::<Visibility>(actor), Some(&Visibility::Hidden));

        let angle = app.world().get::<Spin>(actor).map(|spin| spin.angle);
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().get::<Spin>(actor).map(|spin| spin.angle), angle);
        assert_eq!(load_of(&app, actor), Some(ModelLoad::Failed));
    }

    #[test]
    fn load_states_map_to_model_states() {
        assert_eq!(ModelLoad::from_load_state(&LoadState::NotLoaded), ModelLoad::Pending);
        assert_eq!(ModelLoad::from_load_state(&LoadState::Loading), ModelLoad::Pending);
        assert_eq!(ModelLoad::from_load_state(&LoadState::Loaded), ModelLoad::Ready);
    }

    #[test]
    fn default_config_points_at_bundled_model() {
        let config = ModelConfig::default();
        assert_eq!(config.path, MODEL_PATH);
        assert!(config.spin_per_frame > 0.0);
    }
}
