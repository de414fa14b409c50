// Landing page showcase: splash intro, then keyboard switching between backdrops
use bevy::prelude::*;

use crate::scene_host::{spawn_scene_host, unmount_scene_host, BackdropSet};
use crate::types::{Backdrop, FrameStats, SplashSettled};

pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveBackdrop>()
            .add_systems(Startup, (spawn_hud, mount_intro))
            .add_systems(
                Update,
                (switch_backdrop_on_key, follow_splash_with_swirl, update_hud)
                    .chain()
                    .after(BackdropSet::Animate),
            );
    }
}

/// The single backdrop currently mounted by the showcase.
#[derive(Resource, Default, Debug)]
pub struct ActiveBackdrop {
    pub host: Option<Entity>,
    pub backdrop: Option<Backdrop>,
}

impl ActiveBackdrop {
    fn replace(&mut self, commands: &mut Commands, backdrop: Backdrop) {
        self.clear(commands);
        self.host = Some(spawn_scene_host(commands, backdrop, None));
        self.backdrop = Some(backdrop);
        info!("🔀 Switched backdrop to '{}'", backdrop.label());
    }

    fn clear(&mut self, commands: &mut Commands) {
        if let Some(host) = self.host.take() {
            unmount_scene_host(commands, host);
        }
        self.backdrop = None;
    }
}

#[derive(Component)]
struct HudText;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Backdrop: --"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

fn mount_intro(mut commands: Commands, mut active: ResMut<ActiveBackdrop>) {
    active.replace(&mut commands, Backdrop::SplashTunnel);
}

fn switch_backdrop_on_key(
    mut commands: Commands,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut active: ResMut<ActiveBackdrop>,
) {
    let Some(keys) = keys else {
        return;
    };

    if keys.just_pressed(KeyCode::Escape) {
        active.clear(&mut commands);
        info!("Backdrop unmounted");
        return;
    }

    // Last key wins when several are pressed in one frame.
    if let Some(backdrop) = keys.get_just_pressed().filter_map(|key| Backdrop::from_key(*key)).last() {
        active.replace(&mut commands, backdrop);
    }
}

/// Once the splash has faded, the page settles on the gold swirl.
fn follow_splash_with_swirl(
    mut commands: Commands,
    mut settled: EventReader<SplashSettled>,
    mut active: ResMut<ActiveBackdrop>,
) {
    for SplashSettled(host) in settled.read() {
        if active.host == Some(*host) {
            active.replace(&mut commands, Backdrop::GoldSwirl);
        }
    }
}

fn update_hud(stats: Res<FrameStats>, active: Res<ActiveBackdrop>, mut hud: Query<&mut Text, With<HudText>>) {
    let label = active.backdrop.map_or("none", |backdrop| backdrop.label());
    for mut text in hud.iter_mut() {
        text.0 = format!(
            "Backdrop: {} | frame {} | actor updates {}\n1-6: switch | Esc: unmount",
            label, stats.frame, stats.actor_updates
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrops::BackdropPlugin;
    use crate::scene_host::SceneHost;

    fn showcase_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins((BackdropPlugin, ShowcasePlugin));
        app
    }

    fn hosts(app: &mut App) -> Vec<Backdrop> {
        app.world_mut()
            .query::<&SceneHost>()
            .iter(app.world())
            .map(|host| host.backdrop)
            .collect()
    }

    #[test]
    fn starts_with_splash_intro() {
        let mut app = showcase_app();
        app.update();
        assert_eq!(hosts(&mut app), vec![Backdrop::SplashTunnel]);
        assert_eq!(app.world().resource::<ActiveBackdrop>().backdrop, Some(Backdrop::SplashTunnel));
    }

    #[test]
    fn number_key_replaces_mounted_backdrop() {
        let mut app = showcase_app();
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Digit2);
        app.update();
        app.update();
        assert_eq!(hosts(&mut app), vec![Backdrop::RisingColumns]);
        assert_eq!(app.world().resource::<ActiveBackdrop>().backdrop, Some(Backdrop::RisingColumns));
    }

    #[test]
    fn escape_unmounts_everything() {
        let mut app = showcase_app();
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Escape);
        app.update();
        assert!(hosts(&mut app).is_empty());
        assert_eq!(app.world().resource::<ActiveBackdrop>().host, None);
    }
}
