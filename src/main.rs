use bevy::prelude::*;

mod backdrops;
mod constants;
mod lifecycle;
mod math_utils;
mod model_asset;
mod motion;
mod oscillation;
mod particle_field;
mod procedural_meshes;
mod scene_host;
mod showcase;
mod types;

use backdrops::BackdropPlugin;
use constants::BACKGROUND_COLOR;
use showcase::ShowcasePlugin;

fn main() {
    App::new()
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Landing Backdrops".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((BackdropPlugin, ShowcasePlugin))
        .run();
}
