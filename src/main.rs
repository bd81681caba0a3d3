use std::path::Path;
use std::process::ExitCode;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use terrain::TerrainConfig;

mod game;

use game::GamePlugin;

fn main() -> ExitCode {
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(game::camera::height_map_window()),
            ..default()
        }))
        .add_plugins(EguiPlugin::default());

    // Logging is live from here on; windows are only created once the app runs.
    let terrain_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let grid = match terrain::generate_height_grid(&terrain_config) {
        Ok(grid) => grid,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    app.add_plugins(GamePlugin {
        terrain_config,
        grid,
    });

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}

/// The first argument, if any, names a RON config file.
fn load_config() -> terrain::Result<TerrainConfig> {
    let Some(path) = std::env::args_os().nth(1) else {
        return Ok(TerrainConfig::default());
    };

    info!("reading terrain config from {}", Path::new(&path).display());
    TerrainConfig::load(path)
}
