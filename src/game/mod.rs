pub mod camera;
pub mod input;

use std::time::Duration;

use bevy::prelude::*;

use terrain::{HeightGrid, TerrainConfig, TerrainPlugin};
use ui::UiPlugin;

/// Camera input is applied once per 16 ms tick.
const INPUT_TICK: Duration = Duration::from_millis(16);

pub struct GamePlugin {
    pub terrain_config: TerrainConfig,
    pub grid: HeightGrid,
}

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(INPUT_TICK))
            .add_plugins(TerrainPlugin {
                config: self.terrain_config.clone(),
                grid: self.grid.clone(),
            })
            .add_plugins(UiPlugin)
            .add_systems(Startup, camera::setup_views)
            .add_systems(FixedUpdate, camera::camera_keyboard_input)
            .add_systems(Update, input::exit_on_close_request);
    }
}
