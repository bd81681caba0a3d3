pub mod hud;

pub use hud::{UiInputCapture, camera_hud_system, update_ui_input_capture};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(UiInputCapture::default())
            .add_systems(Update, update_ui_input_capture)
            .add_systems(EguiPrimaryContextPass, camera_hud_system);
    }
}
