use bevy::camera::RenderTarget;
use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;
use bevy::window::{WindowRef, WindowResolution};

use terrain::render::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WIREFRAME_LAYER};
use terrain::{CameraKeys, CameraState};
use ui::UiInputCapture;

/// Renders the flat color map into the primary window.
#[derive(Component)]
pub struct HeightMapCamera;

/// Renders the wireframe gizmos into the terrain window.
#[derive(Component)]
pub struct TerrainCamera;

#[derive(Component)]
pub struct TerrainWindow;

pub fn height_map_window() -> Window {
    fixed_window("Height Map")
}

fn fixed_window(title: &str) -> Window {
    Window {
        title: title.to_string(),
        resolution: WindowResolution::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        resizable: false,
        ..default()
    }
}

pub fn setup_views(mut commands: Commands) {
    commands.spawn((HeightMapCamera, Camera2d));

    let window = commands
        .spawn((TerrainWindow, fixed_window("Terrain")))
        .id();

    commands.spawn((
        TerrainCamera,
        Camera2d,
        Camera {
            target: RenderTarget::Window(WindowRef::Entity(window)),
            ..default()
        },
        RenderLayers::layer(WIREFRAME_LAYER),
    ));
}

pub fn held_camera_keys(keys: &ButtonInput<KeyCode>) -> CameraKeys {
    CameraKeys {
        zoom_in: keys.pressed(KeyCode::KeyI),
        zoom_out: keys.pressed(KeyCode::KeyO),
        yaw_left: keys.pressed(KeyCode::KeyA),
        yaw_right: keys.pressed(KeyCode::KeyD),
        pitch_up: keys.pressed(KeyCode::KeyW),
        pitch_down: keys.pressed(KeyCode::KeyS),
    }
}

pub fn camera_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    ui_capture: Res<UiInputCapture>,
    mut camera: ResMut<CameraState>,
) {
    // Ignore while egui is actively consuming keyboard input (e.g. text field).
    if ui_capture.keyboard {
        return;
    }

    let held = held_camera_keys(&keys);
    if held.any() {
        camera.apply(held);
    }
}
