use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;
use glam::Vec2;

use crate::assets::HeightPaletteAsset;
use crate::camera::CameraState;
use crate::grid::HeightGrid;
use crate::projection::{self, Viewport};
use crate::types::{HeightPalette, TerrainConfig};

pub const VIEWPORT_WIDTH: u32 = 800;
pub const VIEWPORT_HEIGHT: u32 = 600;
/// Both windows share one fixed size.
pub const VIEWPORT: Viewport = Viewport::new(VIEWPORT_WIDTH as f32, VIEWPORT_HEIGHT as f32);

/// Render layer seen only by the terrain window's camera.
pub const WIREFRAME_LAYER: usize = 1;

const WIREFRAME_COLOR: Color = Color::WHITE;

/// Gizmos drawn into the terrain window.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct WireframeGizmos;

/// One filled rectangle of the flat height map view.
#[derive(Component, Clone, Copy, Debug)]
pub struct HeightCell {
    pub row: usize,
    pub col: usize,
}

#[derive(Resource, Clone)]
pub struct PaletteHandle(pub Handle<HeightPaletteAsset>);

/// Last frame's wireframe size, for the HUD.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct WireframeStats {
    pub segments: usize,
    pub skipped: usize,
}

pub fn configure_wireframe_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<WireframeGizmos>();
    config.render_layers = RenderLayers::layer(WIREFRAME_LAYER);
}

pub fn request_palette(
    mut commands: Commands,
    config: Res<TerrainConfig>,
    asset_server: Res<AssetServer>,
) {
    let Some(path) = config.palette.clone() else {
        return;
    };

    info!("loading height palette from {path}");
    let handle: Handle<HeightPaletteAsset> = asset_server.load(path);
    commands.insert_resource(PaletteHandle(handle));
}

pub fn finish_palette_load(
    mut commands: Commands,
    handle: Option<Res<PaletteHandle>>,
    assets: Res<Assets<HeightPaletteAsset>>,
    asset_server: Res<AssetServer>,
    mut palette: ResMut<HeightPalette>,
) {
    let Some(handle) = handle else {
        return;
    };

    if let Some(asset) = assets.get(&handle.0) {
        *palette = asset.0.clone();
        commands.remove_resource::<PaletteHandle>();
        return;
    }

    if asset_server.load_state(handle.0.id()).is_failed() {
        warn!("height palette failed to load, keeping grayscale");
        commands.remove_resource::<PaletteHandle>();
    }
}

pub fn spawn_height_map(mut commands: Commands, grid: Res<HeightGrid>, palette: Res<HeightPalette>) {
    let n = grid.dimension();
    for row in 0..n {
        for col in 0..n {
            let (center, size) = cell_rect(row, col, n, VIEWPORT);
            let color = palette.color(grid.get(row, col), grid.amplitude());
            commands.spawn((
                HeightCell { row, col },
                Sprite::from_color(color, size),
                Transform::from_translation(screen_to_world(center, VIEWPORT).extend(0.0)),
            ));
        }
    }
}

pub fn recolor_height_map(
    palette: Res<HeightPalette>,
    grid: Res<HeightGrid>,
    mut cells: Query<(&HeightCell, &mut Sprite)>,
) {
    if !palette.is_changed() {
        return;
    }

    for (cell, mut sprite) in &mut cells {
        sprite.color = palette.color(grid.get(cell.row, cell.col), grid.amplitude());
    }
}

pub fn draw_wireframe(
    grid: Res<HeightGrid>,
    camera: Res<CameraState>,
    mut stats: ResMut<WireframeStats>,
    mut gizmos: Gizmos<WireframeGizmos>,
) {
    let wireframe = projection::project(&grid, &camera, VIEWPORT);

    for segment in &wireframe.segments {
        gizmos.line_2d(
            screen_to_world(segment.start, VIEWPORT),
            screen_to_world(segment.end, VIEWPORT),
            WIREFRAME_COLOR,
        );
    }

    if wireframe.skipped > 0 && wireframe.skipped != stats.skipped {
        debug!("skipped {} unprojectable wireframe edges", wireframe.skipped);
    }
    stats.segments = wireframe.segments.len();
    stats.skipped = wireframe.skipped;
}

/// Centre and size, in screen pixels, of one flat-view cell. Cells are
/// `width / n` by `height / n` pixels (truncated) laid out from the top-left.
pub fn cell_rect(row: usize, col: usize, dimension: usize, viewport: Viewport) -> (Vec2, Vec2) {
    let cell_w = (viewport.width as usize / dimension) as f32;
    let cell_h = (viewport.height as usize / dimension) as f32;
    let top_left = Vec2::new(col as f32 * cell_w, row as f32 * cell_h);
    let size = Vec2::new(cell_w, cell_h);
    (top_left + size * 0.5, size)
}

/// Screen pixels (top-left origin, y down) to 2-D world space (centred, y up).
pub fn screen_to_world(p: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(p.x - viewport.width * 0.5, viewport.height * 0.5 - p.y)
}
