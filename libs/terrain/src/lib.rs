pub mod assets;
pub mod camera;
pub mod error;
pub mod generator;
pub mod grid;
pub mod projection;
pub mod render;
pub mod types;

pub use camera::{CameraKeys, CameraState};
pub use error::{Result, TerrainError};
pub use generator::{HeightMapGenerator, generate_height_grid};
pub use grid::HeightGrid;
pub use projection::{LineSegment, Viewport, Wireframe};
pub use types::*;

use bevy::prelude::*;

/// Shows an already generated grid in two views: the flat color map on the
/// default render layer and the wireframe on [`render::WIREFRAME_LAYER`].
pub struct TerrainPlugin {
    pub config: TerrainConfig,
    pub grid: HeightGrid,
}

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(self.grid.clone())
            .init_resource::<CameraState>()
            .init_resource::<HeightPalette>()
            .init_resource::<render::WireframeStats>()
            .init_asset::<assets::HeightPaletteAsset>()
            .init_asset_loader::<assets::HeightPaletteAssetLoader>()
            .init_gizmo_group::<render::WireframeGizmos>()
            .add_systems(
                Startup,
                (
                    render::configure_wireframe_gizmos,
                    render::request_palette,
                    render::spawn_height_map,
                ),
            )
            .add_systems(
                Update,
                (
                    render::finish_palette_load,
                    render::recolor_height_map,
                    render::draw_wireframe,
                )
                    .chain(),
            );
    }
}
