use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;

use crate::error::TerrainError;
use crate::types::{HeightPalette, PaletteFile};

#[derive(Asset, TypePath, Debug, Clone)]
pub struct HeightPaletteAsset(pub HeightPalette);

#[derive(Default)]
pub struct HeightPaletteAssetLoader;

impl AssetLoader for HeightPaletteAssetLoader {
    type Asset = HeightPaletteAsset;
    type Settings = ();
    type Error = TerrainError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await.map_err(|e| {
            TerrainError::invalid_palette(format!("failed to read asset bytes: {e}"))
        })?;

        parse_palette(&bytes).map(HeightPaletteAsset)
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}

pub fn parse_palette(bytes: &[u8]) -> Result<HeightPalette, TerrainError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| TerrainError::invalid_palette(format!("palette was not valid utf-8: {e}")))?;

    let parsed: PaletteFile = ron::from_str(text)
        .map_err(|e| TerrainError::invalid_palette(format!("failed to parse palette ron: {e}")))?;

    HeightPalette::from_bands(parsed.bands)
}
