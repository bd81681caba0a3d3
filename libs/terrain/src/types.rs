use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::{Result, TerrainError};

// --- Config ---

/// Generation parameters. Every field may be omitted from a RON config file.
///
/// ```ron
/// (dimension: 129, amplitude: 3, seed: Some(7), palette: Some("palette.ron"))
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub dimension: usize,
    pub amplitude: u32,
    /// Fixed RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Asset path of a RON height palette. `None` keeps the grayscale ramp.
    pub palette: Option<String>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            dimension: 65,
            amplitude: 1,
            seed: None,
            palette: None,
        }
    }
}

impl TerrainConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TerrainError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| TerrainError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// --- Palette ---

#[derive(Clone, Debug, Deserialize)]
pub struct PaletteFile {
    pub bands: Vec<HeightBand>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HeightBand {
    pub name: String,
    pub color_srgb: (f32, f32, f32),
    /// Select this band if height < height_lt.
    pub height_lt: i32,
}

/// How the flat view turns a height into a color.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub enum HeightPalette {
    /// `255 * (h + amplitude) / (2 * amplitude)`, clamped.
    #[default]
    Grayscale,
    Bands(Vec<HeightBand>),
}

impl HeightPalette {
    pub fn from_bands(bands: Vec<HeightBand>) -> Result<Self> {
        if bands.is_empty() {
            return Err(TerrainError::invalid_palette(
                "palette must define at least one band",
            ));
        }

        let mut last = i32::MIN;
        for (i, band) in bands.iter().enumerate() {
            if i > 0 && band.height_lt <= last {
                return Err(TerrainError::invalid_palette(format!(
                    "band '{}' has height_lt={} but previous band had height_lt={} (must be strictly increasing)",
                    band.name, band.height_lt, last
                )));
            }
            let (r, g, b) = band.color_srgb;
            if ![r, g, b].iter().all(|c| (0.0..=1.0).contains(c)) {
                return Err(TerrainError::invalid_palette(format!(
                    "band '{}' has a color channel outside 0..=1",
                    band.name
                )));
            }
            last = band.height_lt;
        }

        Ok(Self::Bands(bands))
    }

    pub fn color(&self, height: i32, amplitude: u32) -> Color {
        match self {
            Self::Grayscale => {
                let level = grayscale_level(height, amplitude);
                Color::srgb_u8(level, level, level)
            }
            Self::Bands(bands) => {
                let band = pick_band(bands, height);
                let (r, g, b) = band.color_srgb;
                Color::srgb(r, g, b)
            }
        }
    }
}

/// Maps `[-amplitude, amplitude]` onto `0..=255`. Heights that drifted past
/// the bound through accumulation are clamped; a zero amplitude maps to the
/// midpoint.
pub fn grayscale_level(height: i32, amplitude: u32) -> u8 {
    if amplitude == 0 {
        return 127;
    }
    let a = i64::from(amplitude);
    let level = 255 * (i64::from(height) + a) / (2 * a);
    level.clamp(0, 255) as u8
}

fn pick_band(bands: &[HeightBand], height: i32) -> &HeightBand {
    // Validation guarantees there's at least 1 band.
    bands
        .iter()
        .find(|band| height < band.height_lt)
        .unwrap_or(&bands[bands.len() - 1])
}
