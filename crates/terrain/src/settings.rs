//! Terrain generation settings, loaded from JSON and validated before use.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_ALPHAMAP_SIZE, DEFAULT_BASEMAP_DISTANCE, DEFAULT_HEIGHTMAP_SIZE, DEFAULT_PIXEL_ERROR,
    DEFAULT_TERRAIN_HEIGHT, DEFAULT_TERRAIN_SIZE, DEFAULT_TILES_X, DEFAULT_TILES_Z,
    MIN_ALPHAMAP_SIZE,
};
use crate::noise_source::NoiseConfig;
use crate::splat::SplatPrototypes;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub seed: i32,
    pub frequency: f32,
    pub octaves: i32,
    pub amplitude: f32,
    pub lacunarity: f32,
    pub persistence: f32,
    /// Number of tiles along x.
    pub tiles_x: usize,
    /// Number of tiles along z.
    pub tiles_z: usize,
    pub pixel_error: f32,
    pub basemap_distance: f32,
    /// Heightmap side, `2^k + 1`.
    pub heightmap_size: usize,
    /// Alphamap side, `2^k`.
    pub alphamap_size: usize,
    /// Physical side length of one tile.
    pub terrain_size: f32,
    /// Physical height of a normalized height of 1.
    pub terrain_height: f32,
    pub splats: SplatPrototypes,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        let noise = NoiseConfig::default();
        Self {
            seed: noise.seed,
            frequency: noise.frequency,
            octaves: noise.octaves,
            amplitude: noise.amplitude,
            lacunarity: noise.lacunarity,
            persistence: noise.persistence,
            tiles_x: DEFAULT_TILES_X,
            tiles_z: DEFAULT_TILES_Z,
            pixel_error: DEFAULT_PIXEL_ERROR,
            basemap_distance: DEFAULT_BASEMAP_DISTANCE,
            heightmap_size: DEFAULT_HEIGHTMAP_SIZE,
            alphamap_size: DEFAULT_ALPHAMAP_SIZE,
            terrain_size: DEFAULT_TERRAIN_SIZE,
            terrain_height: DEFAULT_TERRAIN_HEIGHT,
            splats: SplatPrototypes::default(),
        }
    }
}

impl TerrainSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read settings from `path`, logging a warning and falling back to the
    /// defaults if the file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    "TerrainSettings: cannot read {}, using defaults: {}",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "TerrainSettings: failed to parse {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Correct every value the pipeline cannot run with, warning for each.
    pub fn validated(mut self) -> Self {
        let heightmap_ok = self.heightmap_size >= 2 && (self.heightmap_size - 1).is_power_of_two();
        if !heightmap_ok {
            let corrected = closest_power_of_two(self.heightmap_size) + 1;
            warn!(
                "TerrainSettings: heightmap size {} must be 2^k + 1, using {}",
                self.heightmap_size, corrected
            );
            self.heightmap_size = corrected;
        }

        if !self.alphamap_size.is_power_of_two() {
            let corrected = closest_power_of_two(self.alphamap_size);
            warn!(
                "TerrainSettings: alphamap size {} must be 2^k, using {}",
                self.alphamap_size, corrected
            );
            self.alphamap_size = corrected;
        }
        if self.alphamap_size < MIN_ALPHAMAP_SIZE {
            warn!(
                "TerrainSettings: alphamap size {} is too small, using {}",
                self.alphamap_size, MIN_ALPHAMAP_SIZE
            );
            self.alphamap_size = MIN_ALPHAMAP_SIZE;
        }

        if self.octaves < 1 {
            warn!(
                "TerrainSettings: octave count {} must be at least 1, using 1",
                self.octaves
            );
            self.octaves = 1;
        }

        if !(self.terrain_size.is_finite() && self.terrain_size > 0.0) {
            warn!(
                "TerrainSettings: terrain size {} must be positive, using {}",
                self.terrain_size, DEFAULT_TERRAIN_SIZE
            );
            self.terrain_size = DEFAULT_TERRAIN_SIZE;
        }

        self
    }

    pub fn noise_config(&self) -> NoiseConfig {
        NoiseConfig {
            seed: self.seed,
            frequency: self.frequency,
            octaves: self.octaves,
            amplitude: self.amplitude,
            lacunarity: self.lacunarity,
            persistence: self.persistence,
        }
    }

    /// Physical extent of one tile: `(size, height, size)`.
    pub fn tile_extent(&self) -> Vec3 {
        Vec3::new(self.terrain_size, self.terrain_height, self.terrain_size)
    }
}

/// Nearest power of two to `n`. Ties round up; `n <= 1` gives 1.
pub fn closest_power_of_two(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    if n.is_power_of_two() {
        return n;
    }
    let lower = 1usize << (usize::BITS - 1 - n.leading_zeros());
    match n.checked_next_power_of_two() {
        Some(upper) if upper - n <= n - lower => upper,
        // Above the largest representable power of two.
        _ => lower,
    }
}
