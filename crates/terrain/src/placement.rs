//! Hand-off of finished tiles to whatever places and renders them.

use bevy::math::Vec3;

use crate::grid::{BlendGrid, HeightGrid};
use crate::splat::SplatPrototypes;
use crate::tile_grid::{TileCoord, TileNeighbors};

/// Everything a renderer needs to instantiate one tile.
#[derive(Debug, Clone, Copy)]
pub struct TileHandoff<'a> {
    pub coord: TileCoord,
    pub position: Vec3,
    /// `(terrain_size, terrain_height, terrain_size)`.
    pub size: Vec3,
    pub heights: &'a HeightGrid,
    pub blend: &'a BlendGrid,
    pub splats: &'a SplatPrototypes,
    pub pixel_error: f32,
    pub basemap_distance: f32,
}

/// Receiver of generated tiles.
///
/// `place_tile` is called for every tile before any `set_neighbors` call.
pub trait TerrainPlacement {
    fn place_tile(&mut self, tile: TileHandoff<'_>);

    fn set_neighbors(&mut self, coord: TileCoord, neighbors: TileNeighbors);
}
