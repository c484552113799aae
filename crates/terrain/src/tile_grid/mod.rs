// =============================================================================
// Tile lattice: per-tile synthesis, placement centred on the origin, and
// neighbour links so height data lines up across tile edges.
// =============================================================================

mod layout;


use std::time::Instant;

use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};

use crate::blend_map::BlendMapper;
use crate::grid::{BlendGrid, HeightGrid};
use crate::heightfield::HeightfieldSynthesizer;
use crate::noise_source::NoiseSource;
use crate::placement::{TerrainPlacement, TileHandoff};
use crate::settings::TerrainSettings;
use crate::splat::SplatPrototypes;
use crate::surface::TerrainData;

pub use self::layout::{grid_offset, neighbors_of, tile_position, TileCoord, TileNeighbors};

/// One generated terrain tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub coord: TileCoord,
    /// Corner of the tile in world space (y is always 0).
    pub position: Vec3,
    pub heights: HeightGrid,
    pub blend: BlendGrid,
    /// Lattice coordinates of adjacent tiles, filled once every tile exists.
    pub neighbors: TileNeighbors,
}

/// Builds individual tiles. Shared read-only between worker tasks.
pub struct TileGenerator {
    synthesizer: HeightfieldSynthesizer<NoiseSource>,
    mapper: BlendMapper,
    extent: Vec3,
    offset: Vec2,
}

impl TileGenerator {
    /// `settings` must already be validated.
    pub fn new(settings: &TerrainSettings) -> Self {
        Self {
            synthesizer: HeightfieldSynthesizer::new(
                NoiseSource::new(settings.noise_config()),
                settings.heightmap_size,
                settings.terrain_size,
            ),
            mapper: BlendMapper::new(settings.alphamap_size),
            extent: settings.tile_extent(),
            offset: grid_offset(settings.tiles_x, settings.tiles_z, settings.terrain_size),
        }
    }

    pub fn build_tile(&self, coord: TileCoord) -> Tile {
        let heights = self.synthesizer.fill_heights(coord.x, coord.z);
        let surface = TerrainData::new(&heights, self.extent);
        let blend = self.mapper.fill_blend(&surface);
        let position = tile_position(coord, self.extent.x, self.offset);
        debug!(
            "TileGenerator: built tile ({}, {}) at {:?}",
            coord.x, coord.z, position
        );
        Tile {
            coord,
            position,
            heights,
            blend,
            neighbors: TileNeighbors::default(),
        }
    }
}

/// Dense `tiles_x x tiles_z` lattice owning every tile.
///
/// Tiles are stored x-major (`x * tiles_z + z`), the order they are built in.
/// Neighbour links are coordinates into this lattice, never owned tiles.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileLattice {
    pub tiles_x: usize,
    pub tiles_z: usize,
    /// Global offset that centres the whole lattice on the origin.
    pub offset: Vec2,
    /// `(terrain_size, terrain_height, terrain_size)` of every tile.
    pub tile_extent: Vec3,
    pub pixel_error: f32,
    pub basemap_distance: f32,
    pub splats: SplatPrototypes,
    tiles: Vec<Tile>,
}

impl TileLattice {
    /// Build every tile on the calling thread, then link neighbours.
    pub fn generate(settings: &TerrainSettings) -> Self {
        let started = Instant::now();
        log_start(settings, "sequential");
        let generator = TileGenerator::new(settings);

        let mut tiles = Vec::with_capacity(settings.tiles_x * settings.tiles_z);
        for x in 0..settings.tiles_x {
            for z in 0..settings.tiles_z {
                tiles.push(generator.build_tile(TileCoord::new(x, z)));
            }
        }

        let lattice = Self::from_tiles(settings, tiles);
        info!(
            "TileLattice: generated {} tiles in {:.1?}",
            lattice.len(),
            started.elapsed()
        );
        lattice
    }

    /// Build one task per tile on the compute pool. Neighbours are linked
    /// only after every task has finished.
    pub fn generate_parallel(settings: &TerrainSettings) -> Self {
        let started = Instant::now();
        log_start(settings, "parallel");
        let generator = TileGenerator::new(settings);
        let generator = &generator;

        let pool = ComputeTaskPool::get_or_init(TaskPool::default);
        let mut tiles: Vec<Tile> = pool.scope(|scope| {
            for x in 0..settings.tiles_x {
                for z in 0..settings.tiles_z {
                    scope.spawn(async move { generator.build_tile(TileCoord::new(x, z)) });
                }
            }
        });
        // Task completion order is not lattice order.
        tiles.sort_by_key(|tile| tile.coord.x * settings.tiles_z + tile.coord.z);

        let lattice = Self::from_tiles(settings, tiles);
        info!(
            "TileLattice: generated {} tiles on {} threads in {:.1?}",
            lattice.len(),
            pool.thread_num(),
            started.elapsed()
        );
        lattice
    }

    fn from_tiles(settings: &TerrainSettings, tiles: Vec<Tile>) -> Self {
        let mut lattice = Self {
            tiles_x: settings.tiles_x,
            tiles_z: settings.tiles_z,
            offset: grid_offset(settings.tiles_x, settings.tiles_z, settings.terrain_size),
            tile_extent: settings.tile_extent(),
            pixel_error: settings.pixel_error,
            basemap_distance: settings.basemap_distance,
            splats: settings.splats.clone(),
            tiles,
        };
        lattice.link_neighbors();
        lattice
    }

    /// Second pass over the lattice: point every tile at its neighbours.
    pub fn link_neighbors(&mut self) {
        let (tiles_x, tiles_z) = (self.tiles_x, self.tiles_z);
        for tile in &mut self.tiles {
            tile.neighbors = neighbors_of(tile.coord, tiles_x, tiles_z);
        }
    }

    #[inline]
    fn index(&self, coord: TileCoord) -> usize {
        coord.x * self.tiles_z + coord.z
    }

    pub fn get(&self, x: usize, z: usize) -> Option<&Tile> {
        if x < self.tiles_x && z < self.tiles_z {
            self.tiles.get(self.index(TileCoord::new(x, z)))
        } else {
            None
        }
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.get(coord.x, coord.z)
    }

    /// Tiles in lattice order (x outer, z inner).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Hand every tile to `placement`: all tiles first, then all neighbour
    /// links, so links always refer to tiles the placement already knows.
    pub fn hand_off(&self, placement: &mut impl TerrainPlacement) {
        for tile in &self.tiles {
            placement.place_tile(TileHandoff {
                coord: tile.coord,
                position: tile.position,
                size: self.tile_extent,
                heights: &tile.heights,
                blend: &tile.blend,
                splats: &self.splats,
                pixel_error: self.pixel_error,
                basemap_distance: self.basemap_distance,
            });
        }
        for tile in &self.tiles {
            placement.set_neighbors(tile.coord, tile.neighbors);
        }
    }
}

fn log_start(settings: &TerrainSettings, mode: &str) {
    info!(
        "TileLattice: generating {}x{} tiles ({}), heightmap {}, alphamap {}, size {}",
        settings.tiles_x,
        settings.tiles_z,
        mode,
        settings.heightmap_size,
        settings.alphamap_size,
        settings.terrain_size
    );
}
