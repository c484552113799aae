use bevy::prelude::*;

pub mod blend_map;
pub mod config;
pub mod grid;
pub mod heightfield;
pub mod noise_source;
pub mod placement;
pub mod settings;
pub mod spawning;
pub mod splat;
pub mod surface;
pub mod tile_grid;

use settings::TerrainSettings;

/// Generates the terrain tile lattice once at startup.
///
/// Keeps a `TerrainSettings` resource inserted before the plugin; otherwise
/// the defaults are used. After `Startup` the validated settings and the
/// `TileLattice` are resources, and every tile has an entity carrying
/// `TerrainTile`, `Transform` and `TerrainNeighbors`.
pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainSettings>().add_systems(
            Startup,
            (
                spawning::generate_terrain_tiles,
                spawning::spawn_terrain_tiles,
            )
                .chain(),
        );
    }
}
