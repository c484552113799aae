use bevy::log::LogPlugin;
use bevy::prelude::*;

use terrain::settings::TerrainSettings;
use terrain::spawning::{TerrainNeighbors, TerrainTile};
use terrain::tile_grid::TileLattice;
use terrain::TerrainPlugin;

/// Usage: `terrain-tiles [settings.json]`. Without a path the defaults are used.
fn main() {
    let settings = match std::env::args().nth(1) {
        Some(path) => TerrainSettings::load_or_default(path),
        None => TerrainSettings::default(),
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(settings)
        .add_plugins(TerrainPlugin)
        .add_systems(PostStartup, report_tiles)
        .run();
}

/// Log a one-line summary per tile, then exit.
fn report_tiles(
    lattice: Res<TileLattice>,
    tiles: Query<(&TerrainTile, &Transform, &TerrainNeighbors)>,
    mut exit: EventWriter<AppExit>,
) {
    for (tile, transform, links) in &tiles {
        let neighbors = [links.left, links.top, links.right, links.bottom]
            .iter()
            .flatten()
            .count();
        let Some(data) = lattice.tile(tile.coord) else {
            warn!("tile ({}, {}) missing from lattice", tile.coord.x, tile.coord.z);
            continue;
        };
        let (low, high) = data.heights.range();
        info!(
            "tile ({}, {}) at {:?}: {} neighbours, heights {:.3}..{:.3}, steep weight {:.3}",
            tile.coord.x,
            tile.coord.z,
            transform.translation,
            neighbors,
            low,
            high,
            data.blend.mean(0)
        );
    }
    exit.send(AppExit::Success);
}
