//! Startup systems: generate the lattice and spawn one entity per tile.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::placement::{TerrainPlacement, TileHandoff};
use crate::settings::TerrainSettings;
use crate::tile_grid::{TileCoord, TileLattice, TileNeighbors};

/// A placed terrain tile. Height and blend data stay in [`TileLattice`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TerrainTile {
    pub coord: TileCoord,
    pub size: Vec3,
    pub pixel_error: f32,
    pub basemap_distance: f32,
}

/// Entities of the adjacent tiles.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerrainNeighbors {
    pub left: Option<Entity>,
    pub top: Option<Entity>,
    pub right: Option<Entity>,
    pub bottom: Option<Entity>,
}

/// Places tiles as ECS entities through `Commands`.
pub struct EntityPlacement<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    entities: HashMap<TileCoord, Entity>,
}

impl<'a, 'w, 's> EntityPlacement<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> Self {
        Self {
            commands,
            entities: HashMap::new(),
        }
    }

    pub fn entity(&self, coord: TileCoord) -> Option<Entity> {
        self.entities.get(&coord).copied()
    }
}

impl TerrainPlacement for EntityPlacement<'_, '_, '_> {
    fn place_tile(&mut self, tile: TileHandoff<'_>) {
        let entity = self
            .commands
            .spawn((
                TerrainTile {
                    coord: tile.coord,
                    size: tile.size,
                    pixel_error: tile.pixel_error,
                    basemap_distance: tile.basemap_distance,
                },
                Transform::from_translation(tile.position),
                Name::new(format!("Terrain ({}, {})", tile.coord.x, tile.coord.z)),
            ))
            .id();
        self.entities.insert(tile.coord, entity);
    }

    fn set_neighbors(&mut self, coord: TileCoord, neighbors: TileNeighbors) {
        let Some(entity) = self.entity(coord) else {
            warn!(
                "EntityPlacement: no entity for tile ({}, {}), skipping neighbours",
                coord.x, coord.z
            );
            return;
        };
        let links = TerrainNeighbors {
            left: neighbors.left.and_then(|c| self.entity(c)),
            top: neighbors.top.and_then(|c| self.entity(c)),
            right: neighbors.right.and_then(|c| self.entity(c)),
            bottom: neighbors.bottom.and_then(|c| self.entity(c)),
        };
        self.commands.entity(entity).insert(links);
    }
}

/// Validate the settings resource and build the lattice from it.
pub fn generate_terrain_tiles(mut commands: Commands, settings: Res<TerrainSettings>) {
    let settings = settings.clone().validated();
    let lattice = TileLattice::generate_parallel(&settings);
    commands.insert_resource(settings);
    commands.insert_resource(lattice);
}

pub fn spawn_terrain_tiles(mut commands: Commands, lattice: Res<TileLattice>) {
    let mut placement = EntityPlacement::new(&mut commands);
    lattice.hand_off(&mut placement);
    info!("TerrainPlugin: spawned {} terrain tiles", lattice.len());
}
