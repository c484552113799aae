use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Position of a tile in the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: usize,
    pub z: usize,
}

impl TileCoord {
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// Adjacent tiles. Boundary tiles leave the outward sides empty.
///
/// `top` is `z + 1`, `bottom` is `z - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileNeighbors {
    pub left: Option<TileCoord>,
    pub top: Option<TileCoord>,
    pub right: Option<TileCoord>,
    pub bottom: Option<TileCoord>,
}

impl TileNeighbors {
    /// Sides in `left, top, right, bottom` order.
    pub fn sides(&self) -> [Option<TileCoord>; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn count(&self) -> usize {
        self.sides().iter().flatten().count()
    }
}

/// Offset that centres a `tiles_x x tiles_z` lattice on the origin.
pub fn grid_offset(tiles_x: usize, tiles_z: usize, terrain_size: f32) -> Vec2 {
    Vec2::new(
        -terrain_size * tiles_x as f32 * 0.5,
        -terrain_size * tiles_z as f32 * 0.5,
    )
}

/// World position of a tile's corner.
pub fn tile_position(coord: TileCoord, terrain_size: f32, offset: Vec2) -> Vec3 {
    Vec3::new(
        terrain_size * coord.x as f32 + offset.x,
        0.0,
        terrain_size * coord.z as f32 + offset.y,
    )
}

pub fn neighbors_of(coord: TileCoord, tiles_x: usize, tiles_z: usize) -> TileNeighbors {
    let TileCoord { x, z } = coord;
    TileNeighbors {
        left: (x > 0).then(|| TileCoord::new(x - 1, z)),
        right: (x + 1 < tiles_x).then(|| TileCoord::new(x + 1, z)),
        bottom: (z > 0).then(|| TileCoord::new(x, z - 1)),
        top: (z + 1 < tiles_z).then(|| TileCoord::new(x, z + 1)),
    }
}
