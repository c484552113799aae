//! Per-tile heightfield synthesis.
//!
//! Cell `(x, z)` of tile `(tile_x, tile_z)` samples the noise at
//! `(x + tile_x * (side - 1)) * ratio`, `(z + tile_z * (side - 1)) * ratio`
//! with `ratio = terrain_size / side`. Neighbouring tiles are offset by
//! `side - 1` cells, so the last column of one tile and the first column of
//! the next resolve to the same world coordinate and the same height.

use crate::grid::HeightGrid;
use crate::noise_source::NoiseSampler;

pub struct HeightfieldSynthesizer<N> {
    noise: N,
    side: usize,
    terrain_size: f32,
}

impl<N: NoiseSampler> HeightfieldSynthesizer<N> {
    /// `side` must already be of the form `2^k + 1`.
    pub fn new(noise: N, side: usize, terrain_size: f32) -> Self {
        debug_assert!(
            side >= 2 && (side - 1).is_power_of_two(),
            "heightmap side {side} is not 2^k + 1"
        );
        Self {
            noise,
            side,
            terrain_size,
        }
    }

    /// World-space sample position of cell `(x, z)` in tile `(tile_x, tile_z)`.
    #[inline]
    pub fn world_position(&self, x: usize, z: usize, tile_x: usize, tile_z: usize) -> (f32, f32) {
        let ratio = self.terrain_size / self.side as f32;
        let stride = self.side - 1;
        let world_x = (x + tile_x * stride) as f32 * ratio;
        let world_z = (z + tile_z * stride) as f32 * ratio;
        (world_x, world_z)
    }

    pub fn fill_heights(&self, tile_x: usize, tile_z: usize) -> HeightGrid {
        let mut grid = HeightGrid::new(self.side);
        self.fill_heights_into(&mut grid, tile_x, tile_z);
        grid
    }

    /// Overwrite `grid` with the heights of tile `(tile_x, tile_z)`.
    ///
    /// A grid of the wrong side is resized first, so one scratch buffer can
    /// be reused across tiles.
    pub fn fill_heights_into(&self, grid: &mut HeightGrid, tile_x: usize, tile_z: usize) {
        if grid.side() != self.side {
            *grid = HeightGrid::new(self.side);
        }
        for z in 0..self.side {
            for x in 0..self.side {
                let (world_x, world_z) = self.world_position(x, z, tile_x, tile_z);
                // Below sea level clamps to 0.
                grid.set(x, z, self.noise.sample(world_x, world_z).max(0.0));
            }
        }
    }
}
