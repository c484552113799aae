//! Terrain surface built from a committed heightfield, queried for steepness.

use bevy::math::Vec3;

use crate::config::MAX_STEEPNESS_DEGREES;
use crate::grid::HeightGrid;

/// Steepness oracle over a terrain surface.
pub trait TerrainSurface {
    /// Slope angle to vertical, in degrees [0, 90], at a normalized coordinate.
    fn steepness(&self, norm_x: f32, norm_z: f32) -> f32;
}

/// Heightfield committed to a physical size.
///
/// Heights are normalized: on commit they are clamped to [0, 1] and later
/// scaled by `size.y`. `size.x` and `size.z` span the whole grid.
#[derive(Debug, Clone)]
pub struct TerrainData {
    heights: Vec<f32>,
    side: usize,
    size: Vec3,
}

impl TerrainData {
    pub fn new(grid: &HeightGrid, size: Vec3) -> Self {
        Self {
            heights: grid.values().iter().map(|h| h.clamp(0.0, 1.0)).collect(),
            side: grid.side(),
            size,
        }
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// World-space height of vertex `(x, z)`.
    #[inline]
    pub fn height(&self, x: usize, z: usize) -> f32 {
        self.heights[z * self.side + x] * self.size.y
    }

    /// Vertex normal from central differences, one-sided on the border.
    fn normal(&self, x: usize, z: usize) -> Vec3 {
        let last = self.side - 1;
        let spacing_x = self.size.x / last as f32;
        let spacing_z = self.size.z / last as f32;

        let (x0, x1) = (x.saturating_sub(1), (x + 1).min(last));
        let (z0, z1) = (z.saturating_sub(1), (z + 1).min(last));

        let dh_dx = (self.height(x1, z) - self.height(x0, z)) / ((x1 - x0) as f32 * spacing_x);
        let dh_dz = (self.height(x, z1) - self.height(x, z0)) / ((z1 - z0) as f32 * spacing_z);

        Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
    }

    /// Bilinearly interpolated surface normal at a normalized coordinate.
    pub fn interpolated_normal(&self, norm_x: f32, norm_z: f32) -> Vec3 {
        if self.side < 2 {
            return Vec3::Y;
        }
        let last = self.side - 1;
        let fx = norm_x.clamp(0.0, 1.0) * last as f32;
        let fz = norm_z.clamp(0.0, 1.0) * last as f32;
        let x = (fx.floor() as usize).min(last - 1);
        let z = (fz.floor() as usize).min(last - 1);
        let tx = fx - x as f32;
        let tz = fz - z as f32;

        let bottom = self.normal(x, z).lerp(self.normal(x + 1, z), tx);
        let top = self.normal(x, z + 1).lerp(self.normal(x + 1, z + 1), tx);
        bottom.lerp(top, tz).normalize_or(Vec3::Y)
    }
}

impl TerrainSurface for TerrainData {
    fn steepness(&self, norm_x: f32, norm_z: f32) -> f32 {
        let normal = self.interpolated_normal(norm_x, norm_z);
        normal
            .y
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
            .clamp(0.0, MAX_STEEPNESS_DEGREES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(side: usize, rise_per_cell: f32) -> HeightGrid {
        let mut grid = HeightGrid::new(side);
        for z in 0..side {
            for x in 0..side {
                grid.set(x, z, x as f32 * rise_per_cell);
            }
        }
        grid
    }

    #[test]
    fn test_flat_terrain_has_zero_steepness() {
        let data = TerrainData::new(&HeightGrid::new(9), Vec3::new(100.0, 50.0, 100.0));
        for (nx, nz) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.3, 0.9)] {
            assert!(data.steepness(nx, nz).abs() < 1e-4);
        }
    }

    #[test]
    fn test_45_degree_ramp() {
        // 4 cells over 100 units, normalized rise 0.25 per cell * 100 height = 25 per 25 units.
        let data = TerrainData::new(&ramp(5, 0.25), Vec3::new(100.0, 100.0, 100.0));
        for (nx, nz) in [(0.0, 0.0), (0.5, 0.25), (1.0, 1.0)] {
            let angle = data.steepness(nx, nz);
            assert!((angle - 45.0).abs() < 1e-3, "angle {angle} at ({nx}, {nz})");
        }
    }

    #[test]
    fn test_steeper_ramp_reports_larger_angle() {
        let size = Vec3::new(100.0, 100.0, 100.0);
        let gentle = TerrainData::new(&ramp(5, 0.05), size);
        let steep = TerrainData::new(&ramp(5, 0.2), size);
        assert!(steep.steepness(0.5, 0.5) > gentle.steepness(0.5, 0.5));
    }

    #[test]
    fn test_steepness_within_range() {
        let mut grid = HeightGrid::new(9);
        for z in 0..9 {
            for x in 0..9 {
                grid.set(x, z, if (x + z) % 2 == 0 { 1.0 } else { 0.0 });
            }
        }
        let data = TerrainData::new(&grid, Vec3::new(10.0, 1000.0, 10.0));
        for i in 0..=16 {
            let n = i as f32 / 16.0;
            let angle = data.steepness(n, 1.0 - n);
            assert!((0.0..=90.0).contains(&angle), "angle {angle}");
        }
    }

    #[test]
    fn test_commit_clamps_heights_to_unit_range() {
        let mut grid = HeightGrid::new(3);
        grid.set(1, 1, 4.0);
        let data = TerrainData::new(&grid, Vec3::new(10.0, 20.0, 10.0));
        assert_eq!(data.height(1, 1), 20.0);
    }
}
