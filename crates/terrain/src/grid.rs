use serde::{Deserialize, Serialize};

use crate::config::MAX_STEEPNESS_DEGREES;

/// Square elevation grid stored row-major (`z` rows, `x` columns).
///
/// Values are never negative: writes go through [`HeightGrid::set`], which
/// clamps to sea level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightGrid {
    heights: Vec<f32>,
    side: usize,
}

impl HeightGrid {
    pub fn new(side: usize) -> Self {
        Self {
            heights: vec![0.0; side * side],
            side,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn index(&self, x: usize, z: usize) -> usize {
        z * self.side + x
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.heights[self.index(x, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, z: usize, height: f32) {
        let idx = self.index(x, z);
        self.heights[idx] = height.max(0.0);
    }

    /// One row of constant `z`.
    pub fn row(&self, z: usize) -> &[f32] {
        let start = z * self.side;
        &self.heights[start..start + self.side]
    }

    /// One column of constant `x`, top to bottom.
    pub fn column(&self, x: usize) -> Vec<f32> {
        (0..self.side).map(|z| self.get(x, z)).collect()
    }

    pub fn values(&self) -> &[f32] {
        &self.heights
    }

    /// `(min, max)` over every cell. `(0, 0)` for an empty grid.
    pub fn range(&self) -> (f32, f32) {
        if self.heights.is_empty() {
            return (0.0, 0.0);
        }
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }
}

/// Two-channel texture blend weights, `side x side` cells.
///
/// Channel 0 is the steep material, channel 1 the flat one. Every cell's
/// channels lie in [0, 1] and sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendGrid {
    weights: Vec<[f32; 2]>,
    side: usize,
}

impl BlendGrid {
    /// A grid where every cell is fully the flat material.
    pub fn new(side: usize) -> Self {
        Self {
            weights: vec![[0.0, 1.0]; side * side],
            side,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn index(&self, x: usize, z: usize) -> usize {
        z * self.side + x
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> [f32; 2] {
        self.weights[self.index(x, z)]
    }

    /// Store the blend for a slope angle in degrees.
    ///
    /// The angle is clamped to [0, 90]; NaN counts as flat.
    pub fn set_from_steepness(&mut self, x: usize, z: usize, angle: f32) {
        let angle = if angle.is_nan() { 0.0 } else { angle };
        let frac = (angle / MAX_STEEPNESS_DEGREES).clamp(0.0, 1.0);
        let idx = self.index(x, z);
        self.weights[idx] = [frac, 1.0 - frac];
    }

    pub fn values(&self) -> &[[f32; 2]] {
        &self.weights
    }

    /// Mean weight of one channel over the whole grid.
    pub fn mean(&self, channel: usize) -> f32 {
        if self.weights.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.weights.iter().map(|w| w[channel]).sum();
        sum / self.weights.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_set_clamps_negative() {
        let mut grid = HeightGrid::new(5);
        grid.set(1, 2, -0.25);
        grid.set(2, 1, 0.75);
        assert_eq!(grid.get(1, 2), 0.0);
        assert_eq!(grid.get(2, 1), 0.75);
    }

    #[test]
    fn test_height_row_major_layout() {
        let mut grid = HeightGrid::new(3);
        grid.set(2, 1, 0.5);
        assert_eq!(grid.index(2, 1), 5);
        assert_eq!(grid.values()[5], 0.5);
        assert_eq!(grid.row(1), &[0.0, 0.0, 0.5]);
        assert_eq!(grid.column(2), vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_height_range() {
        let mut grid = HeightGrid::new(3);
        grid.set(0, 0, 0.2);
        grid.set(2, 2, 0.9);
        assert_eq!(grid.range(), (0.0, 0.9));
        assert_eq!(HeightGrid::new(0).range(), (0.0, 0.0));
    }

    #[test]
    fn test_blend_partition() {
        let mut grid = BlendGrid::new(4);
        for (i, angle) in [0.0, 12.5, 33.3, 45.0, 60.1, 89.9, 90.0, 17.77]
            .into_iter()
            .enumerate()
        {
            let (x, z) = (i % 4, i / 4);
            grid.set_from_steepness(x, z, angle);
            let [steep, flat] = grid.get(x, z);
            assert_eq!(steep + flat, 1.0, "angle {angle}");
            assert!((0.0..=1.0).contains(&steep));
            assert!((0.0..=1.0).contains(&flat));
        }
    }

    #[test]
    fn test_blend_clamps_out_of_range_angles() {
        let mut grid = BlendGrid::new(2);
        grid.set_from_steepness(0, 0, -10.0);
        grid.set_from_steepness(1, 0, 135.0);
        grid.set_from_steepness(0, 1, f32::NAN);
        assert_eq!(grid.get(0, 0), [0.0, 1.0]);
        assert_eq!(grid.get(1, 0), [1.0, 0.0]);
        assert_eq!(grid.get(0, 1), [0.0, 1.0]);
    }

    #[test]
    fn test_blend_mean() {
        let mut grid = BlendGrid::new(2);
        grid.set_from_steepness(0, 0, 90.0);
        grid.set_from_steepness(1, 1, 45.0);
        assert!((grid.mean(0) - 0.375).abs() < 1e-6);
        assert!((grid.mean(1) - 0.625).abs() < 1e-6);
    }
}
