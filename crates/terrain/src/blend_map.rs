use crate::grid::BlendGrid;
use crate::surface::TerrainSurface;

/// Turns surface steepness into steep/flat splat weights.
///
/// Pure per-cell transform: cell `(x, z)` queries the surface at
/// `(x / (side - 1), z / (side - 1))` and stores `angle / 90` as the steep
/// weight and the remainder as the flat weight.
#[derive(Debug, Clone, Copy)]
pub struct BlendMapper {
    side: usize,
}

impl BlendMapper {
    /// `side` must already be a power of two, at least 2.
    pub fn new(side: usize) -> Self {
        debug_assert!(side >= 2 && side.is_power_of_two(), "alphamap side {side} is not 2^k");
        Self { side }
    }

    pub fn fill_blend(&self, surface: &impl TerrainSurface) -> BlendGrid {
        let mut blend = BlendGrid::new(self.side);
        let last = self.side.saturating_sub(1).max(1) as f32;
        for z in 0..self.side {
            for x in 0..self.side {
                let norm_x = x as f32 / last;
                let norm_z = z as f32 / last;
                blend.set_from_steepness(x, z, surface.steepness(norm_x, norm_z));
            }
        }
        blend
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Steepness grows linearly from 0 at x = 0 to 90 at x = 1.
    struct LinearInX;

    impl TerrainSurface for LinearInX {
        fn steepness(&self, norm_x: f32, _norm_z: f32) -> f32 {
            norm_x * 90.0
        }
    }

    #[derive(Default)]
    struct Recorder {
        queries: RefCell<Vec<(f32, f32)>>,
    }

    impl TerrainSurface for Recorder {
        fn steepness(&self, norm_x: f32, norm_z: f32) -> f32 {
            self.queries.borrow_mut().push((norm_x, norm_z));
            30.0
        }
    }

    #[test]
    fn test_steepness_maps_to_channels() {
        let blend = BlendMapper::new(4).fill_blend(&LinearInX);
        assert_eq!(blend.get(0, 2), [0.0, 1.0]);
        assert_eq!(blend.get(3, 1), [1.0, 0.0]);
        let [steep, flat] = blend.get(1, 0);
        assert!((steep - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(steep + flat, 1.0);
    }

    #[test]
    fn test_queries_cover_unit_square() {
        let recorder = Recorder::default();
        let blend = BlendMapper::new(4).fill_blend(&recorder);
        let queries = recorder.queries.borrow();
        assert_eq!(queries.len(), 16);
        assert_eq!(queries[0], (0.0, 0.0));
        assert_eq!(queries[15], (1.0, 1.0));
        assert!(queries
            .iter()
            .all(|&(x, z)| (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&z)));
        assert!(blend.values().iter().all(|w| *w == [30.0 / 90.0, 1.0 - 30.0 / 90.0]));
    }

    #[test]
    fn test_blend_is_deterministic() {
        let mapper = BlendMapper::new(8);
        assert_eq!(mapper.fill_blend(&LinearInX), mapper.fill_blend(&LinearInX));
    }
}
