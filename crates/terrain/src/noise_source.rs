//! Seeded fractal (fBm) noise used as the elevation source.
//!
//! The base function is Perlin noise from `fastnoise-lite`, summed over
//! `octaves` layers. Each layer multiplies frequency by `lacunarity` and
//! amplitude by `persistence`. The result is scaled by `amplitude`.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_LACUNARITY, DEFAULT_OCTAVES,
    DEFAULT_PERSISTENCE, DEFAULT_SEED,
};

/// Anything that can be sampled as a continuous 2D field over world space.
pub trait NoiseSampler {
    fn sample(&self, world_x: f32, world_z: f32) -> f32;
}

/// Parameters for the fractal noise. Immutable once the source is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub seed: i32,
    pub frequency: f32,
    pub octaves: i32,
    pub amplitude: f32,
    pub lacunarity: f32,
    pub persistence: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frequency: DEFAULT_FREQUENCY,
            octaves: DEFAULT_OCTAVES,
            amplitude: DEFAULT_AMPLITUDE,
            lacunarity: DEFAULT_LACUNARITY,
            persistence: DEFAULT_PERSISTENCE,
        }
    }
}

pub struct NoiseSource {
    config: NoiseConfig,
    noise: FastNoiseLite,
}

impl NoiseSource {
    pub fn new(config: NoiseConfig) -> Self {
        let mut noise = FastNoiseLite::with_seed(config.seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(config.frequency));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(config.octaves.max(1)));
        noise.set_fractal_lacunarity(Some(config.lacunarity));
        noise.set_fractal_gain(Some(config.persistence));
        Self { config, noise }
    }
}

impl NoiseSampler for NoiseSource {
    #[inline]
    fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        self.noise.get_noise_2d(world_x, world_z) * self.config.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deterministic() {
        let a = NoiseSource::new(NoiseConfig::default());
        let b = NoiseSource::new(NoiseConfig::default());
        for i in 0..64 {
            let x = i as f32 * 37.5;
            let z = i as f32 * -11.25;
            assert_eq!(a.sample(x, z).to_bits(), a.sample(x, z).to_bits());
            assert_eq!(a.sample(x, z).to_bits(), b.sample(x, z).to_bits());
        }
    }

    /// Bit patterns recorded from the default config. A change here means the
    /// noise backend or its setup changed and saved worlds would not match.
    #[test]
    fn test_sample_matches_recorded_values() {
        let noise = NoiseSource::new(NoiseConfig::default());
        assert_eq!(noise.sample(100.0, 250.0).to_bits(), 0xbde5_c2ee);
        assert_eq!(noise.sample(1234.5, -678.25).to_bits(), 0x3e1a_17b8);
        assert_eq!(noise.sample(4096.0, 2048.0).to_bits(), 0xbde3_41cc);
        assert_eq!(noise.sample(-512.0, 333.0).to_bits(), 0x3e42_f6c3);
    }

    #[test]
    fn test_seed_changes_output() {
        let a = NoiseSource::new(NoiseConfig::default());
        let b = NoiseSource::new(NoiseConfig {
            seed: 2,
            ..NoiseConfig::default()
        });
        let differs = (0..64).any(|i| {
            let x = 100.0 + i as f32 * 53.0;
            a.sample(x, x * 0.5) != b.sample(x, x * 0.5)
        });
        assert!(differs, "different seeds should give different fields");
    }

    #[test]
    fn test_octave_count_changes_output() {
        let one = NoiseSource::new(NoiseConfig {
            octaves: 1,
            ..NoiseConfig::default()
        });
        let six = NoiseSource::new(NoiseConfig::default());
        let differs = (0..64).any(|i| {
            let x = 10.0 + i as f32 * 71.0;
            one.sample(x, 3.0 * x) != six.sample(x, 3.0 * x)
        });
        assert!(differs, "octave count should affect the field");
    }

    #[test]
    fn test_amplitude_scales_output() {
        let base = NoiseSource::new(NoiseConfig::default());
        let doubled = NoiseSource::new(NoiseConfig {
            amplitude: 2.0,
            ..NoiseConfig::default()
        });
        for i in 0..16 {
            let x = i as f32 * 123.0;
            assert_eq!(doubled.sample(x, x), base.sample(x, x) * 2.0);
        }
    }

    #[test]
    fn test_output_bounded() {
        let noise = NoiseSource::new(NoiseConfig::default());
        for i in 0..256 {
            let v = noise.sample(i as f32 * 17.0, i as f32 * 29.0);
            assert!((-1.0..=1.0).contains(&v), "fbm sample {v} out of [-1, 1]");
        }
    }
}
