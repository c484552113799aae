use serde::{Deserialize, Serialize};

use crate::config::{
    FLAT_SPLAT_TEXTURE, FLAT_SPLAT_TILE_SIZE, STEEP_SPLAT_TEXTURE, STEEP_SPLAT_TILE_SIZE,
};

/// One texture layer of the terrain blend.
///
/// `texture` is an opaque handle (an asset path) resolved by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplatPrototype {
    pub texture: String,
    pub tile_size: f32,
}

impl SplatPrototype {
    pub fn new(texture: impl Into<String>, tile_size: f32) -> Self {
        Self {
            texture: texture.into(),
            tile_size,
        }
    }
}

/// The two blend layers, in blend-channel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplatPrototypes {
    pub steep: SplatPrototype,
    pub flat: SplatPrototype,
}

impl Default for SplatPrototypes {
    fn default() -> Self {
        Self {
            steep: SplatPrototype::new(STEEP_SPLAT_TEXTURE, STEEP_SPLAT_TILE_SIZE),
            flat: SplatPrototype::new(FLAT_SPLAT_TEXTURE, FLAT_SPLAT_TILE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers_match_blend_channels() {
        let splats = SplatPrototypes::default();
        assert_eq!(
            splats.steep,
            SplatPrototype::new(STEEP_SPLAT_TEXTURE, STEEP_SPLAT_TILE_SIZE)
        );
        assert_eq!(
            splats.flat,
            SplatPrototype::new(FLAT_SPLAT_TEXTURE, FLAT_SPLAT_TILE_SIZE)
        );
    }
}
