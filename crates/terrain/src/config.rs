pub const DEFAULT_SEED: i32 = 1;
pub const DEFAULT_FREQUENCY: f32 = 0.002;
pub const DEFAULT_OCTAVES: i32 = 6;
pub const DEFAULT_AMPLITUDE: f32 = 1.0;
pub const DEFAULT_LACUNARITY: f32 = 2.0;
pub const DEFAULT_PERSISTENCE: f32 = 0.5;

pub const DEFAULT_TILES_X: usize = 2;
pub const DEFAULT_TILES_Z: usize = 2;

/// Heightmap side length. Must be `2^k + 1` so neighbouring tiles share an edge row.
pub const DEFAULT_HEIGHTMAP_SIZE: usize = 513;
/// Alphamap side length. Must be `2^k`.
pub const DEFAULT_ALPHAMAP_SIZE: usize = 1024;
/// Smallest alphamap that still has distinct first and last cells.
pub const MIN_ALPHAMAP_SIZE: usize = 2;

pub const DEFAULT_TERRAIN_SIZE: f32 = 2048.0;
pub const DEFAULT_TERRAIN_HEIGHT: f32 = 512.0;

/// Lower values draw the terrain at a higher level of detail.
pub const DEFAULT_PIXEL_ERROR: f32 = 6.0;
/// Distance beyond which the low-res base map is drawn.
pub const DEFAULT_BASEMAP_DISTANCE: f32 = 1000.0;

pub const STEEP_SPLAT_TEXTURE: &str = "textures/rock.png";
pub const STEEP_SPLAT_TILE_SIZE: f32 = 10.0;
pub const FLAT_SPLAT_TEXTURE: &str = "textures/grass.png";
pub const FLAT_SPLAT_TILE_SIZE: f32 = 2.0;

/// Steepness is reported as an angle in [0, MAX_STEEPNESS_DEGREES].
pub const MAX_STEEPNESS_DEGREES: f32 = 90.0;
