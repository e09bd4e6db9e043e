use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_HEIGHT: i32 = 8;
pub const DEFAULT_TERRAIN_AMPLITUDE: i32 = 6;

/// Terrain shaping parameters fixed at world creation. Values are used as-is;
/// out-of-range heights are clamped by the generator, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_base_height")]
    pub base_height: i32,
    #[serde(default = "default_terrain_amplitude")]
    pub terrain_amplitude: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            base_height: default_base_height(),
            terrain_amplitude: default_terrain_amplitude(),
        }
    }
}

fn default_base_height() -> i32 {
    DEFAULT_BASE_HEIGHT
}

fn default_terrain_amplitude() -> i32 {
    DEFAULT_TERRAIN_AMPLITUDE
}
