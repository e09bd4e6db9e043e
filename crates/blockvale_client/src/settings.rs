use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use blockvale_shared::{block::TIER_IRON, config::WorldConfig, hash::parse_seed};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chunk_manager::DEFAULT_VIEW_DISTANCE;
use crate::edit::GameMode;

const MIN_VIEW_DISTANCE: i32 = 0;
const MAX_VIEW_DISTANCE: i32 = 16;
const MIN_TICK_RATE: u32 = 1;
const MAX_TICK_RATE: u32 = 240;
const MIN_VIEWER_SPEED: f32 = 0.0;
const MAX_VIEWER_SPEED: f32 = 64.0;
const RANDOM_SEED_RANGE: u64 = 1_000_000_000;

/// Seed as written in the settings file: a number, or any text to hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedSetting {
    Number(i64),
    Text(String),
}

impl SeedSetting {
    pub fn resolve(&self) -> u64 {
        match self {
            Self::Number(value) => *value as u64,
            Self::Text(text) => parse_seed(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Missing means a fresh random seed per run.
    #[serde(default)]
    pub seed: Option<SeedSetting>,
    #[serde(default = "default_view_distance")]
    pub view_distance: i32,
    /// Frames to run before exiting; 0 runs until interrupted.
    #[serde(default = "default_frames")]
    pub frames: u64,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    #[serde(default)]
    pub game_mode: GameMode,
    /// Blocks per second the scripted viewer walks along +X.
    #[serde(default = "default_viewer_speed")]
    pub viewer_speed: f32,
    #[serde(default = "default_tool_tier")]
    pub tool_tier: u8,
    #[serde(default)]
    pub world: WorldConfig,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            seed: None,
            view_distance: default_view_distance(),
            frames: default_frames(),
            tick_rate: default_tick_rate(),
            game_mode: GameMode::default(),
            viewer_speed: default_viewer_speed(),
            tool_tier: default_tool_tier(),
            world: WorldConfig::default(),
        }
    }
}

impl ClientSettings {
    pub fn sanitize(mut self) -> Self {
        self.view_distance = self.view_distance.clamp(MIN_VIEW_DISTANCE, MAX_VIEW_DISTANCE);
        self.tick_rate = self.tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE);
        self.viewer_speed = if self.viewer_speed.is_finite() {
            self.viewer_speed.clamp(MIN_VIEWER_SPEED, MAX_VIEWER_SPEED)
        } else {
            default_viewer_speed()
        };
        self.tool_tier = self.tool_tier.min(TIER_IRON);
        self
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = toml::from_str::<Self>(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parsed.sanitize())
    }

    /// Loads `path`. A missing file is created with the defaults, which are
    /// used even if writing it fails. Any other failure is returned.
    pub fn load_or_create(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                let settings = Self::default();
                match settings.save(path) {
                    Ok(()) => info!("Created default settings at {}", path.display()),
                    Err(err) => warn!("Failed to create default settings: {err}"),
                }
                Ok(settings)
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let settings = self.clone().sanitize();
        let serialized = toml::to_string_pretty(&settings).map_err(SettingsError::Serialize)?;
        fs::write(path, serialized).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Numeric seed for this run. Draws a random one when none is set.
    pub fn resolve_seed(&self) -> u64 {
        match &self.seed {
            Some(seed) => seed.resolve(),
            None => random_seed(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Read {
        path: PathBuf,
        source: io::Error,
    },
    Write {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read settings {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write settings {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to deserialize settings {}: {source}", path.display())
            }
            Self::Serialize(source) => write!(f, "failed to serialize settings: {source}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(source) => Some(source),
        }
    }
}

fn random_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mixed = now.as_secs() ^ u64::from(now.subsec_nanos()).rotate_left(17);
    mixed % RANDOM_SEED_RANGE
}

fn default_view_distance() -> i32 {
    DEFAULT_VIEW_DISTANCE
}

fn default_frames() -> u64 {
    120
}

fn default_tick_rate() -> u32 {
    60
}

fn default_viewer_speed() -> f32 {
    4.0
}

fn default_tool_tier() -> u8 {
    1
}
