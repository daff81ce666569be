//! Game settings.
//!
//! Loaded from a JSON file (`config/settings.json` by default). Every field
//! has a default, so a missing file simply means default settings.

use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assets::LoadError;

pub const DEFAULT_CONFIG_PATH: &str = "config/settings.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub graphics: GraphicsConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub assets: AssetConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Window width in pixels
    pub window_width: u32,

    /// Window height in pixels
    pub window_height: u32,

    /// Number of rays (screen columns) cast per frame
    pub resolution: usize,

    /// Distance from the eye to the view plane; smaller values widen the view
    pub focal_length: f32,

    /// Maximum ray length in grid units
    pub range: f32,

    /// Distance over which walls fade to black
    pub light_range: f32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 540,
            resolution: 320,
            focal_length: 0.8,
            range: 14.0,
            light_range: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Cells along each side of the square map
    pub grid_size: usize,

    /// Probability that a cell is a wall
    pub wall_density: f32,

    /// Fixed random seed; a fresh one is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            wall_density: 0.3,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_position: [f32; 2],

    /// Starting view direction in radians
    pub start_direction: f32,

    /// Grid units per second
    pub move_speed: f32,

    /// Radians per second
    pub turn_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_position: [15.3, 1.2],
            start_direction: PI * 0.3,
            move_speed: 3.0,
            turn_speed: PI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub sky: PathBuf,
    pub wall: PathBuf,
    pub weapon: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            sky: PathBuf::from("assets/deathvalley_panorama.jpg"),
            wall: PathBuf::from("assets/wall_texture.jpg"),
            weapon: PathBuf::from("assets/knife_hand.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub target_fps: u32,

    /// Ticks longer than this are dropped instead of simulated
    pub max_frame_seconds: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_seconds: 0.2,
        }
    }
}

impl GameConfig {
    /// Load configuration from `path`, or the defaults if it doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }
}
