//! Configuration loading and parsing.
//!
//! Parses `keyvim.toml` (or an override path provided by the binary). Every
//! field is optional; a missing file or a parse error yields the defaults, which
//! reproduce the stock keymap: a 16 slot command buffer, a 16 entry insertion
//! log, counts capped at 500, base layer 0, command layer 3, number layer 5.
//!
//! Capacities are bounded on purpose (the engine runs inside a key handler and
//! must stay small and deterministic). Out-of-range values are clamped by
//! `Config::sanitize`, which logs each adjustment under the `config` target.
//! Unknown fields are ignored to allow forward evolution without warnings.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

pub const MIN_COMMAND_CAPACITY: usize = 2;
pub const MAX_COMMAND_CAPACITY: usize = 32;
pub const MIN_INSERTION_CAPACITY: usize = 1;
pub const MAX_INSERTION_CAPACITY: usize = 64;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    /// Command buffer slots; the longest pending command is one shorter.
    #[serde(default = "BufferConfig::default_command_capacity")]
    pub command_capacity: usize,
    #[serde(default = "BufferConfig::default_insertion_capacity")]
    pub insertion_capacity: usize,
    #[serde(default = "BufferConfig::default_max_count")]
    pub max_count: u32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            command_capacity: Self::default_command_capacity(),
            insertion_capacity: Self::default_insertion_capacity(),
            max_count: Self::default_max_count(),
        }
    }
}

impl BufferConfig {
    const fn default_command_capacity() -> usize {
        16
    }
    const fn default_insertion_capacity() -> usize {
        16
    }
    const fn default_max_count() -> u32 {
        500
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LayerConfig {
    #[serde(default = "LayerConfig::default_insert")]
    pub insert: u8,
    #[serde(default = "LayerConfig::default_command")]
    pub command: u8,
    #[serde(default = "LayerConfig::default_number")]
    pub number: u8,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            insert: Self::default_insert(),
            command: Self::default_command(),
            number: Self::default_number(),
        }
    }
}

impl LayerConfig {
    const fn default_insert() -> u8 {
        0
    }
    const fn default_command() -> u8 {
        3
    }
    const fn default_number() -> u8 {
        5
    }
}

/// Indicator color shown while `layer` is the most recently activated layer.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub layer: u8,
    pub rgb: [u8; 3],
}

fn default_indicators() -> Vec<IndicatorConfig> {
    [
        (0, [250, 255, 255]),
        (1, [0, 0, 255]),
        (3, [0, 255, 0]),
        (4, [59, 255, 0]),
        (6, [0, 255, 255]),
    ]
    .into_iter()
    .map(|(layer, rgb)| IndicatorConfig { layer, rgb })
    .collect()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub buffers: BufferConfig,
    #[serde(default)]
    pub layers: LayerConfig,
    #[serde(default = "default_indicators")]
    pub indicators: Vec<IndicatorConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            buffers: BufferConfig::default(),
            layers: LayerConfig::default(),
            indicators: default_indicators(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("keyvim.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("keyvim").join("keyvim.toml");
    }
    PathBuf::from("keyvim.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
            };
            cfg.sanitize();
            Ok(cfg)
        }
        Err(e) => {
            info!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp capacities and the count ceiling into supported ranges. Returns
    /// `true` when anything changed.
    pub fn sanitize(&mut self) -> bool {
        let buffers = &mut self.file.buffers;
        let mut changed = false;

        let raw = buffers.command_capacity;
        let clamped = raw.clamp(MIN_COMMAND_CAPACITY, MAX_COMMAND_CAPACITY);
        if clamped != raw {
            info!(target: "config", raw, clamped, "command_capacity_clamped");
            buffers.command_capacity = clamped;
            changed = true;
        }

        let raw = buffers.insertion_capacity;
        let clamped = raw.clamp(MIN_INSERTION_CAPACITY, MAX_INSERTION_CAPACITY);
        if clamped != raw {
            info!(target: "config", raw, clamped, "insertion_capacity_clamped");
            buffers.insertion_capacity = clamped;
            changed = true;
        }

        if buffers.max_count == 0 {
            info!(target: "config", raw = 0, clamped = 1, "max_count_clamped");
            buffers.max_count = 1;
            changed = true;
        }
        changed
    }

    pub fn buffers(&self) -> &BufferConfig {
        &self.file.buffers
    }

    pub fn layers(&self) -> LayerConfig {
        self.file.layers
    }

    /// Indicator color for `layer`; the first matching entry wins.
    pub fn indicator_for(&self, layer: u8) -> Option<[u8; 3]> {
        self.file
            .indicators
            .iter()
            .find(|i| i.layer == layer)
            .map(|i| i.rgb)
    }
}
