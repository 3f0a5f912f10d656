//! Configuration loaded from an optional TOML file.
//!
//! Every field has a default, so a missing file or an empty one is valid.
//! Command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::TickClock;
use crate::domain::{Brush, PatternId, Rule, RuleParseError, Tool};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Rule(#[from] RuleParseError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
    pub tools: ToolsConfig,
    pub effects: EffectsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Generations per second while running
    pub steps_per_second: f32,
    /// Preset name or B/S notation
    pub rule: String,
    pub initial_pattern: PatternId,
    /// Fixed seed for spray and random patterns; entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Cell edge in pixels at zoom 1
    pub cell_size: f32,
    pub window_width: i32,
    pub window_height: i32,
    /// Generations a new cell takes to reach full brightness
    pub fade_in_generations: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub tool: String,
    pub brush_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    pub particles: bool,
    /// Ring buffer capacity of the particle field
    pub max_particles: usize,
    pub sound: bool,
    pub volume: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cols: 80, rows: 60 }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_second: 10.0,
            rule: "conway".to_owned(),
            initial_pattern: PatternId::Random,
            seed: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            window_width: 1000,
            window_height: 700,
            fade_in_generations: 5,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tool: "single".to_owned(),
            brush_size: 2,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            particles: true,
            max_particles: 2048,
            sound: true,
            volume: 0.15,
        }
    }
}

impl Config {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.grid.cols == 0 || self.grid.rows == 0 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.cols, self.grid.rows
            ));
        }
        let rate = self.simulation.steps_per_second;
        if !(TickClock::MIN_RATE..=TickClock::MAX_RATE).contains(&rate) {
            return invalid(format!(
                "steps_per_second must be in [{}, {}], got {rate}",
                TickClock::MIN_RATE,
                TickClock::MAX_RATE
            ));
        }
        if !(Brush::MIN..=Brush::MAX).contains(&self.tools.brush_size) {
            return invalid(format!(
                "brush_size must be in [{}, {}], got {}",
                Brush::MIN,
                Brush::MAX,
                self.tools.brush_size
            ));
        }
        if self.tool().is_none() {
            return invalid(format!("unknown tool `{}`", self.tools.tool));
        }
        if self.display.cell_size <= 0.0 {
            return invalid(format!("cell_size must be positive, got {}", self.display.cell_size));
        }
        if self.effects.max_particles == 0 {
            return invalid("max_particles must be positive".to_owned());
        }
        if !(0.0..=1.0).contains(&self.effects.volume) {
            return invalid(format!("volume must be in [0, 1], got {}", self.effects.volume));
        }
        self.rule()?;
        Ok(())
    }

    pub fn rule(&self) -> Result<Rule, RuleParseError> {
        self.simulation.rule.parse()
    }

    pub fn tool(&self) -> Option<Tool> {
        Tool::from_name(&self.tools.tool)
    }
}
