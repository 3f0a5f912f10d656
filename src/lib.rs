// Domain layer - grid, rules, tools, patterns, effect notifications
pub mod domain;

// Application layer - command handling, stepping, clock, camera
pub mod application;

pub mod config;

// Presentation layer - macroquad input, rendering, panel, sound
pub mod ui;
pub mod rendering;
pub mod input;
pub mod audio;

// Re-exports for convenience
pub use application::{Camera, Command, Flow, SimulationController, TickClock};
pub use config::{Config, ConfigError};
pub use domain::{Cell, EffectSink, Grid, PatternId, Rule, Tool};
