mod cell;
mod error;
mod grid;
mod rules;
pub mod effects;
pub mod patterns;
pub mod tools;

pub use cell::{Bounds, Cell};
pub use effects::{EffectEvent, EffectLog, EffectSink, NullSink};
pub use error::{GridError, RuleParseError, UnknownPattern};
pub use grid::{Grid, PARALLEL_THRESHOLD, StepOutcome};
pub use patterns::PatternId;
pub use rules::Rule;
pub use tools::{Brush, CellSet, DrawMode, Tool, ToolEngine};
