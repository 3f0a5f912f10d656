use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Command, Flow};
use crate::domain::{
    Bounds, Cell, CellSet, DrawMode, EffectSink, Grid, GridError, PatternId, Rule, Tool,
    ToolEngine,
};

/// A pointer held down on the grid
#[derive(Clone, Copy, Debug)]
struct Stroke {
    mode: DrawMode,
    last: Cell,
}

/// SimulationController orchestrates the simulation: it owns the grid, the
/// tools and the run state, turns commands into state changes, and reports
/// every resulting birth and death to an [`EffectSink`].
///
/// Editing is only possible while paused, so stepping and drawing never touch
/// the grid in the same tick.
pub struct SimulationController {
    grid: Grid,
    tools: ToolEngine,
    generation: u64,
    running: bool,
    stroke: Option<Stroke>,
    rng: StdRng,
}

impl SimulationController {
    /// Paused controller over an empty grid, seeded from entropy
    pub fn new(cols: usize, rows: usize) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(cols, rows)?,
            tools: ToolEngine::default(),
            generation: 0,
            running: false,
            stroke: None,
            rng: StdRng::seed_from_u64(rand::random()),
        })
    }

    /// Fix the random source used by spray and the random pattern
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_tools(mut self, tools: ToolEngine) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.grid.set_rule(rule);
        self
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub const fn current_tool(&self) -> Tool {
        self.tools.tool()
    }

    pub const fn brush_size(&self) -> u32 {
        self.tools.brush_size()
    }

    pub const fn rule(&self) -> Rule {
        self.grid.rule()
    }

    pub const fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    /// First endpoint of a half-drawn line
    pub const fn pending_line_anchor(&self) -> Option<Cell> {
        self.tools.pending_anchor()
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn tools(&self) -> &ToolEngine {
        &self.tools
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command, sink: &mut impl EffectSink) -> Flow {
        if self.running && command.is_edit() {
            log::debug!("ignoring {command:?} while running");
            return Flow::Continue;
        }

        match command {
            Command::ToggleRun => self.toggle_run(),
            Command::Clear => self.clear(),
            Command::LoadPattern(pattern) => self.load_pattern(pattern, sink),
            Command::SetTool(tool) => {
                self.tools.select(tool);
                self.stroke = None;
                log::debug!("tool: {}", tool.name());
            }
            Command::ResizeBrush(delta) => {
                let size = self.tools.resize_brush(delta);
                log::debug!("brush size: {size}");
            }
            Command::PointerDown { cell, button } => {
                let mode = self.tools.effective_mode(button.mode());
                let cells = self
                    .tools
                    .affected_cells(cell, mode, &self.grid, &mut self.rng);
                self.apply_drawing(&cells, mode, sink);
                self.stroke = Some(Stroke { mode, last: cell });
            }
            Command::PointerDrag(cell) => self.drag_to(cell, sink),
            Command::PointerUp => self.stroke = None,
            Command::SetRule(rule) => self.set_rule(rule),
            Command::CycleRule => self.set_rule(self.grid.rule().next_preset()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Advance one generation if running. Returns whether a step happened.
    pub fn tick(&mut self, sink: &mut impl EffectSink) -> bool {
        if !self.running {
            return false;
        }
        let outcome = self.grid.step();
        self.generation += 1;
        log::debug!(
            "generation {}: {} births, {} deaths",
            self.generation,
            outcome.births.len(),
            outcome.deaths.len()
        );
        for &cell in &outcome.births {
            sink.on_birth(cell);
        }
        for &cell in &outcome.deaths {
            sink.on_death(cell);
        }
        true
    }

    /// Bring every cell in `cells` to the mode's target state, reporting each
    /// change. Returns how many cells changed.
    pub fn apply_drawing(
        &mut self,
        cells: &CellSet,
        mode: DrawMode,
        sink: &mut impl EffectSink,
    ) -> usize {
        let target = mode.target();
        let mut changed = 0;
        for &cell in cells {
            if self.grid.is_alive(cell) == target || !self.grid.set_cell(cell, target) {
                continue;
            }
            changed += 1;
            if target {
                sink.on_birth(cell);
            } else {
                sink.on_death(cell);
            }
        }
        changed
    }

    fn toggle_run(&mut self) {
        self.running = !self.running;
        self.stroke = None;
        log::info!(
            "{} at generation {}",
            if self.running { "running" } else { "paused" },
            self.generation
        );
    }

    fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.running = false;
        self.stroke = None;
        log::info!("grid cleared");
    }

    fn load_pattern(&mut self, pattern: PatternId, sink: &mut impl EffectSink) {
        self.grid.clear();
        self.generation = 0;
        self.stroke = None;
        for cell in pattern.instantiate(self.grid.bounds(), &mut self.rng) {
            self.grid.set_cell(cell, true);
        }
        log::info!(
            "loaded {} ({} cells)",
            pattern.name(),
            self.grid.population()
        );
        sink.on_pattern_loaded(pattern);
    }

    fn drag_to(&mut self, cell: Cell, sink: &mut impl EffectSink) {
        let Some(stroke) = self.stroke else {
            return;
        };
        if stroke.last == cell {
            return;
        }
        let cells = self
            .tools
            .stroke_cells(stroke.last, cell, self.grid.bounds(), &mut self.rng);
        self.apply_drawing(&cells, stroke.mode, sink);
        self.stroke = Some(Stroke { last: cell, ..stroke });
    }

    fn set_rule(&mut self, rule: Rule) {
        self.grid.set_rule(rule);
        log::info!("rule: {rule}");
    }
}
