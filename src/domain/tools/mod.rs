//! Drawing tools: which cells a click or drag touches.

mod fill;
mod line;
mod shapes;

use std::collections::BTreeSet;

use rand::Rng;

use super::{Bounds, Cell, Grid};

pub use fill::flood_fill;
pub use line::{line, line_path, path_within};
pub use shapes::{SPRAY_DENSITY, circle, single, spray, square};

/// Cells affected by an edit, ordered so effect dispatch is deterministic
pub type CellSet = BTreeSet<Cell>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tool {
    #[default]
    Single,
    Circle,
    Square,
    Line,
    Spray,
    Fill,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Single,
        Tool::Circle,
        Tool::Square,
        Tool::Line,
        Tool::Spray,
        Tool::Fill,
        Tool::Eraser,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Tool::Single => "Single",
            Tool::Circle => "Circle",
            Tool::Square => "Square",
            Tool::Line => "Line",
            Tool::Spray => "Spray",
            Tool::Fill => "Fill",
            Tool::Eraser => "Eraser",
        }
    }

    /// Whether dragging with the pointer held keeps painting
    pub const fn paints_on_drag(self) -> bool {
        !matches!(self, Tool::Line | Tool::Fill)
    }

    /// Whether the brush size changes the footprint
    pub const fn uses_brush_size(self) -> bool {
        matches!(self, Tool::Circle | Tool::Square | Tool::Spray | Tool::Eraser)
    }

    /// Lookup by lowercase name, as used in configuration files
    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Whether an edit makes cells alive or dead
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DrawMode {
    #[default]
    Draw,
    Erase,
}

impl DrawMode {
    /// State the affected cells end up in
    pub const fn target(self) -> bool {
        matches!(self, DrawMode::Draw)
    }
}

/// Brush radius, always within `[Brush::MIN, Brush::MAX]`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Brush(u32);

impl Brush {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(size: i64) -> Self {
        Self(size.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    pub const fn size(self) -> u32 {
        self.0
    }

    pub fn resized(self, delta: i32) -> Self {
        Self::new(i64::from(self.0) + i64::from(delta))
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self(2)
    }
}

/// Footprint of a tool stamped once at `anchor`. Line and Fill have no brush
/// footprint of their own and stamp the anchor cell only.
pub fn stamp<R: Rng>(tool: Tool, anchor: Cell, size: u32, bounds: Bounds, rng: &mut R) -> CellSet {
    match tool {
        Tool::Single | Tool::Line | Tool::Fill => single(anchor, bounds),
        Tool::Circle => circle(anchor, size, bounds),
        Tool::Square | Tool::Eraser => square(anchor, size, bounds),
        Tool::Spray => spray(anchor, size, bounds, rng),
    }
}

/// ToolEngine holds the active tool and brush, plus the pending anchor of a
/// two-click line.
#[derive(Clone, Debug, Default)]
pub struct ToolEngine {
    tool: Tool,
    brush: Brush,
    pending_anchor: Option<Cell>,
}

impl ToolEngine {
    pub fn new(tool: Tool, brush: Brush) -> Self {
        Self {
            tool,
            brush,
            pending_anchor: None,
        }
    }

    pub const fn tool(&self) -> Tool {
        self.tool
    }

    pub const fn brush_size(&self) -> u32 {
        self.brush.size()
    }

    /// First endpoint of a line waiting for its second click
    pub const fn pending_anchor(&self) -> Option<Cell> {
        self.pending_anchor
    }

    /// Switch tools, abandoning any half-drawn line
    pub fn select(&mut self, tool: Tool) {
        self.tool = tool;
        self.pending_anchor = None;
    }

    /// Grow or shrink the brush, returning the clamped size
    pub fn resize_brush(&mut self, delta: i32) -> u32 {
        self.brush = self.brush.resized(delta);
        self.brush.size()
    }

    /// The eraser erases whatever button was pressed
    pub const fn effective_mode(&self, requested: DrawMode) -> DrawMode {
        match self.tool {
            Tool::Eraser => DrawMode::Erase,
            _ => requested,
        }
    }

    /// Cells touched by a click at `anchor`.
    ///
    /// Line takes two clicks: the first records the anchor and returns nothing,
    /// the second returns the rasterised segment and forgets the anchor.
    /// Fill returns the 4-connected region to flip, or nothing when it already
    /// has the target state.
    pub fn affected_cells<R: Rng>(
        &mut self,
        anchor: Cell,
        mode: DrawMode,
        grid: &Grid,
        rng: &mut R,
    ) -> CellSet {
        let bounds = grid.bounds();
        match self.tool {
            Tool::Line => match self.pending_anchor.take() {
                Some(start) => line(start, anchor, bounds),
                None => {
                    self.pending_anchor = Some(anchor);
                    CellSet::new()
                }
            },
            Tool::Fill => flood_fill(grid, anchor, self.effective_mode(mode).target()),
            tool => stamp(tool, anchor, self.brush.size(), bounds, rng),
        }
    }

    /// Cells touched by dragging from `from` to `to`: the brush stamped on every
    /// cell of the connecting segment except `from`, which was already painted.
    pub fn stroke_cells<R: Rng>(
        &self,
        from: Cell,
        to: Cell,
        bounds: Bounds,
        rng: &mut R,
    ) -> CellSet {
        if !self.tool.paints_on_drag() {
            return CellSet::new();
        }
        // only path cells whose footprint can reach the grid
        let reach = i64::from(self.brush.size());
        let lo = (-reach, -reach);
        let hi = (bounds.cols as i64 - 1 + reach, bounds.rows as i64 - 1 + reach);
        path_within(from, to, lo, hi)
            .filter(|&(step, _)| step > 0)
            .flat_map(|(_, cell)| stamp(self.tool, cell, self.brush.size(), bounds, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_brush_is_clamped() {
        assert_eq!(Brush::new(0).size(), 1);
        assert_eq!(Brush::new(-5).size(), 1);
        assert_eq!(Brush::new(11).size(), 10);
        assert_eq!(Brush::new(4).resized(100).size(), 10);
        assert_eq!(Brush::new(4).resized(-2).size(), 2);
    }

    #[test]
    fn test_line_two_click_protocol() {
        let grid = Grid::new(10, 10).unwrap();
        let mut tools = ToolEngine::new(Tool::Line, Brush::default());
        let mut rng = rng();

        let first = tools.affected_cells(Cell::new(0, 0), DrawMode::Draw, &grid, &mut rng);
        assert!(first.is_empty());
        assert_eq!(tools.pending_anchor(), Some(Cell::new(0, 0)));

        let second = tools.affected_cells(Cell::new(3, 3), DrawMode::Draw, &grid, &mut rng);
        assert_eq!(second.len(), 4);
        assert_eq!(tools.pending_anchor(), None);
    }

    #[test]
    fn test_switching_tool_forgets_line_anchor() {
        let grid = Grid::new(10, 10).unwrap();
        let mut tools = ToolEngine::new(Tool::Line, Brush::default());
        tools.affected_cells(Cell::new(1, 1), DrawMode::Draw, &grid, &mut rng());
        tools.select(Tool::Circle);
        tools.select(Tool::Line);
        assert_eq!(tools.pending_anchor(), None);
    }

    #[test]
    fn test_eraser_forces_erase() {
        let tools = ToolEngine::new(Tool::Eraser, Brush::default());
        assert_eq!(tools.effective_mode(DrawMode::Draw), DrawMode::Erase);
        let square_tools = ToolEngine::new(Tool::Square, Brush::default());
        assert_eq!(square_tools.effective_mode(DrawMode::Draw), DrawMode::Draw);
    }

    #[test]
    fn test_fill_uses_mode_target() {
        let grid = Grid::new(3, 3).unwrap();
        let mut tools = ToolEngine::new(Tool::Fill, Brush::default());
        let mut rng = rng();
        assert_eq!(
            tools.affected_cells(Cell::new(1, 1), DrawMode::Draw, &grid, &mut rng).len(),
            9
        );
        assert!(
            tools
                .affected_cells(Cell::new(1, 1), DrawMode::Erase, &grid, &mut rng)
                .is_empty()
        );
    }

    #[test]
    fn test_all_tools_stay_in_bounds() {
        let mut grid = Grid::new(8, 6).unwrap();
        grid.set_cell(Cell::new(2, 2), true);
        let bounds = grid.bounds();
        let anchors = [
            Cell::new(0, 0),
            Cell::new(7, 5),
            Cell::new(-4, 2),
            Cell::new(3, 40),
            Cell::new(-100, -100),
        ];
        let mut rng = rng();
        for tool in Tool::ALL {
            for size in [0, 1, 5, 10] {
                for &anchor in &anchors {
                    let mut tools = ToolEngine::new(tool, Brush::new(size));
                    for mode in [DrawMode::Draw, DrawMode::Erase] {
                        // Twice, so the line tool produces a segment
                        for _ in 0..2 {
                            let cells = tools.affected_cells(anchor, mode, &grid, &mut rng);
                            assert!(cells.iter().all(|&c| bounds.contains(c)), "{tool:?}");
                        }
                    }
                    let stroke = tools.stroke_cells(anchor, Cell::new(4, 3), bounds, &mut rng);
                    assert!(stroke.iter().all(|&c| bounds.contains(c)));
                }
            }
        }
    }

    #[test]
    fn test_extreme_anchors_are_empty() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_cell(Cell::new(2, 2), true);
        let bounds = grid.bounds();
        let extremes = [
            Cell::new(i32::MAX, 0),
            Cell::new(i32::MIN, 0),
            Cell::new(0, i32::MAX),
            Cell::new(i32::MIN, i32::MAX),
        ];
        let mut rng = rng();
        for tool in Tool::ALL {
            for &anchor in &extremes {
                let mut tools = ToolEngine::new(tool, Brush::new(10));
                for mode in [DrawMode::Draw, DrawMode::Erase] {
                    let cells = tools.affected_cells(anchor, mode, &grid, &mut rng);
                    assert!(cells.is_empty(), "{tool:?} at {anchor:?}");
                }
                let stroke = tools.stroke_cells(anchor, Cell::new(2, 2), bounds, &mut rng);
                assert!(stroke.iter().all(|&c| bounds.contains(c)), "{tool:?}");
            }
        }

        // a line from a far first click is clipped to the grid
        let mut line_tool = ToolEngine::new(Tool::Line, Brush::default());
        line_tool.affected_cells(Cell::new(i32::MIN, 0), DrawMode::Draw, &grid, &mut rng);
        let cells = line_tool.affected_cells(Cell::new(2, 2), DrawMode::Draw, &grid, &mut rng);
        assert!(cells.contains(&Cell::new(2, 2)));
        assert!(cells.iter().all(|&c| bounds.contains(c)));
    }

    #[test]
    fn test_stroke_from_far_outside_reaches_grid() {
        let tools = ToolEngine::new(Tool::Single, Brush::default());
        let bounds = Bounds::new(10, 10);
        let cells = tools.stroke_cells(Cell::new(i32::MIN, 4), Cell::new(3, 4), bounds, &mut rng());
        let expected: CellSet = (0..=3).map(|col| Cell::new(col, 4)).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_out_of_bounds_anchor_is_empty() {
        let grid = Grid::new(5, 5).unwrap();
        let mut rng = rng();
        for tool in [Tool::Single, Tool::Circle, Tool::Square, Tool::Fill, Tool::Eraser] {
            let mut tools = ToolEngine::new(tool, Brush::new(1));
            let cells = tools.affected_cells(Cell::new(-10, 20), DrawMode::Draw, &grid, &mut rng);
            assert!(cells.is_empty(), "{tool:?}");
        }
    }

    #[test]
    fn test_stroke_fills_gaps() {
        let tools = ToolEngine::new(Tool::Single, Brush::default());
        let bounds = Bounds::new(20, 20);
        let cells = tools.stroke_cells(Cell::new(0, 5), Cell::new(6, 5), bounds, &mut rng());
        assert_eq!(cells.len(), 6);
        assert!(!cells.contains(&Cell::new(0, 5)));
        assert!(cells.contains(&Cell::new(6, 5)));
    }

    #[test]
    fn test_line_and_fill_ignore_drags() {
        let bounds = Bounds::new(20, 20);
        for tool in [Tool::Line, Tool::Fill] {
            let tools = ToolEngine::new(tool, Brush::default());
            assert!(
                tools
                    .stroke_cells(Cell::new(0, 0), Cell::new(5, 5), bounds, &mut rng())
                    .is_empty()
            );
        }
    }

    #[test]
    fn test_tool_from_name() {
        assert_eq!(Tool::from_name("spray"), Some(Tool::Spray));
        assert_eq!(Tool::from_name("ERASER"), Some(Tool::Eraser));
        assert_eq!(Tool::from_name("pencil"), None);
    }
}
