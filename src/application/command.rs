use crate::domain::{Cell, DrawMode, PatternId, Rule, Tool};

/// Mouse button pressed on the grid
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    /// Draws live cells
    Primary,
    /// Erases cells
    Secondary,
}

impl PointerButton {
    pub const fn mode(self) -> DrawMode {
        match self {
            PointerButton::Primary => DrawMode::Draw,
            PointerButton::Secondary => DrawMode::Erase,
        }
    }
}

/// Discrete input understood by the simulation controller
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Command {
    ToggleRun,
    Clear,
    LoadPattern(PatternId),
    SetTool(Tool),
    ResizeBrush(i32),
    PointerDown { cell: Cell, button: PointerButton },
    PointerDrag(Cell),
    PointerUp,
    SetRule(Rule),
    CycleRule,
    Quit,
}

impl Command {
    /// Commands that modify cells or editing state, refused while running
    pub const fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::SetTool(_)
                | Command::ResizeBrush(_)
                | Command::PointerDown { .. }
                | Command::PointerDrag(_)
        )
    }
}

/// Whether the control loop should keep going after a command
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}
