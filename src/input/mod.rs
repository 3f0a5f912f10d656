use macroquad::prelude::*;

use crate::application::{Camera, Command, PointerButton};
use crate::domain::{Cell, PatternId, Tool};
use crate::ui::{Button, grid_area_width};

/// Steps-per-second change for one Up/Down press
pub const SPEED_STEP: f32 = 1.0;

/// Everything the controller and clock need from one frame of input
#[derive(Debug, Default)]
pub struct FrameInput {
    pub commands: Vec<Command>,
    pub speed_delta: f32,
}

/// Mouse buttons and the grid cell under the cursor for one frame.
/// `cell` is `None` while the cursor is over the side panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSample {
    pub primary_pressed: bool,
    pub secondary_pressed: bool,
    pub primary_down: bool,
    pub secondary_down: bool,
    pub cell: Option<Cell>,
}

/// Turns raw button state into down/drag/up commands
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    held: Option<PointerButton>,
    last: Option<Cell>,
}

impl PointerTracker {
    pub fn update(&mut self, sample: PointerSample) -> Option<Command> {
        match self.held {
            None => {
                let cell = sample.cell?;
                let button = if sample.primary_pressed {
                    PointerButton::Primary
                } else if sample.secondary_pressed {
                    PointerButton::Secondary
                } else {
                    return None;
                };
                self.held = Some(button);
                self.last = Some(cell);
                Some(Command::PointerDown { cell, button })
            }
            Some(button) => {
                let still_down = match button {
                    PointerButton::Primary => sample.primary_down,
                    PointerButton::Secondary => sample.secondary_down,
                };
                if !still_down {
                    self.held = None;
                    self.last = None;
                    return Some(Command::PointerUp);
                }
                let cell = sample.cell?;
                if self.last == Some(cell) {
                    return None;
                }
                self.last = Some(cell);
                Some(Command::PointerDrag(cell))
            }
        }
    }

    pub const fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

/// Middle-button drag state for panning
#[derive(Clone, Debug, Default)]
pub struct PanTracker {
    last: Option<(f32, f32)>,
}

impl PanTracker {
    /// Screen delta since the previous frame while the pan button is held
    pub fn update(&mut self, held: bool, mouse_pos: (f32, f32)) -> Option<(f32, f32)> {
        if !held {
            self.last = None;
            return None;
        }
        let delta = self
            .last
            .map(|last| (mouse_pos.0 - last.0, mouse_pos.1 - last.1));
        self.last = Some(mouse_pos);
        delta
    }
}

/// Command bound to a key press
pub fn key_command(key: KeyCode) -> Option<Command> {
    const PATTERN_KEYS: [KeyCode; 10] = [
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
        KeyCode::Key9,
        KeyCode::Key0,
    ];

    if let Some(slot) = PATTERN_KEYS.iter().position(|&k| k == key) {
        // slot 0 of the library is Random, bound to R instead
        return PatternId::ALL.get(slot + 1).copied().map(Command::LoadPattern);
    }

    let command = match key {
        KeyCode::Space => Command::ToggleRun,
        KeyCode::C => Command::Clear,
        KeyCode::R => Command::LoadPattern(PatternId::Random),
        KeyCode::Q => Command::SetTool(Tool::Single),
        KeyCode::W => Command::SetTool(Tool::Circle),
        KeyCode::E => Command::SetTool(Tool::Square),
        KeyCode::L => Command::SetTool(Tool::Line),
        KeyCode::S => Command::SetTool(Tool::Spray),
        KeyCode::F => Command::SetTool(Tool::Fill),
        KeyCode::X => Command::SetTool(Tool::Eraser),
        KeyCode::LeftBracket => Command::ResizeBrush(-1),
        KeyCode::RightBracket => Command::ResizeBrush(1),
        KeyCode::Tab => Command::CycleRule,
        KeyCode::Escape => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Per-window input state carried across frames
#[derive(Debug, Default)]
pub struct InputState {
    pointer: PointerTracker,
    pan: PanTracker,
}

impl InputState {
    /// Poll macroquad for this frame. Camera pan, zoom and reset are applied
    /// directly; everything else comes back as commands.
    pub fn poll(&mut self, camera: &mut Camera, buttons: &[Button]) -> FrameInput {
        let mut frame = FrameInput::default();
        let mouse_pos = mouse_position();
        let over_grid = mouse_pos.0 < grid_area_width();

        if is_mouse_button_pressed(MouseButton::Left) && !self.pointer.is_held() {
            frame.commands.extend(
                buttons
                    .iter()
                    .filter(|b| b.contains(mouse_pos))
                    .map(Button::command),
            );
        }

        let sample = PointerSample {
            primary_pressed: is_mouse_button_pressed(MouseButton::Left),
            secondary_pressed: is_mouse_button_pressed(MouseButton::Right),
            primary_down: is_mouse_button_down(MouseButton::Left),
            secondary_down: is_mouse_button_down(MouseButton::Right),
            cell: over_grid.then(|| camera.screen_to_cell(mouse_pos.0, mouse_pos.1)),
        };
        frame.commands.extend(self.pointer.update(sample));

        if let Some((dx, dy)) = self
            .pan
            .update(is_mouse_button_down(MouseButton::Middle), mouse_pos)
        {
            camera.pan(dx, dy);
        }

        let wheel = mouse_wheel().1;
        if over_grid && wheel != 0.0 {
            let factor = if wheel > 0.0 {
                Camera::ZOOM_STEP
            } else {
                1.0 / Camera::ZOOM_STEP
            };
            camera.zoom_at(factor, mouse_pos);
        }

        for key in get_keys_pressed() {
            match key {
                KeyCode::Up => frame.speed_delta += SPEED_STEP,
                KeyCode::Down => frame.speed_delta -= SPEED_STEP,
                KeyCode::H => camera.reset(),
                _ => frame.commands.extend(key_command(key)),
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(primary: bool, cell: Option<Cell>) -> PointerSample {
        PointerSample {
            primary_pressed: primary,
            secondary_pressed: !primary,
            primary_down: primary,
            secondary_down: !primary,
            cell,
        }
    }

    fn hold(primary: bool, cell: Option<Cell>) -> PointerSample {
        PointerSample {
            primary_pressed: false,
            secondary_pressed: false,
            ..press(primary, cell)
        }
    }

    #[test]
    fn test_press_drag_release() {
        let mut tracker = PointerTracker::default();
        let a = Cell::new(1, 1);
        let b = Cell::new(2, 1);

        assert_eq!(
            tracker.update(press(true, Some(a))),
            Some(Command::PointerDown {
                cell: a,
                button: PointerButton::Primary
            })
        );
        assert_eq!(tracker.update(hold(true, Some(a))), None);
        assert_eq!(tracker.update(hold(true, Some(b))), Some(Command::PointerDrag(b)));
        assert_eq!(
            tracker.update(PointerSample::default()),
            Some(Command::PointerUp)
        );
        assert!(!tracker.is_held());
    }

    #[test]
    fn test_secondary_button_erases() {
        let mut tracker = PointerTracker::default();
        let cell = Cell::new(0, 0);
        assert_eq!(
            tracker.update(press(false, Some(cell))),
            Some(Command::PointerDown {
                cell,
                button: PointerButton::Secondary
            })
        );
    }

    #[test]
    fn test_press_over_panel_starts_nothing() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.update(press(true, None)), None);
        // dragging back onto the grid does not start a stroke without a press
        assert_eq!(tracker.update(hold(true, Some(Cell::new(3, 3)))), None);
    }

    #[test]
    fn test_leaving_grid_mid_stroke_keeps_stroke() {
        let mut tracker = PointerTracker::default();
        tracker.update(press(true, Some(Cell::new(0, 0))));
        assert_eq!(tracker.update(hold(true, None)), None);
        assert!(tracker.is_held());
    }

    #[test]
    fn test_pan_reports_deltas_while_held() {
        let mut pan = PanTracker::default();
        assert_eq!(pan.update(true, (10.0, 10.0)), None);
        assert_eq!(pan.update(true, (15.0, 7.0)), Some((5.0, -3.0)));
        assert_eq!(pan.update(false, (20.0, 20.0)), None);
        assert_eq!(pan.update(true, (30.0, 30.0)), None);
    }

    #[test]
    fn test_number_keys_load_patterns_in_library_order() {
        assert_eq!(
            key_command(KeyCode::Key1),
            Some(Command::LoadPattern(PatternId::Glider))
        );
        assert_eq!(
            key_command(KeyCode::Key0),
            Some(Command::LoadPattern(PatternId::Acorn))
        );
        assert_eq!(
            key_command(KeyCode::R),
            Some(Command::LoadPattern(PatternId::Random))
        );
    }

    #[test]
    fn test_every_tool_has_a_key() {
        for tool in Tool::ALL {
            let bound = [
                KeyCode::Q,
                KeyCode::W,
                KeyCode::E,
                KeyCode::L,
                KeyCode::S,
                KeyCode::F,
                KeyCode::X,
            ]
            .into_iter()
            .any(|k| key_command(k) == Some(Command::SetTool(tool)));
            assert!(bound, "{}", tool.name());
        }
        assert_eq!(key_command(KeyCode::Z), None);
    }
}
