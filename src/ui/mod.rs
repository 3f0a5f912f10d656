mod button;

pub use button::Button;

use macroquad::prelude::{screen_height, screen_width};

use crate::application::Command;
use crate::domain::{PatternId, Tool};

pub const PANEL_WIDTH: f32 = 200.0;
pub const PADDING: f32 = 8.0;
pub const BUTTON_HEIGHT: f32 = 26.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Buttons laid out two per row
fn two_columns(
    panel_x: f32,
    top: f32,
    items: impl IntoIterator<Item = (String, Command)>,
) -> Vec<Button> {
    let width = (PANEL_WIDTH - 3.0 * PADDING) / 2.0;
    items
        .into_iter()
        .enumerate()
        .map(|(i, (text, command))| {
            let x = panel_x + PADDING + (i % 2) as f32 * (width + PADDING);
            let y = top + (i / 2) as f32 * (BUTTON_HEIGHT + 4.0);
            Button::new(x, y, width, BUTTON_HEIGHT, text, command)
        })
        .collect()
}

/// Side panel sections; headings are drawn at `heading_y`
pub struct Toolbar {
    pub buttons: Vec<Button>,
    pub tools_heading_y: f32,
    pub patterns_heading_y: f32,
    pub status_y: f32,
}

/// Lay out the run controls, one button per tool and one per pattern
pub fn toolbar(panel_x: f32) -> Toolbar {
    let full = PANEL_WIDTH - 2.0 * PADDING;
    let mut buttons = vec![Button::new(
        panel_x + PADDING,
        PADDING,
        full,
        BUTTON_HEIGHT + 6.0,
        "Play / Pause",
        Command::ToggleRun,
    )];
    buttons.extend(two_columns(
        panel_x,
        PADDING + BUTTON_HEIGHT + 12.0,
        [
            ("Clear".to_owned(), Command::Clear),
            ("Random".to_owned(), Command::LoadPattern(PatternId::Random)),
        ],
    ));

    let tools_heading_y = buttons.last().map_or(0.0, Button::bottom) + 22.0;
    buttons.extend(two_columns(
        panel_x,
        tools_heading_y + 6.0,
        Tool::ALL.map(|t| (t.name().to_owned(), Command::SetTool(t))),
    ));

    let patterns_heading_y = buttons.last().map_or(0.0, Button::bottom) + 22.0;
    buttons.extend(two_columns(
        panel_x,
        patterns_heading_y + 6.0,
        PatternId::ALL
            .into_iter()
            .filter(|&p| p != PatternId::Random)
            .map(|p| (p.name().to_owned(), Command::LoadPattern(p))),
    ));

    let status_y = buttons.last().map_or(0.0, Button::bottom) + 24.0;
    Toolbar {
        buttons,
        tools_heading_y,
        patterns_heading_y,
        status_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_and_pattern_has_a_button() {
        let bar = toolbar(800.0);
        for tool in Tool::ALL {
            assert!(bar.buttons.iter().any(|b| b.command() == Command::SetTool(tool)));
        }
        for pattern in PatternId::ALL {
            assert!(
                bar.buttons
                    .iter()
                    .any(|b| b.command() == Command::LoadPattern(pattern))
            );
        }
    }

    #[test]
    fn test_buttons_stay_inside_panel_and_do_not_overlap() {
        let panel = 800.0;
        let bar = toolbar(panel);
        for (i, a) in bar.buttons.iter().enumerate() {
            let (ax, ay, aw, ah) = a.rect();
            assert!(ax >= panel && ax + aw <= panel + PANEL_WIDTH, "{}", a.text());
            for b in &bar.buttons[i + 1..] {
                let (bx, by, bw, bh) = b.rect();
                let disjoint = ax + aw <= bx || bx + bw <= ax || ay + ah <= by || by + bh <= ay;
                assert!(disjoint, "{} overlaps {}", a.text(), b.text());
            }
        }
        assert!(bar.tools_heading_y < bar.patterns_heading_y);
        assert!(bar.patterns_heading_y < bar.status_y);
    }
}
