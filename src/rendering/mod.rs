mod particles;

pub use particles::{Particle, ParticleField, ParticleKind};

use macroquad::prelude::*;

use crate::application::{Camera, Command, SimulationController, TickClock};
use crate::domain::{Cell, Grid, Tool, tools};
use crate::ui::{Toolbar, grid_area_height, grid_area_width, panel_x, PANEL_WIDTH, PADDING};

const ALIVE: Color = Color::new(0.0, 1.0, 0.6, 1.0);
const BIRTH_SPARK: Color = Color::new(0.6, 1.0, 0.8, 1.0);
const DEATH_SPARK: Color = Color::new(1.0, 0.4, 0.3, 1.0);
const BACKGROUND: Color = Color::new(0.06, 0.06, 0.06, 1.0);
const GRID_LINE: Color = Color::new(0.16, 0.16, 0.16, 1.0);
/// Opacity of a cell in its first generation
const MIN_FADE: f32 = 0.3;

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Opacity of a live cell of the given age
pub fn fade_in(age: u32, fade_in_generations: u32) -> f32 {
    if fade_in_generations <= 1 || age >= fade_in_generations {
        return 1.0;
    }
    let t = age.saturating_sub(1) as f32 / (fade_in_generations - 1) as f32;
    MIN_FADE + (1.0 - MIN_FADE) * t
}

/// Draw the visible part of the grid, newborn cells fading in
pub fn draw_grid(grid: &Grid, camera: &Camera, fade_in_generations: u32) {
    let size = camera.cell_pixels();
    let bounds = grid.bounds();
    let (area_width, area_height) = (grid_area_width(), grid_area_height());

    let (x0, y0) = camera.cell_to_screen(Cell::new(0, 0));
    draw_rectangle(
        x0,
        y0,
        bounds.cols as f32 * size,
        bounds.rows as f32 * size,
        BACKGROUND,
    );

    let (top_left, bottom_right) = camera.visible_cells(area_width, area_height);
    let cols = top_left.col.max(0)..=bottom_right.col.min(bounds.cols as i32 - 1);
    let rows = top_left.row.max(0)..=bottom_right.row.min(bounds.rows as i32 - 1);
    let draw_lines = size >= 6.0;

    for row in rows {
        for col in cols.clone() {
            let cell = Cell::new(col, row);
            let (x, y) = camera.cell_to_screen(cell);
            if grid.is_alive(cell) {
                let alpha = fade_in(grid.age(cell), fade_in_generations);
                draw_rectangle(x, y, size, size, Color { a: alpha, ..ALIVE });
            }
            if draw_lines {
                draw_rectangle_lines(x, y, size, size, 1.0, GRID_LINE);
            }
        }
    }
}

/// Ghost of the cells a click at the cursor would touch
pub fn draw_tool_preview(
    controller: &SimulationController,
    camera: &Camera,
    mouse_pos: (f32, f32),
) {
    if controller.is_running() || mouse_pos.0 >= grid_area_width() {
        return;
    }
    let size = camera.cell_pixels();
    let cursor = camera.screen_to_cell(mouse_pos.0, mouse_pos.1);
    let bounds = controller.bounds();

    if let Some(anchor) = controller.pending_line_anchor() {
        for cell in tools::line(anchor, cursor, bounds) {
            let (x, y) = camera.cell_to_screen(cell);
            draw_rectangle(x, y, size, size, Color::new(1.0, 1.0, 0.0, 0.35));
        }
        let (x, y) = camera.cell_to_screen(anchor);
        draw_rectangle_lines(x, y, size, size, 2.0, YELLOW);
        return;
    }

    // spray is random, so preview its reach instead
    let tool = match controller.current_tool() {
        Tool::Spray => Tool::Circle,
        tool => tool,
    };
    let outline = match tool {
        Tool::Eraser => Color::new(1.0, 0.4, 0.3, 0.8),
        _ => Color::new(0.0, 1.0, 0.6, 0.8),
    };
    let cells = tools::stamp(tool, cursor, controller.brush_size(), bounds, &mut ::rand::rng());
    for cell in cells {
        let (x, y) = camera.cell_to_screen(cell);
        draw_rectangle(x, y, size, size, Color { a: 0.25, ..outline });
        draw_rectangle_lines(x, y, size, size, 1.0, outline);
    }
}

/// Sparks with a one-segment trail
pub fn draw_particles(field: &ParticleField, camera: &Camera) {
    let thickness = (camera.cell_pixels() * 0.25).max(1.0);
    for p in field.iter() {
        let base = match p.kind {
            ParticleKind::Birth => BIRTH_SPARK,
            ParticleKind::Death => DEATH_SPARK,
        };
        let color = Color { a: p.fade(), ..base };
        let (x, y) = camera.grid_to_screen(p.pos.0, p.pos.1);
        let (px, py) = camera.grid_to_screen(p.prev.0, p.prev.1);
        draw_line(px, py, x, y, thickness, Color { a: color.a * 0.5, ..color });
        draw_circle(x, y, thickness, color);
    }
}

fn is_active(command: Command, controller: &SimulationController) -> bool {
    match command {
        Command::ToggleRun => controller.is_running(),
        Command::SetTool(tool) => tool == controller.current_tool(),
        _ => false,
    }
}

/// Side panel: buttons, section headings and status read from the controller
pub fn draw_panel(
    controller: &SimulationController,
    clock: &TickClock,
    camera: &Camera,
    toolbar: &Toolbar,
    mouse_pos: (f32, f32),
) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    for button in &toolbar.buttons {
        button.draw(mouse_pos, is_active(button.command(), controller));
    }

    let x = px + PADDING;
    draw_text("Tools", x, toolbar.tools_heading_y, 16.0, WHITE);
    draw_text("Patterns", x, toolbar.patterns_heading_y, 16.0, WHITE);

    let (status, status_color) = if controller.is_running() {
        ("Running", Color::from_rgba(0, 255, 0, 255))
    } else {
        ("Paused", Color::from_rgba(255, 165, 0, 255))
    };
    let bounds = controller.bounds();
    let value = Color::from_rgba(180, 180, 180, 255);
    let lines = [
        (format!("Generation: {}", controller.generation()), ALIVE),
        (format!("Status: {status}"), status_color),
        (format!("Population: {}", format_number(controller.population())), value),
        (format!("Grid: {}x{}", bounds.cols, bounds.rows), value),
        (format!("Tool: {}", controller.current_tool().name()), value),
        (format!("Brush: {}", controller.brush_size()), value),
        (format!("Rule: {}", controller.rule()), value),
        (format!("Speed: {:.0} gen/s", clock.steps_per_second()), value),
        (format!("Zoom: {:.1}x", camera.zoom), value),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_text(text, x, toolbar.status_y + i as f32 * 18.0, 15.0, *color);
    }

    let help_y = toolbar.status_y + lines.len() as f32 * 18.0 + 10.0;
    let help = [
        "LMB draw, RMB erase",
        "Wheel zoom, MMB pan, H home",
        "[ ] brush, Tab rule, Up/Down speed",
    ];
    for (i, text) in help.iter().enumerate() {
        draw_text(text, x, help_y + i as f32 * 14.0, 12.0, GRAY);
    }

    let hovered = toolbar.buttons.iter().find(|b| b.contains(mouse_pos));
    if let Some(Command::LoadPattern(pattern)) = hovered.map(|b| b.command()) {
        let y = help_y + help.len() as f32 * 14.0 + 8.0;
        draw_text(pattern.description(), x, y, 13.0, YELLOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_reaches_full_opacity() {
        assert_eq!(fade_in(1, 5), MIN_FADE);
        assert!(fade_in(2, 5) > fade_in(1, 5));
        assert!(fade_in(4, 5) < 1.0);
        assert_eq!(fade_in(5, 5), 1.0);
        assert_eq!(fade_in(500, 5), 1.0);
    }

    #[test]
    fn test_fade_disabled() {
        assert_eq!(fade_in(1, 0), 1.0);
        assert_eq!(fade_in(1, 1), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_000_000), "2.0M");
    }
}
