use macroquad::prelude::*;

use crate::application::Command;

/// Panel button that issues a command when clicked
#[derive(Clone, Debug)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    text: String,
    command: Command,
}

impl Button {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: impl Into<String>,
        command: Command,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            command,
        }
    }

    pub const fn command(&self) -> Command {
        self.command
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if a screen position is inside the button
    pub fn contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.x
            && pos.0 <= self.x + self.width
            && pos.1 >= self.y
            && pos.1 <= self.y + self.height
    }

    /// Position and size as `(x, y, width, height)`
    pub const fn rect(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Draw with hover highlight; `active` marks the current selection
    pub fn draw(&self, mouse_pos: (f32, f32), active: bool) {
        let color = if active {
            Color::from_rgba(0, 150, 100, 255)
        } else if self.contains(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 1.5, WHITE);

        // shrink long labels to fit
        let mut font_size = 16;
        let mut text_size = measure_text(&self.text, None, font_size, 1.0);
        while text_size.width > self.width - 6.0 && font_size > 9 {
            font_size -= 1;
            text_size = measure_text(&self.text, None, font_size, 1.0);
        }
        draw_text(
            &self.text,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            f32::from(font_size),
            WHITE,
        );
    }
}
