use crate::domain::Cell;

/// Camera maps between screen pixels and grid cells under pan and zoom
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32, // 1.0 = one cell is `cell_size` pixels
    cell_size: f32,
}

impl Camera {
    pub const MIN_ZOOM: f32 = 0.25;
    pub const MAX_ZOOM: f32 = 4.0;
    pub const ZOOM_STEP: f32 = 1.1;

    pub fn new(cell_size: f32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            cell_size,
        }
    }

    /// On-screen size of one cell in pixels
    pub fn cell_pixels(&self) -> f32 {
        self.cell_size * self.zoom
    }

    /// Zoom by `factor`, keeping the point under `pivot` fixed on screen
    pub fn zoom_at(&mut self, factor: f32, pivot: (f32, f32)) {
        let before = self.cell_pixels();
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let ratio = self.cell_pixels() / before;
        self.offset_x = pivot.0 - (pivot.0 - self.offset_x) * ratio;
        self.offset_y = pivot.1 - (pivot.1 - self.offset_y) * ratio;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Cell under a screen position. Positions off the grid give
    /// out-of-bounds cells, which the tools discard.
    pub fn screen_to_cell(&self, screen_x: f32, screen_y: f32) -> Cell {
        let size = self.cell_pixels();
        Cell::new(
            ((screen_x - self.offset_x) / size).floor() as i32,
            ((screen_y - self.offset_y) / size).floor() as i32,
        )
    }

    /// Top-left screen corner of a cell
    pub fn cell_to_screen(&self, cell: Cell) -> (f32, f32) {
        let size = self.cell_pixels();
        (
            cell.col as f32 * size + self.offset_x,
            cell.row as f32 * size + self.offset_y,
        )
    }

    /// Screen position of a fractional grid coordinate
    pub fn grid_to_screen(&self, col: f32, row: f32) -> (f32, f32) {
        let size = self.cell_pixels();
        (col * size + self.offset_x, row * size + self.offset_y)
    }

    /// Inclusive range of cells covering a viewport, for culling
    pub fn visible_cells(&self, viewport_width: f32, viewport_height: f32) -> (Cell, Cell) {
        (
            self.screen_to_cell(0.0, 0.0),
            self.screen_to_cell(viewport_width, viewport_height),
        )
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.zoom = 1.0;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(10.0)
    }
}
