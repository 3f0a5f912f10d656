/// Cell is a grid coordinate. Coordinates are signed so that tool shapes
/// can reach past the edges; anything outside `Bounds` is discarded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell shifted by a relative offset
    pub const fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self::new(self.col + d_col, self.row + d_row)
    }

    /// Shifted cell, or `None` when a coordinate leaves the `i32` range
    pub const fn checked_offset(self, d_col: i32, d_row: i32) -> Option<Self> {
        match (self.col.checked_add(d_col), self.row.checked_add(d_row)) {
            (Some(col), Some(row)) => Some(Self::new(col, row)),
            _ => None,
        }
    }

    /// The four axis-aligned neighbours (4-connectivity)
    pub const fn orthogonal_neighbors(self) -> [Cell; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }
}

impl From<(i32, i32)> for Cell {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Fixed dimensions of a grid
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bounds {
    pub cols: usize,
    pub rows: usize,
}

impl Bounds {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as usize) < self.cols
            && (cell.row as usize) < self.rows
    }

    /// Row-major index of an in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    pub const fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    pub const fn area(&self) -> usize {
        self.cols * self.rows
    }

    /// Centre cell, rounding towards the origin
    pub const fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_rejects_negative_and_overflow() {
        let bounds = Bounds::new(4, 3);
        assert!(bounds.contains(Cell::new(0, 0)));
        assert!(bounds.contains(Cell::new(3, 2)));
        assert!(!bounds.contains(Cell::new(-1, 0)));
        assert!(!bounds.contains(Cell::new(0, -1)));
        assert!(!bounds.contains(Cell::new(4, 0)));
        assert!(!bounds.contains(Cell::new(0, 3)));
    }

    #[test]
    fn test_index_roundtrip() {
        let bounds = Bounds::new(5, 4);
        let cell = Cell::new(3, 2);
        let idx = bounds.index_of(cell).unwrap();
        assert_eq!(idx, 13);
        assert_eq!(bounds.cell_at(idx), cell);
        assert_eq!(bounds.index_of(Cell::new(5, 0)), None);
    }

    #[test]
    fn test_orthogonal_neighbors_exclude_diagonals() {
        let around = Cell::new(2, 2).orthogonal_neighbors();
        assert!(around.contains(&Cell::new(2, 1)));
        assert!(around.contains(&Cell::new(3, 2)));
        assert!(around.contains(&Cell::new(2, 3)));
        assert!(around.contains(&Cell::new(1, 2)));
        assert!(!around.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn test_checked_offset_stops_at_i32_limits() {
        assert_eq!(Cell::new(1, 2).checked_offset(-3, 4), Some(Cell::new(-2, 6)));
        assert_eq!(Cell::new(i32::MAX, 0).checked_offset(1, 0), None);
        assert_eq!(Cell::new(0, i32::MIN).checked_offset(0, -1), None);
    }
}
