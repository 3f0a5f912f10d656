use super::CellSet;
use crate::domain::{Cell, Grid};

/// 4-connected region around `start` sharing its state, returned when that
/// state differs from `fill_with`. Filling a region with its own value yields
/// nothing. Uses an explicit stack so large regions cannot overflow the call stack.
pub fn flood_fill(grid: &Grid, start: Cell, fill_with: bool) -> CellSet {
    let bounds = grid.bounds();
    if !bounds.contains(start) {
        return CellSet::new();
    }
    let source = grid.is_alive(start);
    if source == fill_with {
        return CellSet::new();
    }

    let mut visited = vec![false; bounds.area()];
    let mut region = CellSet::new();
    let mut stack = vec![start];
    while let Some(cell) = stack.pop() {
        let Some(idx) = bounds.index_of(cell) else {
            continue;
        };
        if visited[idx] || grid.is_alive(cell) != source {
            continue;
        }
        visited[idx] = true;
        region.insert(cell);
        stack.extend(cell.orthogonal_neighbors());
    }
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grid from rows of `#` (alive) and `.` (dead)
    fn parse(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows[0].len(), rows.len()).unwrap();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set_cell(Cell::new(c as i32, r as i32), true);
                }
            }
        }
        grid
    }

    #[test]
    fn test_fill_with_same_value_is_empty() {
        let grid = parse(&["#..", "...", "..."]);
        assert!(flood_fill(&grid, Cell::new(1, 1), false).is_empty());
        assert!(flood_fill(&grid, Cell::new(0, 0), true).is_empty());
    }

    #[test]
    fn test_fill_stops_at_walls() {
        let grid = parse(&[
            "..#...", //
            "..#...",
            "###...",
            "......",
        ]);
        let region = flood_fill(&grid, Cell::new(0, 0), true);
        assert_eq!(region.len(), 4);
        assert!(region.contains(&Cell::new(1, 1)));
        assert!(!region.contains(&Cell::new(3, 0)));
    }

    #[test]
    fn test_fill_ignores_diagonal_gaps() {
        // The dead cells at (0,0) and (1,1) only touch diagonally
        let grid = parse(&[".#", "#."]);
        let region = flood_fill(&grid, Cell::new(0, 0), true);
        assert_eq!(region.into_iter().collect::<Vec<_>>(), vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_erase_fill_selects_live_region() {
        let grid = parse(&["##.", "#..", "..#"]);
        let region = flood_fill(&grid, Cell::new(0, 0), false);
        assert_eq!(region.len(), 3);
        assert!(!region.contains(&Cell::new(2, 2)));
    }

    #[test]
    fn test_fill_large_open_grid() {
        let grid = Grid::new(400, 300).unwrap();
        let region = flood_fill(&grid, Cell::new(200, 150), true);
        assert_eq!(region.len(), 400 * 300);
    }

    #[test]
    fn test_fill_out_of_bounds_anchor() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(flood_fill(&grid, Cell::new(9, 9), true).is_empty());
    }
}
