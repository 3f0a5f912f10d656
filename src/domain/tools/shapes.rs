//! Brush footprints. Every function clips to the grid bounds, so anchors near
//! or past the edges simply produce fewer cells.

use std::f64::consts::TAU;

use rand::Rng;

use super::CellSet;
use crate::domain::{Bounds, Cell};

/// Spray samples per unit of squared radius
pub const SPRAY_DENSITY: f64 = 0.6;

pub fn single(anchor: Cell, bounds: Bounds) -> CellSet {
    std::iter::once(anchor)
        .filter(|&c| bounds.contains(c))
        .collect()
}

/// The `(2s+1)²` block centred on the anchor
pub fn square(anchor: Cell, size: u32, bounds: Bounds) -> CellSet {
    let s = size as i32;
    (-s..=s)
        .flat_map(|d_row| (-s..=s).filter_map(move |d_col| anchor.checked_offset(d_col, d_row)))
        .filter(|&c| bounds.contains(c))
        .collect()
}

/// Discrete disk: offsets with `dCol² + dRow² ≤ s²`
pub fn circle(anchor: Cell, size: u32, bounds: Bounds) -> CellSet {
    let s = size as i32;
    (-s..=s)
        .flat_map(|d_row| (-s..=s).map(move |d_col| (d_col, d_row)))
        .filter(|&(d_col, d_row)| d_col * d_col + d_row * d_row <= s * s)
        .filter_map(|(d_col, d_row)| anchor.checked_offset(d_col, d_row))
        .filter(|&c| bounds.contains(c))
        .collect()
}

/// `⌊s² · 0.6⌋` random polar samples within radius `s`. Offsets are
/// truncated towards zero, so repeated samples collapse into one cell.
pub fn spray<R: Rng>(anchor: Cell, size: u32, bounds: Bounds, rng: &mut R) -> CellSet {
    let radius = f64::from(size);
    let samples = (radius * radius * SPRAY_DENSITY).floor() as usize;
    (0..samples)
        .filter_map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let distance = rng.random_range(0.0..=radius);
            let d_col = (distance * angle.cos()) as i32;
            let d_row = (distance * angle.sin()) as i32;
            anchor.checked_offset(d_col, d_row)
        })
        .filter(|&c| bounds.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: Bounds = Bounds::new(30, 30);

    fn rotate_quarter(anchor: Cell, cell: Cell) -> Cell {
        let (d_col, d_row) = (cell.col - anchor.col, cell.row - anchor.row);
        anchor.offset(-d_row, d_col)
    }

    #[test]
    fn test_single_discards_out_of_bounds() {
        assert_eq!(single(Cell::new(3, 4), BOUNDS).len(), 1);
        assert!(single(Cell::new(-1, 4), BOUNDS).is_empty());
    }

    #[test]
    fn test_square_is_full_block() {
        let cells = square(Cell::new(10, 10), 2, BOUNDS);
        assert_eq!(cells.len(), 25);
        assert!(cells.contains(&Cell::new(8, 8)));
        assert!(cells.contains(&Cell::new(12, 12)));
    }

    #[test]
    fn test_square_clips_at_corner() {
        let cells = square(Cell::new(0, 0), 1, BOUNDS);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|&c| BOUNDS.contains(c)));
    }

    #[test]
    fn test_circle_size_zero_is_anchor_only() {
        let anchor = Cell::new(5, 5);
        let cells = circle(anchor, 0, BOUNDS);
        assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![anchor]);
    }

    #[test]
    fn test_circle_is_rotation_symmetric() {
        let anchor = Cell::new(15, 15);
        for size in 1..=10 {
            let cells = circle(anchor, size, BOUNDS);
            let rotated: CellSet = cells.iter().map(|&c| rotate_quarter(anchor, c)).collect();
            assert_eq!(cells, rotated, "size {size}");
        }
    }

    #[test]
    fn test_circle_radius_two() {
        let cells = circle(Cell::new(10, 10), 2, BOUNDS);
        // 5x5 block minus the four corners and the eight cells at distance sqrt(5)
        assert_eq!(cells.len(), 13);
        assert!(!cells.contains(&Cell::new(12, 12)));
        assert!(cells.contains(&Cell::new(12, 10)));
    }

    #[test]
    fn test_spray_stays_within_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        let anchor = Cell::new(15, 15);
        let cells = spray(anchor, 5, BOUNDS, &mut rng);
        assert!(!cells.is_empty());
        assert!(cells.len() <= 15);
        for c in cells {
            let (dc, dr) = (c.col - anchor.col, c.row - anchor.row);
            assert!(dc * dc + dr * dr <= 25);
        }
    }

    #[test]
    fn test_anchors_at_i32_limits_are_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        for anchor in [
            Cell::new(i32::MAX, 0),
            Cell::new(i32::MIN, 0),
            Cell::new(0, i32::MAX),
            Cell::new(i32::MIN, i32::MIN),
        ] {
            assert!(square(anchor, 10, BOUNDS).is_empty());
            assert!(circle(anchor, 10, BOUNDS).is_empty());
            assert!(spray(anchor, 10, BOUNDS, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_spray_size_one_has_no_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spray(Cell::new(3, 3), 1, BOUNDS, &mut rng).is_empty());
    }
}
