use super::CellSet;
use crate::domain::{Bounds, Cell};

/// Straight segment between two cells, one cell per step along the longer
/// axis. Coordinates are widened to `i64` so any pair of `i32` cells works.
#[derive(Clone, Copy, Debug)]
struct Segment {
    from: (i64, i64),
    delta: (i64, i64),
    steps: i64,
}

impl Segment {
    fn new(from: Cell, to: Cell) -> Self {
        let from = (i64::from(from.col), i64::from(from.row));
        let delta = (i64::from(to.col) - from.0, i64::from(to.row) - from.1);
        Self {
            from,
            delta,
            steps: delta.0.abs().max(delta.1.abs()),
        }
    }

    /// Cell at step `i` in `0..=steps`. The minor axis is rounded half up,
    /// so 45° lines visit one cell per step.
    fn at(&self, i: i64) -> Cell {
        let along = |d: i64| -> i64 {
            if self.steps == 0 {
                return 0;
            }
            let scaled = 2 * i128::from(i) * i128::from(d.abs()) + i128::from(self.steps);
            let magnitude = scaled / (2 * i128::from(self.steps));
            // never past the endpoint, so it fits
            d.signum() * magnitude as i64
        };
        Cell::new(
            (self.from.0 + along(self.delta.0)) as i32,
            (self.from.1 + along(self.delta.1)) as i32,
        )
    }

    /// Step range whose major-axis coordinate lies in `[lo, hi]`
    fn steps_within(&self, lo: (i64, i64), hi: (i64, i64)) -> std::ops::RangeInclusive<i64> {
        let (start, delta, lo, hi) = if self.delta.0.abs() >= self.delta.1.abs() {
            (self.from.0, self.delta.0, lo.0, hi.0)
        } else {
            (self.from.1, self.delta.1, lo.1, hi.1)
        };
        let (first, last) = if delta >= 0 {
            (lo - start, hi - start)
        } else {
            (start - hi, start - lo)
        };
        first.max(0)..=last.min(self.steps)
    }
}

/// Steps of the segment from `from` to `to` whose cells fall inside the
/// inclusive rectangle `[lo, hi]`, with their step index. Work is
/// proportional to the rectangle, not to the segment length.
pub fn path_within(
    from: Cell,
    to: Cell,
    lo: (i64, i64),
    hi: (i64, i64),
) -> impl Iterator<Item = (i64, Cell)> {
    let segment = Segment::new(from, to);
    segment
        .steps_within(lo, hi)
        .map(move |i| (i, segment.at(i)))
        .filter(move |&(_, c)| {
            let (col, row) = (i64::from(c.col), i64::from(c.row));
            col >= lo.0 && col <= hi.0 && row >= lo.1 && row <= hi.1
        })
}

/// Full rasterised path from `from` to `to`, both endpoints included, unclipped
pub fn line_path(from: Cell, to: Cell) -> Vec<Cell> {
    let segment = Segment::new(from, to);
    (0..=segment.steps).map(|i| segment.at(i)).collect()
}

/// Rasterised segment with out-of-bounds cells discarded
pub fn line(from: Cell, to: Cell, bounds: Bounds) -> CellSet {
    let hi = (bounds.cols as i64 - 1, bounds.rows as i64 - 1);
    path_within(from, to, (0, 0), hi).map(|(_, c)| c).collect()
}
