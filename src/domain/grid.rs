use super::{Bounds, Cell, GridError, Rule};
use rayon::prelude::*;

/// Grids with at least this many cells step their rows in parallel
pub const PARALLEL_THRESHOLD: usize = 128 * 128;

/// Cells that changed state during one step, in row-major order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub births: Vec<Cell>,
    pub deaths: Vec<Cell>,
}

impl StepOutcome {
    pub fn is_still(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }
}

/// Grid owns the fixed-size cell matrix, the per-cell ages and the life rule.
///
/// Ages count the generations a cell has been alive: 1 on birth, +1 for each
/// step survived, 0 when dead. A cell is alive exactly when its age is non-zero.
/// Neighbours beyond the edges count as dead; there is no wraparound.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<bool>,
    ages: Vec<u32>,
    /// Back buffer the next generation is written into before the swap
    next: Vec<bool>,
    rule: Rule,
}

impl Grid {
    /// Create a new grid with all cells dead, stepping under Conway's rule
    pub fn new(cols: usize, rows: usize) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { cols, rows });
        }
        // Cell coordinates are i32, so each side must fit one.
        let area = match (i32::try_from(cols), i32::try_from(rows)) {
            (Ok(_), Ok(_)) => cols.checked_mul(rows),
            _ => None,
        }
        .ok_or(GridError::TooLarge { cols, rows })?;
        Ok(Self {
            bounds: Bounds::new(cols, rows),
            cells: vec![false; area],
            ages: vec![0; area],
            next: vec![false; area],
            rule: Rule::default(),
        })
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub const fn rule(&self) -> Rule {
        self.rule
    }

    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    /// Alive state; out-of-bounds cells read as dead
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.bounds.index_of(cell).is_some_and(|i| self.cells[i])
    }

    /// Generations the cell has been alive; 0 for dead or out-of-bounds cells
    pub fn age(&self, cell: Cell) -> u32 {
        self.bounds.index_of(cell).map_or(0, |i| self.ages[i])
    }

    /// Set a single cell. Returns whether anything changed.
    pub fn set_cell(&mut self, cell: Cell, alive: bool) -> bool {
        let Some(idx) = self.bounds.index_of(cell) else {
            return false;
        };
        if self.cells[idx] == alive {
            return false;
        }
        self.cells[idx] = alive;
        self.ages[idx] = u32::from(alive);
        true
    }

    /// Kill every cell and reset all ages
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.ages.fill(0);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over live cells in row-major order
    pub fn iter_alive(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| self.bounds.cell_at(i))
    }

    /// Advance one generation, choosing the parallel path for large grids.
    /// Both paths produce identical results.
    pub fn step(&mut self) -> StepOutcome {
        if self.bounds.area() >= PARALLEL_THRESHOLD {
            self.step_parallel()
        } else {
            self.step_serial()
        }
    }

    /// Advance one generation computing rows on the current thread
    pub fn step_serial(&mut self) -> StepOutcome {
        let cols = self.bounds.cols;
        let (cells, rule) = (&self.cells, self.rule);
        self.next
            .chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| next_row(cells, self.bounds, rule, row, out));
        self.commit()
    }

    /// Advance one generation computing rows with rayon
    pub fn step_parallel(&mut self) -> StepOutcome {
        let cols = self.bounds.cols;
        let (cells, bounds, rule) = (&self.cells, self.bounds, self.rule);
        self.next
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| next_row(cells, bounds, rule, row, out));
        self.commit()
    }

    /// Swap in the fully computed back buffer and update ages
    fn commit(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        for (i, (&was, &now)) in self.cells.iter().zip(&self.next).enumerate() {
            match (was, now) {
                (true, true) => self.ages[i] = self.ages[i].saturating_add(1),
                (false, true) => {
                    self.ages[i] = 1;
                    outcome.births.push(self.bounds.cell_at(i));
                }
                (true, false) => {
                    self.ages[i] = 0;
                    outcome.deaths.push(self.bounds.cell_at(i));
                }
                (false, false) => {}
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next);
        outcome
    }
}

/// Count live Moore neighbours; cells past the edge count as dead
#[inline]
fn count_live_neighbors(cells: &[bool], bounds: Bounds, col: usize, row: usize) -> u8 {
    let col_lo = col.saturating_sub(1);
    let col_hi = (col + 1).min(bounds.cols - 1);
    let row_lo = row.saturating_sub(1);
    let row_hi = (row + 1).min(bounds.rows - 1);

    let mut count = 0;
    for r in row_lo..=row_hi {
        let base = r * bounds.cols;
        for c in col_lo..=col_hi {
            if (r != row || c != col) && cells[base + c] {
                count += 1;
            }
        }
    }
    count
}

fn next_row(cells: &[bool], bounds: Bounds, rule: Rule, row: usize, out: &mut [bool]) {
    let base = row * bounds.cols;
    for (col, slot) in out.iter_mut().enumerate() {
        let neighbors = count_live_neighbors(cells, bounds, col, row);
        *slot = rule.evolve(cells[base + col], neighbors);
    }
}
