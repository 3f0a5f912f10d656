//! Step throughput: serial vs row-parallel stepping on random grids

use std::time::Instant;

use life_sketchpad::domain::{Cell, Grid, PARALLEL_THRESHOLD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DENSITY: f64 = 0.3;

fn random_grid(size: usize, seed: u64) -> anyhow::Result<Grid> {
    let mut grid = Grid::new(size, size)?;
    let mut rng = StdRng::seed_from_u64(seed);
    for row in 0..size as i32 {
        for col in 0..size as i32 {
            if rng.random_bool(DENSITY) {
                grid.set_cell(Cell::new(col, row), true);
            }
        }
    }
    Ok(grid)
}

/// Milliseconds per generation
fn time_steps(mut grid: Grid, iterations: u32, step: fn(&mut Grid) -> usize) -> f64 {
    let start = Instant::now();
    let mut changes = 0;
    for _ in 0..iterations {
        changes += step(&mut grid);
    }
    std::hint::black_box(changes);
    start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations)
}

fn serial(grid: &mut Grid) -> usize {
    let outcome = grid.step_serial();
    outcome.births.len() + outcome.deaths.len()
}

fn parallel(grid: &mut Grid) -> usize {
    let outcome = grid.step_parallel();
    outcome.births.len() + outcome.deaths.len()
}

fn main() -> anyhow::Result<()> {
    println!("=== Life step benchmark ===");
    println!("(the app steps in parallel above {PARALLEL_THRESHOLD} cells)\n");

    let sizes = [64, 128, 256, 512, 1024, 2048];
    let iterations = 20;

    println!("{:>8} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<46}", "");

    for size in sizes {
        let grid = random_grid(size, size as u64)?;
        let serial_ms = time_steps(grid.clone(), iterations, serial);
        let parallel_ms = time_steps(grid, iterations, parallel);
        let speedup = if parallel_ms > 0.0 { serial_ms / parallel_ms } else { 0.0 };
        println!(
            "{:>8} {:>10.3}ms {:>10.3}ms {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            speedup
        );
    }

    Ok(())
}
