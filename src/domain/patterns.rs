//! Library of seed configurations.
//!
//! Each fixed pattern is a list of `(dCol, dRow)` offsets from an anchor that
//! depends on the grid size. Random is the one pattern without offsets: every
//! cell is independently alive with probability [`RANDOM_DENSITY`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Deserialize;

use super::error::UnknownPattern;
use super::tools::CellSet;
use super::{Bounds, Cell};

/// Probability that a cell starts alive in the random pattern
pub const RANDOM_DENSITY: f64 = 0.2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
    Random,
    Glider,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    GosperGliderGun,
    Block,
    Lwss,
    RPentomino,
    Acorn,
}

/// Where a pattern's offsets are measured from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Anchor {
    /// Grid centre shifted by the given offset
    Centered(i32, i32),
    /// Fixed cell from the top-left corner
    Fixed(i32, i32),
}

impl PatternId {
    pub const ALL: [PatternId; 11] = [
        PatternId::Random,
        PatternId::Glider,
        PatternId::Blinker,
        PatternId::Toad,
        PatternId::Beacon,
        PatternId::Pulsar,
        PatternId::GosperGliderGun,
        PatternId::Block,
        PatternId::Lwss,
        PatternId::RPentomino,
        PatternId::Acorn,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PatternId::Random => "Random",
            PatternId::Glider => "Glider",
            PatternId::Blinker => "Blinker",
            PatternId::Toad => "Toad",
            PatternId::Beacon => "Beacon",
            PatternId::Pulsar => "Pulsar",
            PatternId::GosperGliderGun => "Gosper Glider Gun",
            PatternId::Block => "Block",
            PatternId::Lwss => "LWSS",
            PatternId::RPentomino => "R-pentomino",
            PatternId::Acorn => "Acorn",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PatternId::Random => "20% of cells alive",
            PatternId::Glider => "Moves diagonally (period 4)",
            PatternId::Blinker => "Oscillator (period 2)",
            PatternId::Toad => "Oscillator (period 2)",
            PatternId::Beacon => "Oscillator (period 2)",
            PatternId::Pulsar => "Oscillator (period 3)",
            PatternId::GosperGliderGun => "Produces gliders (period 30)",
            PatternId::Block => "Still life",
            PatternId::Lwss => "Lightweight Spaceship (period 4)",
            PatternId::RPentomino => "Methuselah - stabilizes at gen 1103",
            PatternId::Acorn => "Methuselah - stabilizes at gen 5206",
        }
    }

    /// Relative offsets of the live cells; `None` for the random pattern
    pub const fn offsets(self) -> Option<&'static [(i32, i32)]> {
        match self {
            PatternId::Random => None,
            PatternId::Glider => Some(presets::GLIDER),
            PatternId::Blinker => Some(presets::BLINKER),
            PatternId::Toad => Some(presets::TOAD),
            PatternId::Beacon => Some(presets::BEACON),
            PatternId::Pulsar => Some(presets::PULSAR),
            PatternId::GosperGliderGun => Some(presets::GOSPER_GLIDER_GUN),
            PatternId::Block => Some(presets::BLOCK),
            PatternId::Lwss => Some(presets::LWSS),
            PatternId::RPentomino => Some(presets::R_PENTOMINO),
            PatternId::Acorn => Some(presets::ACORN),
        }
    }

    const fn anchor_rule(self) -> Anchor {
        match self {
            PatternId::Pulsar => Anchor::Centered(-6, -6),
            PatternId::GosperGliderGun => Anchor::Fixed(10, 10),
            _ => Anchor::Centered(0, 0),
        }
    }

    /// Cell the offsets are added to for a grid of the given size
    pub const fn anchor(self, bounds: Bounds) -> Cell {
        match self.anchor_rule() {
            Anchor::Centered(d_col, d_row) => bounds.center().offset(d_col, d_row),
            Anchor::Fixed(col, row) => Cell::new(col, row),
        }
    }

    /// Live cells of the pattern placed on a grid of the given size, clipped
    /// to its bounds
    pub fn instantiate<R: Rng>(self, bounds: Bounds, rng: &mut R) -> CellSet {
        match self.offsets() {
            None => (0..bounds.area())
                .filter(|_| rng.random_bool(RANDOM_DENSITY))
                .map(|i| bounds.cell_at(i))
                .collect(),
            Some(offsets) => {
                let anchor = self.anchor(bounds);
                offsets
                    .iter()
                    .map(|&(d_col, d_row)| anchor.offset(d_col, d_row))
                    .filter(|&c| bounds.contains(c))
                    .collect()
            }
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternId {
    type Err = UnknownPattern;

    /// Matches the display name or its kebab-case form, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        PatternId::ALL
            .into_iter()
            .find(|p| p.name().to_ascii_lowercase().replace(' ', "-") == wanted)
            .ok_or_else(|| UnknownPattern(s.to_owned()))
    }
}

/// Offsets of the classic patterns, `(dCol, dRow)`
pub mod presets {
    #[rustfmt::skip]
    pub const GLIDER: &[(i32, i32)] = &[
        (1, 0),
        (2, 1),
        (0, 2), (1, 2), (2, 2),
    ];

    pub const BLINKER: &[(i32, i32)] = &[(0, 0), (1, 0), (2, 0)];

    #[rustfmt::skip]
    pub const TOAD: &[(i32, i32)] = &[
        (1, 0), (2, 0), (3, 0),
        (0, 1), (1, 1), (2, 1),
    ];

    #[rustfmt::skip]
    pub const BEACON: &[(i32, i32)] = &[
        (0, 0), (1, 0),
        (0, 1), (1, 1),
        (2, 2), (3, 2),
        (2, 3), (3, 3),
    ];

    #[rustfmt::skip]
    pub const PULSAR: &[(i32, i32)] = &[
        // Top
        (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
        // Upper middle
        (0, 2), (5, 2), (7, 2), (12, 2),
        (0, 3), (5, 3), (7, 3), (12, 3),
        (0, 4), (5, 4), (7, 4), (12, 4),
        // Center
        (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
        (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
        // Lower middle
        (0, 8), (5, 8), (7, 8), (12, 8),
        (0, 9), (5, 9), (7, 9), (12, 9),
        (0, 10), (5, 10), (7, 10), (12, 10),
        // Bottom
        (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
    ];

    #[rustfmt::skip]
    pub const GOSPER_GLIDER_GUN: &[(i32, i32)] = &[
        (24, 0),
        (22, 1), (24, 1),
        (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
        (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
        (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
        (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
        (10, 6), (16, 6), (24, 6),
        (11, 7), (15, 7),
        (12, 8), (13, 8),
    ];

    pub const BLOCK: &[(i32, i32)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

    #[rustfmt::skip]
    pub const LWSS: &[(i32, i32)] = &[
        (1, 0), (4, 0),
        (0, 1),
        (0, 2), (4, 2),
        (0, 3), (1, 3), (2, 3), (3, 3),
    ];

    #[rustfmt::skip]
    pub const R_PENTOMINO: &[(i32, i32)] = &[
        (1, 0), (2, 0),
        (0, 1), (1, 1),
        (1, 2),
    ];

    #[rustfmt::skip]
    pub const ACORN: &[(i32, i32)] = &[
        (1, 0),
        (3, 1),
        (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
    ];
}
