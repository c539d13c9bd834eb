//! Hex board geometry with cube coordinates

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

use crate::game::Player;

/// Board radius (distance from center to edge, exclusive)
pub const BOARD_RADIUS: i8 = 7;

/// Cube coordinate components do not sum to zero.
///
/// This is a programmer-error class failure: validated flows (cells taken
/// from a generated [`Board`]) can never produce it. It only surfaces from
/// [`Hex::try_new`] on unvalidated input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid cube coordinate ({q}, {r}, {s}): components must sum to zero")]
pub struct InvalidCoordinate {
    pub q: i8,
    pub r: i8,
    pub s: i8,
}

/// Cube hex coordinate, invariant `q + r + s == 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
    pub s: i8,
}

impl Hex {
    /// Build a coordinate, asserting the zero-sum invariant.
    ///
    /// Use [`Hex::try_new`] for input that has not been validated.
    pub const fn new(q: i8, r: i8, s: i8) -> Self {
        assert!(
            q as i16 + r as i16 + s as i16 == 0,
            "cube coordinate components must sum to zero"
        );
        Self { q, r, s }
    }

    /// Checked construction for unvalidated input
    pub fn try_new(q: i8, r: i8, s: i8) -> Result<Self, InvalidCoordinate> {
        if q as i16 + r as i16 + s as i16 != 0 {
            return Err(InvalidCoordinate { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Distance from the origin
    pub fn length(self) -> i8 {
        (self.q.abs() + self.r.abs() + self.s.abs()) / 2
    }

    /// Distance between two coordinates
    pub fn distance(self, other: Hex) -> i8 {
        (self - other).length()
    }

    /// Unit direction for an index in `0..6`
    pub const fn direction(dir: usize) -> Hex {
        DIRECTIONS[dir]
    }

    /// Adjacent coordinate in direction `dir` (0-5)
    pub fn neighbor(self, dir: usize) -> Hex {
        self + Self::direction(dir)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r, self.s + rhs.s)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex::new(self.q - rhs.q, self.r - rhs.r, self.s - rhs.s)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// The six unit directions in cube coordinates, in fixed rotational order
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0, -1),  // E
    Hex::new(1, -1, 0),  // NE
    Hex::new(0, -1, 1),  // NW
    Hex::new(-1, 0, 1),  // W
    Hex::new(-1, 1, 0),  // SW
    Hex::new(0, 1, -1),  // SE
];

/// A single board cell: a fixed coordinate plus mutable ownership
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: Hex,
    owner: Option<Player>,
}

impl Cell {
    pub fn coord(&self) -> Hex {
        self.coord
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

/// The full hexagonal board: every cell within `radius` of the center.
///
/// Cell membership is fixed at construction; only ownership mutates, and
/// only through the engine. The enumeration order of [`Board::cells`] is a
/// public contract: external code addresses cells positionally.
#[derive(Clone, Debug)]
pub struct Board {
    radius: i8,
    cells: Vec<Cell>,
    index: FxHashMap<Hex, usize>,
}

impl Board {
    /// Generate every cell with `max(|q|, |r|, |s|) < radius`, unowned.
    ///
    /// Enumeration runs `q` ascending with the valid `r` range nested, so
    /// radius 7 yields 127 cells with index 0 at `(-6, 0, 6)`.
    pub fn new(radius: i8) -> Self {
        assert!(radius >= 1, "board radius must be positive");

        let mut cells = Vec::new();
        let mut index = FxHashMap::default();

        for q in (-radius + 1)..radius {
            let r_lo = (-radius + 1).max(-q - radius + 1);
            let r_hi = (radius - 1).min(-q + radius - 1);

            for r in r_lo..=r_hi {
                let coord = Hex::new(q, r, -q - r);
                index.insert(coord, cells.len());
                cells.push(Cell { coord, owner: None });
            }
        }

        Self { radius, cells, index }
    }

    pub fn radius(&self) -> i8 {
        self.radius
    }

    /// Exact-match lookup. `None` means off-board ("absent"), which is
    /// distinct from an on-board unowned cell.
    pub fn cell_at(&self, coord: Hex) -> Option<&Cell> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    /// All cells in the stable generation order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells owned by `player`
    pub fn stone_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }

    pub(crate) fn set_owner(&mut self, coord: Hex, owner: Option<Player>) {
        let i = *self.index.get(&coord).expect("coordinate is on the board");
        self.cells[i].owner = owner;
    }
}
