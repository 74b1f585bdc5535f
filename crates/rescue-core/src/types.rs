//! Fundamental grid and identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::Team;

/// Discrete grid coordinate. `x` grows east, `y` grows south.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in cells.
    pub fn manhattan(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev (king-move) distance in cells.
    pub fn chebyshev(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when `other` shares an edge with this cell.
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The 4-connected neighbourhood: east, west, south, north.
    pub fn neighbors4(&self) -> [Cell; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

id_type!(
    /// Stable identifier of a vehicle for the lifetime of a match.
    VehicleId
);
id_type!(
    /// Identifier of a collectible resource.
    ResourceId
);
id_type!(
    /// Identifier of a hazard.
    HazardId
);

/// A team's home base: every cell within `radius` (Chebyshev) of `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    pub team: Team,
    pub anchor: Cell,
    pub radius: u32,
}

impl Base {
    pub fn contains(&self, cell: Cell) -> bool {
        self.anchor.chebyshev(cell) <= self.radius
    }
}
