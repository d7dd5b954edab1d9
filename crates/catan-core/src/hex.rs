//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the coordinate types the grid builder works with:
//! - `HexCoord`: Identifies individual hex tiles
//! - `Direction`: The six edge labels a board description uses as adjacency keys
//!
//! Each direction label maps to a fixed unit offset. The offsets are pairwise
//! opposite (top-left is the negation of bottom-right, and so on), which is what
//! lets a breadth-first walk over declared edges land every tile on one grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// One of the six sides of a pointy-top hex, as written in board files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Upper-left side
    TopLeft,
    /// Upper-right side
    TopRight,
    /// Right side
    Right,
    /// Lower-right side
    BottomRight,
    /// Lower-left side
    BottomLeft,
    /// Left side
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from TopLeft
    pub const ALL: [Direction; 6] = [
        Direction::TopLeft,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::Left,
    ];

    /// Unit offset to the neighbouring hex on this side
    pub const fn offset(self) -> HexCoord {
        match self {
            Direction::TopLeft => HexCoord::new(0, -1),
            Direction::TopRight => HexCoord::new(1, -1),
            Direction::Right => HexCoord::new(1, 0),
            Direction::BottomRight => HexCoord::new(0, 1),
            Direction::BottomLeft => HexCoord::new(-1, 1),
            Direction::Left => HexCoord::new(-1, 0),
        }
    }

    /// The side facing this one from the neighbouring hex
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::TopLeft => Direction::BottomRight,
            Direction::TopRight => Direction::BottomLeft,
            Direction::Right => Direction::Left,
            Direction::BottomRight => Direction::TopLeft,
            Direction::BottomLeft => Direction::TopRight,
            Direction::Left => Direction::Right,
        }
    }

    /// The label used in board files
    pub const fn label(self) -> &'static str {
        match self {
            Direction::TopLeft => "top-left",
            Direction::TopRight => "top-right",
            Direction::Right => "right",
            Direction::BottomRight => "bottom-right",
            Direction::BottomLeft => "bottom-left",
            Direction::Left => "left",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Whether the two sides share a corner of the hex
    pub fn is_adjacent_to(self, other: Direction) -> bool {
        let diff = (self.index() + 6 - other.index()) % 6;
        diff == 1 || diff == 5
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going right
/// - `r` increases going down (bottom-right)
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column
    pub q: i32,
    /// Row
    pub r: i32,
}

impl HexCoord {
    /// The board origin, where the desert sits
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        *self + direction.offset()
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Convert to pixel coordinates (center of hex)
    /// Uses pointy-top orientation with the given hex size (radius)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * (3.0_f64.sqrt() * self.q as f64 + 3.0_f64.sqrt() / 2.0 * self.r as f64);
        let y = hex_size * (3.0 / 2.0 * self.r as f64);
        (x, y)
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, other: HexCoord) -> HexCoord {
        HexCoord::new(self.q + other.q, self.r + other.r)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
