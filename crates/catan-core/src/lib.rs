//! Catan board engine for declarative map files
//!
//! This crate turns a board description (tiles with directional adjacency,
//! plus ports) into a laid-out board:
//! - Loading and count checks for the 19-tile standard board
//! - Random number token assignment and initial robber placement
//! - Axial coordinates derived from adjacency by breadth-first traversal
//! - Port placement derived from the same edges
//! - Aggregated structural validation
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and the six direction labels
//! - [`board`]: Tiles, ports and the assembled board
//! - [`loader`]: Board description files
//! - [`numbering`]: Number tokens and the robber
//! - [`grid`]: Coordinate layout and port placement
//! - [`validate`]: Structural checks
//! - [`rules`]: Fixed quantities of a standard board

pub mod board;
pub mod error;
pub mod grid;
pub mod hex;
pub mod loader;
pub mod numbering;
pub mod rules;
pub mod validate;

// Re-export commonly used types
pub use board::{Board, Harbor, Material, Port, Tile};
pub use error::{BoardError, Result};
pub use grid::{CoordinateCollision, GridLayout, PortPlacement};
pub use hex::{Direction, HexCoord};
pub use loader::{BoardDescription, PortRecord, TileRecord};
pub use validate::{Strictness, ValidationReport};
