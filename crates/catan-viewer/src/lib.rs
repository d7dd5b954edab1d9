//! Rendering for laid-out Catan boards.
//!
//! The renderer consumes what `catan-core` derives: placed tiles in draw
//! order, their axial coordinates, port placements and the robber tile.

pub mod render;

pub use render::{BoardRenderer, RenderConfig};
