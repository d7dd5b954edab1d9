//! Fixed quantities of a standard board.

use crate::board::{Harbor, Material};

/// Land tiles on a standard board
pub const TILE_COUNT: usize = 19;

/// Land tiles that carry a number token
pub const NON_DESERT_COUNT: usize = 18;

/// Number tokens handed out to the non-desert tiles, one each
pub const NUMBER_ORDER: [u8; NON_DESERT_COUNT] =
    [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];

/// Ids starting with this prefix name ports rather than tiles
pub const PORT_ID_PREFIX: &str = "p";

/// Expected number of tiles of each material
pub const MATERIAL_DISTRIBUTION: [(Material, usize); 6] = [
    (Material::Wood, 4),
    (Material::Wool, 4),
    (Material::Cereal, 4),
    (Material::Clay, 3),
    (Material::Mineral, 3),
    (Material::Desert, 1),
];

/// Expected number of ports of each kind
pub const PORT_DISTRIBUTION: [(Harbor, usize); 6] = [
    (Harbor::Generic, 4),
    (Harbor::Specific(Material::Wood), 1),
    (Harbor::Specific(Material::Wool), 1),
    (Harbor::Specific(Material::Cereal), 1),
    (Harbor::Specific(Material::Clay), 1),
    (Harbor::Specific(Material::Mineral), 1),
];

/// Whether an edge target names a port
pub fn is_port_id(id: &str) -> bool {
    id.starts_with(PORT_ID_PREFIX)
}
