//! Number token assignment and initial robber placement.

use crate::board::Tile;
use crate::rules::NUMBER_ORDER;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Shuffle the fixed number tokens and hand them to the non-desert tiles in
/// declaration order. Deserts are skipped. Extra tiles beyond the token count
/// keep no number.
pub fn assign_numbers<R: Rng + ?Sized>(tiles: &mut [Tile], rng: &mut R) {
    let mut numbers = NUMBER_ORDER.to_vec();
    numbers.shuffle(rng);

    let number_tiles = tiles.iter_mut().filter(|t| !t.material.is_desert());
    for (tile, number) in number_tiles.zip(numbers) {
        tile.set_number(number);
    }
}

/// Put the robber on the first desert and return its id.
///
/// Returns `None` without error when there is no desert.
pub fn place_robber(tiles: &mut [Tile]) -> Option<String> {
    let Some(position) = tiles.iter().position(|t| t.material.is_desert()) else {
        warn!("no desert tile, robber left unplaced");
        return None;
    };
    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.has_robber = i == position;
    }
    Some(tiles[position].id.clone())
}
