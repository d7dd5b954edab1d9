//! Structural checks over an assembled board.
//!
//! Every check is a pure function returning the violations it found. Hard
//! checks always fail validation. Advisory checks describe a board that loads
//! and lays out fine but departs from the standard game (asymmetric edges,
//! unusual material mix, neighbouring ports, ...); they only fail validation
//! under [`Strictness::Strict`]. All failures are reported together.

use crate::board::{Board, Harbor, Material, Port, Tile};
use crate::error::{BoardError, Result};
use crate::grid::GridLayout;
use crate::hex::HexCoord;
use crate::rules::{MATERIAL_DISTRIBUTION, PORT_DISTRIBUTION, TILE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Whether advisory findings fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strictness {
    /// Only hard checks fail; advisories are reported
    #[default]
    Lenient,
    /// Advisories fail too
    Strict,
}

/// Outcome of a successful validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub advisories: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// Run every check and aggregate the results.
pub fn validate(board: &Board, strictness: Strictness) -> Result<ValidationReport> {
    let tiles = board.tiles();
    let ports = board.ports();
    let layout = board.layout();

    let mut errors = Vec::new();
    errors.extend(check_tile_count(tiles));
    errors.extend(check_desert_count(tiles));
    errors.extend(check_edge_targets(tiles, ports));
    errors.extend(check_completeness(tiles));
    errors.extend(check_duplicate_ids(tiles, ports));

    let mut advisories = Vec::new();
    advisories.extend(check_desert_position(tiles, layout));
    advisories.extend(check_edge_symmetry(tiles));
    advisories.extend(check_material_distribution(tiles));
    advisories.extend(check_port_distribution(ports));
    advisories.extend(check_adjacent_ports(tiles));
    advisories.extend(check_reachability(layout));
    advisories.extend(check_port_conflicts(layout));

    if strictness == Strictness::Strict {
        errors.extend(advisories.iter().cloned());
    }
    if !errors.is_empty() {
        return Err(BoardError::InvalidBoardStructure(errors.join("\n")));
    }

    for advisory in &advisories {
        warn!("{advisory}");
    }
    debug!(advisories = advisories.len(), "board validated");
    Ok(ValidationReport { advisories })
}

// ==================== Hard Checks ====================

pub fn check_tile_count(tiles: &[Tile]) -> Vec<String> {
    if tiles.len() == TILE_COUNT {
        return Vec::new();
    }
    vec![format!("expected {TILE_COUNT} tiles, found {}", tiles.len())]
}

pub fn check_desert_count(tiles: &[Tile]) -> Vec<String> {
    let deserts = tiles.iter().filter(|t| t.material.is_desert()).count();
    if deserts == 1 {
        return Vec::new();
    }
    vec![format!("there must be exactly 1 desert tile, found {deserts}")]
}

/// Every edge must name a known tile or port
pub fn check_edge_targets(tiles: &[Tile], ports: &[Port]) -> Vec<String> {
    let known: HashSet<&str> = tiles
        .iter()
        .map(|t| t.id.as_str())
        .chain(ports.iter().map(|p| p.id.as_str()))
        .collect();

    let mut errors = Vec::new();
    for tile in tiles {
        for (direction, target) in &tile.edges {
            if !known.contains(target.as_str()) {
                errors.push(format!(
                    "tile '{}' has an edge {direction} to unknown id '{target}'",
                    tile.id
                ));
            }
        }
    }
    errors
}

/// Every tile needs an id and at least one edge
pub fn check_completeness(tiles: &[Tile]) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, tile) in tiles.iter().enumerate() {
        if tile.id.trim().is_empty() {
            errors.push(format!("tile #{} ({}) has no id", i + 1, tile.material));
        }
        if tile.edges.is_empty() {
            errors.push(format!("tile '{}' declares no edges", tile.id));
        }
    }
    errors
}

/// Ids must be unique across tiles and ports
pub fn check_duplicate_ids(tiles: &[Tile], ports: &[Port]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();
    for id in tiles.iter().map(|t| &t.id).chain(ports.iter().map(|p| &p.id)) {
        if !seen.insert(id.as_str()) && reported.insert(id.as_str()) {
            errors.push(format!("id '{id}' is declared more than once"));
        }
    }
    errors
}

// ==================== Advisory Checks ====================

/// The desert should be the centre of the board: no placed tile more than two
/// steps away from it.
pub fn check_desert_position(tiles: &[Tile], layout: &GridLayout) -> Vec<String> {
    let Some(desert) = tiles.iter().find(|t| t.material.is_desert()) else {
        return Vec::new();
    };
    let Some(center) = layout.coord_of(&desert.id) else {
        return Vec::new();
    };

    let mut advisories = Vec::new();
    for id in layout.order() {
        let Some(coord) = layout.coord_of(id) else {
            continue;
        };
        let distance = center.distance_to(&coord);
        if distance > 2 {
            advisories.push(format!(
                "tile '{id}' at {coord} is {distance} steps from the desert, which should sit at the centre"
            ));
        }
    }
    if center != HexCoord::ORIGIN {
        advisories.push(format!("desert '{}' is not at the origin", desert.id));
    }
    advisories
}

/// An edge from A to B should be matched by B pointing back at A from the
/// opposite side.
pub fn check_edge_symmetry(tiles: &[Tile]) -> Vec<String> {
    let by_id: HashMap<&str, &Tile> = tiles.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut advisories = Vec::new();
    for tile in tiles {
        for (&direction, target) in &tile.edges {
            let Some(neighbor) = by_id.get(target.as_str()) else {
                continue;
            };
            let back = direction.opposite();
            if neighbor.edges.get(&back) != Some(&tile.id) {
                advisories.push(format!(
                    "tile '{}' points {direction} to '{target}', but '{target}' does not point {back} back",
                    tile.id
                ));
            }
        }
    }
    advisories
}

pub fn check_material_distribution(tiles: &[Tile]) -> Vec<String> {
    let mut counts: HashMap<Material, usize> = HashMap::new();
    for tile in tiles {
        *counts.entry(tile.material).or_insert(0) += 1;
    }

    MATERIAL_DISTRIBUTION
        .iter()
        .filter_map(|&(material, expected)| {
            let found = counts.get(&material).copied().unwrap_or(0);
            (found != expected)
                .then(|| format!("expected {expected} {material} tiles, found {found}"))
        })
        .collect()
}

pub fn check_port_distribution(ports: &[Port]) -> Vec<String> {
    let mut counts: HashMap<Harbor, usize> = HashMap::new();
    for port in ports {
        *counts.entry(port.material).or_insert(0) += 1;
    }

    PORT_DISTRIBUTION
        .iter()
        .filter_map(|&(harbor, expected)| {
            let found = counts.get(&harbor).copied().unwrap_or(0);
            (found != expected)
                .then(|| format!("expected {expected} {harbor} ports, found {found}"))
        })
        .collect()
}

/// Two ports should not dock on neighbouring sides of one tile
pub fn check_adjacent_ports(tiles: &[Tile]) -> Vec<String> {
    let tile_ids: HashSet<&str> = tiles.iter().map(|t| t.id.as_str()).collect();
    let mut advisories = Vec::new();
    for tile in tiles {
        let docked: Vec<_> = tile
            .edges
            .iter()
            .filter(|(_, target)| crate::rules::is_port_id(target) && !tile_ids.contains(target.as_str()))
            .collect();
        for (i, (dir_a, port_a)) in docked.iter().enumerate() {
            for (dir_b, port_b) in &docked[i + 1..] {
                if dir_a.is_adjacent_to(**dir_b) {
                    advisories.push(format!(
                        "ports '{port_a}' and '{port_b}' dock on neighbouring sides of tile '{}'",
                        tile.id
                    ));
                }
            }
        }
    }
    advisories
}

pub fn check_reachability(layout: &GridLayout) -> Vec<String> {
    let mut advisories: Vec<String> = layout
        .unreached()
        .iter()
        .map(|id| format!("tile '{id}' is not connected to the desert and was left off the grid"))
        .collect();
    advisories.extend(layout.coordinate_collisions().iter().map(|c| {
        format!(
            "tile '{}' {} would place '{}' on {}, already taken by '{}'",
            c.from.tile_id, c.from.direction, c.tile_id, c.coord, c.occupant
        )
    }));
    advisories
}

pub fn check_port_conflicts(layout: &GridLayout) -> Vec<String> {
    layout
        .port_conflicts()
        .iter()
        .map(|(port, claims)| {
            let sides: Vec<String> = claims
                .iter()
                .map(|c| format!("{} {}", c.tile_id, c.direction))
                .collect();
            format!(
                "port '{port}' is claimed by {}; keeping the last",
                sides.join(", ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Direction;
    use std::collections::BTreeMap;

    fn tile(id: &str, material: Material, edges: &[(Direction, &str)]) -> Tile {
        let edges: BTreeMap<_, _> = edges.iter().map(|(d, t)| (*d, t.to_string())).collect();
        Tile::new(id, material, edges)
    }

    #[test]
    fn test_unknown_targets_are_listed() {
        let tiles = vec![
            tile("d01", Material::Desert, &[(Direction::Right, "zz9")]),
            tile("wd01", Material::Wood, &[(Direction::Left, "p01")]),
        ];
        let ports = vec![Port::new("p01", Harbor::Generic)];
        let errors = check_edge_targets(&tiles, &ports);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("zz9"));
        assert!(errors[0].contains("d01"));
    }

    #[test]
    fn test_counts() {
        let tiles = vec![
            tile("d01", Material::Desert, &[]),
            tile("d02", Material::Desert, &[]),
        ];
        assert_eq!(check_tile_count(&tiles).len(), 1);
        assert_eq!(check_desert_count(&tiles).len(), 1);
        assert!(check_desert_count(&tiles[..1]).is_empty());
    }

    #[test]
    fn test_completeness() {
        let tiles = vec![
            tile("", Material::Wood, &[(Direction::Left, "d01")]),
            tile("d01", Material::Desert, &[]),
        ];
        let errors = check_completeness(&tiles);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("no id"));
        assert!(errors[1].contains("d01"));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let tiles = vec![
            tile("wd01", Material::Wood, &[]),
            tile("wd01", Material::Wood, &[]),
            tile("wd01", Material::Wood, &[]),
        ];
        let ports = vec![Port::new("p01", Harbor::Generic), Port::new("p01", Harbor::Generic)];
        let errors = check_duplicate_ids(&tiles, &ports);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_edge_symmetry() {
        let tiles = vec![
            tile("d01", Material::Desert, &[(Direction::Right, "wd01")]),
            tile("wd01", Material::Wood, &[(Direction::Left, "d01")]),
            tile("wl01", Material::Wool, &[(Direction::Left, "wd01")]),
        ];
        let advisories = check_edge_symmetry(&tiles);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].starts_with("tile 'wl01'"));
    }

    #[test]
    fn test_adjacent_ports() {
        let tiles = vec![
            tile(
                "wd01",
                Material::Wood,
                &[(Direction::TopLeft, "p01"), (Direction::Left, "p02"), (Direction::Right, "p03")],
            ),
        ];
        let advisories = check_adjacent_ports(&tiles);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("p01") && advisories[0].contains("p02"));
    }

    #[test]
    fn test_prefixed_neighbour_is_not_a_docked_port() {
        let tiles = vec![
            tile("wd01", Material::Wood, &[(Direction::TopLeft, "p01"), (Direction::Left, "pz04")]),
            tile("pz04", Material::Clay, &[(Direction::Right, "wd01")]),
        ];
        assert!(check_adjacent_ports(&tiles).is_empty());
    }

    #[test]
    fn test_material_distribution() {
        let tiles = vec![tile("d01", Material::Desert, &[])];
        let advisories = check_material_distribution(&tiles);
        assert_eq!(advisories.len(), 5);
        assert!(advisories.iter().all(|a| !a.contains("desert")));
    }

    #[test]
    fn test_port_distribution() {
        let ports: Vec<Port> = PORT_DISTRIBUTION
            .iter()
            .flat_map(|&(harbor, n)| (0..n).map(move |i| Port::new(format!("p{harbor}{i}"), harbor)))
            .collect();
        assert!(check_port_distribution(&ports).is_empty());
        assert_eq!(check_port_distribution(&ports[1..]).len(), 1);
    }

    #[test]
    fn test_desert_far_from_edge() {
        let tiles = vec![
            tile("d01", Material::Desert, &[(Direction::Right, "a")]),
            tile("a", Material::Wood, &[(Direction::Right, "b")]),
            tile("b", Material::Wood, &[(Direction::Right, "c")]),
            tile("c", Material::Wood, &[]),
        ];
        let layout = GridLayout::build(&tiles).unwrap();
        let advisories = check_desert_position(&tiles, &layout);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("'c'"));
    }
}
