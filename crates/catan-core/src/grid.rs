//! Grid layout derived from declared adjacency.
//!
//! Board files carry no coordinates. Starting from the desert at the origin, a
//! breadth-first walk follows each tile's direction → neighbour edges and places
//! the neighbour one unit offset away. Interior edges are declared from both
//! sides, so the walk meets already placed tiles constantly; those edges are
//! skipped. Tiles the walk never reaches get no coordinate and are reported in
//! [`GridLayout::unreached`].
//!
//! Port placements come from the same edges: every edge whose target carries
//! the port id prefix records the port against that tile side. When several
//! sides claim one port, the last one in draw order wins and the earlier ones
//! are kept in [`GridLayout::port_conflicts`].

use crate::board::Tile;
use crate::error::{BoardError, Result};
use crate::hex::{Direction, HexCoord};
use crate::rules::is_port_id;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Where a port docks: a tile and one of its sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPlacement {
    pub tile_id: String,
    pub direction: Direction,
}

impl PortPlacement {
    fn new(tile_id: &str, direction: Direction) -> Self {
        Self {
            tile_id: tile_id.to_string(),
            direction,
        }
    }
}

/// An edge that would have put a tile on an occupied coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateCollision {
    pub coord: HexCoord,
    /// Tile already at `coord`
    pub occupant: String,
    /// Tile the edge tried to place there
    pub tile_id: String,
    /// Tile and side the offending edge was declared on
    pub from: PortPlacement,
}

/// Coordinates and port placements for a board
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    grid: HashMap<HexCoord, String>,
    coords: HashMap<String, HexCoord>,
    order: Vec<String>,
    port_positions: BTreeMap<String, PortPlacement>,
    unreached: Vec<String>,
    port_conflicts: BTreeMap<String, Vec<PortPlacement>>,
    coordinate_collisions: Vec<CoordinateCollision>,
}

impl GridLayout {
    /// Lay out `tiles` around the desert.
    ///
    /// Fails with [`BoardError::MissingDesert`] when there is no desert to use
    /// as the origin.
    pub fn build(tiles: &[Tile]) -> Result<Self> {
        let desert = tiles
            .iter()
            .find(|t| t.material.is_desert())
            .ok_or(BoardError::MissingDesert)?;

        let mut by_id: HashMap<&str, &Tile> = HashMap::with_capacity(tiles.len());
        for tile in tiles {
            by_id.entry(tile.id.as_str()).or_insert(tile);
        }

        let mut layout = Self::default();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&Tile, HexCoord)> = VecDeque::new();

        layout.place(&desert.id, HexCoord::ORIGIN);
        visited.insert(desert.id.as_str());
        queue.push_back((desert, HexCoord::ORIGIN));

        while let Some((current, here)) = queue.pop_front() {
            for (&direction, target) in &current.edges {
                let Some(&neighbor) = by_id.get(target.as_str()) else {
                    continue;
                };
                if visited.contains(neighbor.id.as_str()) {
                    continue;
                }

                let there = here.neighbor(direction);
                if let Some(occupant) = layout.grid.get(&there) {
                    warn!(
                        tile = %neighbor.id,
                        occupant = %occupant,
                        coord = %there,
                        "adjacency places two tiles on one coordinate"
                    );
                    layout.coordinate_collisions.push(CoordinateCollision {
                        coord: there,
                        occupant: occupant.clone(),
                        tile_id: neighbor.id.clone(),
                        from: PortPlacement::new(&current.id, direction),
                    });
                    continue;
                }

                layout.place(&neighbor.id, there);
                visited.insert(neighbor.id.as_str());
                queue.push_back((neighbor, there));
            }
        }

        let mut placed: Vec<(HexCoord, &String)> = layout.grid.iter().map(|(c, id)| (*c, id)).collect();
        placed.sort_by_key(|(coord, _)| (coord.r, coord.q));
        layout.order = placed.into_iter().map(|(_, id)| id.clone()).collect();

        layout.unreached = tiles
            .iter()
            .filter(|t| !visited.contains(t.id.as_str()))
            .map(|t| t.id.clone())
            .collect();
        if !layout.unreached.is_empty() {
            warn!(tiles = ?layout.unreached, "tiles not reachable from the desert were left off the grid");
        }

        layout.place_ports(&by_id);

        debug!(
            placed = layout.placed(),
            ports = layout.port_positions.len(),
            "grid built"
        );
        Ok(layout)
    }

    fn place(&mut self, id: &str, coord: HexCoord) {
        self.grid.insert(coord, id.to_string());
        self.coords.insert(id.to_string(), coord);
    }

    fn place_ports(&mut self, by_id: &HashMap<&str, &Tile>) {
        for id in &self.order {
            let Some(tile) = by_id.get(id.as_str()) else {
                continue;
            };
            for (&direction, target) in &tile.edges {
                // a tile whose id happens to carry the port prefix is a neighbour
                if !is_port_id(target) || by_id.contains_key(target.as_str()) {
                    continue;
                }
                let placement = PortPlacement::new(&tile.id, direction);
                if let Some(previous) = self.port_positions.insert(target.clone(), placement.clone()) {
                    warn!(
                        port = %target,
                        kept = %format!("{} {}", placement.tile_id, placement.direction),
                        dropped = %format!("{} {}", previous.tile_id, previous.direction),
                        "port claimed by more than one tile side"
                    );
                    self.port_conflicts
                        .entry(target.clone())
                        .or_insert_with(|| vec![previous])
                        .push(placement);
                }
            }
        }
    }

    /// Coordinate of a placed tile
    pub fn coord_of(&self, id: &str) -> Option<HexCoord> {
        self.coords.get(id).copied()
    }

    /// Id of the tile at a coordinate
    pub fn tile_at(&self, coord: &HexCoord) -> Option<&str> {
        self.grid.get(coord).map(String::as_str)
    }

    /// Placed tile ids, ascending by row then column
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Tile id -> coordinate for every placed tile
    pub fn coords(&self) -> &HashMap<String, HexCoord> {
        &self.coords
    }

    pub fn port_positions(&self) -> &BTreeMap<String, PortPlacement> {
        &self.port_positions
    }

    /// Tiles the walk never reached, in declaration order
    pub fn unreached(&self) -> &[String] {
        &self.unreached
    }

    /// Ports claimed by more than one side, with every claim in the order seen
    pub fn port_conflicts(&self) -> &BTreeMap<String, Vec<PortPlacement>> {
        &self.port_conflicts
    }

    pub fn coordinate_collisions(&self) -> &[CoordinateCollision] {
        &self.coordinate_collisions
    }

    /// Number of placed tiles
    pub fn placed(&self) -> usize {
        self.order.len()
    }
}
