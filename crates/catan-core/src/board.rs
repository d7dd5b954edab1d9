//! Board representation: tiles, ports and the assembled board.
//!
//! This module contains:
//! - Terrain materials and port kinds
//! - Tile and port entities as loaded from a board description
//! - The `Board` aggregate, which owns every entity together with the derived
//!   grid layout and validation report
//! - The load → number → layout → validate pipeline

use crate::error::Result;
use crate::grid::{GridLayout, PortPlacement};
use crate::hex::{Direction, HexCoord};
use crate::loader::BoardDescription;
use crate::numbering;
use crate::validate::{self, Strictness, ValidationReport};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Terrain material of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Wood,
    Wool,
    Cereal,
    Clay,
    Mineral,
    /// Produces nothing; the robber starts here
    Desert,
}

impl Material {
    /// All materials, desert last
    pub const ALL: [Material; 6] = [
        Material::Wood,
        Material::Wool,
        Material::Cereal,
        Material::Clay,
        Material::Mineral,
        Material::Desert,
    ];

    /// Name used in board files
    pub const fn name(self) -> &'static str {
        match self {
            Material::Wood => "wood",
            Material::Wool => "wool",
            Material::Cereal => "cereal",
            Material::Clay => "clay",
            Material::Mineral => "mineral",
            Material::Desert => "desert",
        }
    }

    pub fn is_desert(self) -> bool {
        self == Material::Desert
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown material '{s}'"))
    }
}

/// What a port trades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Harbor {
    /// 3:1 trade any material
    Generic,
    /// 2:1 trade for a specific material
    Specific(Material),
}

impl Harbor {
    /// The exchange rate for this harbor
    pub fn rate(&self) -> u32 {
        match self {
            Harbor::Generic => 3,
            Harbor::Specific(_) => 2,
        }
    }

    /// The exchange rate as printed on the board, e.g. "3:1"
    pub fn ratio(&self) -> String {
        format!("{}:1", self.rate())
    }

    /// Name used in board files
    pub fn name(&self) -> &'static str {
        match self {
            Harbor::Generic => "generic",
            Harbor::Specific(material) => material.name(),
        }
    }
}

impl fmt::Display for Harbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Harbor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "generic" {
            return Ok(Harbor::Generic);
        }
        Material::from_str(s).map(Harbor::Specific)
    }
}

impl TryFrom<String> for Harbor {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Harbor> for String {
    fn from(harbor: Harbor) -> Self {
        harbor.name().to_string()
    }
}

/// A land tile and the ids of whatever borders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub material: Material,
    /// Target id (tile or port) on each declared side
    pub edges: BTreeMap<Direction, String>,
    /// Number token (2-12, None for desert or before numbering)
    pub number: Option<u8>,
    /// Whether the robber is currently on this tile
    pub has_robber: bool,
}

impl Tile {
    pub fn new(id: impl Into<String>, material: Material, edges: BTreeMap<Direction, String>) -> Self {
        Self {
            id: id.into(),
            material,
            edges,
            number: None,
            has_robber: material.is_desert(),
        }
    }

    /// Assign a number token. Deserts never carry one.
    pub fn set_number(&mut self, number: u8) {
        self.number = if self.material.is_desert() { None } else { Some(number) };
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{}: {} (number {})", self.id, self.material, number),
            None => write!(f, "{}: {}", self.id, self.material),
        }
    }
}

/// A trade point referenced from tile edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub material: Harbor,
}

impl Port {
    pub fn new(id: impl Into<String>, material: Harbor) -> Self {
        Self {
            id: id.into(),
            material,
        }
    }

    /// "3:1" for generic ports, "2:1" otherwise
    pub fn ratio(&self) -> String {
        self.material.ratio()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (ratio {})", self.id, self.material, self.ratio())
    }
}

/// The complete board
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Tiles in the order they were declared
    tiles: Vec<Tile>,
    ports: Vec<Port>,
    /// Tile id -> index into `tiles` (first declaration wins)
    index: HashMap<String, usize>,
    /// Id of the tile holding the robber
    robber: Option<String>,
    layout: GridLayout,
    report: ValidationReport,
}

impl Board {
    /// Build the entities from a description after checking tile counts.
    ///
    /// Numbers, layout and validation are left to the later pipeline steps.
    pub fn from_description(description: BoardDescription) -> Result<Self> {
        description.check_counts()?;

        let tiles: Vec<Tile> = description
            .tiles
            .into_iter()
            .map(|record| Tile::new(record.id, record.material, record.edges))
            .collect();
        let ports = description
            .ports
            .into_iter()
            .map(|record| Port::new(record.id, record.material))
            .collect();

        let mut index = HashMap::new();
        for (i, tile) in tiles.iter().enumerate() {
            index.entry(tile.id.clone()).or_insert(i);
        }

        Ok(Self {
            tiles,
            ports,
            index,
            ..Self::default()
        })
    }

    /// Load, number, lay out and validate a board file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut rng = rand::thread_rng();
        Self::load_with_rng(path, &mut rng, Strictness::default())
    }

    /// Load a board file with a provided RNG.
    /// This allows for deterministic numbering when needed
    pub fn load_with_rng<R: Rng + ?Sized>(
        path: impl AsRef<Path>,
        rng: &mut R,
        strictness: Strictness,
    ) -> Result<Self> {
        let description = BoardDescription::from_path(path)?;
        Self::assemble_with_rng(description, rng, strictness)
    }

    /// Run the whole pipeline on an already parsed description
    pub fn assemble_with_rng<R: Rng + ?Sized>(
        description: BoardDescription,
        rng: &mut R,
        strictness: Strictness,
    ) -> Result<Self> {
        let mut board = Self::from_description(description)?;
        board.assign_numbers(rng);
        board.build_grid()?;
        board.validate(strictness)?;
        info!(
            tiles = board.tiles.len(),
            placed = board.layout.placed(),
            ports = board.ports.len(),
            advisories = board.report.advisories.len(),
            "board assembled"
        );
        Ok(board)
    }

    /// Shuffle number tokens onto the non-desert tiles and put the robber on the desert
    pub fn assign_numbers<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        numbering::assign_numbers(&mut self.tiles, rng);
        self.robber = numbering::place_robber(&mut self.tiles);
        debug!(robber = ?self.robber, "numbers assigned");
    }

    /// Compute coordinates and port placements from the declared adjacency
    pub fn build_grid(&mut self) -> Result<&GridLayout> {
        self.layout = GridLayout::build(&self.tiles)?;
        Ok(&self.layout)
    }

    /// Check structural invariants, keeping any advisories on the board
    pub fn validate(&mut self, strictness: Strictness) -> Result<&ValidationReport> {
        self.report = validate::validate(self, strictness)?;
        Ok(&self.report)
    }

    // ==================== Query Methods ====================

    /// All tiles in declaration order, placed or not
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Placed tiles, top-to-bottom then left-to-right
    pub fn ordered_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.layout.order().iter().filter_map(move |id| self.tile(id))
    }

    /// Get a tile by id
    pub fn tile(&self, id: &str) -> Option<&Tile> {
        self.index.get(id).map(|&i| &self.tiles[i])
    }

    /// Get a port by id
    pub fn port(&self, id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == id)
    }

    /// Get the tile at a coordinate
    pub fn tile_at(&self, coord: &HexCoord) -> Option<&Tile> {
        self.layout.tile_at(coord).and_then(|id| self.tile(id))
    }

    /// Get the coordinate of a tile, if it was placed
    pub fn coord_of(&self, id: &str) -> Option<HexCoord> {
        self.layout.coord_of(id)
    }

    /// Placed tiles with their coordinates, in draw order
    pub fn tile_coords(&self) -> impl Iterator<Item = (&Tile, HexCoord)> {
        self.ordered_tiles()
            .filter_map(move |tile| self.coord_of(&tile.id).map(|coord| (tile, coord)))
    }

    /// Port id -> the tile side it is attached to
    pub fn port_positions(&self) -> &BTreeMap<String, PortPlacement> {
        self.layout.port_positions()
    }

    /// The tile currently holding the robber
    pub fn robber_tile(&self) -> Option<&Tile> {
        self.robber.as_deref().and_then(|id| self.tile(id))
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(tiles={}, ports={})", self.tiles.len(), self.ports.len())
    }
}
