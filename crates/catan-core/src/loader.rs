//! Board description files.
//!
//! A description is a JSON document with two lists: `tiles`, each with an id,
//! a material and a map from direction label to the id of its neighbour, and
//! `ports`, each with an id and a material (or `generic`). No coordinates are
//! stored; they are derived from the edges by the grid builder.

use crate::board::{Harbor, Material};
use crate::error::{BoardError, Result};
use crate::hex::Direction;
use crate::rules::{NON_DESERT_COUNT, TILE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Raw contents of a board file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDescription {
    pub tiles: Vec<TileRecord>,
    pub ports: Vec<PortRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: String,
    pub material: Material,
    pub edges: BTreeMap<Direction, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    pub id: String,
    pub material: Harbor,
}

impl BoardDescription {
    /// Read and parse a board file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => BoardError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => BoardError::UnexpectedFailure(err),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read board file");
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of tiles that are not desert
    pub fn non_desert_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.material.is_desert()).count()
    }

    /// A loadable board has 19 tiles, 18 of them non-desert
    pub fn check_counts(&self) -> Result<()> {
        if self.tiles.len() != TILE_COUNT {
            return Err(BoardError::InvalidBoardCount(format!(
                "the map must contain exactly {TILE_COUNT} tiles, found {}",
                self.tiles.len()
            )));
        }
        let non_desert = self.non_desert_count();
        if non_desert != NON_DESERT_COUNT {
            return Err(BoardError::InvalidBoardCount(format!(
                "the map must contain exactly {NON_DESERT_COUNT} non-desert tiles, found {non_desert}"
            )));
        }
        Ok(())
    }
}
