//! Integration tests for the board pipeline.
//!
//! These tests run the shipped standard board (and broken variants of it)
//! through loading, numbering, layout and validation.

use catan_core::rules::NUMBER_ORDER;
use catan_core::*;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::io::Write;

const STANDARD: &str = include_str!("../../../boards/standard.json");

fn standard() -> BoardDescription {
    BoardDescription::from_json_str(STANDARD).expect("standard board parses")
}

fn assemble(description: BoardDescription) -> Result<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    Board::assemble_with_rng(description, &mut rng, Strictness::Lenient)
}

/// Drop every edge pointing at `id`
fn disconnect(description: &mut BoardDescription, id: &str) {
    for tile in &mut description.tiles {
        tile.edges.retain(|_, target| *target != id);
    }
}

#[test]
fn test_standard_board_loads() {
    let board = assemble(standard()).unwrap();
    assert_eq!(board.tiles().len(), 19);
    assert_eq!(board.ports().len(), 9);
    assert_eq!(board.ordered_tiles().count(), 19);
    assert!(board.report().is_clean(), "{:?}", board.report().advisories);
    assert_eq!(board.to_string(), "Board(tiles=19, ports=9)");
}

#[test]
fn test_numbers_are_a_permutation_of_the_tokens() {
    let board = assemble(standard()).unwrap();

    let mut assigned: Vec<u8> = board.tiles().iter().filter_map(|t| t.number).collect();
    let mut expected = NUMBER_ORDER.to_vec();
    assigned.sort_unstable();
    expected.sort_unstable();
    assert_eq!(assigned, expected);

    for tile in board.tiles() {
        assert_eq!(tile.number.is_none(), tile.material == Material::Desert, "{tile}");
    }
}

#[test]
fn test_robber_starts_on_desert() {
    let board = assemble(standard()).unwrap();
    let robber = board.robber_tile().expect("robber placed");
    assert_eq!(robber.id, "d01");
    assert!(robber.has_robber);
    assert_eq!(board.tiles().iter().filter(|t| t.has_robber).count(), 1);
}

#[test]
fn test_desert_is_the_origin() {
    let board = assemble(standard()).unwrap();
    assert_eq!(board.coord_of("d01"), Some(HexCoord::ORIGIN));
    assert_eq!(board.tile_at(&HexCoord::ORIGIN).map(|t| t.id.as_str()), Some("d01"));
}

#[test]
fn test_every_edge_matches_its_offset() {
    let board = assemble(standard()).unwrap();
    for tile in board.tiles() {
        let here = board.coord_of(&tile.id).unwrap();
        for (direction, target) in &tile.edges {
            if let Some(there) = board.coord_of(target) {
                assert_eq!(here + direction.offset(), there, "{} {} {}", tile.id, direction, target);
            }
        }
    }
}

#[test]
fn test_coordinates_are_unique_and_compact() {
    let board = assemble(standard()).unwrap();
    let coords: HashSet<HexCoord> = board.tile_coords().map(|(_, c)| c).collect();
    assert_eq!(coords.len(), 19);
    assert!(coords.iter().all(|c| c.distance_to(&HexCoord::ORIGIN) <= 2));
}

#[test]
fn test_known_positions() {
    let board = assemble(standard()).unwrap();
    assert_eq!(board.coord_of("wd01"), Some(HexCoord::new(0, -2)));
    assert_eq!(board.coord_of("ce01"), Some(HexCoord::new(2, -2)));
    assert_eq!(board.coord_of("wl02"), Some(HexCoord::new(-2, 0)));
    assert_eq!(board.coord_of("mi03"), Some(HexCoord::new(1, 1)));
    assert_eq!(board.coord_of("ce04"), Some(HexCoord::new(0, 2)));
}

#[test]
fn test_draw_order_is_top_to_bottom_left_to_right() {
    let board = assemble(standard()).unwrap();
    let order: Vec<&str> = board.ordered_tiles().map(|t| t.id.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "wd01", "wl01", "ce01", //
            "cl01", "mi01", "ce02", "wd02", //
            "wl02", "mi02", "d01", "cl02", "wl03", //
            "ce03", "wd03", "cl03", "mi03", //
            "wl04", "wd04", "ce04",
        ]
    );

    let rows: Vec<(i32, i32)> = board.tile_coords().map(|(_, c)| (c.r, c.q)).collect();
    let mut sorted = rows.clone();
    sorted.sort();
    assert_eq!(rows, sorted);
}

#[test]
fn test_port_positions() {
    let board = assemble(standard()).unwrap();
    let positions = board.port_positions();
    assert_eq!(positions.len(), 9);
    assert_eq!(
        positions.get("p01"),
        Some(&PortPlacement {
            tile_id: "wd01".into(),
            direction: Direction::TopLeft,
        })
    );
    assert_eq!(
        positions.get("p06"),
        Some(&PortPlacement {
            tile_id: "ce04".into(),
            direction: Direction::BottomRight,
        })
    );

    assert_eq!(board.port("p01").unwrap().ratio(), "3:1");
    assert_eq!(board.port("p02").unwrap().ratio(), "2:1");
}

#[test]
fn test_rebuilding_grid_is_idempotent() {
    let mut board = assemble(standard()).unwrap();
    let first = board.layout().coords().clone();
    let first_ports = board.port_positions().clone();
    board.build_grid().unwrap();
    assert_eq!(board.layout().coords(), &first);
    assert_eq!(board.port_positions(), &first_ports);
}

#[test]
fn test_same_seed_same_board() {
    let a = assemble(standard()).unwrap();
    let b = assemble(standard()).unwrap();
    let numbers = |board: &Board| -> Vec<(String, Option<u8>)> {
        board.tiles().iter().map(|t| (t.id.clone(), t.number)).collect()
    };
    assert_eq!(numbers(&a), numbers(&b));
    assert_eq!(a.layout().coords(), b.layout().coords());
}

#[test]
fn test_eighteen_tiles_rejected() {
    let mut description = standard();
    description.tiles.pop();
    assert!(matches!(assemble(description), Err(BoardError::InvalidBoardCount(_))));
}

#[test]
fn test_twenty_tiles_rejected() {
    let mut description = standard();
    let mut extra = description.tiles[0].clone();
    extra.id = "wd05".into();
    description.tiles.push(extra);
    assert!(matches!(assemble(description), Err(BoardError::InvalidBoardCount(_))));
}

#[test]
fn test_two_deserts_rejected() {
    let mut description = standard();
    description.tiles[0].material = Material::Desert;
    let err = assemble(description).unwrap_err();
    match err {
        BoardError::InvalidBoardCount(message) => assert!(message.contains("17"), "{message}"),
        other => panic!("expected InvalidBoardCount, got {other:?}"),
    }
}

#[test]
fn test_unknown_edge_target_fails_validation() {
    let mut description = standard();
    description.tiles[3].edges.insert(Direction::Left, "zz9".into());
    match assemble(description) {
        Err(BoardError::InvalidBoardStructure(message)) => {
            assert!(message.contains("zz9"), "{message}");
            assert!(message.contains("cl01"), "{message}");
        }
        other => panic!("expected InvalidBoardStructure, got {other:?}"),
    }
}

#[test]
fn test_validation_aggregates_every_violation() {
    let mut description = standard();
    description.tiles[3].edges.insert(Direction::Left, "zz9".into());
    description.tiles[7].edges.insert(Direction::Left, "yy8".into());
    description.tiles[10].id = "d01".into();
    let Err(BoardError::InvalidBoardStructure(message)) = assemble(description) else {
        panic!("expected InvalidBoardStructure");
    };
    assert!(message.contains("zz9"));
    assert!(message.contains("yy8"));
    assert!(message.contains("'d01' is declared more than once"));
}

#[test]
fn test_disconnected_tile_is_silently_dropped() {
    let mut description = standard();
    disconnect(&mut description, "wl04");

    let board = assemble(description).unwrap();
    assert_eq!(board.tiles().len(), 19);
    assert_eq!(board.ordered_tiles().count(), 18);
    assert_eq!(board.layout().placed(), 18);
    assert!(board.ordered_tiles().all(|t| t.id != "wl04"));
    assert_eq!(board.coord_of("wl04"), None);
    assert_eq!(board.layout().unreached(), &["wl04".to_string()]);
    // wl04's port is only derived from placed tiles
    assert!(!board.port_positions().contains_key("p07"));
    assert!(board.report().advisories.iter().any(|a| a.contains("wl04")));
}

#[test]
fn test_strict_mode_rejects_disconnected_tile() {
    let mut description = standard();
    disconnect(&mut description, "wl04");
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = Board::assemble_with_rng(description, &mut rng, Strictness::Strict);
    match result {
        Err(BoardError::InvalidBoardStructure(message)) => {
            assert!(message.contains("not connected to the desert"), "{message}");
        }
        other => panic!("expected InvalidBoardStructure, got {other:?}"),
    }
}

#[test]
fn test_duplicate_port_claim_keeps_last() {
    let mut description = standard();
    let ce04 = description.tiles.iter_mut().find(|t| t.id == "ce04").unwrap();
    ce04.edges.insert(Direction::BottomLeft, "p07".into());

    let board = assemble(description).unwrap();
    assert_eq!(
        board.port_positions().get("p07"),
        Some(&PortPlacement {
            tile_id: "ce04".into(),
            direction: Direction::BottomLeft,
        })
    );
    let claims = board.layout().port_conflicts().get("p07").unwrap();
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].tile_id, "wl04");
    assert!(board.report().advisories.iter().any(|a| a.contains("port 'p07'")));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STANDARD.as_bytes()).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let board = Board::load_with_rng(file.path(), &mut rng, Strictness::Strict).unwrap();
    assert_eq!(board.ordered_tiles().count(), 19);

    let board = Board::load(file.path()).unwrap();
    assert_eq!(board.robber_tile().map(|t| t.id.as_str()), Some("d01"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Board::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, BoardError::FileNotFound { .. }));
}

#[test]
fn test_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"tiles\": [ ").unwrap();
    let err = Board::load(file.path()).unwrap_err();
    assert!(matches!(err, BoardError::MalformedInput(_)));
}
