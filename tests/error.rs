use std::io;

use munchman::error::{GameError, LevelIoError, MapError, ParseError};
use speculoos::prelude::*;

#[test]
fn test_game_error_from_map_error() {
    let game_error: GameError = MapError::MissingGhostPen.into();
    assert!(matches!(game_error, GameError::Map(MapError::MissingGhostPen)));
}

#[test]
fn test_game_error_from_parse_error() {
    let game_error: GameError = ParseError::UnknownCharacter('Z').into();
    assert!(matches!(game_error, GameError::Parse(_)));
}

#[test]
fn test_game_error_from_io_error() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let game_error: GameError = io_error.into();
    assert!(matches!(game_error, GameError::Io(_)));
}

#[test]
fn test_level_io_error_from_json() {
    let json_error = serde_json::from_str::<Vec<u8>>("[1,").expect_err("JSON should be truncated");
    let game_error: GameError = LevelIoError::from(json_error).into();
    assert!(matches!(game_error, GameError::LevelIo(LevelIoError::Json(_))));
}

#[test]
fn test_error_messages() {
    assert_that(&MapError::MissingPlayerStart.to_string()).is_equal_to("Level has no MUNCH_MAN start cell".to_string());
    assert_that(
        &MapError::Ragged {
            column: 2,
            expected: 5,
            found: 4,
        }
        .to_string(),
    )
    .is_equal_to("Level column 2 has 4 cells, expected 5".to_string());
    assert_that(&GameError::from(ParseError::UnknownTag("DOOR".to_string())).to_string())
        .is_equal_to("Level tag error: Unknown cell tag: \"DOOR\"".to_string());
}
