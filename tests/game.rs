use std::sync::{Arc, Mutex};

use bevy_ecs::query::With;
use glam::Vec2;
use munchman::{
    constants::TICK_SECONDS,
    error::{GameError, MapError},
    game::Game,
    map::{direction::Direction, layout::LevelLayout},
    systems::{AudioSink, GameStage, Position, PursuerMode, Sound},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// Collects every sound the game plays.
#[derive(Clone, Default)]
struct RecordingSink(Arc<Mutex<Vec<Sound>>>);

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: Sound) {
        self.0.lock().expect("Sink lock poisoned").push(sound);
    }
}

fn run_until_finished(game: &mut Game, max_ticks: u32) -> (GameStage, u32) {
    for tick in 1..=max_ticks {
        let stage = game.tick(TICK_SECONDS);
        if stage.is_finished() {
            return (stage, tick);
        }
    }
    (game.stage(), max_ticks)
}

#[test]
fn test_new_game_is_ready_to_play() {
    let mut game = Game::new(&common::layout(&common::CORRIDOR_LEVEL), 0).expect("Level should build");

    assert_that(&game.stage()).is_equal_to(GameStage::Playing);
    assert_that(&game.score()).is_equal_to(0);
    assert_that(&game.dots_remaining()).is_equal_to(6);
    assert_that(&game.has_player()).is_true();
}

#[test]
fn test_level_without_player_is_rejected() {
    let layout = common::layout(&["#####", "#...#", "#G--#", "#####"]);

    let result = Game::new(&layout, 0);

    assert!(matches!(result, Err(GameError::Map(MapError::MissingPlayerStart))));
}

#[test]
fn test_level_without_pen_is_rejected() {
    let layout = common::layout(&["#####", "#P..#", "#####"]);

    let result = Game::new(&layout, 0);

    assert!(matches!(result, Err(GameError::Map(MapError::MissingGhostPen))));
}

#[test]
fn test_eating_every_dot_wins_the_level() {
    let mut game = Game::new(&common::layout(&common::CORRIDOR_LEVEL), 0).expect("Level should build");
    let sink = RecordingSink::default();
    game.set_audio_sink(Box::new(sink.clone()));

    game.press(Direction::Right);
    let (stage, ticks) = run_until_finished(&mut game, 1000);

    assert_that(&stage).is_equal_to(GameStage::Won);
    assert_that(&game.score()).is_equal_to(60);
    assert_that(&game.dots_remaining()).is_equal_to(0);
    // Six cells of walking, then the two second delay
    assert_that(&ticks).is_greater_than(300);
    assert_that(&ticks).is_less_than(400);
    assert_that(&game.has_player()).is_true();

    // Six dots and the power ball, alternating between the two pickup sounds
    let played = sink.0.lock().expect("Sink lock poisoned").clone();
    assert_eq!(
        played,
        vec![
            Sound::Ball1,
            Sound::Ball2,
            Sound::Ball1,
            Sound::Ball2,
            Sound::Ball1,
            Sound::Ball2,
            Sound::Ball1
        ]
    );
}

#[test]
fn test_gameplay_freezes_once_finished() {
    let mut game = Game::new(&common::layout(&common::CORRIDOR_LEVEL), 0).expect("Level should build");
    game.press(Direction::Right);
    let (stage, _) = run_until_finished(&mut game, 1000);
    assert_that(&stage).is_equal_to(GameStage::Won);

    let positions = |game: &mut Game| -> Vec<Vec2> {
        game.world
            .query_filtered::<&Position, With<PursuerMode>>()
            .iter(&game.world)
            .map(|position| position.0)
            .collect()
    };
    let before = positions(&mut game);
    for _ in 0..100 {
        assert_that(&game.tick(TICK_SECONDS)).is_equal_to(GameStage::Won);
    }
    assert_eq!(positions(&mut game), before);
}

#[test]
fn test_player_caught_in_dead_end_loses() {
    let mut game = Game::new(&common::layout(&common::DEAD_END_LEVEL), 0).expect("Level should build");
    let sink = RecordingSink::default();
    game.set_audio_sink(Box::new(sink.clone()));

    let mut dying_at = None;
    for tick in 1..=2000u32 {
        let stage = game.tick(TICK_SECONDS);
        if stage == GameStage::PlayerDying && dying_at.is_none() {
            dying_at = Some(tick);
        }
        if stage.is_finished() {
            break;
        }
    }

    assert_that(&game.stage()).is_equal_to(GameStage::GameOver);
    assert_that(&game.score()).is_equal_to(0);
    assert_that(&game.has_player()).is_false();
    assert_that(&dying_at).is_some();
    assert_eq!(*sink.0.lock().expect("Sink lock poisoned"), vec![Sound::Death]);
}

#[test]
fn test_muted_game_plays_nothing() {
    let mut game = Game::new(&common::layout(&common::CORRIDOR_LEVEL), 0).expect("Level should build");
    let sink = RecordingSink::default();
    game.set_audio_sink(Box::new(sink.clone()));
    game.set_muted(true);

    game.press(Direction::Right);
    run_until_finished(&mut game, 1000);

    assert_that(&game.score()).is_equal_to(60);
    assert_that(&sink.0.lock().expect("Sink lock poisoned").is_empty()).is_true();
}

#[test]
fn test_same_seed_replays_identically() {
    let layout = LevelLayout::default_level().expect("Default level should parse");
    let snapshot = |seed: u64| {
        let mut game = Game::new(&layout, seed).expect("Level should build");
        let mut trace = Vec::new();
        for tick in 0..1500 {
            if tick % 200 == 0 {
                let direction = [Direction::Left, Direction::Up, Direction::Right, Direction::Down][(tick / 200) % 4];
                game.press(direction);
            }
            game.tick(TICK_SECONDS);
            if tick % 50 == 0 {
                let positions: Vec<Vec2> = game
                    .world
                    .query::<&Position>()
                    .iter(&game.world)
                    .map(|position| position.0)
                    .collect();
                trace.push((game.score(), game.stage(), positions));
            }
        }
        trace
    };

    assert_eq!(snapshot(42), snapshot(42));
}
