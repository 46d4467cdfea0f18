use munchman::{
    session::{LevelOutcome, LevelRecord, Session},
    systems::GameStage,
};
use speculoos::prelude::*;

#[test]
fn test_outcome_from_stage() {
    assert_that(&LevelOutcome::from_stage(GameStage::Won)).is_equal_to(Some(LevelOutcome::Won));
    assert_that(&LevelOutcome::from_stage(GameStage::GameOver)).is_equal_to(Some(LevelOutcome::Lost));
    assert_that(&LevelOutcome::from_stage(GameStage::Playing)).is_none();
    assert_that(&LevelOutcome::from_stage(GameStage::LevelComplete { elapsed: 1.0 })).is_none();
    assert_that(&LevelOutcome::from_stage(GameStage::PlayerDying)).is_none();
}

#[test]
fn test_outcome_names() {
    assert_that(&LevelOutcome::Won.as_ref()).is_equal_to("won");
    assert_that(&LevelOutcome::Abandoned.as_ref()).is_equal_to("abandoned");
}

#[test]
fn test_high_score_only_rises() {
    let mut session = Session::new();

    assert_that(&session.record_level(120, LevelOutcome::Lost)).is_true();
    assert_that(&session.record_level(80, LevelOutcome::Won)).is_false();
    assert_that(&session.record_level(120, LevelOutcome::Won)).is_false();
    assert_that(&session.high_score()).is_equal_to(120);

    assert_that(&session.record_level(300, LevelOutcome::Abandoned)).is_true();
    assert_that(&session.high_score()).is_equal_to(300);
}

#[test]
fn test_levels_are_kept_in_order() {
    let mut session = Session::with_high_score(500);
    assert_that(&session.last_level()).is_none();

    session.record_level(40, LevelOutcome::Lost);
    session.record_level(60, LevelOutcome::Won);

    assert_that(&session.levels().len()).is_equal_to(2);
    assert_that(&session.levels()[0]).is_equal_to(LevelRecord {
        score: 40,
        outcome: LevelOutcome::Lost,
    });
    assert_that(&session.last_level().copied()).is_equal_to(Some(LevelRecord {
        score: 60,
        outcome: LevelOutcome::Won,
    }));
    assert_that(&session.high_score()).is_equal_to(500);
}
