use snake_rules_core::{
    BoardState, Point, RulesError, Settings, SnakeMove, StageOutcome, StageResult,
};
use snake_rules_pipeline::{Pipeline, StageRegistry};

fn mark_first(board: &mut BoardState, _: &Settings, _: &[SnakeMove]) -> StageResult {
    board.hazards.push(Point::new(1, 0));
    Ok(StageOutcome::Continue)
}

fn mark_second(board: &mut BoardState, _: &Settings, _: &[SnakeMove]) -> StageResult {
    board.hazards.push(Point::new(2, 0));
    Ok(StageOutcome::Continue)
}

fn end_game(_: &mut BoardState, _: &Settings, _: &[SnakeMove]) -> StageResult {
    Ok(StageOutcome::GameOver)
}

fn fail(_: &mut BoardState, _: &Settings, _: &[SnakeMove]) -> StageResult {
    Err(RulesError::EmptyPipeline)
}

fn recording_registry() -> StageRegistry {
    let mut registry = StageRegistry::new();
    assert!(registry.register("mark.first", mark_first).is_none());
    assert!(registry.register("mark.second", mark_second).is_none());
    assert!(registry.register("end", end_game).is_none());
    assert!(registry.register("fail", fail).is_none());
    registry
}

#[test]
fn stages_run_in_assembly_order() {
    let pipeline = Pipeline::from_names(&recording_registry(), &["mark.second", "mark.first"]);
    assert_eq!(pipeline.stage_names(), vec!["mark.second", "mark.first"]);

    let board = BoardState::new(3, 3);
    let outcome = pipeline
        .execute(&board, &Settings::default(), &[])
        .expect("pipeline runs");

    assert!(!outcome.game_over);
    assert_eq!(
        outcome.state.hazards,
        vec![Point::new(2, 0), Point::new(1, 0)],
        "stages must see each other's changes in order"
    );
}

#[test]
fn turn_advances_and_input_is_left_alone() {
    let pipeline = Pipeline::from_names(&recording_registry(), &["mark.first"]);
    let mut board = BoardState::new(3, 3);
    board.turn = 41;
    let before = board.clone();

    let outcome = pipeline
        .execute(&board, &Settings::default(), &[])
        .expect("pipeline runs");

    assert_eq!(outcome.state.turn, 42);
    assert_eq!(board, before, "caller's board must not change");
}

#[test]
fn game_over_skips_remaining_stages() {
    let pipeline = Pipeline::from_names(
        &recording_registry(),
        &["mark.first", "end", "mark.second"],
    );
    let outcome = pipeline
        .execute(&BoardState::new(3, 3), &Settings::default(), &[])
        .expect("pipeline runs");

    assert!(outcome.game_over);
    assert_eq!(outcome.state.hazards, vec![Point::new(1, 0)]);
}

#[test]
fn failing_stage_aborts_the_turn() {
    let pipeline = Pipeline::from_names(&recording_registry(), &["mark.first", "fail", "end"]);
    let result = pipeline.execute(&BoardState::new(3, 3), &Settings::default(), &[]);
    assert_eq!(result, Err(RulesError::EmptyPipeline));
}

#[test]
fn unknown_stage_is_reported_on_every_execute() {
    let pipeline = Pipeline::from_names(&recording_registry(), &["mark.first", "missing"]);
    let expected = RulesError::UnknownStage {
        name: "missing".to_owned(),
    };
    assert_eq!(pipeline.validate(), Err(expected.clone()));

    let board = BoardState::new(3, 3);
    for _ in 0..2 {
        assert_eq!(
            pipeline.execute(&board, &Settings::default(), &[]),
            Err(expected.clone())
        );
    }
}

#[test]
fn empty_pipeline_is_an_error() {
    let pipeline = Pipeline::from_names::<&str>(&recording_registry(), &[]);
    assert_eq!(
        pipeline.execute(&BoardState::new(3, 3), &Settings::default(), &[]),
        Err(RulesError::EmptyPipeline)
    );
}

#[test]
fn registering_twice_replaces_the_stage() {
    let mut registry = recording_registry();
    assert!(registry.register("mark.first", mark_second).is_some());

    let pipeline = Pipeline::from_names(&registry, &["mark.first"]);
    let outcome = pipeline
        .execute(&BoardState::new(3, 3), &Settings::default(), &[])
        .expect("pipeline runs");
    assert_eq!(outcome.state.hazards, vec![Point::new(2, 0)]);
}
