use snake_rules_core::{
    BoardState, EliminationCause, Move, Point, RulesError, Settings, Snake, SnakeId, SnakeMove,
};
use snake_rules_rulesets::{
    Ruleset, RulesetBuilder, StandardRuleset, GAME_TYPE_STANDARD, STANDARD_STAGES,
};

fn eat_and_grow_board() -> BoardState {
    let mut board = BoardState::new(10, 10);
    let mut three = Snake::new("three", Vec::new(), 100);
    three.eliminate(EliminationCause::OutOfBounds, None, 0);
    board.snakes = vec![
        Snake::new("one", vec![Point::new(1, 1), Point::new(1, 2)], 100),
        Snake::new("two", vec![Point::new(3, 4), Point::new(3, 3)], 100),
        three,
    ];
    board.food = vec![Point::new(0, 0), Point::new(1, 0)];
    board
}

fn eat_and_grow_moves() -> Vec<SnakeMove> {
    vec![
        SnakeMove::new("one", Move::Down),
        SnakeMove::new("two", Move::Up),
        SnakeMove::new("three", Move::Left),
    ]
}

#[test]
fn name_and_stage_order() {
    let ruleset = StandardRuleset::default();
    assert_eq!(ruleset.name(), GAME_TYPE_STANDARD);
    assert_eq!(ruleset.pipeline().stage_names(), STANDARD_STAGES.to_vec());
}

#[test]
fn eating_snake_grows_and_the_other_decays() {
    let ruleset = StandardRuleset::default();
    let board = eat_and_grow_board();

    let outcome = ruleset
        .execute(&board, &ruleset.settings(), &eat_and_grow_moves())
        .expect("turn executes");

    assert!(!outcome.game_over, "two snakes are still alive");
    let next = outcome.state;
    assert_eq!(next.turn, 1);

    let one = &next.snakes[0];
    assert_eq!(one.health, 100, "eating restores health");
    assert_eq!(
        one.body,
        vec![Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)],
        "eating keeps the tail"
    );

    let two = &next.snakes[1];
    assert_eq!(two.health, 99);
    assert_eq!(two.body, vec![Point::new(3, 5), Point::new(3, 4)]);

    let three = &next.snakes[2];
    assert!(three.body.is_empty(), "eliminated snakes never move");
    assert_eq!(three.eliminated_cause(), Some(EliminationCause::OutOfBounds));

    assert_eq!(next.food, vec![Point::new(0, 0)], "eaten food is removed");
}

#[test]
fn caller_board_is_not_modified() {
    let ruleset = StandardRuleset::default();
    let board = eat_and_grow_board();
    let before = board.clone();

    let _ = ruleset
        .create_next_board_state(&board, &eat_and_grow_moves())
        .expect("turn executes");

    assert_eq!(board, before);
}

#[test]
fn missing_move_fails_the_turn() {
    let ruleset = StandardRuleset::default();
    let board = eat_and_grow_board();

    let result = ruleset.execute(
        &board,
        &ruleset.settings(),
        &[SnakeMove::new("one", Move::Down)],
    );

    assert_eq!(
        result,
        Err(RulesError::NoMoveFound {
            snake: SnakeId::from("two")
        })
    );
}

#[test]
fn living_snake_without_body_fails_the_turn() {
    let ruleset = StandardRuleset::default();
    let mut board = BoardState::new(10, 10);
    board.snakes = vec![Snake::new("one", Vec::new(), 100)];

    let result = ruleset.create_next_board_state(&board, &[SnakeMove::new("one", Move::Up)]);

    assert_eq!(
        result,
        Err(RulesError::ZeroLengthSnake {
            snake: SnakeId::from("one")
        })
    );
}

#[test]
fn equal_head_on_collision_ends_the_game() {
    let ruleset = StandardRuleset::default();
    let mut board = BoardState::new(10, 10);
    board.snakes = vec![
        Snake::new("one", vec![Point::new(1, 1), Point::new(0, 1)], 100),
        Snake::new("two", vec![Point::new(3, 1), Point::new(4, 1)], 100),
    ];
    let moves = [
        SnakeMove::new("one", Move::Right),
        SnakeMove::new("two", Move::Left),
    ];

    let outcome = ruleset
        .execute(&board, &ruleset.settings(), &moves)
        .expect("turn executes");

    assert!(outcome.game_over, "no snake survives");
    let [one, two] = &outcome.state.snakes[..] else {
        panic!("expected two snakes");
    };
    assert_eq!(one.eliminated_cause(), Some(EliminationCause::HeadToHeadCollision));
    assert_eq!(one.eliminated_by(), Some(&SnakeId::from("two")));
    assert_eq!(two.eliminated_cause(), Some(EliminationCause::HeadToHeadCollision));
    assert_eq!(two.eliminated_by(), Some(&SnakeId::from("one")));
    assert_eq!(one.eliminated_on_turn(), 1);
}

#[test]
fn is_game_over_counts_survivors() {
    let ruleset = StandardRuleset::default();
    let mut board = eat_and_grow_board();
    assert_eq!(ruleset.is_game_over(&board), Ok(false));

    board.snakes[1].eliminate(EliminationCause::Starvation, None, 4);
    assert_eq!(ruleset.is_game_over(&board), Ok(true));
}

#[test]
fn turn_counter_advances_every_turn() {
    let ruleset = StandardRuleset::default();
    let mut board = BoardState::new(10, 10);
    board.snakes = vec![
        Snake::new("one", vec![Point::new(0, 0)], 100),
        Snake::new("two", vec![Point::new(9, 9)], 100),
    ];
    let moves = [
        SnakeMove::new("one", Move::Up),
        SnakeMove::new("two", Move::Down),
    ];

    for expected in 1..=5 {
        board = ruleset
            .create_next_board_state(&board, &moves)
            .expect("turn executes");
        assert_eq!(board.turn, expected);
    }
    assert_eq!(board.snakes[0].health, 95);
}

#[test]
fn builder_and_pipeline_rulesets_agree_with_the_direct_one() {
    let direct = StandardRuleset::default();
    let builder = RulesetBuilder::new().with_params([
        ("name", "standard"),
        ("foodSpawnChance", "0"),
        ("minimumFood", "0"),
        ("hazardDamagePerTurn", "0"),
    ]);
    let built = builder.ruleset().expect("standard ruleset");
    let piped = builder
        .pipeline_ruleset(GAME_TYPE_STANDARD, builder.pipeline().expect("pipeline"))
        .expect("pipeline ruleset");

    let board = eat_and_grow_board();
    let moves = eat_and_grow_moves();
    let expected = direct
        .execute(&board, &direct.settings(), &moves)
        .expect("turn executes");

    for ruleset in [&*built, &piped as &dyn Ruleset] {
        assert_eq!(ruleset.name(), GAME_TYPE_STANDARD);
        let outcome = ruleset
            .execute(&board, &ruleset.settings(), &moves)
            .expect("turn executes");
        assert_eq!(outcome, expected);
    }
}

#[test]
fn hazard_damage_applies_to_heads_on_hazards() {
    let settings = Settings {
        hazard_damage_per_turn: 14,
        ..Settings::default()
    };
    let ruleset = StandardRuleset::new(settings);
    let mut board = BoardState::new(10, 10);
    board.snakes = vec![
        Snake::new("one", vec![Point::new(1, 1)], 100),
        Snake::new("two", vec![Point::new(5, 5)], 100),
    ];
    board.hazards = vec![Point::new(1, 2)];
    let moves = [
        SnakeMove::new("one", Move::Up),
        SnakeMove::new("two", Move::Up),
    ];

    let next = ruleset
        .create_next_board_state(&board, &moves)
        .expect("turn executes");

    assert_eq!(next.snakes[0].health, 85, "decay plus hazard damage");
    assert_eq!(next.snakes[1].health, 99, "decay only");
}
