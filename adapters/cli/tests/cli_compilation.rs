use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "snake-rules"])
        .status()
        .expect("failed to invoke cargo check for snake-rules CLI binary");

    assert!(status.success(), "cargo check --bin snake-rules should succeed");
}

#[test]
fn stages_subcommand_lists_royale_order() {
    let output = Command::new(env!("CARGO_BIN_EXE_snake-rules"))
        .args(["stages", "royale"])
        .output()
        .expect("failed to run snake-rules");

    assert!(output.status.success(), "stages royale should succeed");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let stages: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        stages,
        vec![
            "movement.standard",
            "starvation.standard",
            "hazard_damage.standard",
            "feed.standard",
            "spawn_food.standard",
            "elimination.standard",
            "hazards.royale",
            "game_over.standard",
        ]
    );
}

#[test]
fn stages_subcommand_rejects_unknown_game_type() {
    let output = Command::new(env!("CARGO_BIN_EXE_snake-rules"))
        .args(["stages", "wrapped"])
        .output()
        .expect("failed to run snake-rules");

    assert!(!output.status.success(), "unknown game type must fail");
}
