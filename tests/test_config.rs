use std::fs;
use std::path::{Path, PathBuf};

use invaders::config::GameConfig;
use invaders::constants::*;
use invaders::error::GameError;

fn path() -> &'static Path {
    Path::new("test.toml")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("invaders-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_match_constants() {
    let c = GameConfig::default();
    assert_eq!(c.field_width, FIELD_WIDTH);
    assert_eq!(c.field_height, FIELD_HEIGHT);
    assert_eq!(c.win_score, WIN_SCORE);
    assert_eq!(c.grace_period_ticks, GRACE_PERIOD_TICKS);
    assert_eq!(c.invader_fire_interval, INVADER_FIRE_INTERVAL);
    assert_eq!(c.star_count, STAR_COUNT);
    assert_eq!(c.tick_ms, TICK_MS);
}

#[test]
fn empty_document_is_all_defaults() {
    assert_eq!(GameConfig::from_toml_str("", path()).unwrap(), GameConfig::default());
}

#[test]
fn partial_document_overrides_only_its_keys() {
    let c = GameConfig::from_toml_str("win_score = 500\nstar_count = 0\n", path()).unwrap();
    assert_eq!(c.win_score, 500);
    assert_eq!(c.star_count, 0);
    assert_eq!(
        GameConfig { win_score: WIN_SCORE, star_count: STAR_COUNT, ..c },
        GameConfig::default()
    );
}

#[test]
fn malformed_toml_is_config_error() {
    let err = GameConfig::from_toml_str("win_score = \"lots\"", path()).unwrap_err();
    match err {
        GameError::Config { path: p, .. } => assert_eq!(p, path()),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn validation_rejects_unusable_values() {
    for doc in [
        "invader_fire_interval = 0",
        "tick_ms = 0",
        "field_width = 0.0",
        "field_height = -10.0",
        "player_speed = -1.0",
    ] {
        assert!(
            matches!(GameConfig::from_toml_str(doc, path()), Err(GameError::Config { .. })),
            "accepted {}",
            doc
        );
    }
}

#[test]
fn error_message_names_the_file() {
    let err = GameConfig::from_toml_str("tick_ms = 0", path()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("test.toml"));
    assert!(text.contains("tick_ms"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let missing = std::env::temp_dir().join("invaders-does-not-exist.toml");
    assert_eq!(GameConfig::load_or_default(&missing), GameConfig::default());
}

#[test]
fn file_on_disk_is_loaded() {
    let file = scratch_file("ok.toml", "grace_period_ticks = 30\n");
    let c = GameConfig::load_or_default(&file);
    fs::remove_file(&file).unwrap();
    assert_eq!(c.grace_period_ticks, 30);
}

#[test]
fn bad_file_on_disk_falls_back_to_defaults() {
    let file = scratch_file("bad.toml", "tick_ms = 0\n");
    let c = GameConfig::load_or_default(&file);
    fs::remove_file(&file).unwrap();
    assert_eq!(c, GameConfig::default());
}
