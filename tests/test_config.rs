use std::path::{Path, PathBuf};

use neon_shooter::config::*;
use neon_shooter::error::ConfigError;

#[test]
fn defaults() {
    let config = GameConfig::default();
    assert_eq!(config.display.fps, 60);
    assert_eq!(config.display.cell_width, 8.0);
    assert_eq!(config.display.cell_height, 16.0);
    assert!(config.display.glyph_sprites);
    assert!(config.audio.enabled);
    assert!(!config.audio.bell);
    assert_eq!(config.paths.log_file, PathBuf::from("neon_shooter.log"));
}

#[test]
fn empty_file_is_all_defaults() {
    let config = GameConfig::from_toml_str("", Path::new("empty.toml")).expect("valid config");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let src = r#"
        [display]
        fps = 30

        [audio]
        bell = true
    "#;
    let config = GameConfig::from_toml_str(src, Path::new("partial.toml")).expect("valid config");
    assert_eq!(config.display.fps, 30);
    assert_eq!(config.display.cell_width, 8.0);
    assert!(config.audio.enabled);
    assert!(config.audio.bell);
    assert_eq!(config.paths, PathsConfig::default());
}

#[test]
fn bad_value_is_parse_error() {
    let err = GameConfig::from_toml_str("[display]\nfps = \"fast\"\n", Path::new("bad.toml"))
        .expect_err("fps must be a number");
    match &err {
        ConfigError::Parse { path, .. } => assert_eq!(path, "bad.toml"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load_from_file(Path::new("/definitely/not/here.toml"))
        .expect_err("no such file");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn absolute_high_score_path_kept() {
    let mut config = GameConfig::default();
    config.paths.high_score_file = PathBuf::from("/tmp/score");
    assert_eq!(config.high_score_path(), PathBuf::from("/tmp/score"));
}

#[test]
fn tilde_high_score_path_expanded() {
    let config = GameConfig::default();
    let path = config.high_score_path();
    assert!(!path.starts_with("~"));
    assert!(path.ends_with(".neon_shooter_score"));
}
