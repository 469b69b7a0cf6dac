//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use quadview::config::AppConfig;
use quadview_core::{MeshVariant, ProjectionMode, RenderMode};
use quadview_render::FillPolicy;
use serial_test::serial;

const ENV_VARS: [&str; 4] = [
    "QV_WINDOW__TITLE",
    "QV_MESH__SEGMENTS",
    "QV_RENDERING__PROJECTION",
    "QV_RENDERING__FILL_POLICY",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

/// Fresh config directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quadview-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    clear_env();
    std::env::set_var("QV_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    clear_env();
}

#[test]
#[serial]
fn test_checked_in_defaults_load() {
    clear_env();
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.width, 1000);
    assert_eq!(config.window.height, 800);
    assert_eq!(config.mesh.segments, 24);
    assert_eq!(config.mesh.variant, MeshVariant::Hollow);
    assert_eq!(config.rendering.render_mode, RenderMode::Combined);
    assert_eq!(config.rendering.projection, ProjectionMode::Perspective);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    clear_env();
    let dir = scratch_dir("layering");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Base\"\nwidth = 640\n\n[mesh]\nsegments = 10\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[mesh]\nsegments = 16\nvariant = \"simple\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "Base");
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 800);
    assert_eq!(config.mesh.segments, 16);
    assert_eq!(config.mesh.variant, MeshVariant::Simple);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_env_beats_user_file() {
    clear_env();
    let dir = scratch_dir("env-priority");
    fs::write(
        dir.join("user.toml"),
        "[rendering]\nprojection = \"isometric\"\nfill_policy = \"no_cull\"\n",
    )
    .unwrap();
    std::env::set_var("QV_RENDERING__PROJECTION", "trimetric");
    std::env::set_var("QV_RENDERING__FILL_POLICY", "backface_cull");
    std::env::set_var("QV_MESH__SEGMENTS", "7");

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.rendering.projection, ProjectionMode::Trimetric);
    assert_eq!(config.rendering.fill_policy, FillPolicy::BackfaceCull);
    assert_eq!(config.mesh.segments, 7);

    clear_env();
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    clear_env();
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.title, "Quadview");
    assert_eq!(config.mesh.segments, 24);
}

#[test]
#[serial]
fn test_unknown_projection_is_an_error() {
    clear_env();
    std::env::set_var("QV_RENDERING__PROJECTION", "oblique");
    let result = AppConfig::load_from("does/not/exist");
    clear_env();
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_geometry_is_an_error() {
    clear_env();
    let dir = scratch_dir("invalid-mesh");
    fs::write(dir.join("user.toml"), "[mesh]\ninner_radius = 3.0\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));

    let _ = fs::remove_dir_all(&dir);
}
