//! Integration tests for Settings layered loading.
//!
//! Note: These tests run without a global config and without FAMTREE_* variables,
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use famtree::application::ApplicationError;
use famtree::config::{RenderStyle, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.query.first, "Bilbo");
    assert_eq!(settings.query.second, "Frodo");
    assert_eq!(settings.extension, "txt");
}

#[test]
fn given_local_config_when_load_then_overrides_only_given_fields() {
    let settings = Settings::load(Some(Path::new("tests/resources/config"))).expect("load settings");

    assert_eq!(settings.extension, "fam");
    assert_eq!(settings.style, RenderStyle::Ascii);
    assert_eq!(settings.query.first, "Otho");
    assert_eq!(settings.query.second, "Frodo");
    assert_eq!(settings.data_dir, PathBuf::from("data"));
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".famtree.toml"), "style = [unclosed").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_missing_data_dir_when_resolving_then_current_dir() {
    let settings = Settings {
        data_dir: PathBuf::from("/no/such/famtree/data"),
        ..Settings::default()
    };
    assert_eq!(settings.resolve_data_dir(), PathBuf::from("."));

    let dir = TempDir::new().unwrap();
    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        ..Settings::default()
    };
    assert_eq!(settings.resolve_data_dir(), dir.path());
}

#[test]
fn given_settings_when_rendering_toml_then_round_trips_query() {
    let toml = Settings::default().to_toml().unwrap();
    assert!(toml.contains("extension = \"txt\""));
    assert!(toml.contains("[query]"));
    assert!(toml.contains("first = \"Bilbo\""));
}
