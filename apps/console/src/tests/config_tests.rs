use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn file_overrides_defaults_field_by_field() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "server_url = \"http://users.internal:9000\"\n")
        .expect("parse config");

    assert_eq!(settings.server_url, "http://users.internal:9000");
    assert_eq!(settings.users_path, "/api/v1/users/");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "server_url = [").is_err());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let vars: HashMap<&str, &str> = [
        ("USERS_SERVER_URL", "http://short:1"),
        ("APP__SERVER_URL", "http://prefixed:2"),
        ("USERS_PATH", "/users"),
        ("APP__LOG_FILTER", "debug"),
    ]
    .into_iter()
    .collect();

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://prefixed:2");
    assert_eq!(settings.users_path, "/users");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn explicit_config_path_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("users_console_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("console.toml");
    fs::write(&path, "users_path = \"/v2/people\"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load settings");
    let env_override = env::var("USERS_PATH").is_ok() || env::var("APP__USERS_PATH").is_ok();
    if !env_override {
        assert_eq!(settings.users_path, "/v2/people");
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_explicit_config_path_is_an_error() {
    let path = env::temp_dir().join("users_console_definitely_missing.toml");
    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}
