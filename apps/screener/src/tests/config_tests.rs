use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("screener_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(CONFIG_FILE);
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/screener.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(15));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("api_url = \"https://risk.example.org\"\nrequest_timeout_secs = 30\n");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_url, "https://risk.example.org");
    assert_eq!(settings.request_timeout_secs, 30);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_overrides_file() {
    let path = temp_config("api_url = \"https://risk.example.org\"\n");

    let settings = load_settings_from(&path, |key| match key {
        "PREDICTION_API_URL" => Some("http://10.0.0.5:5000".to_string()),
        "APP__REQUEST_TIMEOUT_SECS" => Some("3".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_url, "http://10.0.0.5:5000");
    assert_eq!(settings.request_timeout_secs, 3);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_variable_wins_over_plain_one() {
    let settings = load_settings_from(Path::new("/nonexistent/screener.toml"), |key| {
        match key {
            "PREDICTION_API_URL" => Some("http://plain:5000".to_string()),
            "APP__API_URL" => Some("http://prefixed:5000".to_string()),
            _ => None,
        }
    });
    assert_eq!(settings.api_url, "http://prefixed:5000");
}

#[test]
fn invalid_timeouts_are_ignored() {
    let path = temp_config("request_timeout_secs = 0\n");

    let settings = load_settings_from(&path, |key| {
        (key == "APP__REQUEST_TIMEOUT_SECS").then(|| "soon".to_string())
    });
    assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn strips_trailing_slashes() {
    assert_eq!(
        prepare_api_url(" http://127.0.0.1:5000// ").expect("url"),
        "http://127.0.0.1:5000"
    );
}

#[test]
fn empty_url_falls_back_to_default() {
    assert_eq!(prepare_api_url("  ").expect("url"), DEFAULT_API_URL);
}

#[test]
fn rejects_non_http_urls() {
    assert!(prepare_api_url("ftp://example.org").is_err());
    assert!(prepare_api_url("localhost:5000/api").is_err());
}
