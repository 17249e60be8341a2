use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SOCIALDASH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_url, "http://localhost:8000");
    assert!(cfg.events_url.is_none());
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.user_agent, "socialdash/0.1 (analytics-dashboard)");
}

#[test]
fn build_app_config_strips_trailing_slash_from_api_url() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_API_URL", "https://api.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "https://api.example.com");
}

#[test]
fn build_app_config_rejects_non_http_api_url() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_API_URL", "localhost:8000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCIALDASH_API_URL"),
        "expected InvalidEnvVar(SOCIALDASH_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_events_url() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_EVENTS_URL", "https://events.example.com/fetch");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.events_url.as_deref(),
        Some("https://events.example.com/fetch")
    );
}

#[test]
fn build_app_config_treats_blank_events_url_as_unset() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_EVENTS_URL", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.events_url.is_none());
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_REQUEST_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(15));
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCIALDASH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SOCIALDASH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn build_app_config_rejects_unknown_environment() {
    let mut map = HashMap::new();
    map.insert("SOCIALDASH_ENV", "qa");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}
