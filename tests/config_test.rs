// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use nutrilog::config::environment::{DatabaseUrl, Environment, ServerConfig};
use nutrilog_intelligence::MissingIngredientPolicy;
use serial_test::serial;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "DATABASE_URL",
    "ENVIRONMENT",
    "NUTRILOG_PASSCODE",
    "GEMINI_API_KEY",
    "ANALYSIS_MOCK_MODE",
    "ANALYSIS_MODEL",
    "ANALYSIS_BASE_URL",
    "REQUEST_TIMEOUT_SECS",
    "MISSING_INGREDIENT_POLICY",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_environment_is_empty() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.database.url.to_connection_string(),
        "sqlite:./data/nutrilog.db"
    );
    assert!(config.auth.passcode.is_none());
    assert!(config.analysis.uses_mock());
    assert_eq!(config.analysis.model, "gemini-2.5-flash");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(
        config.missing_ingredient_policy,
        MissingIngredientPolicy::WarnAndKeep
    );
    assert_eq!(config.cors_allowed_origins, vec!["*"]);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("NUTRILOG_PASSCODE", "open-sesame");
    env::set_var("GEMINI_API_KEY", "key-123");
    env::set_var("ANALYSIS_BASE_URL", "http://localhost:1234/v1beta/");
    env::set_var("REQUEST_TIMEOUT_SECS", "5");
    env::set_var("MISSING_INGREDIENT_POLICY", "fail");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test,http://b.test");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.database.url, DatabaseUrl::Memory);
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.auth.passcode.as_deref(), Some("open-sesame"));
    assert!(!config.analysis.uses_mock());
    assert_eq!(config.analysis.base_url, "http://localhost:1234/v1beta");
    assert_eq!(config.request_timeout().as_secs(), 5);
    assert_eq!(config.missing_ingredient_policy, MissingIngredientPolicy::Fail);
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://a.test", "http://b.test"]
    );
}

#[test]
#[serial]
fn test_mock_mode_overrides_api_key() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "key-123");
    env::set_var("ANALYSIS_MOCK_MODE", "true");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.analysis.uses_mock());
}

#[test]
#[serial]
fn test_blank_passcode_counts_as_unset() {
    clear_env();
    env::set_var("NUTRILOG_PASSCODE", "   ");
    let config = ServerConfig::from_env().unwrap();
    clear_env();
    assert!(config.auth.passcode.is_none());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("REQUEST_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("MISSING_INGREDIENT_POLICY", "ignore");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("ANALYSIS_MOCK_MODE", "sometimes");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
fn test_summary_never_prints_secrets() {
    let mut config = ServerConfig::for_testing("swordfish");
    config.analysis.api_key = Some("AIza-secret".to_owned());
    let summary = config.summary();
    let debug = format!("{config:?}");

    for rendered in [summary, debug] {
        assert!(!rendered.contains("swordfish"));
        assert!(!rendered.contains("AIza-secret"));
    }
}
