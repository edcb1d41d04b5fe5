// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, passcode, analysis upstream, and pipeline policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! Environment-based configuration management

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use nutrilog_core::constants::{defaults, ports};
use nutrilog_intelligence::MissingIngredientPolicy;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default Gemini model for nutrition analysis
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST base URL
pub const DEFAULT_ANALYSIS_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; bare paths are treated as `SQLite` files
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// True for the in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DEFAULT_DATABASE_URL)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Catalog store location
    pub url: DatabaseUrl,
}

/// Session gate configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Passcode that unlocks the session; unlocking fails while unset
    pub passcode: Option<String>,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("passcode", &self.passcode.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// AI analysis upstream configuration
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Upstream API key; analysis runs in mock mode while unset
    pub api_key: Option<String>,
    /// Force mock mode even with a key
    pub mock_mode: bool,
    /// Upstream model name
    pub model: String,
    /// Upstream REST base URL
    pub base_url: String,
}

impl AnalysisConfig {
    /// True when analysis must answer with the fixed mock result
    #[must_use]
    pub fn uses_mock(&self) -> bool {
        self.mock_mode || self.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
    }

    /// Mock-only configuration
    #[must_use]
    pub fn mock() -> Self {
        Self {
            api_key: None,
            mock_mode: true,
            model: DEFAULT_ANALYSIS_MODEL.to_owned(),
            base_url: DEFAULT_ANALYSIS_BASE_URL.to_owned(),
        }
    }
}

impl Debug for AnalysisConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("mock_mode", &self.mock_mode)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Catalog store
    pub database: DatabaseConfig,
    /// Session gate
    pub auth: AuthConfig,
    /// Analysis upstream
    pub analysis: AnalysisConfig,
    /// Caller-side timeout applied to every HTTP request
    pub request_timeout_secs: u64,
    /// Handling of meal references to unknown ingredients
    pub missing_ingredient_policy: MissingIngredientPolicy,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    defaults::DEFAULT_DATABASE_URL,
                )),
            },
            auth: AuthConfig {
                passcode: non_empty_var("NUTRILOG_PASSCODE"),
            },
            analysis: AnalysisConfig {
                api_key: non_empty_var("GEMINI_API_KEY"),
                mock_mode: parse_bool(&env_var_or("ANALYSIS_MOCK_MODE", "false"))
                    .context("Invalid ANALYSIS_MOCK_MODE value")?,
                model: env_var_or("ANALYSIS_MODEL", DEFAULT_ANALYSIS_MODEL),
                base_url: env_var_or("ANALYSIS_BASE_URL", DEFAULT_ANALYSIS_BASE_URL)
                    .trim_end_matches('/')
                    .to_owned(),
            },
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &defaults::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            missing_ingredient_policy: env_var_or("MISSING_INGREDIENT_POLICY", "warn")
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid MISSING_INGREDIENT_POLICY value: {e}"))?,
            cors_allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port or zero timeout
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must be non-zero");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    /// Caller-side request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configuration suitable for tests: in-memory store, mock analysis
    #[must_use]
    pub fn for_testing(passcode: &str) -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                passcode: Some(passcode.to_owned()),
            },
            analysis: AnalysisConfig::mock(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            missing_ingredient_policy: MissingIngredientPolicy::default(),
            cors_allowed_origins: vec!["*".to_owned()],
        }
    }

    /// Log-safe configuration summary; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrilog Configuration:\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - Passcode: {}\n\
             - Analysis: {} (model {})\n\
             - Request Timeout: {}s\n\
             - Missing Ingredient Policy: {}",
            self.environment,
            self.http_port,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            if self.auth.passcode.is_some() {
                "Configured"
            } else {
                "Not configured"
            },
            if self.analysis.uses_mock() {
                "Mock"
            } else {
                "Gemini"
            },
            self.analysis.model,
            self.request_timeout_secs,
            self.missing_ingredient_policy,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Environment variable, treating blank values as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
