// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads port, signing secret, transport, token lifetime, and users file from env variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{http_names, secrets, session};
use crate::errors::{AppError, AppResult};
use crate::password;
use crate::transport::TransportKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Port used when `HTTP_PORT` is unset
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
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
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Session and credential settings
#[derive(Clone)]
pub struct AuthConfig {
    /// `HS256` signing secret; generated at startup when absent outside production
    pub jwt_secret: Option<String>,
    /// Active session transport
    pub transport: TransportKind,
    /// Explicit token lifetime; `None` uses the transport default
    pub token_ttl_secs: Option<u64>,
    /// Session cookie name (cookie transport)
    pub cookie_name: String,
    /// Emit the `Secure` cookie attribute
    pub cookie_secure: bool,
    /// Bcrypt cost for hashing plaintext credential sources
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Effective token lifetime in seconds
    #[must_use]
    pub fn ttl_secs(&self) -> u64 {
        self.token_ttl_secs
            .unwrap_or_else(|| self.transport.default_ttl_secs())
    }

    /// Effective token lifetime, capped at [`session::MAX_TOKEN_TTL_SECS`]
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        let secs = self.ttl_secs().min(session::MAX_TOKEN_TTL_SECS);
        chrono::Duration::seconds(i64::try_from(secs).unwrap_or_default())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            transport: TransportKind::default(),
            token_ttl_secs: None,
            cookie_name: http_names::AUTH_COOKIE.to_owned(),
            cookie_secure: true,
            bcrypt_cost: password::DEFAULT_COST,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "jwt_secret",
                &self.jwt_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("transport", &self.transport)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `HTTP` listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Session and credential settings
    pub auth: AuthConfig,
    /// JSON users file; the demo accounts are used when absent outside production
    pub users_file: Option<PathBuf>,
    /// Allowed CORS origins; `*` allows any origin without credentials
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            auth: AuthConfig::default(),
            users_file: None,
            cors_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if a variable is present but unparsable
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let http_port = env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid HTTP_PORT value: {e}")))?;

        let transport = env_var_or("SESSION_TRANSPORT", TransportKind::Cookie.as_str())
            .parse::<TransportKind>()
            .map_err(|e| AppError::config(format!("Invalid SESSION_TRANSPORT value: {e}")))?;

        let token_ttl_secs = env_var_opt("TOKEN_TTL_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|e| AppError::config(format!("Invalid TOKEN_TTL_SECS value: {e}")))
            })
            .transpose()?;

        let cookie_secure = env_var_or(
            "COOKIE_SECURE",
            if environment.is_production() { "true" } else { "false" },
        )
        .parse()
        .map_err(|e| AppError::config(format!("Invalid COOKIE_SECURE value: {e}")))?;

        let bcrypt_cost = env_var_or("BCRYPT_COST", &password::DEFAULT_COST.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid BCRYPT_COST value: {e}")))?;

        let config = Self {
            http_port,
            environment,
            auth: AuthConfig {
                jwt_secret: env_var_opt("JWT_SECRET"),
                transport,
                token_ttl_secs,
                cookie_name: env_var_or("AUTH_COOKIE_NAME", http_names::AUTH_COOKIE),
                cookie_secure,
                bcrypt_cost,
            },
            users_file: env_var_opt("USERS_FILE").map(PathBuf::from),
            cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Override the transport; an unset lifetime follows the new transport's default
    #[must_use]
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.auth.transport = transport;
        self
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a config error for a zero or over-long lifetime, an out-of-range bcrypt cost,
    /// an empty cookie name, or a production deployment without a signing
    /// secret or users file
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.ttl_secs() == 0 {
            return Err(AppError::config("TOKEN_TTL_SECS must be greater than zero"));
        }

        if self.auth.ttl_secs() > session::MAX_TOKEN_TTL_SECS {
            return Err(AppError::config(format!(
                "TOKEN_TTL_SECS must be at most {}",
                session::MAX_TOKEN_TTL_SECS
            )));
        }

        if !(password::MIN_COST..=31).contains(&self.auth.bcrypt_cost) {
            return Err(AppError::config(format!(
                "BCRYPT_COST must be between {} and 31",
                password::MIN_COST
            )));
        }

        if self.auth.cookie_name.trim().is_empty()
            || self
                .auth
                .cookie_name
                .contains(|c: char| c.is_whitespace() || ";=,".contains(c))
        {
            return Err(AppError::config(format!(
                "AUTH_COOKIE_NAME '{}' is not a valid cookie name",
                self.auth.cookie_name
            )));
        }

        match &self.auth.jwt_secret {
            Some(secret) if secret.is_empty() => {
                return Err(AppError::config("JWT_SECRET is set but empty"));
            }
            Some(secret) if secret.len() < secrets::MIN_SECRET_LENGTH => {
                warn!(
                    "JWT_SECRET is shorter than {} bytes; use a longer random secret",
                    secrets::MIN_SECRET_LENGTH
                );
            }
            None if self.environment.is_production() => {
                return Err(AppError::config("JWT_SECRET is required in production"));
            }
            _ => {}
        }

        if self.environment.is_production() {
            if self.users_file.is_none() {
                return Err(AppError::config("USERS_FILE is required in production"));
            }
            if !self.auth.cookie_secure && self.auth.transport == TransportKind::Cookie {
                warn!("COOKIE_SECURE=false in production; session cookies will travel over plain HTTP");
            }
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Rolegate Server Configuration: environment={}, http_port={}, transport={}, \
             token_ttl={}s, cookie={}{}, users={}, signing_secret={}, cors_origins={}",
            self.environment,
            self.http_port,
            self.auth.transport,
            self.auth.ttl_secs(),
            self.auth.cookie_name,
            if self.auth.cookie_secure { " (secure)" } else { "" },
            self.users_file
                .as_ref()
                .map_or_else(|| "demo accounts".to_owned(), |p| p.display().to_string()),
            if self.auth.jwt_secret.is_some() {
                "configured"
            } else {
                "generated"
            },
            self.cors_origins.join(","),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a non-empty environment variable
fn env_var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
