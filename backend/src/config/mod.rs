//! Central module for application-wide configuration settings.
//!
//! Settings are read once at startup from built-in defaults, an optional
//! `accounts.toml` file and `ACCOUNTS_*` environment variables, then split into
//! the server half (bind address) and the authentication half (signing key,
//! token lifetime, password hashing cost) that is handed to the credential
//! service by reference.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Flat view of every recognised setting, as deserialized from the sources.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// HMAC secret for token signing. No default.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime, e.g. `3600`, `90s`, `15m`, `1h`, `7d`.
    pub jwt_expire: String,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Argon2 cost parameters. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Everything the credential service needs.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_lifetime: Duration,
    pub hash_cost: HashCost,
}

// The secret must never end up in logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl Settings {
    /// Load settings from `accounts.toml` (optional) and `ACCOUNTS_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("accounts").required(false))
            .add_source(Environment::with_prefix("ACCOUNTS"));
        Self::from_builder(builder)
    }

    /// Apply defaults underneath the sources already on `builder`, then
    /// deserialize and validate.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let cost = HashCost::default();
        let settings: Settings = builder
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000_i64)?
            .set_default("jwt_expire", "1h")?
            .set_default("hash_memory_kib", i64::from(cost.memory_kib))?
            .set_default("hash_iterations", i64::from(cost.iterations))?
            .set_default("hash_parallelism", i64::from(cost.parallelism))?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt_secret must be set (ACCOUNTS_JWT_SECRET)".into(),
            ));
        }

        if parse_duration(&self.jwt_expire).is_none() {
            return Err(ConfigError::Message(format!(
                "jwt_expire '{}' is not a valid duration",
                self.jwt_expire
            )));
        }

        if self.hash_iterations == 0 || self.hash_parallelism == 0 {
            return Err(ConfigError::Message(
                "hash_iterations and hash_parallelism must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Split into the server half and the authentication half.
    pub fn split(self) -> Result<(ServerConfig, AuthConfig), ConfigError> {
        let token_lifetime = parse_duration(&self.jwt_expire).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt_expire '{}' is not a valid duration",
                self.jwt_expire
            ))
        })?;

        let server = ServerConfig {
            host: self.host,
            port: self.port,
        };
        let auth = AuthConfig {
            jwt_secret: self.jwt_secret,
            token_lifetime,
            hash_cost: HashCost {
                memory_kib: self.hash_memory_kib,
                iterations: self.hash_iterations,
                parallelism: self.hash_parallelism,
            },
        };
        Ok((server, auth))
    }
}

impl ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3000`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| ConfigError::Message(format!("invalid bind address: {err}")))
    }
}

/// Parse a lifetime such as `3600`, `90s`, `15m`, `1h` or `7d`.
///
/// A bare number is seconds. Zero is rejected.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);
    let value: u64 = digits.parse().ok()?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    match value.checked_mul(multiplier)? {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}
