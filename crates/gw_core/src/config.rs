use std::env;

use crate::{Error, Result};

/// Process configuration for the API server.
///
/// Every field has a demo default so the server runs out of the box;
/// production deployments override them through the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub token_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            jwt_secret: "your-secret-key".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            token_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to the
    /// demo defaults for anything unset. `GW_PORT` wins over `PORT`.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(host) = env::var("GW_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("GW_PORT").or_else(|_| env::var("PORT")) {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {}", port)))?;
        }
        if let Ok(secret) = env::var("GW_JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Ok(username) = env::var("GW_ADMIN_USERNAME") {
            config.admin_username = username;
        }
        if let Ok(password) = env::var("GW_ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Ok(ttl) = env::var("GW_TOKEN_TTL_SECS") {
            config.token_ttl_secs = ttl
                .parse()
                .map_err(|_| Error::Config(format!("invalid token TTL: {}", ttl)))?;
        }

        Ok(config)
    }
}
