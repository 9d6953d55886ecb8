use std::env;
use std::str::FromStr;

/// Read an environment variable, falling back to `default` when unset or unparseable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Where the JWT signing material comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtKeySource {
    /// HS256 with a shared secret
    Secret(String),
    /// ES256 with PEM key files
    KeyFiles {
        private_key_path: String,
        public_key_path: String,
    },
}

/// Token and cookie settings used by the auth endpoints
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub key_source: JwtKeySource,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let key_source = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => JwtKeySource::Secret(secret),
            _ => JwtKeySource::KeyFiles {
                private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                    .unwrap_or_else(|_| "keys/private_key.pem".to_string()),
                public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                    .unwrap_or_else(|_| "keys/public_key.pem".to_string()),
            },
        };

        Self {
            key_source,
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", 900),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", 604800),
            cookie_secure: env_or("AUTH_COOKIE_SECURE", false),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            key_source: JwtKeySource::Secret(String::new()),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
            cookie_secure: false,
        }
    }
}

/// Process-level settings read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub token_purge_interval_secs: u64,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            port: env_or("PORT", 3000),
            token_purge_interval_secs: env_or("TOKEN_PURGE_INTERVAL_SECS", 3600),
            auth: AuthConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_or_fallbacks() {
        unsafe {
            env::set_var("TRAVEL_PLANNER_TEST_NUMBER", "42");
            env::set_var("TRAVEL_PLANNER_TEST_GARBAGE", "forty-two");
            env::remove_var("TRAVEL_PLANNER_TEST_MISSING");
        }

        assert_eq!(env_or("TRAVEL_PLANNER_TEST_NUMBER", 7), 42);
        assert_eq!(env_or("TRAVEL_PLANNER_TEST_GARBAGE", 7), 7);
        assert_eq!(env_or("TRAVEL_PLANNER_TEST_MISSING", 7), 7);

        unsafe {
            env::remove_var("TRAVEL_PLANNER_TEST_NUMBER");
            env::remove_var("TRAVEL_PLANNER_TEST_GARBAGE");
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_prefers_secret() {
        unsafe {
            env::set_var("JWT_SECRET", "s3cret");
            env::set_var("JWT_ACCESS_TOKEN_EXPIRY", "60");
        }

        let config = AuthConfig::from_env();
        assert_eq!(config.key_source, JwtKeySource::Secret("s3cret".to_string()));
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 604800);

        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_key_files_default() {
        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("JWT_PRIVATE_KEY_PATH");
            env::remove_var("JWT_PUBLIC_KEY_PATH");
        }

        let config = AuthConfig::from_env();
        assert_eq!(
            config.key_source,
            JwtKeySource::KeyFiles {
                private_key_path: "keys/private_key.pem".to_string(),
                public_key_path: "keys/public_key.pem".to_string(),
            }
        );
    }

    #[test]
    #[serial]
    fn test_app_config_requires_database_url() {
        unsafe {
            env::remove_var("DATABASE_URL");
        }
        assert!(AppConfig::from_env().is_err());
    }
}
