use std::env;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    MissingEnvVar(String),

    #[error("unknown USER_STORE backend: {0} (expected supabase or dynamodb)")]
    UnknownBackend(String),
}

/// Supabase (PostgREST) connection settings
#[derive(Clone, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: "users".to_string(),
        }
    }

    /// REST endpoint of the users collection
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

// Keep the key out of logs
impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

/// Which user store backs the lookup
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Supabase(SupabaseConfig),
    DynamoDb { table_name: String },
}

impl StoreConfig {
    /// Read store settings from the environment. Called once at cold start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = env::var("USER_STORE").unwrap_or_else(|_| "supabase".to_string());

        match backend.to_ascii_lowercase().as_str() {
            "supabase" => {
                let url = required("SUPABASE_URL")?;
                let api_key = required("SUPABASE_ANON_KEY")?;
                let mut config = SupabaseConfig::new(url, api_key);
                if let Ok(table) = env::var("USERS_TABLE") {
                    config.table = table;
                }
                Ok(StoreConfig::Supabase(config))
            }
            "dynamodb" => {
                let table_name =
                    env::var("TABLE_NAME").unwrap_or_else(|_| "football-hero".to_string());
                Ok(StoreConfig::DynamoDb { table_name })
            }
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = [
        "USER_STORE",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "USERS_TABLE",
        "TABLE_NAME",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial(store_env)]
    fn test_supabase_is_default_backend() {
        clear_env();
        env::set_var("SUPABASE_URL", "https://example.supabase.co/");
        env::set_var("SUPABASE_ANON_KEY", "anon-key");

        let config = StoreConfig::from_env().unwrap();
        match config {
            StoreConfig::Supabase(supabase) => {
                assert_eq!(supabase.api_key, "anon-key");
                assert_eq!(supabase.table, "users");
                assert_eq!(supabase.table_url(), "https://example.supabase.co/rest/v1/users");
            }
            other => panic!("unexpected backend: {:?}", other),
        }

        clear_env();
    }

    #[test]
    #[serial(store_env)]
    fn test_supabase_requires_credential() {
        clear_env();
        env::set_var("SUPABASE_URL", "https://example.supabase.co");

        assert_eq!(
            StoreConfig::from_env(),
            Err(ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string()))
        );

        env::set_var("SUPABASE_ANON_KEY", "");
        assert_eq!(
            StoreConfig::from_env(),
            Err(ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string()))
        );

        clear_env();
    }

    #[test]
    #[serial(store_env)]
    fn test_users_table_override() {
        clear_env();
        env::set_var("SUPABASE_URL", "https://example.supabase.co");
        env::set_var("SUPABASE_ANON_KEY", "anon-key");
        env::set_var("USERS_TABLE", "profiles");

        let StoreConfig::Supabase(supabase) = StoreConfig::from_env().unwrap() else {
            panic!("expected supabase backend");
        };
        assert_eq!(supabase.table_url(), "https://example.supabase.co/rest/v1/profiles");

        clear_env();
    }

    #[test]
    #[serial(store_env)]
    fn test_dynamodb_backend_default_table() {
        clear_env();
        env::set_var("USER_STORE", "DynamoDB");

        assert_eq!(
            StoreConfig::from_env(),
            Ok(StoreConfig::DynamoDb {
                table_name: "football-hero".to_string()
            })
        );

        clear_env();
    }

    #[test]
    #[serial(store_env)]
    fn test_unknown_backend() {
        clear_env();
        env::set_var("USER_STORE", "firestore");

        assert_eq!(
            StoreConfig::from_env(),
            Err(ConfigError::UnknownBackend("firestore".to_string()))
        );

        clear_env();
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SupabaseConfig::new("https://example.supabase.co", "secret-anon-key");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-anon-key"));
        assert!(printed.contains("<redacted>"));
    }
}
