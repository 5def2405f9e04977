use {
    crate::inventory::AttentionPolicy,
    std::{env, fmt, path::PathBuf, time::Duration},
    thiserror::Error,
};

pub const DEFAULT_TABLE: &str = "plant_inventory";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    MissingVariable(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Endpoint URL and access key for a Supabase project
#[derive(Clone, PartialEq, Eq)]
pub struct SupabaseSecrets {
    pub url: String,
    pub key: String,
}

impl fmt::Debug for SupabaseSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseSecrets")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl SupabaseSecrets {
    /// Resolve URL and key, taking the first non-empty variable of each list
    fn resolve<F>(lookup: &F, url_vars: &[&str], key_vars: &[&str]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = first_set(lookup, url_vars)
            .ok_or_else(|| ConfigError::MissingVariable(url_vars.join(" or ")))?;
        let key = first_set(lookup, key_vars)
            .ok_or_else(|| ConfigError::MissingVariable(key_vars.join(" or ")))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "{} must start with http:// or https://",
                url_vars[0]
            )));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
        })
    }
}

/// Runtime configuration loaded from environment variables
///
/// Missing Supabase credentials are not fatal here: they are kept as
/// `Err` and reported by whichever source needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub table: String,
    /// Settings for the long-lived managed connection (primary source)
    pub connection: Result<SupabaseSecrets, ConfigError>,
    /// `supabase` namespace secrets used to build the direct client (fallback)
    pub secrets: Result<SupabaseSecrets, ConfigError>,
    pub snapshot_path: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub attention: AttentionPolicy,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CONNECTIONS_SUPABASE_URL` / `CONNECTIONS_SUPABASE_KEY` (managed connection,
    ///   falls back to the plain secrets below)
    /// - `SUPABASE_URL` / `SUPABASE_KEY` (direct client)
    /// - `LSG_TABLE` (default: plant_inventory)
    /// - `LSG_SNAPSHOT_PATH` (optional local JSON snapshot, tried last)
    /// - `LSG_CACHE_TTL_SECS` (default: 300)
    /// - `LSG_REQUEST_TIMEOUT_SECS` (default: 30)
    /// - `LSG_ACTIVE_ATTENTION_DAYS` (default: 60)
    /// - `LSG_CUTBACK_ATTENTION_DAYS` (default: 90)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection = SupabaseSecrets::resolve(
            &lookup,
            &["CONNECTIONS_SUPABASE_URL", "SUPABASE_URL"],
            &["CONNECTIONS_SUPABASE_KEY", "SUPABASE_KEY"],
        );
        let secrets = SupabaseSecrets::resolve(&lookup, &["SUPABASE_URL"], &["SUPABASE_KEY"]);

        let defaults = AttentionPolicy::default();
        let attention = AttentionPolicy {
            active_max_days: parse_or(&lookup, "LSG_ACTIVE_ATTENTION_DAYS", defaults.active_max_days),
            cut_back_max_days: parse_or(
                &lookup,
                "LSG_CUTBACK_ATTENTION_DAYS",
                defaults.cut_back_max_days,
            ),
        };

        Self {
            table: first_set(&lookup, &["LSG_TABLE"]).unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            connection,
            secrets,
            snapshot_path: first_set(&lookup, &["LSG_SNAPSHOT_PATH"]).map(PathBuf::from),
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "LSG_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "LSG_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            attention,
        }
    }

    /// Log the effective configuration (keys are never printed)
    pub fn log_summary(&self) {
        log::info!("📊 Configuration:");
        log::info!("   Table: {}", self.table);
        match &self.connection {
            Ok(settings) => log::info!("   Managed connection: {}", settings.url),
            Err(e) => log::warn!("   Managed connection: unavailable ({})", e),
        }
        match &self.secrets {
            Ok(secrets) => log::info!("   Direct client: {}", secrets.url),
            Err(e) => log::warn!("   Direct client: unavailable ({})", e),
        }
        if let Some(path) = &self.snapshot_path {
            log::info!("   Local snapshot: {}", path.display());
        }
        log::info!("   Cache TTL: {}s", self.cache_ttl.as_secs());
        log::info!(
            "   Attention thresholds: active > {}d, cut back > {}d",
            self.attention.active_max_days,
            self.attention.cut_back_max_days
        );
    }
}

fn first_set<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + fmt::Display + Copy,
{
    match first_set(lookup, &[name]) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} '{}', defaulting to {}", name, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.table, "plant_inventory");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.attention, AttentionPolicy::default());
        assert!(config.snapshot_path.is_none());
        assert_eq!(
            config.secrets,
            Err(ConfigError::MissingVariable("SUPABASE_URL".to_string()))
        );
        assert!(config.connection.is_err());
    }

    #[test]
    fn test_custom_config() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("SUPABASE_KEY", "anon-key"),
            ("LSG_TABLE", "plant_inventory_v2"),
            ("LSG_SNAPSHOT_PATH", "/tmp/plants.json"),
            ("LSG_CACHE_TTL_SECS", "60"),
            ("LSG_ACTIVE_ATTENTION_DAYS", "45"),
            ("LSG_CUTBACK_ATTENTION_DAYS", "120"),
            ("LSG_REQUEST_TIMEOUT_SECS", "10"),
        ]));

        let secrets = config.secrets.clone().unwrap();
        assert_eq!(secrets.url, "https://demo.supabase.co");
        assert_eq!(secrets.key, "anon-key");
        // managed connection inherits the plain secrets when its own are unset
        assert_eq!(config.connection, Ok(secrets));
        assert_eq!(config.table, "plant_inventory_v2");
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/plants.json")));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.attention.active_max_days, 45);
        assert_eq!(config.attention.cut_back_max_days, 120);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_connection_namespace_takes_precedence() {
        let config = Config::from_lookup(lookup_from(&[
            ("CONNECTIONS_SUPABASE_URL", "https://managed.supabase.co"),
            ("CONNECTIONS_SUPABASE_KEY", "managed-key"),
            ("SUPABASE_URL", "https://direct.supabase.co"),
            ("SUPABASE_KEY", "direct-key"),
        ]));

        assert_eq!(config.connection.unwrap().url, "https://managed.supabase.co");
        assert_eq!(config.secrets.unwrap().url, "https://direct.supabase.co");
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = Config::from_lookup(lookup_from(&[("SUPABASE_URL", "https://demo.supabase.co")]));

        assert_eq!(
            config.secrets,
            Err(ConfigError::MissingVariable("SUPABASE_KEY".to_string()))
        );
        assert_eq!(
            config.secrets.unwrap_err().to_string(),
            "Missing configuration value: SUPABASE_KEY"
        );
    }

    #[test]
    fn test_invalid_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "demo.supabase.co"),
            ("SUPABASE_KEY", "anon-key"),
            ("LSG_CACHE_TTL_SECS", "five minutes"),
        ]));

        assert!(matches!(config.secrets, Err(ConfigError::InvalidValue(_))));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_debug_redacts_key() {
        let secrets = SupabaseSecrets {
            url: "https://demo.supabase.co".to_string(),
            key: "super-secret".to_string(),
        };
        let printed = format!("{:?}", secrets);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("demo.supabase.co"));
    }
}
