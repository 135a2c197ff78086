use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// SupabaseConfig
// ---------------------------------------------------------------------------

/// Credentials for the hosted database's REST interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    pub key: String,
    pub table: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Present only when both `SUPABASE_URL` and `SUPABASE_KEY` are set.
    pub supabase: Option<SupabaseConfig>,
    /// Direct Postgres connection, used when Supabase is not configured.
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup.
    ///
    /// Blank values count as absent. Missing storage settings are never an
    /// error: they select fallback mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
            (Some(url), Some(key)) => Some(SupabaseConfig {
                url,
                key,
                table: var("SUPABASE_TABLE").unwrap_or_else(|| "sensor_readings".to_owned()),
            }),
            _ => None,
        };

        Ok(Self {
            supabase,
            database_url: var("DATABASE_URL"),
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            server_port: var("SERVER_PORT")
                .as_deref()
                .unwrap_or("8000")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
