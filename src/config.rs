//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded by `dotenvy`.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names map to upper-case variables: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Deserialize configuration from an explicit set of variables.
    #[cfg(test)]
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
