use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use civic_core::db::{DbConfig, ServerAddress, TlsMode};

/// Deployment environment. Production hides internal error details from
/// response bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Read-only API over the city's tax records, council members and projects.
///
/// Every option can also be given through the environment variable shown.
#[derive(Debug, Clone, Parser)]
#[command(name = "civic-api", version)]
pub struct Settings {
    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Store backend (`postgres` or `sqlite`).
    #[arg(long, env = "DB_BACKEND", default_value = "postgres")]
    pub backend: String,

    /// Full connection string. Takes precedence over the `PG_*` options.
    /// For SQLite this is a file path or `:memory:`.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "PG_HOST", default_value = "localhost")]
    pub pg_host: String,

    #[arg(long, env = "PG_PORT", default_value_t = 5432)]
    pub pg_port: u16,

    #[arg(long, env = "PG_USER", default_value = "postgres")]
    pub pg_user: String,

    #[arg(long, env = "PG_PASSWORD", hide_env_values = true)]
    pub pg_password: Option<String>,

    #[arg(long, env = "PG_DATABASE", default_value = "cupertino_taxes")]
    pub pg_database: String,

    /// Transport security for the store connection: disable, require or
    /// verify-full. When unset, `sslmode` in `DATABASE_URL` applies.
    #[arg(long = "database-tls", env = "DATABASE_TLS")]
    pub tls: Option<TlsMode>,

    /// Allowed CORS origin(s), comma separated. `*` allows any origin.
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Directory served under `/images`.
    #[arg(long, env = "IMAGES_DIR", default_value = "images")]
    pub images_dir: PathBuf,

    #[arg(long = "app-env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 5000,
            backend: "postgres".to_string(),
            database_url: None,
            pg_host: "localhost".to_string(),
            pg_port: 5432,
            pg_user: "postgres".to_string(),
            pg_password: None,
            pg_database: "cupertino_taxes".to_string(),
            tls: None,
            cors_origin: "*".to_string(),
            images_dir: PathBuf::from("images"),
            environment: Environment::Development,
        }
    }
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Connection settings handed to the repository registry.
    ///
    /// `DATABASE_URL` wins; otherwise the `PG_*` fields travel as a
    /// discrete server address.
    pub fn db_config(&self) -> DbConfig {
        let (connection_string, server) = match &self.database_url {
            Some(url) => (url.clone(), None),
            None => (
                String::new(),
                Some(ServerAddress {
                    host: self.pg_host.clone(),
                    port: self.pg_port,
                    user: self.pg_user.clone(),
                    password: self.pg_password.clone(),
                    database: self.pg_database.clone(),
                }),
            ),
        };
        DbConfig {
            backend: self.backend.clone(),
            connection_string,
            server,
            tls: self.tls,
        }
    }
}
