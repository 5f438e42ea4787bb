//! Server configuration

use crate::auth::JwtConfig;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Runtime configuration, assembled from environment variables.
///
/// | Variable | Default |
/// |----------|---------|
/// | `WORK_DIR` | `/var/lib/depot` |
/// | `HTTP_PORT` | `3000` |
/// | `DATABASE_PATH` | `<WORK_DIR>/depot.db` |
/// | `ENVIRONMENT` | `development` |
/// | `DEPOT_ADMIN_PASSWORD` | `admin` (first-run seed only) |
/// | `JWT_SECRET` / `JWT_EXPIRATION_MINUTES` / `JWT_ISSUER` / `JWT_AUDIENCE` | see [`JwtConfig`] |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the database and log files
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// Password for the seeded admin account
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        let work_dir = env_or("WORK_DIR", "/var/lib/depot");
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/depot.db"));
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            work_dir,
            jwt: JwtConfig::default(),
            environment: env_or("ENVIRONMENT", "development"),
            admin_password: env_or("DEPOT_ADMIN_PASSWORD", "admin"),
        }
    }

    /// Environment config with the paths and port replaced; for tests
    /// and tooling that must not touch the real working directory.
    pub fn with_overrides(
        work_dir: impl Into<String>,
        http_port: u16,
        database_path: impl Into<String>,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            database_path: database_path.into(),
            ..Self::from_env()
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
