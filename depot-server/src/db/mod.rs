//! Database Module
//!
//! Handles the SQLite connection pool, migrations and first-run seeding.

pub mod repository;

use crate::auth::password;
use shared::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service - owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync.
        // busy_timeout goes in the options so EVERY pooled connection waits
        // on write contention instead of failing immediately.
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_millis(5000))
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Seed the default admin account on first run.
    ///
    /// Roles are seeded by the migration; the admin user needs a runtime
    /// argon2 hash. No-op when any admin user already exists.
    pub async fn seed_admin(&self, admin_password: &str) -> Result<(), AppError> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM user WHERE role = 1 LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check admin user: {e}")))?;

        if existing.is_some() {
            return Ok(());
        }

        let hash = password::hash_password(admin_password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        let now = shared::util::now_millis();
        let id = shared::util::snowflake_id();

        sqlx::query(
            "INSERT INTO user (id, username, password_hash, role, is_system, is_active, created_at, updated_at) \
             VALUES (?1, 'admin', ?2, 1, 1, 1, ?3, ?3)",
        )
        .bind(id)
        .bind(hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed admin user: {e}")))?;

        tracing::info!("Seeded default admin user");
        Ok(())
    }
}
