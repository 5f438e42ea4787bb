use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::audit::{AuditService, worker};
use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Audit channel depth before entries are dropped
const AUDIT_BUFFER_SIZE: usize = 256;

/// Server state - shared handles to every service
///
/// Cloning is shallow (Arc / pool handles).
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | pool | SqlitePool | SQLite connection pool |
/// | jwt_service | Arc<JwtService> | token generation/validation |
/// | audit | Arc<AuditService> | audit log |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub audit: Arc<AuditService>,
}

impl ServerState {
    /// Initialize server state.
    ///
    /// Order:
    /// 1. ensure the working directory exists
    /// 2. open the database (runs migrations) and seed the admin account
    /// 3. start the audit worker
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized - the server cannot
    /// run without it.
    pub async fn initialize(config: &Config) -> Self {
        let work_dir = PathBuf::from(&config.work_dir);
        if !work_dir.exists() {
            std::fs::create_dir_all(&work_dir).expect("Failed to create work directory");
        }

        let db_service = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");
        db_service
            .seed_admin(&config.admin_password)
            .await
            .expect("Failed to seed admin user");
        let pool = db_service.pool;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let (audit, audit_rx) = AuditService::new(pool.clone(), AUDIT_BUFFER_SIZE);
        worker::spawn(audit.clone(), audit_rx);

        Self {
            config: config.clone(),
            pool,
            jwt_service,
            audit,
        }
    }

    /// Get the database pool
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
