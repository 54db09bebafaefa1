//! Helpers for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use catalog_api::db::{DbPool, establish_connection_pool, run_migrations};
use catalog_api::repository::DieselRepository;

/// Temporary database used in integration tests.
///
/// The database lives in its own temporary directory, so the `-wal` and `-shm`
/// side files go away together with it.
pub struct TestDb {
    pool: DbPool,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("utf-8 path").to_string();

        let pool =
            establish_connection_pool(&url, 4).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { pool, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
