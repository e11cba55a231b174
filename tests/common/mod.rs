#![allow(dead_code)]

use std::path::PathBuf;

use advocate_directory::db::{DbPool, establish_connection_pool};
use advocate_directory::domain::advocate::NewAdvocate;
use advocate_directory::repository::{AdvocateWriter, DieselRepository};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Temporary SQLite database with all migrations applied.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        {
            let mut conn = pool.get().expect("get connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("run migrations");
        }
        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }

    /// Inserts `count` advocates named `First{n} Last{n}` living in `City{n}`.
    pub fn seed(&self, count: usize) {
        let advocates: Vec<NewAdvocate> = (1..=count).map(sample_advocate).collect();
        self.repository()
            .create_advocates(&advocates)
            .expect("seed advocates");
    }
}

pub fn sample_advocate(n: usize) -> NewAdvocate {
    NewAdvocate::new(
        format!("First{n}"),
        format!("Last{n}"),
        format!("City{n}"),
        "MD".to_string(),
        if n % 2 == 0 {
            vec!["Cardiology".to_string(), "Sleep issues".to_string()]
        } else {
            vec![]
        },
        n as u32,
        format!("555000{n:04}"),
    )
}
