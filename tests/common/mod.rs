#![allow(dead_code)]

use chitfund_users::db::{DbPool, establish_connection_pool};
use chitfund_users::domain::user::NewUser;
use chrono::{Duration, NaiveDateTime, Utc};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn new_user(name: &str, email: &str, phone: &str, username: &str) -> NewUser {
    NewUser::new(
        name.to_string(),
        String::new(),
        email.to_string(),
        phone.to_string(),
        String::new(),
        username.to_string(),
        None,
        "$2b$04$placeholderplaceholderplaceholderplaceholderpla".to_string(),
    )
}

/// `count` users named `Member 00`, `Member 01`, ... created one minute apart.
pub fn members(count: usize) -> Vec<NewUser> {
    let base: NaiveDateTime = Utc::now().naive_utc() - Duration::days(1);
    (0..count)
        .map(|i| {
            new_user(
                &format!("Member {i:02}"),
                &format!("member{i}@example.com"),
                &format!("90000{i:05}"),
                &format!("member{i}"),
            )
            .with_created_at(base + Duration::minutes(i as i64))
        })
        .collect()
}
