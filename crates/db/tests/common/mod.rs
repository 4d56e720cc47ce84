//! Shared setup for repository integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use lendbook_core::lending::LoanTerms;
use lendbook_db::{LoanRepository, connect_and_migrate, repositories::IssuedLoan};
use lendbook_shared::{LoanId, config::DatabaseConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the schema applied.
///
/// One pooled connection: every `sqlite::memory:` connection is its own
/// database, and a single connection also serializes transactions the way a
/// row lock would.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    connect_and_migrate(&config)
        .await
        .expect("Failed to set up test database")
}

pub async fn setup_repo() -> LoanRepository {
    LoanRepository::new(setup_db().await)
}

/// Issues a standard 10% loan.
pub async fn issue(repo: &LoanRepository, principal: Decimal, years: i64) -> IssuedLoan {
    let terms = LoanTerms::new(principal, years, dec!(10)).expect("valid terms");
    repo.issue_loan(terms).await.expect("Failed to issue loan")
}

/// A SQLite database file in the temp directory, deleted on drop.
pub struct FileDb {
    path: PathBuf,
}

impl FileDb {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("lendbook-test-{}.db", LoanId::new()));
        Self { path }
    }

    /// Opens a pool of `max_connections` on the file, creating the schema.
    pub async fn connect(&self, max_connections: u32) -> DatabaseConnection {
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", self.path.display()),
            max_connections,
            min_connections: 1,
        };
        connect_and_migrate(&config)
            .await
            .expect("Failed to set up file database")
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}
