//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling and embedded migrations for the SQLite
//! document database.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY: &str = ":memory:";

/// Applies per-connection pragmas when the pool hands out a connection.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA busy_timeout=5000")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every `:memory:` connection is its own database, so an in-memory pool
/// is capped at one connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let max_size = if database_url == IN_MEMORY { 1 } else { 5 };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::DataUnavailable(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::DataUnavailable(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::DataUnavailable(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[test]
    fn memory_pool_holds_single_connection() {
        let pool = create_pool(IN_MEMORY).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn run_migrations_creates_cars_table() {
        let pool = create_pool(IN_MEMORY).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(tables, vec!["cars".to_string()]);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let pool = create_pool(IN_MEMORY).unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn file_pool_allows_several_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CarFactory.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();

        let first = pool.get().unwrap();
        let second = pool.get();
        assert!(second.is_ok());
        drop(first);
    }
}
