//! Connection pool and embedded migrations.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Migrations compiled in from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a pool for the given database path.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .build(manager)
        .map_err(|e| Error::Database(e.to_string()))
}

/// Apply all pending migrations.
///
/// # Errors
/// Returns an error if a connection cannot be checked out or a migration fails.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Open a pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open(database_url: &str) -> Result<DbPool> {
    let pool = create_pool(database_url)?;
    run_migrations(&pool)?;
    Ok(pool)
}

/// Pragmas applied to each connection before writing.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query("PRAGMA busy_timeout=5000").execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    fn table_names(pool: &DbPool) -> Vec<String> {
        let mut conn = pool.get().unwrap();
        diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
    }

    #[test]
    fn migrations_create_session_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.db");
        let pool = open(path.to_str().unwrap()).unwrap();

        assert_eq!(
            table_names(&pool),
            vec!["errors", "fills", "orders", "pnl", "positions", "ticks"]
        );
    }

    #[test]
    fn migrations_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.db");
        let pool = open(path.to_str().unwrap()).unwrap();

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
        assert_eq!(table_names(&pool).len(), 6);
    }

    #[test]
    fn configure_connection_applies_pragmas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.db");
        let pool = open(path.to_str().unwrap()).unwrap();
        let mut conn = pool.get().unwrap();

        assert!(configure_sqlite_connection(&mut conn).is_ok());
    }
}
