use log::*;

use crate::SqliteDatabase;

/// An in-memory database URL. Each call to [`prepare_test_db`] gets a fresh, private database.
pub const MEMORY_DB_URL: &str = "sqlite::memory:";

/// Loads `.env.test`, initialises logging, and returns a migrated, empty in-memory database.
///
/// The pool is limited to a single connection, since every SQLite in-memory connection is a separate database.
pub async fn prepare_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    let db = SqliteDatabase::new_with_url(MEMORY_DB_URL, 1).await.expect("Error creating in-memory database");
    db.run_migrations().await.expect("Error running DB migrations");
    db
}
