use std::sync::atomic::{AtomicU64, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use super::{ChangeListener, KvStore, Subscribers};

pub type DbPool = Pool<SqliteConnectionManager>;

/// Counter for unique shared-cache in-memory database names, so independent
/// in-memory stores in one process never see each other's entries.
static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SQLite-backed implementation of the KvStore trait. A single `kv` table
/// holds every entry, the same flat shape a browser profile uses for local
/// storage.
pub struct SqliteStore {
    pub pool: DbPool,
    subscribers: Subscribers,
}

impl SqliteStore {
    /// Open (or create) a file-backed store at `path` with WAL enabled.
    pub fn open(path: &str) -> Result<Self, String> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| e.to_string())?;

        // Enable WAL mode for better concurrent read performance
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| e.to_string())?;
        drop(conn);

        Self::new(pool)
    }

    /// Open a fresh process-local in-memory store. The shared-cache URI keeps
    /// the database alive across the pool's connections.
    pub fn in_memory() -> Result<Self, String> {
        let id = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri = format!("file:kudos_mem_{}?mode=memory&cache=shared", id);
        let manager = SqliteConnectionManager::file(uri);
        let pool = Pool::builder()
            .max_size(2)
            .build(manager)
            .map_err(|e| e.to_string())?;
        Self::new(pool)
    }

    /// Wrap an existing pool, creating the `kv` table if it is missing.
    pub fn new(pool: DbPool) -> Result<Self, String> {
        {
            let conn = pool.get().map_err(|e| e.to_string())?;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(SqliteStore {
            pool,
            subscribers: Subscribers::new(),
        })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let conn = self.pool.get().ok()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        drop(conn);

        self.subscribers.notify(key);
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> u64 {
        self.subscribers.add(listener)
    }

    fn unsubscribe(&self, token: u64) {
        self.subscribers.remove(token);
    }
}
