//! Durable storage for the affective state.
//!
//! The state is five opaque scalars in a key/value table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS affect_kv (
//!     key        TEXT PRIMARY KEY,
//!     value      TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! A missing `valence` row means nothing was ever saved. A cleared conflict
//! trigger deletes its row.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, info};

use crate::affect::AffectiveState;
use crate::config::PersistenceConfig;
use crate::error::{PanduError, Result};

/// Storage key for valence.
pub const KEY_VALENCE: &str = "valence";
/// Storage key for arousal.
pub const KEY_AROUSAL: &str = "arousal";
/// Storage key for patience.
pub const KEY_PATIENCE: &str = "patience";
/// Storage key for the last interaction timestamp (RFC 3339).
pub const KEY_LAST_INTERACTION: &str = "last_interaction";
/// Storage key for the conflict trigger.
pub const KEY_CONFLICT_TRIGGER: &str = "conflict_trigger";

/// Injected storage handle for [`AffectiveState`].
pub trait AffectStore {
    /// Load the saved state, or `None` if nothing was saved yet.
    ///
    /// # Errors
    /// Returns an error if storage is unreachable or a value is corrupt.
    fn load(&self) -> Result<Option<AffectiveState>>;

    /// Overwrite the saved state.
    ///
    /// # Errors
    /// Returns an error if storage is unreachable.
    fn save(&self, state: &AffectiveState) -> Result<()>;
}

// ---------------------------------------------------------------------------
// SQLite
// ---------------------------------------------------------------------------

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS affect_kv (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);";

/// [`AffectStore`] backed by an SQLite key/value table.
pub struct SqliteAffectStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteAffectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteAffectStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl SqliteAffectStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns [`PanduError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), wal = config.wal_mode, "affect store opened");
        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns [`PanduError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Path of the underlying database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM affect_kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get(key)?
            .map(|raw| {
                raw.parse::<f64>().map_err(|_| PanduError::CorruptValue {
                    key: key.to_string(),
                    value: raw,
                })
            })
            .transpose()
    }
}

impl AffectStore for SqliteAffectStore {
    fn load(&self) -> Result<Option<AffectiveState>> {
        let Some(valence) = self.get_f64(KEY_VALENCE)? else {
            debug!("no saved affective state");
            return Ok(None);
        };
        let now = Utc::now().fixed_offset();
        let last_interaction = match self.get(KEY_LAST_INTERACTION)? {
            Some(raw) => DateTime::<FixedOffset>::parse_from_rfc3339(&raw).map_err(|_| {
                PanduError::CorruptValue {
                    key: KEY_LAST_INTERACTION.to_string(),
                    value: raw,
                }
            })?,
            None => now,
        };

        let mut state = AffectiveState::initial(last_interaction);
        state.valence = valence;
        if let Some(arousal) = self.get_f64(KEY_AROUSAL)? {
            state.arousal = arousal;
        }
        if let Some(patience) = self.get_f64(KEY_PATIENCE)? {
            state.patience = patience;
        }
        state.conflict_trigger = self.get(KEY_CONFLICT_TRIGGER)?;
        state.clamp();

        debug!(
            valence = state.valence,
            arousal = state.arousal,
            patience = state.patience,
            "loaded affective state"
        );
        Ok(Some(state))
    }

    fn save(&self, state: &AffectiveState) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let stamp = Utc::now().to_rfc3339();
        {
            let mut upsert = tx.prepare_cached(
                "INSERT INTO affect_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?;
            upsert.execute(params![KEY_VALENCE, state.valence.to_string(), stamp])?;
            upsert.execute(params![KEY_AROUSAL, state.arousal.to_string(), stamp])?;
            upsert.execute(params![KEY_PATIENCE, state.patience.to_string(), stamp])?;
            upsert.execute(params![
                KEY_LAST_INTERACTION,
                state.last_interaction.to_rfc3339(),
                stamp
            ])?;
            match &state.conflict_trigger {
                Some(trigger) => {
                    upsert.execute(params![KEY_CONFLICT_TRIGGER, trigger, stamp])?;
                }
                None => {
                    tx.execute(
                        "DELETE FROM affect_kv WHERE key = ?1",
                        params![KEY_CONFLICT_TRIGGER],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`AffectStore`] that keeps the state in process memory.
#[derive(Debug, Default)]
pub struct MemoryAffectStore {
    slot: Mutex<Option<AffectiveState>>,
    saves: Mutex<usize>,
}

impl MemoryAffectStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `state`.
    #[must_use]
    pub fn with_state(state: AffectiveState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
            saves: Mutex::new(0),
        }
    }

    /// The last saved state.
    #[must_use]
    pub fn snapshot(&self) -> Option<AffectiveState> {
        self.slot.lock().clone()
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl AffectStore for MemoryAffectStore {
    fn load(&self) -> Result<Option<AffectiveState>> {
        Ok(self.slot.lock().clone().map(|mut state| {
            // The streak counter never survives a reload.
            state.consecutive_fast_messages = 0;
            state
        }))
    }

    fn save(&self, state: &AffectiveState) -> Result<()> {
        *self.slot.lock() = Some(state.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}

impl<S: AffectStore + ?Sized> AffectStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<AffectiveState>> {
        (**self).load()
    }

    fn save(&self, state: &AffectiveState) -> Result<()> {
        (**self).save(state)
    }
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Store picked by [`PersistenceConfig::backend`].
#[derive(Debug)]
pub enum ConfiguredStore {
    /// `backend = "sqlite"`, opened at [`PersistenceConfig::path`].
    Sqlite(SqliteAffectStore),
    /// `backend = "memory"`.
    Memory(MemoryAffectStore),
}

/// Open the store the configuration asks for.
///
/// # Errors
/// Returns [`PanduError::Config`] for an unknown backend or an empty path,
/// and [`PanduError::Database`] if SQLite fails to open.
pub fn open_store(config: &PersistenceConfig) -> Result<ConfiguredStore> {
    match config.backend.trim().to_ascii_lowercase().as_str() {
        "sqlite" => {
            if config.path.trim().is_empty() {
                return Err(PanduError::Config("persistence.path is empty".into()));
            }
            SqliteAffectStore::open(&config.path, config).map(ConfiguredStore::Sqlite)
        }
        "memory" => {
            debug!("affect store kept in memory");
            Ok(ConfiguredStore::Memory(MemoryAffectStore::new()))
        }
        other => Err(PanduError::Config(format!("unknown persistence backend `{other}`"))),
    }
}

impl AffectStore for ConfiguredStore {
    fn load(&self) -> Result<Option<AffectiveState>> {
        match self {
            Self::Sqlite(store) => store.load(),
            Self::Memory(store) => store.load(),
        }
    }

    fn save(&self, state: &AffectiveState) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.save(state),
            Self::Memory(store) => store.save(state),
        }
    }
}
