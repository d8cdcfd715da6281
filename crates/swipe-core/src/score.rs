use crate::error::GameResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub current_score: u32,
    pub high_score: u32,
    pub last_updated: DateTime<Utc>,
}

impl Default for ScoreRecord {
    fn default() -> Self {
        Self {
            current_score: 0,
            high_score: 0,
            last_updated: Utc::now(),
        }
    }
}

// --- Persistence ---

pub trait RecordStore: Send {
    fn load(&self) -> GameResult<Option<ScoreRecord>>;
    fn save(&self, record: &ScoreRecord) -> GameResult<()>;
}

/// One JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> GameResult<Option<ScoreRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes a sibling temp file and renames it over the record, so an
    /// interrupted save leaves the previous record intact.
    fn save(&self, record: &ScoreRecord) -> GameResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(record)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Shared in-memory slot. Clones see the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<ScoreRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ScoreRecord) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(record))),
        }
    }

    pub fn snapshot(&self) -> Option<ScoreRecord> {
        self.slot.lock().ok().and_then(|g| g.clone())
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> GameResult<Option<ScoreRecord>> {
        Ok(self.snapshot())
    }

    fn save(&self, record: &ScoreRecord) -> GameResult<()> {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(record.clone());
        }
        Ok(())
    }
}

// --- Remote Sync Hook ---

/// Notified whenever the local high score goes up.
///
/// Implementations must return immediately; any network work happens
/// out-of-band and must never call back into the store.
pub trait HighScoreSync: Send {
    fn high_score_raised(&self, score: u32);
}

/// Sync disabled.
pub struct NoSync;

impl HighScoreSync for NoSync {
    fn high_score_raised(&self, _score: u32) {}
}

// --- Store ---

/// The player's singleton score record plus its persistence and sync hooks.
///
/// All operations mutate local state synchronously. Persistence and sync
/// failures are logged and never roll the record back.
pub struct ScoreStore {
    record: ScoreRecord,
    store: Box<dyn RecordStore>,
    sync: Box<dyn HighScoreSync>,
}

impl ScoreStore {
    /// Loads the record, creating and saving a fresh one on first run.
    pub fn open(store: Box<dyn RecordStore>, sync: Box<dyn HighScoreSync>) -> GameResult<Self> {
        let record = match store.load()? {
            Some(r) => r,
            None => {
                let fresh = ScoreRecord::default();
                store.save(&fresh)?;
                fresh
            }
        };

        Ok(Self {
            record,
            store,
            sync,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            record: ScoreRecord::default(),
            store: Box::new(MemoryStore::new()),
            sync: Box::new(NoSync),
        }
    }

    pub fn with_sync(mut self, sync: Box<dyn HighScoreSync>) -> Self {
        self.sync = sync;
        self
    }

    pub fn record(&self) -> &ScoreRecord {
        &self.record
    }

    pub fn current_score(&self) -> u32 {
        self.record.current_score
    }

    pub fn high_score(&self) -> u32 {
        self.record.high_score
    }

    pub fn update_score(&mut self, new_score: u32) {
        self.record.current_score = new_score;
        self.raise_high_score_to(new_score);
        self.touch();
    }

    /// Finalizes the high score, then zeroes the current score.
    pub fn commit_game_over(&mut self) {
        self.raise_high_score_to(self.record.current_score);
        self.record.current_score = 0;
        self.touch();
    }

    pub fn reset_current(&mut self) {
        self.record.current_score = 0;
        self.touch();
    }

    pub fn reset_high_score(&mut self) {
        info!("🧹 High score reset (was {})", self.record.high_score);
        self.record.high_score = 0;
        self.touch();
    }

    fn raise_high_score_to(&mut self, score: u32) {
        if score > self.record.high_score {
            self.record.high_score = score;
            info!("🏆 New high score: {}", score);
            self.sync.high_score_raised(score);
        }
    }

    fn touch(&mut self) {
        self.record.last_updated = Utc::now();
        if let Err(e) = self.store.save(&self.record) {
            warn!("Failed to persist score record: {}", e);
        }
    }
}
