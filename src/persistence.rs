use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{config, storage};
use crate::types::{Expression, Mode, Position};

/// Durable string slots, modelled on a browser's local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// JSON object of string slots on disk. The whole file is rewritten on each set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

impl FileStore {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(storage::STORE_FILENAME);
        path
    }

    /// Open the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: PathBuf) -> Self {
        let slots = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "Store file is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(_) => {
                debug!(path = %path.display(), "No store file yet");
                BTreeMap::new()
            }
        };
        Self { path, slots }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.slots).context("Failed to serialize store")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store to {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.slots.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.slots.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// The single persisted widget record
///
/// Wire format: `{"x": .., "y": .., "mode": "normal"|"mini", "expression": ..}`.
/// Missing fields fall back to defaults; `x`/`y` fall back to the configured
/// start coordinate when the widget restores from the record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub expression: Expression,
}

impl WidgetRecord {
    pub fn new(position: Position, mode: Mode, expression: Expression) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            mode,
            expression,
        }
    }

    /// Stored position, with absent coordinates taken from `fallback`
    pub fn position_or(&self, fallback: Position) -> Position {
        Position::new(self.x.unwrap_or(fallback.x), self.y.unwrap_or(fallback.y))
    }

    fn is_well_formed(&self) -> bool {
        self.x.is_none_or(f32::is_finite) && self.y.is_none_or(f32::is_finite)
    }
}

/// Reads and writes the widget record in one fixed slot of a [`KeyValueStore`]
#[derive(Debug)]
pub struct WidgetStore<S> {
    store: S,
}

impl<S: KeyValueStore> WidgetStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the slot with `record` (last write wins)
    pub fn save(&mut self, record: &WidgetRecord) -> Result<()> {
        let json = serde_json::to_string(record).context("Failed to serialize widget record")?;
        self.store
            .set(storage::WIDGET_KEY, json)
            .context("Failed to write widget record")?;
        debug!(record = ?record, "Saved widget state");
        Ok(())
    }

    /// The stored record, or `None` when it is absent or malformed
    pub fn load(&self) -> Option<WidgetRecord> {
        let raw = self.store.get(storage::WIDGET_KEY)?;
        match serde_json::from_str::<WidgetRecord>(&raw) {
            Ok(record) if record.is_well_formed() => {
                info!(x = ?record.x, y = ?record.y, mode = ?record.mode, expression = ?record.expression, "Restored widget state");
                Some(record)
            }
            Ok(record) => {
                warn!(record = ?record, "Stored widget position is not finite, ignoring");
                None
            }
            Err(err) => {
                warn!(error = %err, "Stored widget record is malformed, ignoring");
                None
            }
        }
    }

    /// Forget the stored record
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(storage::WIDGET_KEY)
            .context("Failed to clear widget record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_returns_same_record() {
        let mut store = WidgetStore::new(MemoryStore::new());
        let record = WidgetRecord::new(Position::new(-12.5, 480.0), Mode::Mini, Expression::Sleepy);

        store.save(&record).unwrap();
        assert_eq!(store.load(), Some(record));
    }

    #[test]
    fn test_empty_store_loads_none() {
        let store = WidgetStore::new(MemoryStore::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_corrupt_record_loads_none() {
        let mut raw = MemoryStore::new();
        raw.set(storage::WIDGET_KEY, "{\"x\": 10, \"y\":".to_string()).unwrap();
        assert_eq!(WidgetStore::new(raw).load(), None);

        let mut raw = MemoryStore::new();
        raw.set(storage::WIDGET_KEY, r#"{"x": 1, "y": 2, "mode": "huge"}"#.to_string()).unwrap();
        assert_eq!(WidgetStore::new(raw).load(), None);

        let mut raw = MemoryStore::new();
        raw.set(storage::WIDGET_KEY, "\"just a string\"".to_string()).unwrap();
        assert_eq!(WidgetStore::new(raw).load(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let mut raw = MemoryStore::new();
        raw.set(storage::WIDGET_KEY, r#"{"x": 40, "y": 50, "mode": "mini"}"#.to_string()).unwrap();
        let record = WidgetStore::new(raw).load().unwrap();
        assert_eq!(record.mode, Mode::Mini);
        assert_eq!(record.expression, Expression::Normal);

        let mut raw = MemoryStore::new();
        raw.set(storage::WIDGET_KEY, r#"{"y": 50, "colour": "blue"}"#.to_string()).unwrap();
        let record = WidgetStore::new(raw).load().unwrap();
        assert_eq!(record.mode, Mode::Normal);
        assert_eq!(record.position_or(Position::new(100.0, 100.0)), Position::new(100.0, 50.0));
    }

    #[test]
    fn test_wire_format() {
        let record = WidgetRecord::new(Position::new(3.0, 4.0), Mode::Normal, Expression::Angry);
        let json: serde_json::Value = serde_json::to_value(record).unwrap();
        assert_eq!(json["x"], 3.0);
        assert_eq!(json["y"], 4.0);
        assert_eq!(json["mode"], "normal");
        assert_eq!(json["expression"], "angry");
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let mut store = WidgetStore::new(MemoryStore::new());
        store.save(&WidgetRecord::new(Position::new(1.0, 1.0), Mode::Normal, Expression::Normal)).unwrap();
        let latest = WidgetRecord::new(Position::new(2.0, 2.0), Mode::Mini, Expression::Angry);
        store.save(&latest).unwrap();
        assert_eq!(store.load(), Some(latest));
    }

    #[test]
    fn test_clear_removes_record() {
        let mut store = WidgetStore::new(MemoryStore::new());
        store.save(&WidgetRecord::new(Position::ZERO, Mode::Normal, Expression::Normal)).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("store.json");
        let record = WidgetRecord::new(Position::new(250.0, 75.0), Mode::Mini, Expression::Surprised);

        let mut store = WidgetStore::new(FileStore::open(path.clone()));
        store.save(&record).unwrap();

        let reopened = WidgetStore::new(FileStore::open(path));
        assert_eq!(reopened.load(), Some(record));
    }

    #[test]
    fn test_file_store_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(path);
        assert_eq!(store.get(storage::WIDGET_KEY), None);
    }
}
