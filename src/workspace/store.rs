use crate::diagram::{Diagram, export_json, import_json};
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Well-known key the diagram is persisted under.
pub const STORAGE_KEY: &str = "infraGraphData";

/// Persistence port of the workspace. The stored form is the exchange document.
pub trait DiagramStore: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Diagram>, StoreError>;
    fn save(&self, diagram: &Diagram) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Stores the diagram as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/infraGraphData.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

impl DiagramStore for FileStore {
    fn load(&self) -> Result<Option<Diagram>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        import_json(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Writes to a temporary sibling and renames it over the target.
    fn save(&self, diagram: &Diagram) -> Result<(), StoreError> {
        let json = export_json(diagram).map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| self.io_error(e))
        } else {
            Ok(())
        }
    }
}

/// In-process store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `raw` as its persisted document.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// The persisted document, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> Result<T, StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store lock poisoned".to_string()))?;
        Ok(f(&mut slot))
    }
}

impl DiagramStore for MemoryStore {
    fn load(&self) -> Result<Option<Diagram>, StoreError> {
        match self.with_slot(|slot| slot.clone())? {
            None => Ok(None),
            Some(raw) => import_json(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
        }
    }

    fn save(&self, diagram: &Diagram) -> Result<(), StoreError> {
        let json = export_json(diagram).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.with_slot(|slot| *slot = Some(json))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = None)
    }
}
