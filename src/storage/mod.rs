// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::index::IndexDocument;
use crate::utils::error::StorageError;

/// Fixed name of the manifest written into the scanned directory.
pub const INDEX_FILENAME: &str = "index.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Serializes the index document and overwrites `index.json` in the base
    /// directory wholesale. Non-ASCII characters are written literally.
    pub fn save_index(&self, index: &IndexDocument) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(INDEX_FILENAME);

        let json = serde_json::to_string_pretty(index)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved index to {}", file_path.display());

        Ok(file_path)
    }
}
