// src/index/mod.rs
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extractors::{BackupRecord, MetadataExtractor, BACKUP_SUFFIX};
use crate::utils::error::AppError;

/// The consolidated manifest written to disk. Field order here is the field
/// order in the serialized document.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexDocument {
    pub backups: Vec<BackupRecord>,
    pub generated_at: String,
    pub total_count: usize,
}

pub struct IndexBuilder {
    extractor: MetadataExtractor,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            extractor: MetadataExtractor::new(),
        }
    }

    /// Lists backup file names in `dir`, sorted ascending.
    ///
    /// Only regular files whose name ends with the backup suffix are kept;
    /// everything else (subdirectories, the index file itself, unrelated
    /// files) is skipped without comment.
    pub fn list_backup_files(&self, dir: &Path) -> Result<Vec<String>, AppError> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::debug!("Skipping entry with non-UTF-8 name: {:?}", name);
                continue;
            };
            if name.ends_with(BACKUP_SUFFIX) {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Scans `dir` and assembles the index document for it.
    pub fn build(&self, dir: &Path) -> Result<IndexDocument, AppError> {
        let files = self.list_backup_files(dir)?;
        tracing::info!("Found {} backup files in {}", files.len(), dir.display());

        let backups: Vec<BackupRecord> = files
            .iter()
            .map(|name| self.extractor.extract(name))
            .collect();

        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let total_count = backups.len();

        Ok(IndexDocument {
            backups,
            generated_at,
            total_count,
        })
    }
}
