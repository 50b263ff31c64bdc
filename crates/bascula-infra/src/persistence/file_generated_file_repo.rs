//! File-based generated file registry
//!
//! Keeps the registry as a single JSON document in the store directory.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bascula_domain::repository::GeneratedFileRepository;
use bascula_types::{FileKind, GeneratedFile, Result};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct RegistryData {
    /// Last id handed out; ids start at 1
    #[serde(default)]
    last_id: u64,
    #[serde(default)]
    files: Vec<GeneratedFile>,
}

/// File-based implementation of GeneratedFileRepository
pub struct FileGeneratedFileRepository {
    store_path: PathBuf,
    data: RefCell<RegistryData>,
}

impl FileGeneratedFileRepository {
    /// Create or load a registry in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("registry.json");

        let data = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_else(|e| {
                warn!(path = %store_path.display(), error = %e, "unreadable registry, starting empty");
                RegistryData::default()
            })
        } else {
            RegistryData::default()
        };

        Ok(Self {
            store_path,
            data: RefCell::new(data),
        })
    }

    /// Path of the backing JSON file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Write `next` to disk, then make it the live registry
    ///
    /// The in-memory state is left untouched when the write fails.
    fn commit(&self, next: RegistryData) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &next)?;
        writer.flush()?;
        *self.data.borrow_mut() = next;
        Ok(())
    }

    fn newest_first(mut files: Vec<GeneratedFile>) -> Vec<GeneratedFile> {
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        files
    }
}

impl GeneratedFileRepository for FileGeneratedFileRepository {
    fn save(&self, name: &str, kind: FileKind, path: &str) -> Result<u64> {
        let mut next = self.data.borrow().clone();
        next.last_id += 1;
        let id = next.last_id;
        next.files.push(GeneratedFile {
            id,
            name: name.to_string(),
            kind,
            path: path.to_string(),
            created_at: Utc::now(),
        });
        self.commit(next)?;
        debug!(id, name, %kind, "registered generated file");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<GeneratedFile>> {
        Ok(Self::newest_first(self.data.borrow().files.clone()))
    }

    fn list_by_kind(&self, kind: FileKind) -> Result<Vec<GeneratedFile>> {
        let files = self
            .data
            .borrow()
            .files
            .iter()
            .filter(|f| f.kind == kind)
            .cloned()
            .collect();
        Ok(Self::newest_first(files))
    }

    fn get_by_id(&self, id: u64) -> Result<Option<GeneratedFile>> {
        Ok(self.data.borrow().files.iter().find(|f| f.id == id).cloned())
    }

    fn delete_by_id(&self, id: u64) -> Result<Option<GeneratedFile>> {
        let mut next = self.data.borrow().clone();
        let Some(idx) = next.files.iter().position(|f| f.id == id) else {
            return Ok(None);
        };
        let removed = next.files.remove(idx);
        self.commit(next)?;
        debug!(id, "removed generated file entry");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_assigns_increasing_ids() {
        let dir = tempdir().unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        let a = repo.save("reporte_1.xlsx", FileKind::Excel, "/tmp/reporte_1.xlsx").unwrap();
        let b = repo.save("tickets_1.txt", FileKind::Txt, "/tmp/tickets_1.txt").unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_list_newest_first_and_by_kind() {
        let dir = tempdir().unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save("a.xlsx", FileKind::Excel, "a.xlsx").unwrap();
        repo.save("b.txt", FileKind::Txt, "b.txt").unwrap();
        repo.save("c.xlsx", FileKind::Excel, "c.xlsx").unwrap();

        let all = repo.list_all().unwrap();
        let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c.xlsx", "b.txt", "a.xlsx"]);

        let excel = repo.list_by_kind(FileKind::Excel).unwrap();
        assert_eq!(excel.len(), 2);
        assert!(excel.iter().all(|f| f.kind == FileKind::Excel));
        assert!(repo.list_by_kind(FileKind::Zip).unwrap().is_empty());
    }

    #[test]
    fn test_get_and_delete() {
        let dir = tempdir().unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        let id = repo.save("a.zip", FileKind::Zip, "a.zip").unwrap();

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().name, "a.zip");
        assert!(repo.get_by_id(99).unwrap().is_none());

        let removed = repo.delete_by_id(id).unwrap();
        assert_eq!(removed.map(|f| f.id), Some(id));
        assert!(repo.delete_by_id(id).unwrap().is_none());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_registry_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
            repo.save("a.xlsx", FileKind::Excel, "a.xlsx").unwrap();
            let id = repo.save("b.csv", FileKind::Csv, "b.csv").unwrap();
            repo.delete_by_id(id).unwrap();
        }
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(repo.list_all().unwrap().len(), 1);
        // ids are never reused
        assert_eq!(repo.save("c.txt", FileKind::Txt, "c.txt").unwrap(), 3);
    }

    /// Put a directory where the registry file goes so every write fails
    fn block_writes(repo: &FileGeneratedFileRepository) {
        let _ = fs::remove_file(repo.store_path());
        fs::create_dir(repo.store_path()).unwrap();
    }

    #[test]
    fn test_failed_save_leaves_registry_unchanged() {
        let dir = tempdir().unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        block_writes(&repo);

        assert!(repo.save("a.xlsx", FileKind::Excel, "a.xlsx").is_err());
        assert!(repo.list_all().unwrap().is_empty());

        // the failed save does not consume an id
        fs::remove_dir(repo.store_path()).unwrap();
        assert_eq!(repo.save("b.xlsx", FileKind::Excel, "b.xlsx").unwrap(), 1);
    }

    #[test]
    fn test_failed_delete_keeps_entry() {
        let dir = tempdir().unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        let id = repo.save("a.zip", FileKind::Zip, "a.zip").unwrap();
        block_writes(&repo);

        assert!(repo.delete_by_id(id).is_err());
        assert!(repo.get_by_id(id).unwrap().is_some());
    }

    #[test]
    fn test_corrupted_registry_starts_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("registry.json"), "{ not json").unwrap();
        let repo = FileGeneratedFileRepository::open(dir.path().to_path_buf()).unwrap();
        assert!(repo.list_all().unwrap().is_empty());
    }
}
