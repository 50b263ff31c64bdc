//! Repository adapters for persistence layer

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use bascula_domain::repository::GeneratedFileRepository;
use bascula_infra::persistence::FileGeneratedFileRepository;
use bascula_types::{Error, GeneratedFile, Result};

use crate::config::Config;

/// Open the generated file registry in the configured store directory
pub fn open_registry(config: &Config) -> Result<FileGeneratedFileRepository> {
    let store_dir = config.store_dir()?;
    FileGeneratedFileRepository::open(store_dir)
}

/// Open the generated file registry at a custom directory
pub fn open_registry_at(store_dir: PathBuf) -> Result<FileGeneratedFileRepository> {
    FileGeneratedFileRepository::open(store_dir)
}

/// Look up a registry entry, failing when the id is unknown
pub fn find_file<R: GeneratedFileRepository + ?Sized>(registry: &R, id: u64) -> Result<GeneratedFile> {
    registry.get_by_id(id)?.ok_or(Error::RecordNotFound(id))
}

/// Drop a registry entry; with `purge` the file on disk goes too
///
/// A file already gone from disk is not an error.
pub fn delete_file<R: GeneratedFileRepository + ?Sized>(
    registry: &R,
    id: u64,
    purge: bool,
) -> Result<GeneratedFile> {
    let entry = registry.delete_by_id(id)?.ok_or(Error::RecordNotFound(id))?;

    if purge {
        match fs::remove_file(&entry.path) {
            Ok(()) => info!(path = %entry.path, "deleted report file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %entry.path, "report file already missing")
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bascula_types::FileKind;
    use tempfile::tempdir;

    #[test]
    fn test_find_unknown_id() {
        let dir = tempdir().unwrap();
        let registry = open_registry_at(dir.path().to_path_buf()).unwrap();
        assert!(matches!(find_file(&registry, 4), Err(Error::RecordNotFound(4))));
    }

    #[test]
    fn test_delete_with_purge_removes_file() {
        let dir = tempdir().unwrap();
        let registry = open_registry_at(dir.path().join("store")).unwrap();
        let path = dir.path().join("tickets_1.txt");
        fs::write(&path, "TKT").unwrap();
        let id = registry
            .save("tickets_1.txt", FileKind::Txt, &path.to_string_lossy())
            .unwrap();

        let removed = delete_file(&registry, id, true).unwrap();
        assert_eq!(removed.id, id);
        assert!(!path.exists());
        assert!(registry.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_without_purge_keeps_file() {
        let dir = tempdir().unwrap();
        let registry = open_registry_at(dir.path().join("store")).unwrap();
        let path = dir.path().join("reporte_1.csv");
        fs::write(&path, "x").unwrap();
        let id = registry
            .save("reporte_1.csv", FileKind::Csv, &path.to_string_lossy())
            .unwrap();

        delete_file(&registry, id, false).unwrap();
        assert!(path.exists());
        assert!(matches!(delete_file(&registry, id, false), Err(Error::RecordNotFound(_))));
    }

    #[test]
    fn test_purge_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let registry = open_registry_at(dir.path().to_path_buf()).unwrap();
        let id = registry
            .save("gone.zip", FileKind::Zip, "/nonexistent/gone.zip")
            .unwrap();
        assert!(delete_file(&registry, id, true).is_ok());
    }
}
