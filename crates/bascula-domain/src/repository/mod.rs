//! Repository trait definitions for data persistence

use bascula_types::{Error, FileKind, GeneratedFile};

/// Registry of report files written to disk
///
/// Listings are newest first.
pub trait GeneratedFileRepository {
    /// Register a file and return its assigned id
    fn save(&self, name: &str, kind: FileKind, path: &str) -> Result<u64, Error>;

    /// All registered files
    fn list_all(&self) -> Result<Vec<GeneratedFile>, Error>;

    /// Registered files of one kind
    fn list_by_kind(&self, kind: FileKind) -> Result<Vec<GeneratedFile>, Error>;

    /// Find a file by id
    fn get_by_id(&self, id: u64) -> Result<Option<GeneratedFile>, Error>;

    /// Remove a file entry, returning it if it existed
    fn delete_by_id(&self, id: u64) -> Result<Option<GeneratedFile>, Error>;
}
