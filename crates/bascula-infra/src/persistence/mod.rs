//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_generated_file_repo;

pub use file_generated_file_repo::FileGeneratedFileRepository;
