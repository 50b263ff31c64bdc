//! Infrastructure layer: persistence, report renderers and file loaders

pub mod export;
pub mod legacy_importer;
pub mod persistence;
pub mod roster_loader;
