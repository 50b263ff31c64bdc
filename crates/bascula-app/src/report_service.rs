//! Report Service - generation use case
//!
//! 1. Validate the request at the boundary
//! 2. Synthesize the record sequence once
//! 3. Render every requested file kind from that same sequence
//! 4. Register the written files
//!
//! Nothing is registered unless every renderer succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, warn};

use bascula_domain::model::TicketRecord;
use bascula_domain::repository::GeneratedFileRepository;
use bascula_domain::service::synthesize;
use bascula_infra::export::{write_report, ReportContext};
use bascula_types::{Error, FileKind, GeneratedFile, Result};

use crate::config::Config;
use crate::generation::GenerationRequest;

/// Records of one run plus the files rendered from them
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub records: Vec<TicketRecord>,
    pub files: Vec<GeneratedFile>,
}

/// `reporte_<millis>.xlsx`, `tickets_<millis>.zip`, ...
pub fn report_file_name(kind: FileKind, millis: i64) -> String {
    format!("{}_{}.{}", kind.file_prefix(), millis, kind.extension())
}

pub struct ReportService<'a, R: GeneratedFileRepository + ?Sized> {
    config: &'a Config,
    registry: &'a R,
    output_dir: PathBuf,
}

impl<'a, R: GeneratedFileRepository + ?Sized> ReportService<'a, R> {
    pub fn new(config: &'a Config, registry: &'a R, output_dir: PathBuf) -> Self {
        Self {
            config,
            registry,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate and synthesize without touching the filesystem
    pub fn preview<G: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut G,
    ) -> Result<Vec<TicketRecord>> {
        let params = request.validate(self.config.max_records)?;
        debug!(
            estimated = request.estimated_records(),
            start = %params.start_date,
            end = %params.end_date,
            "request validated"
        );
        synthesize(&params, &request.drivers, rng)
    }

    /// Generate records and write one file per requested kind
    pub fn generate<G: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        kinds: &[FileKind],
        rng: &mut G,
    ) -> Result<GenerationOutput> {
        self.generate_stamped(request, kinds, Utc::now().timestamp_millis(), rng)
    }

    /// [`generate`](Self::generate) with the file name stamp given explicitly
    pub fn generate_stamped<G: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        kinds: &[FileKind],
        stamp: i64,
        rng: &mut G,
    ) -> Result<GenerationOutput> {
        info!(start = %request.start_date, end = %request.end_date, ?kinds, "generating report");
        let records = self.preview(request, rng)?;

        let mut unique: Vec<FileKind> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !unique.contains(kind) {
                unique.push(*kind);
            }
        }

        fs::create_dir_all(&self.output_dir)?;
        let ctx = ReportContext {
            start_date: request.start_date,
            end_date: request.end_date,
            slip: &self.config.slip,
        };

        let mut written: Vec<(String, FileKind, PathBuf)> = Vec::with_capacity(unique.len());
        for kind in unique {
            let name = report_file_name(kind, stamp);
            let path = self.output_dir.join(&name);
            if let Err(e) = write_report(kind, &records, &ctx, &path) {
                warn!(%kind, error = %e, "rendering failed, discarding written files");
                discard(written.iter().map(|(_, _, p)| p.as_path()).chain([path.as_path()]));
                return Err(e);
            }
            info!(path = %path.display(), %kind, "report written");
            written.push((name, kind, path));
        }

        let files = match self.register(&written) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "registration failed, discarding written files");
                discard(written.iter().map(|(_, _, p)| p.as_path()));
                return Err(e);
            }
        };

        info!(records = records.len(), files = files.len(), "report generated");
        Ok(GenerationOutput { records, files })
    }

    /// Register every written file, or none of them
    fn register(&self, written: &[(String, FileKind, PathBuf)]) -> Result<Vec<GeneratedFile>> {
        let mut files: Vec<GeneratedFile> = Vec::with_capacity(written.len());
        for (name, kind, path) in written {
            let entry = self
                .registry
                .save(name, *kind, &path.to_string_lossy())
                .and_then(|id| self.registry.get_by_id(id)?.ok_or(Error::RecordNotFound(id)));
            match entry {
                Ok(entry) => files.push(entry),
                Err(e) => {
                    for file in &files {
                        if let Err(undo) = self.registry.delete_by_id(file.id) {
                            warn!(id = file.id, error = %undo, "could not unregister file");
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(files)
    }
}

fn discard<'p>(paths: impl Iterator<Item = &'p Path>) {
    for path in paths {
        if path.exists() {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove partial file");
            }
        }
    }
}
