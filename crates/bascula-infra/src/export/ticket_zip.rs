//! Per-ticket text slips bundled into a zip archive

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use bascula_domain::model::TicketRecord;
use bascula_types::{Error, Result};

use super::ticket_text::{render_ticket, ticket_file_name, SlipHeader};

fn zip_err(e: zip::result::ZipError) -> Error {
    Error::Archive(e.to_string())
}

/// Write one `TKT_<ticket>_<PLATES>.txt` entry per record
pub fn export_tickets_to_zip(
    records: &[TicketRecord],
    header: &SlipHeader,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for record in records {
        zip.start_file(ticket_file_name(record), options)
            .map_err(zip_err)?;
        zip.write_all(render_ticket(record, header).as_bytes())?;
    }

    zip.finish().map_err(zip_err)?;
    debug!(path = %output_path.display(), entries = records.len(), "wrote ticket archive");
    Ok(())
}
