//! Report renderers

pub mod csv_export;
pub mod spreadsheet;
pub mod ticket_text;
pub mod ticket_zip;

use std::path::Path;

use chrono::NaiveDate;

use bascula_domain::model::TicketRecord;
use bascula_types::{FileKind, Result};

pub use csv_export::export_tickets_to_csv;
pub use spreadsheet::export_tickets_to_excel;
pub use ticket_text::{export_tickets_to_txt, render_ticket, render_tickets, SlipHeader};
pub use ticket_zip::export_tickets_to_zip;

/// What a renderer needs beyond the records themselves
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub slip: &'a SlipHeader,
}

/// Render `records` as `kind` into `output_path`
pub fn write_report(
    kind: FileKind,
    records: &[TicketRecord],
    ctx: &ReportContext<'_>,
    output_path: &Path,
) -> Result<()> {
    match kind {
        FileKind::Excel => export_tickets_to_excel(records, ctx, output_path),
        FileKind::Txt => export_tickets_to_txt(records, ctx.slip, output_path),
        FileKind::Zip => export_tickets_to_zip(records, ctx.slip, output_path),
        FileKind::Csv => export_tickets_to_csv(records, output_path),
    }
}
