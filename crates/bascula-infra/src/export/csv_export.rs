//! CSV export of ticket records

use std::path::Path;

use tracing::debug;

use bascula_domain::model::TicketRecord;
use bascula_domain::service::format_date_dmy;
use bascula_types::{Error, Result};

use super::spreadsheet::HEADERS;

/// Export ticket records as CSV, same columns as the spreadsheet
pub fn export_tickets_to_csv(records: &[TicketRecord], output_path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| Error::Csv(e.to_string()))?;

    writer
        .write_record(HEADERS)
        .map_err(|e| Error::Csv(e.to_string()))?;

    for record in records {
        writer
            .write_record([
                format_date_dmy(record.date),
                record.driver_name.clone(),
                record.plate.clone(),
                record.slot.clone(),
                record.ticket_number.to_string(),
                record.certification.clone(),
                format!("{:.2}", record.gross_ton),
                format!("{:.2}", record.tare_kg),
                format!("{:.2}", record.net_kg),
                format!("{:.2}", record.gross_kg),
                format!("{:.2}", record.price_per_ton),
                format!("{:.2}", record.total),
            ])
            .map_err(|e| Error::Csv(e.to_string()))?;
    }

    writer.flush()?;
    debug!(path = %output_path.display(), rows = records.len(), "wrote csv");
    Ok(())
}
