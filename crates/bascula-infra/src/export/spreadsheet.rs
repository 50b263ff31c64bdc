//! Excel export of ticket records

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tracing::debug;

use bascula_domain::model::TicketRecord;
use bascula_domain::service::{format_date_dmy, format_date_title};
use bascula_types::{Error, Result};

use super::ReportContext;

/// Report column headers, in sheet order
pub const HEADERS: [&str; 12] = [
    "FECHA PESADA",
    "CHOFER",
    "PLACAS",
    "HORARIO",
    "TICKET",
    "BASCULA CERTIFICADA",
    "PESO PRODUCTO (TON)",
    "TARA (KG)",
    "KG NETO",
    "KG BRUTO",
    "PRECIO POR TON",
    "TOTAL",
];

const COLUMN_WIDTHS: [f64; 12] = [14.0, 18.0, 12.0, 10.0, 10.0, 20.0, 18.0, 12.0, 12.0, 12.0, 14.0, 14.0];

/// Zero-based row of the header; title and a blank row sit above it
const HEADER_ROW: u32 = 2;

fn xlsx_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Title shown above the table
pub fn report_title(ctx: &ReportContext<'_>) -> String {
    format!(
        "CONTROL DE RESIDUOS ({} - {})",
        format_date_title(ctx.start_date),
        format_date_title(ctx.end_date)
    )
}

/// Export ticket records to an Excel file
pub fn export_tickets_to_excel(
    records: &[TicketRecord],
    ctx: &ReportContext<'_>,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_report_sheet(sheet, records, ctx)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    debug!(path = %output_path.display(), rows = records.len(), "wrote spreadsheet");

    Ok(())
}

fn write_report_sheet(
    sheet: &mut Worksheet,
    records: &[TicketRecord],
    ctx: &ReportContext<'_>,
) -> Result<()> {
    sheet.set_name("Reporte").map_err(xlsx_err)?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let decimal_format = Format::new().set_num_format("0.00");
    let currency_format = Format::new().set_num_format("\"$\"#,##0.00");

    // Title across A1:L1
    sheet
        .merge_range(0, 0, 0, (HEADERS.len() - 1) as u16, &report_title(ctx), &title_format)
        .map_err(xlsx_err)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = HEADER_ROW + 1 + row_idx as u32;

        sheet
            .write_string(row, 0, format_date_dmy(record.date))
            .map_err(xlsx_err)?;
        sheet.write_string(row, 1, &record.driver_name).map_err(xlsx_err)?;
        sheet.write_string(row, 2, &record.plate).map_err(xlsx_err)?;
        sheet.write_string(row, 3, &record.slot).map_err(xlsx_err)?;
        sheet
            .write_number(row, 4, record.ticket_number as f64)
            .map_err(xlsx_err)?;
        sheet.write_string(row, 5, &record.certification).map_err(xlsx_err)?;

        // Masses
        let masses = [record.gross_ton, record.tare_kg, record.net_kg, record.gross_kg];
        for (offset, value) in masses.iter().enumerate() {
            sheet
                .write_number_with_format(row, 6 + offset as u16, *value, &decimal_format)
                .map_err(xlsx_err)?;
        }

        // Price and total
        sheet
            .write_number_with_format(row, 10, record.price_per_ton, &currency_format)
            .map_err(xlsx_err)?;
        sheet
            .write_number_with_format(row, 11, record.total, &currency_format)
            .map_err(xlsx_err)?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width).map_err(xlsx_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SlipHeader;
    use chrono::NaiveDate;

    #[test]
    fn test_report_title_spans_date_range() {
        let slip = SlipHeader::default();
        let ctx = ReportContext {
            start_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            slip: &slip,
        };
        assert_eq!(report_title(&ctx), "CONTROL DE RESIDUOS (01-12-2025 - 06-12-2025)");
    }
}
