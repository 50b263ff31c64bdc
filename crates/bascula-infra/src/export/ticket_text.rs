//! Plain-text ticket slips
//!
//! One fixed-layout block per record, the way the scale's printer lays out a
//! weigh ticket.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bascula_domain::model::TicketRecord;
use bascula_types::Result;

const RULE: &str = "----------------------------------------";

/// Venue and company lines printed on every slip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipHeader {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_address_lines")]
    pub address_lines: Vec<String>,
    #[serde(default = "default_rfc")]
    pub rfc: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_issued_in")]
    pub issued_in: String,
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_cargo")]
    pub cargo: String,
    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_title() -> String {
    "BASCULA PUBLICA COYULA".to_string()
}

fn default_address_lines() -> Vec<String> {
    vec![
        "PERIFERICO ORIENTE 7390".to_string(),
        "COYULA, JALISCO".to_string(),
        "CP: 45400  Tels:  33 1985 3306".to_string(),
    ]
}

fn default_rfc() -> String {
    "RFC:".to_string()
}

fn default_branch() -> String {
    "COYULA".to_string()
}

fn default_issued_in() -> String {
    "JALISCO".to_string()
}

fn default_company() -> String {
    "VERDEMEX".to_string()
}

fn default_cargo() -> String {
    "BASURA ORG".to_string()
}

fn default_closing() -> String {
    "Gracias por su compra :".to_string()
}

impl Default for SlipHeader {
    fn default() -> Self {
        Self {
            title: default_title(),
            address_lines: default_address_lines(),
            rfc: default_rfc(),
            branch: default_branch(),
            issued_in: default_issued_in(),
            company: default_company(),
            cargo: default_cargo(),
            closing: default_closing(),
        }
    }
}

/// Integer with comma thousands separators, rounded half away from zero
/// (14910.4 -> "14,910")
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Render one ticket slip
pub fn render_ticket(record: &TicketRecord, header: &SlipHeader) -> String {
    let driver = record.driver_name.trim().to_uppercase();
    let plate = record.plate.trim().to_uppercase();

    let mut lines: Vec<String> = Vec::with_capacity(40);
    lines.push(header.title.clone());
    lines.extend(header.address_lines.iter().cloned());
    lines.push(header.rfc.clone());
    lines.push(String::new());
    lines.push(format!("Sucursal:  {}", header.branch));
    lines.push(format!("Expedido en:  {}", header.issued_in));
    lines.push(String::new());
    lines.push(format!("TKT A        {}", record.ticket_number));
    lines.push(format!("Fecha:   {}", record.date.format("%d/%m/%Y")));
    lines.push(format!("OPERADOR {}", driver));
    lines.push("Codigo: Cantidad:  Precio:  Importe:".to_string());
    lines.push("Alm. Descripcion del producto:".to_string());
    lines.push(String::new());
    lines.push(format!("KG BRUTO        {}        0.00", format_grouped(record.gross_kg)));
    lines.push(RULE.to_string());
    lines.push(format!("KG TARA         {}        0.00", format_grouped(record.tare_kg)));
    lines.push(RULE.to_string());
    lines.push(format!("KG NETO         {}        0.00", format_grouped(record.net_kg)));
    lines.push(String::new());
    lines.push(String::new());
    lines.push("TORTON $100.00  1  $100.00   $100.00".to_string());
    lines.push(String::new());
    lines.push("Total :                $100.00".to_string());
    lines.push(String::new());
    lines.push("CIEN PESOS 00/100 M.N.".to_string());
    lines.push("Comprobante no deducible de impuestos".to_string());
    lines.push("Observaciones:".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.push(header.company.clone());
    lines.push(format!("PLACAS: {}   CHOFER:{}", plate, driver));
    lines.push(format!("CARGA: {}", header.cargo));
    lines.push(header.closing.clone());

    lines.join("\n")
}

/// All slips in one document, separated by a blank line
pub fn render_tickets(records: &[TicketRecord], header: &SlipHeader) -> String {
    records
        .iter()
        .map(|r| render_ticket(r, header))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File name for a single slip: `TKT_<ticket>_<PLATES>.txt`
pub fn ticket_file_name(record: &TicketRecord) -> String {
    let plate = record.plate.trim().to_uppercase();
    let plate = if plate.is_empty() { "SINPLACAS".to_string() } else { plate };
    format!("TKT_{}_{}.txt", record.ticket_number, plate)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write all slips to a single text file
pub fn export_tickets_to_txt(
    records: &[TicketRecord],
    header: &SlipHeader,
    output_path: &Path,
) -> Result<()> {
    std::fs::write(output_path, render_tickets(records, header))?;
    debug!(path = %output_path.display(), tickets = records.len(), "wrote ticket text");
    Ok(())
}
