use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthesized weigh ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub date: NaiveDate,             // FECHA PESADA
    pub driver_name: String,         // CHOFER
    pub plate: String,               // PLACAS
    pub slot: String,                // HORARIO
    pub ticket_number: i64,          // TICKET
    pub certification: String,       // BASCULA CERTIFICADA
    pub gross_ton: f64,              // PESO PRODUCTO (TON)
    pub tare_kg: f64,                // TARA (KG)
    pub net_kg: f64,                 // KG NETO
    pub gross_kg: f64,               // KG BRUTO
    pub price_per_ton: f64,          // PRECIO POR TON
    pub total: f64,                  // TOTAL
}
