//! Output formatting module

use bascula_app::report_service::GenerationOutput;
use bascula_domain::model::{Driver, TicketRecord};
use bascula_types::{GeneratedFile, OutputFormat, Result};

/// Cut `text` to `width` characters, marking the cut with "..."
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

pub fn output_records(output_format: OutputFormat, records: &[TicketRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<20} {:<10} {:<7} {:>8} {:>7} {:>10} {:>10} {:>10}",
        "Fecha", "Chofer", "Placas", "Horario", "Ticket", "Ton", "Neto kg", "Bruto kg", "Total"
    );
    println!("{}", "-".repeat(100));

    for r in records {
        println!(
            "{:<10} {:<20} {:<10} {:<7} {:>8} {:>7.2} {:>10.2} {:>10.2} {:>10.2}",
            r.date.format("%d/%m/%Y").to_string(),
            fit(&r.driver_name, 20),
            fit(&r.plate, 10),
            fit(&r.slot, 7),
            r.ticket_number,
            r.gross_ton,
            r.net_kg,
            r.gross_kg,
            r.total
        );
    }

    let tons: f64 = records.iter().map(|r| r.gross_ton).sum();
    let total: f64 = records.iter().map(|r| r.total).sum();
    println!("{}", "-".repeat(100));
    println!("Records: {}   Tons: {:.2}   Total: ${:.2}", records.len(), tons, total);

    Ok(())
}

pub fn output_generation(output_format: OutputFormat, output: &GenerationOutput) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::json!({
            "records": output.records.len(),
            "first_ticket": output.records.first().map(|r| r.ticket_number),
            "last_ticket": output.records.last().map(|r| r.ticket_number),
            "files": output.files,
        });
        println!("{}", serde_json::to_string_pretty(&content)?);
        return Ok(());
    }

    println!("Generated {} records", output.records.len());
    if let (Some(first), Some(last)) = (output.records.first(), output.records.last()) {
        println!("Tickets:  {} - {}", first.ticket_number, last.ticket_number);
    }
    println!();
    output_files(output_format, &output.files)
}

pub fn output_files(output_format: OutputFormat, files: &[GeneratedFile]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    println!("{:>5} {:<6} {:<30} {:<20}", "ID", "Kind", "Name", "Created");
    println!("{}", "-".repeat(64));
    for file in files {
        println!(
            "{:>5} {:<6} {:<30} {:<20}",
            file.id,
            file.kind.to_string(),
            fit(&file.name, 30),
            file.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
        );
    }

    Ok(())
}

pub fn output_file(output_format: OutputFormat, file: &GeneratedFile) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(file)?);
        return Ok(());
    }

    println!("ID:       {}", file.id);
    println!("Name:     {}", file.name);
    println!("Kind:     {}", file.kind);
    println!("Path:     {}", file.path);
    println!("Created:  {}", file.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

pub fn output_drivers(output_format: OutputFormat, drivers: &[Driver]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(drivers)?);
        return Ok(());
    }

    if drivers.is_empty() {
        println!("No drivers registered.");
        return Ok(());
    }

    println!(
        "{:<24} {:<12} {:>6} {:>7} {:>6} {:>4}  {}",
        "Name", "Plate", "Tare", "Base t", "Var %", "Day", "Schedule"
    );
    println!("{}", "-".repeat(80));
    for d in drivers {
        let name = if d.active {
            fit(&d.name, 24)
        } else {
            fit(&format!("{} (off)", d.name), 24)
        };
        println!(
            "{:<24} {:<12} {:>6.2} {:>7.2} {:>6.1} {:>4}  {}",
            name,
            fit(&d.plate, 12),
            d.tare_tons,
            d.baseline_gross_ton,
            d.variance_pct,
            d.tickets_per_day,
            d.schedule.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("JUAN", 10), "JUAN");
        assert_eq!(fit("ABCDEFGHIJKL", 8), "ABCDE...");
        assert_eq!(fit("PEÑA ÑUÑEZ", 7), "PEÑA...");
    }
}
