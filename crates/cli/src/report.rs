//! CSV month report: one row per reconciliation decision.

use std::io::Write;
use std::path::PathBuf;

use necrolist_recon::model::Reconciliation;

use crate::CliError;

/// Write the report to a file or stdout. Returns the output label for
/// progress messages. Always writes the header, even with zero rows.
pub fn write_report(
    records: &[Reconciliation],
    out: &Option<PathBuf>,
) -> Result<String, CliError> {
    let out_label = out
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let writer: Box<dyn Write> = match out {
        Some(path) => {
            let f = std::fs::File::create(path).map_err(|e| {
                CliError::output(format!("cannot create {}: {}", path.display(), e))
            })?;
            Box::new(std::io::BufWriter::new(f))
        }
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    write_rows(&mut csv_writer, records)
        .map_err(|e| CliError::output(format!("CSV write error: {e}")))?;

    Ok(out_label)
}

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[Reconciliation],
) -> Result<(), csv::Error> {
    writer.write_record([
        "outcome",
        "person",
        "entry_date",
        "document_date",
        "url",
        "incoming_links",
    ])?;
    for record in records {
        writer.write_record([
            record.outcome.to_string(),
            record.person.clone(),
            record
                .entry_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            record
                .document_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            record.url.clone(),
            record
                .incoming_links
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
