//! Console and CSV presentation of fetched listings.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::Job;

/// Header row kept byte-for-byte compatible with the spreadsheets the
/// tool's users already build on.
const CSV_HEADERS: [&str; 6] = [
    "titulo",
    "empresa",
    "descrição",
    "data de publicação",
    "salário",
    "localização",
];

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write the listings to `path` and report how many went out.
pub fn export_csv(path: &Path, jobs: &[Job]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, jobs)?;
    println!("Exported {} jobs to {}", jobs.len(), path.display());
    Ok(())
}

fn write_csv<W: io::Write>(writer: W, jobs: &[Job]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for job in jobs {
        let body = single_line(job.body());
        let wage = job.wage();
        let locations = job.location_names().join(" / ");
        csv_writer.write_record([
            job.title(),
            job.company_name(),
            body.as_str(),
            job.published_at(),
            wage.as_str(),
            locations.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Trim and flatten newline runs so a body stays on one CSV row cell.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Tests ──
