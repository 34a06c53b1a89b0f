use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::{Table, Tabled};
use timeanddate_api::types::DstEntry;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct DstRow {
    #[tabled(rename = "Country")]
    #[serde(rename = "Country")]
    country: String,

    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,

    #[tabled(rename = "Zone")]
    #[serde(rename = "Zone")]
    zone: String,

    #[tabled(rename = "Offset")]
    #[serde(rename = "Offset")]
    offset: String,

    #[tabled(rename = "DST Start")]
    #[serde(rename = "DST Start")]
    dst_start: String,

    #[tabled(rename = "DST End")]
    #[serde(rename = "DST End")]
    dst_end: String,

    #[tabled(rename = "Places")]
    #[serde(rename = "Places")]
    places: String,
}

// -- Row builders --

fn build_dst_rows(entries: &[DstEntry]) -> Vec<DstRow> {
    entries
        .iter()
        .map(|e| DstRow {
            country: format!("{} ({})", e.country.name, e.country.id),
            region: e.region_description.clone().unwrap_or_default(),
            zone: match &e.dst_timezone {
                Some(dst) => format!("{}/{}", e.std_timezone.abbreviation, dst.abbreviation),
                None => e.std_timezone.abbreviation.clone(),
            },
            offset: match &e.dst_timezone {
                Some(dst) => format!(
                    "{} / {}",
                    format_offset(e.std_timezone.offset_seconds),
                    format_offset(dst.offset_seconds)
                ),
                None => format_offset(e.std_timezone.offset_seconds),
            },
            dst_start: format_instant(e.dst_start),
            dst_end: format_instant(e.dst_end),
            places: e
                .places
                .as_ref()
                .map(|p| p.len().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

fn format_instant(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        Some(t) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "-".to_string(),
    }
}

// -- Output --

pub fn print_dst_entries(entries: &[DstEntry], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(build_dst_rows(entries)));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
    }
    Ok(())
}
