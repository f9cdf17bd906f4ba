//! CSV dataset output.
//!
//! One file per section, columns in a fixed order. Text fields are
//! flattened (embedded newlines collapsed to spaces, surrounding whitespace
//! trimmed) so every record occupies exactly one row. Files start with a
//! UTF-8 BOM so spreadsheet tools detect the encoding; the datasets carry
//! Thai text.

use crate::models::ArticleRecord;
use crate::utils::clean_field;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Column order for every dataset file.
const COLUMNS: [&str; 8] = [
    "agency",
    "section",
    "id",
    "published_iso",
    "headline",
    "summary",
    "content",
    "url",
];

/// Write one section's records as a CSV file.
///
/// The file path is derived from `base_path` by splicing `_{section}`
/// before the `.csv` extension.
#[instrument(level = "info", skip_all, fields(%section, count = records.len()))]
pub async fn write_section_csv(
    base_path: &str,
    section: &str,
    records: &[ArticleRecord],
) -> Result<(), Box<dyn Error>> {
    let path = super::section_path(base_path, section, ".csv");

    let mut out = String::from("\u{feff}");
    out.push_str(&COLUMNS.join(","));
    out.push('\n');
    for record in records {
        let fields = [
            &record.agency,
            &record.section,
            &record.id,
            &record.published_iso,
            &record.headline,
            &record.summary,
            &record.content,
            &record.url,
        ];
        let row = fields
            .iter()
            .map(|field| escape_field(&clean_field(field)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }

    fs::write(&path, out).await?;
    info!(%path, "wrote section CSV");
    Ok(())
}

/// Quote a field containing a delimiter or quote, doubling embedded quotes.
/// Newlines are already gone by the time a field reaches this point.
fn escape_field(value: &str) -> String {
    if value.contains(['"', ',']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
