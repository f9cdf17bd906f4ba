//! JSON dataset output.
//!
//! Serializes a section's records as one JSON array per file, for consumers
//! that want the full field values (the CSV writer flattens newlines; this
//! one does not).

use crate::models::ArticleRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write one section's records as a JSON array.
///
/// The file path is derived from `base_path` by splicing `_{section}`
/// before the `.json` extension.
#[instrument(level = "info", skip_all, fields(%section, count = records.len()))]
pub async fn write_section_json(
    base_path: &str,
    section: &str,
    records: &[ArticleRecord],
) -> Result<(), Box<dyn Error>> {
    let path = super::section_path(base_path, section, ".json");
    let json = serde_json::to_string(records)?;
    fs::write(&path, json).await?;
    info!(%path, "wrote section JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AGENCY;

    fn record(id: &str) -> ArticleRecord {
        ArticleRecord {
            agency: AGENCY.to_string(),
            section: "politic".to_string(),
            id: id.to_string(),
            published_iso: "2024-01-01T00:00:00+00:00".to_string(),
            headline: "Headline".to_string(),
            summary: "Summary".to_string(),
            content: "First paragraph.\nSecond paragraph.".to_string(),
            url: format!("https://x/news/politic/{id}"),
        }
    }

    #[tokio::test]
    async fn test_write_section_json_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("dataset.json");
        let base = base.to_str().unwrap();

        write_section_json(base, "politic", &[record("1"), record("2")])
            .await
            .unwrap();

        let written = tmp.path().join("dataset_politic.json");
        let raw = std::fs::read_to_string(written).unwrap();
        let parsed: Vec<ArticleRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 2);
        // JSON keeps embedded newlines intact.
        assert_eq!(parsed[0].content, "First paragraph.\nSecond paragraph.");
    }
}
