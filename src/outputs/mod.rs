//! Dataset writers for per-section CSV and JSON files.
//!
//! Each requested section that produced at least one record becomes one CSV
//! file and one JSON file. Paths are derived from the output templates by
//! splicing the section name in front of the extension:
//!
//! ```text
//! data/thairath_dataset.csv  ->  data/thairath_dataset_politic.csv
//! data/thairath_dataset.json ->  data/thairath_dataset_politic.json
//! ```

pub mod csv;
pub mod json;

/// Derive a section-specific output path from a template path.
fn section_path(base: &str, section: &str, extension: &str) -> String {
    base.replace(extension, &format!("_{section}{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_path_splices_before_extension() {
        assert_eq!(
            section_path("data/thairath_dataset.csv", "politic", ".csv"),
            "data/thairath_dataset_politic.csv"
        );
        assert_eq!(
            section_path("out.json", "economics", ".json"),
            "out_economics.json"
        );
    }
}
