//! Loading facility documents from disk or stdin.

use crate::error::{EcoError, Result};
use crate::types::measurement::{Facility, Measurement};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

pub const STDIN_MARKER: &str = "-";

/// Reads `path` (or stdin for `-`) and parses it as a facility document.
pub fn load_input(path: &Path) -> Result<Vec<Facility>> {
    if path.as_os_str() == STDIN_MARKER {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return parse_document(&content, "stdin");
    }
    if !path.exists() {
        return Err(EcoError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let fallback_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_document(&content, &fallback_name)
}

/// Accepts either an array of facilities or a bare array of measurements;
/// the latter becomes a single facility with id 0 named `fallback_name`.
pub fn parse_document(content: &str, fallback_name: &str) -> Result<Vec<Facility>> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| EcoError::InputParse(e.to_string()))?;
    let Value::Array(items) = document else {
        return Err(EcoError::InputParse(
            "expected a JSON array of facilities or measurements".to_string(),
        ));
    };

    let is_facility_list = items
        .first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("measurements"));
    if is_facility_list {
        return serde_json::from_value(Value::Array(items))
            .map_err(|e| EcoError::InputParse(format!("facility list: {e}")));
    }

    let measurements: Vec<Measurement> = serde_json::from_value(Value::Array(items))
        .map_err(|e| EcoError::InputParse(format!("measurement list: {e}")))?;
    Ok(vec![Facility {
        id: 0,
        factory_name: Some(fallback_name.to_string()),
        latitude: None,
        longitude: None,
        measurements,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_facility_list_with_null_fields() {
        let content = r#"[
            {"id": 4, "factory_name": "ТЕЦ-5", "latitude": "50.4", "longitude": null,
             "measurements": [
                {"category_name": "Стан повітря", "component_name": "Вміст пилу",
                 "value": "0.12", "unit": "мг/м³", "measurement_date": "2024-03-01"},
                {"category_name": null, "component_name": null, "value": null,
                 "unit": null, "measurement_date": null}
             ]}
        ]"#;

        let facilities = parse_document(content, "unused").expect("facility list should parse");
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].id, 4);
        assert_eq!(facilities[0].measurements.len(), 2);
        assert_eq!(facilities[0].measurements[0].numeric_value(), Some(0.12));
        assert_eq!(facilities[0].measurements[1], Measurement::default());
    }

    #[test]
    fn bare_measurement_list_becomes_single_facility() {
        let content = r#"[{"category_name": "Стан ґрунтів", "component_name": "Гумус", "value": 3.1}]"#;

        let facilities = parse_document(content, "field-survey").expect("list should parse");
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].id, 0);
        assert_eq!(facilities[0].name(), "field-survey");
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_document(r#"{"id": 1}"#, "x").expect_err("object should be rejected");
        assert!(matches!(err, EcoError::InputParse(_)));
        assert!(parse_document("not json", "x").is_err());
    }

    #[test]
    fn load_input_reports_missing_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load_input(&dir.path().join("missing.json")).expect_err("missing file should fail");
        assert!(matches!(err, EcoError::InputNotFound(_)));
    }

    #[test]
    fn load_input_names_bare_lists_after_file_stem() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("kyiv.json");
        fs::write(&path, "[]").expect("input should write");

        let facilities = load_input(&path).expect("empty list should load");
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].name(), "kyiv");
        assert!(facilities[0].measurements.is_empty());
    }
}
