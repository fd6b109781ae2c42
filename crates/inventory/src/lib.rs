//! Forklift inventory records for fleet-sim.
//!
//! This crate is the boundary between untyped inventory data (uploaded JSON
//! or CSV files) and the strongly-typed [`Equipment`] records the command
//! interpreter consumes. It also provides [`InventoryCache`], which serves a
//! snapshot within a freshness window and refetches with retry when stale.

#![warn(missing_docs)]

/// Snapshot caching and retried retrieval.
pub mod cache;
/// Inventory retrieval configuration.
pub mod config;
/// Inventory error types.
pub mod error;

pub use cache::{FileSource, InventoryCache, InventorySource};
pub use config::{InventoryConfig, RetryConfig};
pub use error::InventoryError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Largest accepted import file, in bytes (5 MiB).
pub const MAX_IMPORT_BYTES: u64 = 5 * 1024 * 1024;

/// A registered forklift.
///
/// `model_number` is the unique key used to select equipment for simulation.
///
/// # Example
/// ```
/// let forklift = fleet_sim_inventory::Equipment::new("Forklift A", "M-1234", "2023-01-15");
/// assert_eq!(forklift.model_number, "M-1234");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Display name (e.g., `"Forklift A"`).
    pub name: String,
    /// Unique model number (e.g., `"M-1234"`).
    pub model_number: String,
    /// Manufacturing date as supplied by the registry (e.g., `"2023-01-15"`).
    pub manufacturing_date: String,
}

impl Equipment {
    /// Create an equipment record.
    pub fn new(
        name: impl Into<String>,
        model_number: impl Into<String>,
        manufacturing_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model_number: model_number.into(),
            manufacturing_date: manufacturing_date.into(),
        }
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.model_number)
    }
}

/// Accepted spellings for each field, canonical name first.
const NAME_KEYS: &[&str] = &["name", "Name"];
const MODEL_NUMBER_KEYS: &[&str] = &["modelNumber", "model_number"];
const MANUFACTURING_DATE_KEYS: &[&str] = &["manufacturingDate", "manufacturing_date"];

/// Load and normalize an inventory from a JSON string.
///
/// The payload must be a JSON array of objects. Each object must carry a
/// non-empty string for every field; both camelCase and snake_case keys are
/// accepted (and `Name` for `name`). A `null` under the canonical key falls
/// through to the alternate spelling. Errors name the 1-based item index.
pub fn load_inventory_from_str(s: &str) -> Result<Vec<Equipment>, InventoryError> {
    let value: Value = serde_json::from_str(s)?;
    normalize_inventory(&value)
}

/// Normalize an already-parsed JSON value into equipment records.
///
/// See [`load_inventory_from_str`] for the accepted shape.
pub fn normalize_inventory(value: &Value) -> Result<Vec<Equipment>, InventoryError> {
    let items = value.as_array().ok_or(InventoryError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = i + 1;
            let obj = item
                .as_object()
                .ok_or(InventoryError::NotAnObject { index })?;
            Ok(Equipment {
                name: required_string(obj, NAME_KEYS, index)?,
                model_number: required_string(obj, MODEL_NUMBER_KEYS, index)?,
                manufacturing_date: required_string(obj, MANUFACTURING_DATE_KEYS, index)?,
            })
        })
        .collect()
}

fn required_string(
    obj: &Map<String, Value>,
    keys: &'static [&'static str],
    index: usize,
) -> Result<String, InventoryError> {
    let value = keys
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null());
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(InventoryError::MissingField {
            index,
            field: keys[0],
        }),
    }
}

/// Parse a header-row CSV inventory and normalize it.
///
/// Each row becomes an object keyed by the header names, so the same key
/// aliases apply as for JSON. Blank lines are skipped; a row whose field
/// count differs from the header is an [`InventoryError::InvalidCsv`].
/// Errors name the 1-based row index, not counting the header.
pub fn load_inventory_from_csv(s: &str) -> Result<Vec<Equipment>, InventoryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(s.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, field)| (key.to_string(), Value::String(field.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }
    normalize_inventory(&Value::Array(rows))
}

/// Encoding of an inventory import file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// A JSON array of objects.
    Json,
    /// CSV with a header row.
    Csv,
}

impl ImportFormat {
    /// Parse and normalize `text` in this format.
    pub fn load(self, text: &str) -> Result<Vec<Equipment>, InventoryError> {
        match self {
            ImportFormat::Json => load_inventory_from_str(text),
            ImportFormat::Csv => load_inventory_from_csv(text),
        }
    }
}

/// Check an import file's name and size before reading it.
///
/// `.json` and `.csv` files (case-insensitive) up to [`MAX_IMPORT_BYTES`] are
/// accepted. The size limit is checked first.
pub fn check_import_file(file_name: &str, size: u64) -> Result<ImportFormat, InventoryError> {
    if size > MAX_IMPORT_BYTES {
        return Err(InventoryError::FileTooLarge {
            size,
            max: MAX_IMPORT_BYTES,
        });
    }
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "json" => Ok(ImportFormat::Json),
        "csv" => Ok(ImportFormat::Csv),
        _ => Err(InventoryError::UnsupportedFormat { extension }),
    }
}

/// Check, read, and normalize an inventory file.
pub fn import_inventory_file(path: &Path) -> Result<Vec<Equipment>, InventoryError> {
    let io_err = |source| InventoryError::Io {
        path: path.display().to_string(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_err)?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = check_import_file(&file_name, size)?;
    let text = std::fs::read_to_string(path).map_err(io_err)?;
    format.load(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_camel_case_records() {
        let json = r#"[
            {"name": "Forklift A", "modelNumber": "M-1234", "manufacturingDate": "2023-01-15"},
            {"name": "Forklift B", "modelNumber": "M-5678", "manufacturingDate": "2022-05-20"}
        ]"#;
        let inv = load_inventory_from_str(json).unwrap();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv[0], Equipment::new("Forklift A", "M-1234", "2023-01-15"));
        assert_eq!(inv[1].model_number, "M-5678");
    }

    #[test]
    fn accepts_alternate_spellings() {
        let json = r#"[{"Name": "Forklift C", "model_number": "M-9101", "manufacturing_date": "2024-03-10"}]"#;
        let inv = load_inventory_from_str(json).unwrap();
        assert_eq!(inv[0], Equipment::new("Forklift C", "M-9101", "2024-03-10"));
    }

    #[test]
    fn null_canonical_key_falls_through_to_alias() {
        let json = r#"[{"name": null, "Name": "Forklift D", "modelNumber": "M-1", "manufacturingDate": "2020-01-01"}]"#;
        let inv = load_inventory_from_str(json).unwrap();
        assert_eq!(inv[0].name, "Forklift D");
    }

    #[test]
    fn empty_array_is_an_empty_inventory() {
        assert!(load_inventory_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array() {
        let err = load_inventory_from_str(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, InventoryError::NotAnArray));
    }

    #[test]
    fn rejects_non_object_item_with_index() {
        let json = r#"[{"name": "A", "modelNumber": "M", "manufacturingDate": "D"}, 42]"#;
        let err = load_inventory_from_str(json).unwrap_err();
        assert!(matches!(err, InventoryError::NotAnObject { index: 2 }));
    }

    #[test]
    fn rejects_empty_or_non_string_fields() {
        let empty = r#"[{"name": "", "modelNumber": "M", "manufacturingDate": "D"}]"#;
        let err = load_inventory_from_str(empty).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::MissingField {
                index: 1,
                field: "name"
            }
        ));

        let numeric = r#"[{"name": "A", "modelNumber": 7, "manufacturingDate": "D"}]"#;
        let err = load_inventory_from_str(numeric).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::MissingField {
                field: "modelNumber",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = load_inventory_from_str("[{").unwrap_err();
        assert!(matches!(err, InventoryError::InvalidJson(_)));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&Equipment::new("A", "M-1", "2020-01-01")).unwrap();
        assert_eq!(
            json,
            r#"{"name":"A","modelNumber":"M-1","manufacturingDate":"2020-01-01"}"#
        );
    }

    #[test]
    fn import_file_checks() {
        assert_eq!(check_import_file("fleet.json", 10).unwrap(), ImportFormat::Json);
        assert_eq!(check_import_file("FLEET.JSON", 10).unwrap(), ImportFormat::Json);
        assert_eq!(check_import_file("fleet.Csv", 10).unwrap(), ImportFormat::Csv);
        assert!(matches!(
            check_import_file("fleet.txt", 10),
            Err(InventoryError::UnsupportedFormat { ref extension }) if extension == "txt"
        ));
        assert!(matches!(
            check_import_file("fleet", 10),
            Err(InventoryError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            check_import_file("fleet.json", MAX_IMPORT_BYTES + 1),
            Err(InventoryError::FileTooLarge { .. })
        ));
        assert!(check_import_file("fleet.json", MAX_IMPORT_BYTES).is_ok());
    }

    #[test]
    fn loads_csv_with_header_aliases() {
        let csv = "Name,model_number,manufacturingDate\n\
                   Forklift A,M-1234,2023-01-15\n\
                   \n\
                   \"Forklift B, east dock\",M-5678,2022-05-20\n";
        let inv = load_inventory_from_csv(csv).unwrap();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv[0], Equipment::new("Forklift A", "M-1234", "2023-01-15"));
        assert_eq!(inv[1].name, "Forklift B, east dock");
    }

    #[test]
    fn csv_empty_cell_names_row() {
        let csv = "name,modelNumber,manufacturingDate\nA,M-1,2020-01-01\nB,,2021-01-01\n";
        let err = load_inventory_from_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::MissingField {
                index: 2,
                field: "modelNumber"
            }
        ));
    }

    #[test]
    fn csv_missing_column_is_missing_field() {
        let csv = "name,modelNumber\nA,M-1\n";
        let err = load_inventory_from_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::MissingField {
                index: 1,
                field: "manufacturingDate"
            }
        ));
    }

    #[test]
    fn csv_ragged_row_is_rejected() {
        let csv = "name,modelNumber,manufacturingDate\nA,M-1\n";
        let err = load_inventory_from_csv(csv).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidCsv(_)));
    }

    #[test]
    fn header_only_csv_is_empty() {
        assert!(
            load_inventory_from_csv("name,modelNumber,manufacturingDate\n")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn display_shows_name_and_model() {
        let e = Equipment::new("Forklift A", "M-1234", "2023-01-15");
        assert_eq!(e.to_string(), "Forklift A (M-1234)");
    }
}
