//! Schema Mapping Module
//! Maps the six semantic fields to literal CSV headers, so the rest of the
//! pipeline never depends on header spellings.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::data::loader::DataLoadError;

/// Name of the optional mapping override placed next to the data file.
const SCHEMA_FILE_NAME: &str = "schema.json";

/// Column mapping for a sales CSV. Defaults match the deployed export,
/// which carries merge-suffixed headers on three columns.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CsvSchema {
    pub order_date: String,
    pub country: String,
    pub coffee_type: String,
    pub quantity: String,
    pub unit_price: String,
    pub profit: String,
    /// chrono format string for the order-date column.
    pub date_format: String,
}

impl Default for CsvSchema {
    fn default() -> Self {
        Self {
            order_date: "Order Date".to_string(),
            country: "Country_y".to_string(),
            coffee_type: "Coffee Type_y".to_string(),
            quantity: "Quantity".to_string(),
            unit_price: "Unit Price_y".to_string(),
            profit: "Profit".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl CsvSchema {
    /// Schema for a given data file: `schema.json` next to it if present,
    /// otherwise the defaults.
    pub fn for_data_file(csv_path: &Path) -> Result<Self, DataLoadError> {
        let sidecar = csv_path
            .parent()
            .map(|dir| dir.join(SCHEMA_FILE_NAME))
            .filter(|p| p.is_file());

        match sidecar {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|source| {
                    DataLoadError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                let schema: CsvSchema = serde_json::from_str(&text)
                    .map_err(|e| DataLoadError::Schema { path, source: e })?;
                Ok(schema)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the mapping against the file's header row (headers already
    /// trimmed) and return the resolved per-field headers. Fails on the
    /// first semantic field whose header is absent.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, DataLoadError> {
        let present: HashMap<&str, ()> = headers.iter().map(|h| (h.as_str(), ())).collect();

        let require = |field: &'static str, header: &str| -> Result<String, DataLoadError> {
            if present.contains_key(header) {
                Ok(header.to_string())
            } else {
                Err(DataLoadError::MissingColumn {
                    field,
                    header: header.to_string(),
                })
            }
        };

        Ok(ResolvedColumns {
            order_date: require("order date", &self.order_date)?,
            country: require("country", &self.country)?,
            coffee_type: require("coffee type", &self.coffee_type)?,
            quantity: require("quantity", &self.quantity)?,
            unit_price: require("unit price", &self.unit_price)?,
            profit: require("profit", &self.profit)?,
        })
    }
}

/// Header names validated to exist in the loaded file.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    pub order_date: String,
    pub country: String,
    pub coffee_type: String,
    pub quantity: String,
    pub unit_price: String,
    pub profit: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_mapping_resolves_against_deployed_headers() {
        let schema = CsvSchema::default();
        let cols = schema
            .resolve(&headers(&[
                "Order Date",
                "Country_y",
                "Coffee Type_y",
                "Quantity",
                "Unit Price_y",
                "Profit",
            ]))
            .unwrap();
        assert_eq!(cols.country, "Country_y");
        assert_eq!(cols.unit_price, "Unit Price_y");
    }

    #[test]
    fn missing_header_names_the_semantic_field() {
        let schema = CsvSchema::default();
        let err = schema
            .resolve(&headers(&[
                "Order Date",
                "Country_y",
                "Coffee Type_y",
                "Quantity",
                "Unit Price_y",
            ]))
            .unwrap_err();
        match err {
            DataLoadError::MissingColumn { field, header } => {
                assert_eq!(field, "profit");
                assert_eq!(header, "Profit");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sidecar_json_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("sales.csv");
        let mut f = std::fs::File::create(dir.path().join("schema.json")).unwrap();
        write!(
            f,
            r#"{{"country": "Country", "coffee_type": "Coffee", "unit_price": "Price", "date_format": "%d/%m/%Y"}}"#
        )
        .unwrap();

        let schema = CsvSchema::for_data_file(&csv_path).unwrap();
        assert_eq!(schema.country, "Country");
        assert_eq!(schema.coffee_type, "Coffee");
        assert_eq!(schema.unit_price, "Price");
        assert_eq!(schema.date_format, "%d/%m/%Y");
        // Unspecified fields keep their defaults
        assert_eq!(schema.order_date, "Order Date");
        assert_eq!(schema.quantity, "Quantity");
    }

    #[test]
    fn no_sidecar_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let schema = CsvSchema::for_data_file(&dir.path().join("sales.csv")).unwrap();
        assert_eq!(schema, CsvSchema::default());
    }

    #[test]
    fn malformed_sidecar_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("schema.json"), "{not json").unwrap();
        let err = CsvSchema::for_data_file(&dir.path().join("sales.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Schema { .. }));
    }
}
