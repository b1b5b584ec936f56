//! CSV Data Loader Module
//! Reads a sales CSV into a typed `SalesTable` using Polars.
//!
//! Every column is read as a string and typed here, so a single bad cell
//! fails the whole load instead of silently dropping rows.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::data::schema::CsvSchema;
use crate::data::table::{SalesRecord, SalesTable};

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("invalid schema mapping {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("missing {field} column (expected header {header:?})")]
    MissingColumn { field: &'static str, header: String },
    #[error("row {row}: missing {field} value")]
    MissingValue { row: usize, field: &'static str },
    #[error("row {row}: invalid {field} value {value:?}")]
    BadField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Loads sales CSVs according to a schema mapping. The load is atomic:
/// all rows parse or the whole file is rejected.
#[derive(Debug, Clone)]
pub struct DataLoader {
    schema: CsvSchema,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(CsvSchema::default())
    }
}

impl DataLoader {
    pub fn new(schema: CsvSchema) -> Self {
        Self { schema }
    }

    /// Load a sales CSV into a typed table.
    pub fn load(&self, path: &Path) -> Result<SalesTable, DataLoadError> {
        std::fs::metadata(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Schema length 0 reads every column as a string; typing happens below.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let table = self.extract_rows(&df)?;
        info!(rows = table.len(), path = %path.display(), "loaded sales table");
        Ok(table)
    }

    fn extract_rows(&self, df: &DataFrame) -> Result<SalesTable, DataLoadError> {
        // Header names are matched after trimming leading/trailing whitespace.
        let by_trimmed: HashMap<String, String> = df
            .get_column_names()
            .iter()
            .map(|name| (name.trim().to_string(), name.to_string()))
            .collect();
        let trimmed: Vec<String> = by_trimmed.keys().cloned().collect();

        let cols = self.schema.resolve(&trimmed)?;

        let dates = str_column(df, &by_trimmed[&cols.order_date])?;
        let countries = str_column(df, &by_trimmed[&cols.country])?;
        let coffee_types = str_column(df, &by_trimmed[&cols.coffee_type])?;
        let quantities = str_column(df, &by_trimmed[&cols.quantity])?;
        let unit_prices = str_column(df, &by_trimmed[&cols.unit_price])?;
        let profits = str_column(df, &by_trimmed[&cols.profit])?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let row = i + 1;

            let date_str = required(dates.get(i), row, "order date")?;
            let order_date = NaiveDate::parse_from_str(date_str, &self.schema.date_format)
                .map_err(|_| bad(row, "order date", date_str))?;

            let country = required(countries.get(i), row, "country")?.to_string();
            let coffee_type = required(coffee_types.get(i), row, "coffee type")?.to_string();

            let qty_str = required(quantities.get(i), row, "quantity")?;
            let quantity: u32 = qty_str.parse().map_err(|_| bad(row, "quantity", qty_str))?;

            let price_str = required(unit_prices.get(i), row, "unit price")?;
            let unit_price = parse_finite(price_str).ok_or_else(|| bad(row, "unit price", price_str))?;

            let profit_str = required(profits.get(i), row, "profit")?;
            let profit = parse_finite(profit_str).ok_or_else(|| bad(row, "profit", profit_str))?;

            records.push(SalesRecord::new(
                order_date,
                country,
                coffee_type,
                quantity,
                unit_price,
                profit,
            ));
        }

        Ok(SalesTable::new(records))
    }
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DataLoadError> {
    Ok(df.column(name)?.str()?)
}

/// Trimmed cell value, or a typed error for a null/blank cell.
fn required<'a>(
    value: Option<&'a str>,
    row: usize,
    field: &'static str,
) -> Result<&'a str, DataLoadError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DataLoadError::MissingValue { row, field }),
    }
}

fn bad(row: usize, field: &'static str, value: &str) -> DataLoadError {
    DataLoadError::BadField {
        row,
        field,
        value: value.to_string(),
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
