//! Sales Table Module
//! Typed in-memory representation of the loaded CSV.

use chrono::NaiveDate;

/// One row of the sales file. String fields are stored trimmed;
/// `total_sales` is computed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub country: String,
    pub coffee_type: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub profit: f64,
    pub total_sales: f64,
}

impl SalesRecord {
    pub fn new(
        order_date: NaiveDate,
        country: impl Into<String>,
        coffee_type: impl Into<String>,
        quantity: u32,
        unit_price: f64,
        profit: f64,
    ) -> Self {
        Self {
            order_date,
            country: country.into(),
            coffee_type: coffee_type.into(),
            quantity,
            unit_price,
            profit,
            total_sales: f64::from(quantity) * unit_price,
        }
    }
}

/// Ordered sequence of sales records, in file order.
/// Immutable once loaded; shared across the app as `Arc<SalesTable>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country values in first-appearance order.
    pub fn distinct_countries(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Distinct coffee-type values in first-appearance order.
    pub fn distinct_coffee_types(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.coffee_type.as_str()))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for v in values {
            if seen.insert(v) {
                out.push(v.to_string());
            }
        }
        out
    }
}
