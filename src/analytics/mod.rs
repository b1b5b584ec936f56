//! Analytics module - KPI and chart-series derivations

mod aggregator;

pub use aggregator::{Aggregator, CoffeeTypeSales, DashboardData, KpiSummary, MonthlySales};
