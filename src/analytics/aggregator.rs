//! Aggregator Module
//! Derives the dashboard views from a filtered sales table: scalar KPIs,
//! sales grouped by coffee type, and the monthly sales trend.
//!
//! All derivations are total functions: an empty table yields zero KPIs and
//! empty series, never an error.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use crate::data::SalesTable;

/// The three scalar KPIs shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    pub items_sold: u64,
}

/// Summed sales for one coffee type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeTypeSales {
    pub coffee_type: String,
    pub total_sales: f64,
}

/// Summed sales for one calendar month, labeled by month end.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySales {
    pub month_end: NaiveDate,
    pub total_sales: f64,
}

/// Everything the presenter needs for one render, derived from one
/// filtered table and discarded on the next filter change.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub kpis: KpiSummary,
    pub by_coffee_type: Vec<CoffeeTypeSales>,
    pub monthly_trend: Vec<MonthlySales>,
}

impl DashboardData {
    /// Compute all three derivations. They are independent, so they run
    /// on the rayon pool.
    pub fn compute(table: &SalesTable) -> Self {
        let (kpis, (by_coffee_type, monthly_trend)) = rayon::join(
            || Aggregator::kpis(table),
            || {
                rayon::join(
                    || Aggregator::sales_by_coffee_type(table),
                    || Aggregator::monthly_trend(table),
                )
            },
        );

        Self {
            kpis,
            by_coffee_type,
            monthly_trend,
        }
    }
}

/// Pure aggregations over a sales table.
pub struct Aggregator;

impl Aggregator {
    /// Sum sales, profit, and quantity. Sums over an empty table are zero.
    pub fn kpis(table: &SalesTable) -> KpiSummary {
        let mut kpis = KpiSummary::default();
        for r in table.iter() {
            kpis.total_sales += r.total_sales;
            kpis.total_profit += r.profit;
            kpis.items_sold += u64::from(r.quantity);
        }
        kpis
    }

    /// Total sales per coffee type, ascending by total. Groups with equal
    /// totals keep the order of their first appearance in the input.
    pub fn sales_by_coffee_type(table: &SalesTable) -> Vec<CoffeeTypeSales> {
        let mut first_seen: Vec<String> = Vec::new();
        let mut totals: HashMap<String, f64> = HashMap::new();

        for r in table.iter() {
            if !totals.contains_key(&r.coffee_type) {
                first_seen.push(r.coffee_type.clone());
            }
            *totals.entry(r.coffee_type.clone()).or_insert(0.0) += r.total_sales;
        }

        let mut out: Vec<CoffeeTypeSales> = first_seen
            .into_iter()
            .map(|coffee_type| {
                let total_sales = totals[&coffee_type];
                CoffeeTypeSales {
                    coffee_type,
                    total_sales,
                }
            })
            .collect();

        // Stable sort keeps the first-appearance tie-break.
        out.sort_by(|a, b| {
            a.total_sales
                .partial_cmp(&b.total_sales)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    /// Total sales per calendar month, chronologically ascending. Months
    /// with no rows do not appear - there is no zero-filling.
    pub fn monthly_trend(table: &SalesTable) -> Vec<MonthlySales> {
        let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for r in table.iter() {
            let key = (r.order_date.year(), r.order_date.month());
            *buckets.entry(key).or_insert(0.0) += r.total_sales;
        }

        buckets
            .into_iter()
            .map(|((year, month), total_sales)| MonthlySales {
                month_end: month_end(year, month),
                total_sales,
            })
            .collect()
    }
}

/// Last day of the given month.
fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .expect("month taken from a valid date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FilterCriteria, SalesRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_table() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord::new(date(2024, 1, 5), "US", "Espresso", 2, 3.0, 1.0),
            SalesRecord::new(date(2024, 1, 20), "US", "Latte", 1, 4.0, 1.5),
            SalesRecord::new(date(2024, 2, 2), "FR", "Espresso", 3, 3.0, 2.0),
        ])
    }

    #[test]
    fn kpis_over_empty_table_are_zero() {
        let kpis = Aggregator::kpis(&SalesTable::default());
        assert_eq!(kpis, KpiSummary::default());
    }

    #[test]
    fn empty_table_yields_empty_series() {
        let table = SalesTable::default();
        assert!(Aggregator::sales_by_coffee_type(&table).is_empty());
        assert!(Aggregator::monthly_trend(&table).is_empty());
    }

    #[test]
    fn group_totals_partition_the_kpi_total() {
        let table = sample_table();
        let kpis = Aggregator::kpis(&table);

        let by_type: f64 = Aggregator::sales_by_coffee_type(&table)
            .iter()
            .map(|g| g.total_sales)
            .sum();
        assert_eq!(by_type, kpis.total_sales);

        let by_month: f64 = Aggregator::monthly_trend(&table)
            .iter()
            .map(|m| m.total_sales)
            .sum();
        assert_eq!(by_month, kpis.total_sales);
    }

    #[test]
    fn coffee_type_sales_sorted_ascending() {
        let groups = Aggregator::sales_by_coffee_type(&sample_table());
        for pair in groups.windows(2) {
            assert!(pair[0].total_sales <= pair[1].total_sales);
        }
    }

    #[test]
    fn equal_totals_keep_first_appearance_order() {
        let table = SalesTable::new(vec![
            SalesRecord::new(date(2024, 1, 5), "US", "Mocha", 1, 5.0, 1.0),
            SalesRecord::new(date(2024, 1, 6), "US", "Espresso", 1, 5.0, 1.0),
            SalesRecord::new(date(2024, 1, 7), "US", "Latte", 1, 5.0, 1.0),
        ]);
        let groups = Aggregator::sales_by_coffee_type(&table);
        let names: Vec<&str> = groups.iter().map(|g| g.coffee_type.as_str()).collect();
        assert_eq!(names, vec!["Mocha", "Espresso", "Latte"]);
    }

    #[test]
    fn monthly_trend_is_chronological_without_duplicates() {
        let table = SalesTable::new(vec![
            SalesRecord::new(date(2024, 3, 2), "US", "Espresso", 1, 3.0, 1.0),
            SalesRecord::new(date(2024, 1, 5), "US", "Espresso", 1, 3.0, 1.0),
            SalesRecord::new(date(2024, 1, 28), "US", "Latte", 1, 4.0, 1.0),
            SalesRecord::new(date(2023, 12, 31), "US", "Latte", 1, 4.0, 1.0),
        ]);
        let trend = Aggregator::monthly_trend(&table);
        let months: Vec<NaiveDate> = trend.iter().map(|m| m.month_end).collect();
        assert_eq!(
            months,
            vec![date(2023, 12, 31), date(2024, 1, 31), date(2024, 3, 31)]
        );
        // February has no rows and no bucket.
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[1].total_sales, 7.0);
    }

    #[test]
    fn month_end_handles_december_and_leap_february() {
        assert_eq!(month_end(2024, 12), date(2024, 12, 31));
        assert_eq!(month_end(2024, 2), date(2024, 2, 29));
        assert_eq!(month_end(2023, 2), date(2023, 2, 28));
        assert_eq!(month_end(2024, 4), date(2024, 4, 30));
    }

    #[test]
    fn end_to_end_filtered_dashboard() {
        let table = sample_table();
        let criteria = FilterCriteria {
            countries: ["US".to_string()].into(),
            coffee_types: ["Espresso".to_string(), "Latte".to_string()].into(),
        };
        let data = DashboardData::compute(&table.filter(&criteria));

        assert_eq!(data.kpis.total_sales, 10.0);
        assert_eq!(data.kpis.total_profit, 2.5);
        assert_eq!(data.kpis.items_sold, 3);

        let by_type: Vec<(&str, f64)> = data
            .by_coffee_type
            .iter()
            .map(|g| (g.coffee_type.as_str(), g.total_sales))
            .collect();
        assert_eq!(by_type, vec![("Latte", 4.0), ("Espresso", 6.0)]);

        assert_eq!(
            data.monthly_trend,
            vec![MonthlySales {
                month_end: date(2024, 1, 31),
                total_sales: 10.0
            }]
        );
    }
}
