//! Filter Module
//! Restricts a sales table to an allow-set of countries and coffee types.

use std::collections::HashSet;

use crate::data::table::SalesTable;

/// Allow-sets for the two filterable dimensions. Membership is exact,
/// case-sensitive equality against the (trimmed) column values. An empty
/// set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub countries: HashSet<String>,
    pub coffee_types: HashSet<String>,
}

impl FilterCriteria {
    /// Criteria selecting every value present in the table - the UI default.
    pub fn all_of(table: &SalesTable) -> Self {
        Self {
            countries: table.distinct_countries().into_iter().collect(),
            coffee_types: table.distinct_coffee_types().into_iter().collect(),
        }
    }
}

impl SalesTable {
    /// New table holding the rows whose country AND coffee type are both
    /// allowed, in their original order. The empty result is valid.
    pub fn filter(&self, criteria: &FilterCriteria) -> SalesTable {
        SalesTable::new(
            self.iter()
                .filter(|r| {
                    criteria.countries.contains(&r.country)
                        && criteria.coffee_types.contains(&r.coffee_type)
                })
                .cloned()
                .collect(),
        )
    }
}
