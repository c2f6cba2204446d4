use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ledger::join::LedgerRecord;
use crate::ledger::records::PlanRow;

/// Global filter over the ledger.
///
/// Each set restricts one dimension; an empty set places no restriction on
/// that dimension. A record whose attribute is unknown (`None`) never matches
/// a non-empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerFilter {
    pub years: BTreeSet<i32>,
    pub countries: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    /// Employee (manager) names
    pub employees: BTreeSet<String>,
}

impl LedgerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years<I: IntoIterator<Item = i32>>(mut self, years: I) -> Self {
        self.years.extend(years);
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn with_employees<I, S>(mut self, employees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.employees.extend(employees.into_iter().map(Into::into));
        self
    }

    /// True when no dimension is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.years.is_empty()
            && self.countries.is_empty()
            && self.categories.is_empty()
            && self.employees.is_empty()
    }

    pub fn matches(&self, record: &LedgerRecord) -> bool {
        (self.years.is_empty() || self.years.contains(&record.year))
            && allows(&self.countries, record.country.as_deref())
            && allows(&self.categories, record.category.as_deref())
            && allows(&self.employees, record.employee_name.as_deref())
    }

    /// Whether a plan row falls inside the selection. Only years and
    /// categories apply; the plan is not broken down by country or manager.
    pub fn matches_plan(&self, row: &PlanRow) -> bool {
        (self.years.is_empty() || self.years.contains(&row.year()))
            && allows(&self.categories, row.category.as_deref())
    }
}

fn allows(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    if set.is_empty() {
        return true;
    }
    value.is_some_and(|v| set.contains(v))
}

/// Row subset of the ledger. Views borrow the ledger's records and never
/// copy or modify them.
#[derive(Debug, Clone)]
pub struct LedgerView<'a> {
    rows: Vec<&'a LedgerRecord>,
}

impl<'a> LedgerView<'a> {
    pub fn new(rows: Vec<&'a LedgerRecord>) -> Self {
        LedgerView { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LedgerRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Narrow the view with an arbitrary predicate
    pub fn select<F>(&self, predicate: F) -> LedgerView<'a>
    where
        F: Fn(&LedgerRecord) -> bool,
    {
        LedgerView {
            rows: self.rows.iter().copied().filter(|r| predicate(*r)).collect(),
        }
    }

    /// Narrow the view with a global filter
    pub fn filter(&self, filter: &LedgerFilter) -> LedgerView<'a> {
        self.select(|r| filter.matches(r))
    }

    /// Product of the first row, the default subject of a product trend
    pub fn first_product(&self) -> Option<&'a str> {
        self.rows.first().copied().and_then(|r| r.product_name.as_deref())
    }
}
