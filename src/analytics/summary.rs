//! Headline metrics and the choices offered by the global filter

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::analytics::report::{fmt_amount, Tabular};
use crate::ledger::LedgerView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_profit: f64,
    pub total_net_sales: f64,
    pub unique_customers: usize,
    pub transactions: usize,
}

impl Tabular for KeyMetrics {
    fn headers() -> &'static [&'static str] {
        &[
            "total_profit",
            "total_net_sales",
            "unique_customers",
            "transactions",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            fmt_amount(self.total_profit),
            fmt_amount(self.total_net_sales),
            self.unique_customers.to_string(),
            self.transactions.to_string(),
        ]
    }
}

pub fn key_metrics(view: &LedgerView<'_>) -> KeyMetrics {
    KeyMetrics {
        total_profit: view.iter().map(|r| r.profit).sum(),
        total_net_sales: view.iter().map(|r| r.net_sales).sum(),
        unique_customers: view
            .iter()
            .map(|r| r.customer.as_str())
            .collect::<HashSet<_>>()
            .len(),
        transactions: view.len(),
    }
}

/// Distinct values of each filterable dimension, sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub countries: Vec<String>,
    pub categories: Vec<String>,
    pub employees: Vec<String>,
}

pub fn filter_options(view: &LedgerView<'_>) -> FilterOptions {
    let mut years = BTreeSet::new();
    let mut countries = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut employees = BTreeSet::new();

    for record in view.iter() {
        years.insert(record.year);
        if let Some(country) = &record.country {
            countries.insert(country.clone());
        }
        if let Some(category) = &record.category {
            categories.insert(category.clone());
        }
        if let Some(employee) = &record.employee_name {
            employees.insert(employee.clone());
        }
    }

    FilterOptions {
        years: years.into_iter().collect(),
        countries: countries.into_iter().collect(),
        categories: categories.into_iter().collect(),
        employees: employees.into_iter().collect(),
    }
}
