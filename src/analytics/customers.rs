//! Customer and country queries

use serde::Serialize;

use crate::analytics::report::{fmt_amount, Report, Tabular};
use crate::analytics::{percentage, sort_desc_by};
use crate::groupby::{sum_of, total_of, GroupBy};
use crate::ledger::LedgerView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProfit {
    pub customer: String,
    pub profit: f64,
}

impl Tabular for CustomerProfit {
    fn headers() -> &'static [&'static str] {
        &["customer", "profit"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.customer.clone(), fmt_amount(self.profit)]
    }
}

/// Most profitable customers of one category in one country
pub fn top_customers(
    view: &LedgerView<'_>,
    category: &str,
    country: &str,
    top_n: usize,
) -> Report<CustomerProfit> {
    let matching = view.select(|r| {
        r.category.as_deref() == Some(category) && r.country.as_deref() == Some(country)
    });
    log::debug!(
        "top_customers: {} rows for category '{}' in '{}'",
        matching.len(),
        category,
        country
    );
    if matching.is_empty() {
        return Report::empty();
    }

    let mut rows: Vec<CustomerProfit> = GroupBy::new(&matching, |r| Some(r.customer.clone()))
        .sum(|r| r.profit)
        .into_iter()
        .map(|(customer, profit)| CustomerProfit { customer, profit })
        .collect();
    sort_desc_by(&mut rows, |r| r.profit);
    rows.truncate(top_n);

    Report::new(rows)
}

/// One customer's position in the Pareto curve of a country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRow {
    pub customer: String,
    pub profit: f64,
    pub cumulative_profit: f64,
    /// Share of the country's total profit earned by this customer and all above it
    pub cumulative_percentage: f64,
    /// Share of the country's customers ranked at or above this one
    pub customer_percentage: f64,
}

impl Tabular for ParetoRow {
    fn headers() -> &'static [&'static str] {
        &[
            "customer",
            "profit",
            "cumulative_profit",
            "cumulative_percentage",
            "customer_percentage",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer.clone(),
            fmt_amount(self.profit),
            fmt_amount(self.cumulative_profit),
            fmt_amount(self.cumulative_percentage),
            fmt_amount(self.customer_percentage),
        ]
    }
}

/// Profit concentration across the customers of a country.
///
/// Customers are ranked by profit, highest first; the cumulative columns run
/// down that ranking. Empty when the country has no rows or its profits cancel out to 0.
pub fn pareto_analysis(view: &LedgerView<'_>, country: &str) -> Report<ParetoRow> {
    let matching = view.select(|r| r.country.as_deref() == Some(country));
    let rows: Vec<_> = matching.iter().collect();
    let total_profit = total_of(&rows, |r| r.profit);
    log::debug!(
        "pareto_analysis: {} rows in '{}', total profit {}",
        rows.len(),
        country,
        total_profit.sum
    );
    if rows.is_empty() || total_profit.is_zero() {
        return Report::empty();
    }

    let mut by_customer = GroupBy::new(&matching, |r| Some(r.customer.clone())).sum(|r| r.profit);
    sort_desc_by(&mut by_customer, |(_, profit)| *profit);

    let customers = by_customer.len() as f64;
    let mut cumulative_profit = 0.0;
    let rows = by_customer
        .into_iter()
        .enumerate()
        .map(|(rank, (customer, profit))| {
            cumulative_profit += profit;
            ParetoRow {
                customer,
                profit,
                cumulative_profit,
                cumulative_percentage: percentage(cumulative_profit, total_profit),
                customer_percentage: percentage((rank + 1) as f64, customers),
            }
        })
        .collect();

    Report::new(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRow {
    pub country: String,
    pub total_profit: f64,
    pub total_sales: f64,
    pub unique_customers: usize,
}

impl Tabular for CountryRow {
    fn headers() -> &'static [&'static str] {
        &["country", "total_profit", "total_sales", "unique_customers"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.country.clone(),
            fmt_amount(self.total_profit),
            fmt_amount(self.total_sales),
            self.unique_customers.to_string(),
        ]
    }
}

/// Countries ranked by total profit
pub fn country_ranking(view: &LedgerView<'_>) -> Report<CountryRow> {
    let grouped = GroupBy::new(view, |r| r.country.clone());
    let mut rows: Vec<CountryRow> = grouped
        .aggregate(|rows| {
            (
                sum_of(rows, |r| r.profit),
                sum_of(rows, |r| r.net_sales),
            )
        })
        .into_iter()
        .zip(grouped.nunique(|r| r.customer.clone()))
        .map(|((country, (total_profit, total_sales)), (_, unique_customers))| CountryRow {
            country,
            total_profit,
            total_sales,
            unique_customers,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.total_profit);

    Report::new(rows)
}
