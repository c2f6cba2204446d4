//! Product queries

use serde::Serialize;

use crate::analytics::report::{fmt_amount, Report, Tabular};
use crate::analytics::sort_desc_by;
use crate::groupby::{sum_of, GroupBy};
use crate::ledger::LedgerView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRanking {
    pub product: String,
    pub quantity: f64,
    pub profit: f64,
}

impl Tabular for ProductRanking {
    fn headers() -> &'static [&'static str] {
        &["product", "quantity", "profit"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product.clone(),
            self.quantity.to_string(),
            fmt_amount(self.profit),
        ]
    }
}

/// Most profitable products of a category
pub fn top_products(view: &LedgerView<'_>, category: &str, top_n: usize) -> Report<ProductRanking> {
    let matching = view.select(|r| r.category.as_deref() == Some(category));
    if matching.is_empty() {
        return Report::empty();
    }

    let mut rows: Vec<ProductRanking> = GroupBy::new(&matching, |r| r.product_name.clone())
        .aggregate(|rows| (sum_of(rows, |r| r.quantity), sum_of(rows, |r| r.profit)))
        .into_iter()
        .map(|(product, (quantity, profit))| ProductRanking {
            product,
            quantity,
            profit,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.profit);
    rows.truncate(top_n);

    Report::new(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTrendPoint {
    pub year: i32,
    pub profit: f64,
    pub quantity: f64,
    pub net_sales: f64,
}

impl Tabular for ProductTrendPoint {
    fn headers() -> &'static [&'static str] {
        &["year", "profit", "quantity", "net_sales"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            fmt_amount(self.profit),
            self.quantity.to_string(),
            fmt_amount(self.net_sales),
        ]
    }
}

/// Yearly profit, quantity and net sales of one product, oldest year first
pub fn product_trend(view: &LedgerView<'_>, product: &str) -> Report<ProductTrendPoint> {
    let matching = view.select(|r| r.product_name.as_deref() == Some(product));
    log::debug!("product_trend: {} rows for '{}'", matching.len(), product);

    let rows = GroupBy::new(&matching, |r| Some(r.year))
        .aggregate(|rows| {
            (
                sum_of(rows, |r| r.profit),
                sum_of(rows, |r| r.quantity),
                sum_of(rows, |r| r.net_sales),
            )
        })
        .into_iter()
        .map(|(year, (profit, quantity, net_sales))| ProductTrendPoint {
            year,
            profit,
            quantity,
            net_sales,
        })
        .collect();

    Report::new(rows)
}
