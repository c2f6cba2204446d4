//! Sales manager queries

use serde::Serialize;

use crate::analytics::report::{fmt_amount, Report, Tabular};
use crate::analytics::{safe_ratio, sort_desc_by};
use crate::groupby::{mean_of, sum_of, total_of, FloatKey, GroupBy};
use crate::ledger::LedgerView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSales {
    pub employee: String,
    pub net_sales: f64,
}

impl Tabular for ManagerSales {
    fn headers() -> &'static [&'static str] {
        &["employee", "net_sales"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.employee.clone(), fmt_amount(self.net_sales)]
    }
}

/// Managers ranked by net sales
pub fn manager_sales(view: &LedgerView<'_>) -> Report<ManagerSales> {
    let mut rows: Vec<ManagerSales> = GroupBy::new(view, |r| r.employee_name.clone())
        .sum(|r| r.net_sales)
        .into_iter()
        .map(|(employee, net_sales)| ManagerSales {
            employee,
            net_sales,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.net_sales);

    Report::new(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerDiscount {
    pub employee: String,
    pub net_sales: f64,
    /// Mean discount over the manager's transactions
    pub discount: f64,
    pub quantity: f64,
    pub profit: f64,
    /// Net sales per unit sold; 0 when nothing was sold
    pub sales_per_unit: f64,
}

impl Tabular for ManagerDiscount {
    fn headers() -> &'static [&'static str] {
        &[
            "employee",
            "net_sales",
            "discount",
            "quantity",
            "profit",
            "sales_per_unit",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee.clone(),
            fmt_amount(self.net_sales),
            format!("{:.4}", self.discount),
            self.quantity.to_string(),
            fmt_amount(self.profit),
            fmt_amount(self.sales_per_unit),
        ]
    }
}

/// Discount behaviour against sales volume, per manager, in manager name order
pub fn manager_discounts(view: &LedgerView<'_>) -> Report<ManagerDiscount> {
    let rows = GroupBy::new(view, |r| r.employee_name.clone())
        .aggregate(|rows| {
            let net_sales = sum_of(rows, |r| r.net_sales);
            let quantity = total_of(rows, |r| r.quantity);
            (
                net_sales,
                mean_of(rows, |r| r.discount),
                quantity.sum,
                sum_of(rows, |r| r.profit),
                safe_ratio(net_sales, quantity),
            )
        })
        .into_iter()
        .map(
            |(employee, (net_sales, discount, quantity, profit, sales_per_unit))| ManagerDiscount {
                employee,
                net_sales,
                discount,
                quantity,
                profit,
                sales_per_unit,
            },
        )
        .collect();

    Report::new(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerProduct {
    pub product: String,
    pub unit_price: Option<f64>,
    pub discount: f64,
    pub quantity: f64,
    pub net_sales: f64,
    pub profit: f64,
}

impl Tabular for ManagerProduct {
    fn headers() -> &'static [&'static str] {
        &[
            "product",
            "unit_price",
            "discount",
            "quantity",
            "net_sales",
            "profit",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product.clone(),
            self.unit_price.map(fmt_amount).unwrap_or_default(),
            format!("{:.4}", self.discount),
            self.quantity.to_string(),
            fmt_amount(self.net_sales),
            fmt_amount(self.profit),
        ]
    }
}

/// Product mix sold by one manager, one row per (product, unit price).
///
/// A sale without a unit price groups under an empty price; a sale of an
/// unknown product is left out.
pub fn products_by_manager(view: &LedgerView<'_>, employee: &str) -> Report<ManagerProduct> {
    let matching = view.select(|r| r.employee_name.as_deref() == Some(employee));
    log::debug!(
        "products_by_manager: {} rows for '{}'",
        matching.len(),
        employee
    );
    if matching.is_empty() {
        return Report::empty();
    }

    let rows = GroupBy::new(&matching, |r| {
        r.product_name
            .clone()
            .map(|product| (product, r.unit_price.map(FloatKey)))
    })
    .aggregate(|rows| {
        (
            mean_of(rows, |r| r.discount),
            sum_of(rows, |r| r.quantity),
            sum_of(rows, |r| r.net_sales),
            sum_of(rows, |r| r.profit),
        )
    })
    .into_iter()
    .map(
        |((product, unit_price), (discount, quantity, net_sales, profit))| ManagerProduct {
            product,
            unit_price: unit_price.map(|p| p.0),
            discount,
            quantity,
            net_sales,
            profit,
        },
    )
    .collect();

    Report::new(rows)
}
