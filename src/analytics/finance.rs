//! Return on investment and plan fulfilment

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::percentage;
use crate::analytics::report::{fmt_amount, Report, Tabular};
use crate::groupby::{sum_of, total_of, GroupBy, Total};
use crate::ledger::{LedgerFilter, LedgerView, PlanRow};
use crate::temporal::YearMonth;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiRow {
    pub year: i32,
    pub profit: f64,
    pub supplier_cost: f64,
    /// Profit as a percentage of supplier cost; 0 when there was no cost
    pub roi: f64,
}

impl Tabular for RoiRow {
    fn headers() -> &'static [&'static str] {
        &["year", "profit", "supplier_cost", "roi"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            fmt_amount(self.profit),
            fmt_amount(self.supplier_cost),
            fmt_amount(self.roi),
        ]
    }
}

/// Yearly return on what was paid to suppliers
pub fn roi_by_year(view: &LedgerView<'_>) -> Report<RoiRow> {
    let rows = GroupBy::new(view, |r| Some(r.year))
        .aggregate(|rows| (sum_of(rows, |r| r.profit), total_of(rows, |r| r.supplier_price)))
        .into_iter()
        .map(|(year, (profit, supplier_cost))| RoiRow {
            year,
            profit,
            supplier_cost: supplier_cost.sum,
            roi: percentage(profit, supplier_cost),
        })
        .collect();

    Report::new(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPerformance {
    pub month: YearMonth,
    pub actual_gross: f64,
    pub actual_net: f64,
    pub gross_plan: f64,
    pub net_plan: f64,
    /// Actual gross sales as a percentage of the gross plan; 0 without a plan
    pub gross_performance: f64,
    /// Actual net sales as a percentage of the net plan; 0 without a plan
    pub net_performance: f64,
}

impl Tabular for PlanPerformance {
    fn headers() -> &'static [&'static str] {
        &[
            "month",
            "actual_gross",
            "actual_net",
            "gross_plan",
            "net_plan",
            "gross_performance",
            "net_performance",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.month.to_string(),
            fmt_amount(self.actual_gross),
            fmt_amount(self.actual_net),
            fmt_amount(self.gross_plan),
            fmt_amount(self.net_plan),
            fmt_amount(self.gross_performance),
            fmt_amount(self.net_performance),
        ]
    }
}

#[derive(Default)]
struct MonthTotals {
    actual_gross: f64,
    actual_net: f64,
    gross_plan: Total,
    net_plan: Total,
}

/// Monthly actual sales against the plan.
///
/// `view` should be the ledger narrowed by `filter`. The plan is narrowed by
/// the same filter's years and categories, so both sides cover the same
/// selection; a plan row without a category drops out once categories are
/// restricted. Countries and managers have no plan counterpart and leave the
/// plan untouched.
///
/// Months are matched as calendar periods. A month with sales but no plan, or
/// a plan but no sales, still appears, with the missing side at 0.
pub fn plan_vs_actual(
    view: &LedgerView<'_>,
    plan: &[PlanRow],
    filter: &LedgerFilter,
) -> Report<PlanPerformance> {
    let mut months: BTreeMap<YearMonth, MonthTotals> = BTreeMap::new();

    for (month, (gross, net)) in GroupBy::new(view, |r| Some(YearMonth::of(r.order_date)))
        .aggregate(|rows| (sum_of(rows, |r| r.gross_sales), sum_of(rows, |r| r.net_sales)))
    {
        let totals = months.entry(month).or_default();
        totals.actual_gross = gross;
        totals.actual_net = net;
    }

    let plan_rows = plan.iter().filter(|row| filter.matches_plan(row));
    for row in plan_rows {
        let totals = months.entry(YearMonth::of(row.date)).or_default();
        totals.gross_plan.add(row.gross_plan);
        totals.net_plan.add(row.net_plan);
    }

    let rows = months
        .into_iter()
        .map(|(month, t)| PlanPerformance {
            month,
            actual_gross: t.actual_gross,
            actual_net: t.actual_net,
            gross_plan: t.gross_plan.sum,
            net_plan: t.net_plan.sum,
            gross_performance: percentage(t.actual_gross, t.gross_plan),
            net_performance: percentage(t.actual_net, t.net_plan),
        })
        .collect();

    Report::new(rows)
}
