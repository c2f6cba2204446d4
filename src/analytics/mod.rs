//! Query library
//!
//! Eleven pure aggregation queries over a [`LedgerView`](crate::ledger::LedgerView),
//! plus the dashboard's headline metrics and filter choices. A query never
//! fails on a missing match; it returns an empty [`Report`].
//!
//! Groupings follow one null policy: a row whose grouping attribute is unknown
//! (customer country, product, category, manager) is left out of the grouping.
//! Ratios go through [`safe_ratio`], which yields 0 for a zero denominator.

pub mod customers;
pub mod finance;
pub mod managers;
pub mod products;
pub mod report;
pub mod seasonality;
pub mod summary;

use crate::groupby::Total;

pub use self::customers::{
    country_ranking, pareto_analysis, top_customers, CountryRow, CustomerProfit, ParetoRow,
};
pub use self::finance::{plan_vs_actual, roi_by_year, PlanPerformance, RoiRow};
pub use self::managers::{
    manager_discounts, manager_sales, products_by_manager, ManagerDiscount, ManagerProduct,
    ManagerSales,
};
pub use self::products::{product_trend, top_products, ProductRanking, ProductTrendPoint};
pub use self::report::{Report, Tabular};
pub use self::seasonality::{productive_weekdays, WeekdaySales};
pub use self::summary::{filter_options, key_metrics, FilterOptions, KeyMetrics};

/// Row limit of the top customer and top product rankings
pub const DEFAULT_TOP_N: usize = 10;

/// `numerator / denominator`, or 0 when the denominator is zero.
///
/// A plain `f64` denominator is zero only when it is exactly 0. A [`Total`]
/// is also zero when its terms cancel to a rounding remainder.
pub fn safe_ratio<D: Into<Total>>(numerator: f64, denominator: D) -> f64 {
    let denominator = denominator.into();
    if denominator.is_zero() {
        return 0.0;
    }
    numerator / denominator.sum
}

/// `numerator / denominator` as a percentage, or 0 when the denominator is zero
pub fn percentage<D: Into<Total>>(numerator: f64, denominator: D) -> f64 {
    safe_ratio(numerator, denominator) * 100.0
}

/// Stable descending sort by a metric; rows with equal metrics keep their order
pub(crate) fn sort_desc_by<R, F>(rows: &mut [R], metric: F)
where
    F: Fn(&R) -> f64,
{
    rows.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
}
