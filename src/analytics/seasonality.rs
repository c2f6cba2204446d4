use serde::Serialize;

use crate::analytics::report::{fmt_amount, Report, Tabular};
use crate::groupby::GroupBy;
use crate::ledger::LedgerView;
use crate::temporal::{weekday_name, WEEK};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySales {
    pub day_of_week: String,
    pub net_sales: f64,
}

impl Tabular for WeekdaySales {
    fn headers() -> &'static [&'static str] {
        &["day_of_week", "net_sales"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.day_of_week.clone(), fmt_amount(self.net_sales)]
    }
}

/// Net sales of a category per day of the week, Monday first.
///
/// Days on which the category sold nothing do not appear.
pub fn productive_weekdays(view: &LedgerView<'_>, category: &str) -> Report<WeekdaySales> {
    let matching = view.select(|r| r.category.as_deref() == Some(category));

    let rows = GroupBy::new(&matching, |r| Some(r.day_of_week.num_days_from_monday()))
        .sum(|r| r.net_sales)
        .into_iter()
        .map(|(day, net_sales)| WeekdaySales {
            day_of_week: weekday_name(WEEK[day as usize]).to_string(),
            net_sales,
        })
        .collect();

    Report::new(rows)
}
