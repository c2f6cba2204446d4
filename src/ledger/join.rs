use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::ledger::records::{CalendarDay, FactRecord, Partner, Product, Staff};

/// What to do when a dimension table repeats a join key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeyPolicy {
    /// Fail the load
    #[default]
    Error,
    /// Keep the first row with the key and ignore the rest
    First,
}

impl std::str::FromStr for DuplicateKeyPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(DuplicateKeyPolicy::Error),
            "first" => Ok(DuplicateKeyPolicy::First),
            other => Err(Error::ConfigurationError(format!(
                "Unknown duplicate key policy '{}' (expected 'error' or 'first')",
                other
            ))),
        }
    }
}

/// One row of the unified ledger: a fact with its dimension attributes.
///
/// Attributes that come from a dimension table are `None` when the fact's key
/// has no match there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    pub order_date: NaiveDate,
    pub customer: String,
    pub product_id: String,
    pub employee_id: String,
    pub quantity: f64,
    pub gross_sales: f64,
    pub net_sales: f64,
    pub supplier_price: f64,
    pub discount: f64,
    pub unit_price: Option<f64>,

    pub year: i32,
    pub month: u32,
    pub day_of_week: Weekday,
    pub profit: f64,

    pub country: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub employee_name: Option<String>,
    pub calendar_day: Option<u32>,
    pub month_cal: Option<u32>,
    pub year_cal: Option<i32>,
}

impl LedgerRecord {
    /// Ledger row for a fact with no dimension matched yet
    pub fn from_fact(fact: &FactRecord) -> Self {
        LedgerRecord {
            order_date: fact.order_date,
            customer: fact.customer.clone(),
            product_id: fact.product_id.clone(),
            employee_id: fact.employee_id.clone(),
            quantity: fact.quantity,
            gross_sales: fact.gross_sales,
            net_sales: fact.net_sales,
            supplier_price: fact.supplier_price,
            discount: fact.discount,
            unit_price: fact.unit_price,
            year: fact.year(),
            month: fact.month(),
            day_of_week: fact.day_of_week(),
            profit: fact.profit(),
            country: None,
            product_name: None,
            category: None,
            employee_name: None,
            calendar_day: None,
            month_cal: None,
            year_cal: None,
        }
    }
}

/// Facts that found no partner in each dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub facts: usize,
    pub unmatched_partners: usize,
    pub unmatched_products: usize,
    pub unmatched_staff: usize,
    pub unmatched_calendar: usize,
}

/// Index a dimension table by its join key
fn index_by<'a, K, V, F>(
    table: &str,
    rows: &'a [V],
    key: F,
    policy: DuplicateKeyPolicy,
) -> Result<HashMap<K, &'a V>>
where
    K: Eq + Hash + Display,
    F: Fn(&V) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        let k = key(row);
        if index.contains_key(&k) {
            match policy {
                DuplicateKeyPolicy::Error => {
                    return Err(Error::DuplicateJoinKey {
                        table: table.to_string(),
                        key: k.to_string(),
                    })
                }
                DuplicateKeyPolicy::First => {
                    log::warn!("{}: duplicate key '{}' ignored", table, k);
                    continue;
                }
            }
        }
        index.insert(k, row);
    }
    Ok(index)
}

/// Left-join the facts with every dimension table.
///
/// Join order is partner (customer name), product (product id), staff
/// (employee id) and calendar (order date). The result has exactly one row per
/// fact, in fact order.
pub fn left_join_all(
    facts: &[FactRecord],
    partners: &[Partner],
    products: &[Product],
    staff: &[Staff],
    calendar: &[CalendarDay],
    policy: DuplicateKeyPolicy,
) -> Result<(Vec<LedgerRecord>, JoinStats)> {
    let partner_index = index_by("partner", partners, |p| p.name.clone(), policy)?;
    let product_index = index_by("product", products, |p| p.product_id.clone(), policy)?;
    let staff_index = index_by("staff", staff, |s| s.employee_id.clone(), policy)?;
    let calendar_index = index_by("calendar", calendar, |c| c.date, policy)?;

    let mut stats = JoinStats {
        facts: facts.len(),
        ..JoinStats::default()
    };

    let records = facts
        .iter()
        .map(|fact| {
            let mut record = LedgerRecord::from_fact(fact);

            match partner_index.get(&fact.customer) {
                Some(partner) => record.country = Some(partner.country.clone()),
                None => stats.unmatched_partners += 1,
            }

            match product_index.get(&fact.product_id) {
                Some(product) => {
                    record.product_name = Some(product.name.clone());
                    record.category = Some(product.category.clone());
                }
                None => stats.unmatched_products += 1,
            }

            match staff_index.get(&fact.employee_id) {
                Some(employee) => record.employee_name = Some(employee.name.clone()),
                None => stats.unmatched_staff += 1,
            }

            match calendar_index.get(&fact.order_date) {
                Some(day) => {
                    record.calendar_day = Some(day.day);
                    record.month_cal = Some(day.month);
                    record.year_cal = Some(day.year);
                }
                None => stats.unmatched_calendar += 1,
            }

            record
        })
        .collect();

    Ok((records, stats))
}
