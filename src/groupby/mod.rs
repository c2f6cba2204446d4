use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use crate::ledger::{LedgerRecord, LedgerView};

/// Ledger rows grouped by a key, with groups kept in ascending key order.
///
/// Rows for which the key function returns `None` belong to no group; this is
/// how unmatched dimension attributes drop out of a grouping.
#[derive(Debug)]
pub struct GroupBy<'a, K>
where
    K: Ord + Clone,
{
    /// Grouped rows
    groups: BTreeMap<K, Vec<&'a LedgerRecord>>,

    /// Rows that had no key
    dropped: usize,
}

impl<'a, K> GroupBy<'a, K>
where
    K: Ord + Clone,
{
    /// Create a new grouping of the view's rows
    pub fn new<F>(view: &LedgerView<'a>, key: F) -> Self
    where
        F: Fn(&LedgerRecord) -> Option<K>,
    {
        let mut groups: BTreeMap<K, Vec<&'a LedgerRecord>> = BTreeMap::new();
        let mut dropped = 0;
        for record in view.iter() {
            match key(record) {
                Some(k) => groups.entry(k).or_default().push(record),
                None => dropped += 1,
            }
        }

        GroupBy { groups, dropped }
    }

    /// Get the number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of rows left out because their key was missing
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Return the size of each group
    pub fn size(&self) -> Vec<(K, usize)> {
        self.groups
            .iter()
            .map(|(k, rows)| (k.clone(), rows.len()))
            .collect()
    }

    /// Calculate the sum of a value for each group
    pub fn sum<F>(&self, value: F) -> Vec<(K, f64)>
    where
        F: Fn(&LedgerRecord) -> f64,
    {
        self.aggregate(|rows| sum_of(rows, &value))
    }

    /// Calculate the mean of a value for each group
    pub fn mean<F>(&self, value: F) -> Vec<(K, f64)>
    where
        F: Fn(&LedgerRecord) -> f64,
    {
        self.aggregate(|rows| mean_of(rows, &value))
    }

    /// Count distinct values for each group
    pub fn nunique<V, F>(&self, value: F) -> Vec<(K, usize)>
    where
        V: Eq + Hash,
        F: Fn(&LedgerRecord) -> V,
    {
        self.aggregate(|rows| rows.iter().map(|r| value(*r)).collect::<HashSet<V>>().len())
    }

    /// Apply an arbitrary aggregation to each group's rows
    pub fn aggregate<T, F>(&self, f: F) -> Vec<(K, T)>
    where
        F: Fn(&[&'a LedgerRecord]) -> T,
    {
        self.groups
            .iter()
            .map(|(k, rows)| (k.clone(), f(rows.as_slice())))
            .collect()
    }
}

/// Float usable as (part of) a grouping key, ordered by `f64::total_cmp`
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A sum kept together with the magnitude of its terms.
///
/// Terms of opposite sign can cancel to a rounding remainder such as `5.5e-17`
/// instead of an exact 0. [`Total::is_zero`] treats a sum that small relative
/// to its terms as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Total {
    pub sum: f64,
    /// Sum of the absolute values of the terms
    pub magnitude: f64,
    pub terms: usize,
}

impl Total {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.magnitude += value.abs();
        self.terms += 1;
    }

    /// True when the sum is zero up to the rounding error its terms allow,
    /// or is not a finite number
    pub fn is_zero(&self) -> bool {
        if !self.sum.is_finite() {
            return true;
        }
        let tolerance = f64::EPSILON * self.magnitude * self.terms.max(1) as f64;
        self.sum.abs() <= tolerance
    }
}

impl From<f64> for Total {
    /// A single term; zero only when the value is exactly 0
    fn from(value: f64) -> Self {
        let mut total = Total::default();
        total.add(value);
        total
    }
}

impl FromIterator<f64> for Total {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut total = Total::default();
        for value in iter {
            total.add(value);
        }
        total
    }
}

/// Sum of a value over rows
pub fn sum_of<F>(rows: &[&LedgerRecord], value: F) -> f64
where
    F: Fn(&LedgerRecord) -> f64,
{
    rows.iter().map(|r| value(*r)).sum()
}

/// [`Total`] of a value over rows
pub fn total_of<F>(rows: &[&LedgerRecord], value: F) -> Total
where
    F: Fn(&LedgerRecord) -> f64,
{
    rows.iter().map(|r| value(*r)).collect()
}

/// Mean of a value over rows; 0 for no rows
pub fn mean_of<F>(rows: &[&LedgerRecord], value: F) -> f64
where
    F: Fn(&LedgerRecord) -> f64,
{
    if rows.is_empty() {
        return 0.0;
    }
    sum_of(rows, value) / rows.len() as f64
}
