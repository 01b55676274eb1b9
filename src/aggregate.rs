//! Aggregations used by the figure builders.
//!
//! Everything here is a pure function over borrowed records. Row order is
//! always preserved unless a function documents that it sorts.

use crate::dataset::{EnergyRecord, Metric};
use crate::error::Error;

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Rows in the dataset that aggregate several countries and must not show up
/// in per-country rankings.
pub const EXCLUDED_REGIONS: [&str; 11] = [
    "World",
    "Asia",
    "High-income countries",
    "Upper-middle-income countries",
    "Lower-middle-income countries",
    "European Union (27)",
    "Europe",
    "North America",
    "Africa",
    "USSR",
    "South America",
];

pub fn filter_by_year<'a, I>(records: I, year: i32) -> Vec<&'a EnergyRecord>
where
    I: IntoIterator<Item = &'a EnergyRecord>,
{
    records.into_iter().filter(|r| r.year == year).collect()
}

pub fn exclude_aggregate_regions<'a, I>(records: I, excluded: &[&str]) -> Vec<&'a EnergyRecord>
where
    I: IntoIterator<Item = &'a EnergyRecord>,
{
    records
        .into_iter()
        .filter(|r| !excluded.contains(&r.country.as_str()))
        .collect()
}

/// The first `n` records by `metric`, largest first.
///
/// The sort is stable so exact ties keep their original row order. Records
/// with a missing value sort after every present value.
pub fn top_n<'a>(records: &[&'a EnergyRecord], metric: Metric, n: usize) -> Vec<&'a EnergyRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| descending(a.get(metric), b.get(metric)));
    sorted.truncate(n);
    sorted
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Each amount as a percentage of the total, keeping category order.
///
/// A zero total is not guarded: the shares come out as NaN (or infinite)
/// and are passed through unchanged.
pub fn percentage_shares<K: Clone>(values: &[(K, f64)]) -> Vec<(K, f64)> {
    let total: f64 = values.iter().map(|(_, amount)| amount).sum();
    values
        .iter()
        .map(|(category, amount)| (category.clone(), amount / total * 100.0))
        .collect()
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn complete_pairs<I>(pairs: I) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    pairs
        .into_iter()
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((x, y)),
            _ => None,
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    sum / count as f64
}

/// Ordinary least-squares fit over the pairs where both sides are present.
pub fn linear_fit<I>(pairs: I) -> Result<LinearFit, Error>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let pairs = complete_pairs(pairs);
    if pairs.is_empty() {
        return Err(Error::EmptyFilterResult(
            "no complete (x, y) pairs for the trendline".to_string(),
        ));
    }

    let mean_x = mean(pairs.iter().map(|(x, _)| *x));
    let mean_y = mean(pairs.iter().map(|(_, y)| *y));

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &pairs {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }

    if sxx == 0.0 {
        return Err(Error::ZeroDenominator("trendline slope"));
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Pearson correlation coefficient over the complete pairs. NaN when fewer
/// than two pairs remain or either side has no variance.
pub fn pearson_correlation<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let pairs = complete_pairs(pairs);
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_x = mean(pairs.iter().map(|(x, _)| *x));
    let mean_y = mean(pairs.iter().map(|(_, y)| *y));

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    sxy / denominator
}

/// Per-group sum of `metric`, skipping missing values. Groups come back in
/// key order.
pub fn group_sums<'a, I, F>(records: I, group_key: F, metric: Metric) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a EnergyRecord>,
    F: Fn(&EnergyRecord) -> &str,
{
    let mut sums = BTreeMap::new();
    for record in records {
        let entry = sums.entry(group_key(record).to_string()).or_insert(0.0);
        if let Some(value) = record.get(metric).filter(|v| !v.is_nan()) {
            *entry += value;
        }
    }
    sums
}

/// Share of each field per group, normalized to sum to 1.0 within a group.
///
/// Shares are computed per row first (each field over that row's total across
/// `fields`, missing amounts counting as zero), summed per group, and then
/// divided by the group's summed shares. The second pass cancels the drift a
/// group with several rows would otherwise carry.
pub fn normalized_group_shares<'a, I, F>(
    records: I,
    group_key: F,
    fields: &[Metric],
) -> BTreeMap<String, BTreeMap<Metric, f64>>
where
    I: IntoIterator<Item = &'a EnergyRecord>,
    F: Fn(&EnergyRecord) -> &str,
{
    let mut groups: BTreeMap<String, BTreeMap<Metric, f64>> = BTreeMap::new();

    for record in records {
        let total: f64 = fields
            .iter()
            .filter_map(|field| record.get(*field))
            .filter(|v| !v.is_nan())
            .sum();

        let shares = groups
            .entry(group_key(record).to_string())
            .or_insert_with(|| fields.iter().map(|field| (*field, 0.0)).collect());

        for field in fields {
            if let Some(share) = record.get(*field).map(|v| v / total).filter(|s| !s.is_nan()) {
                if let Some(sum) = shares.get_mut(field) {
                    *sum += share;
                }
            }
        }
    }

    for shares in groups.values_mut() {
        let total: f64 = shares.values().sum();
        for share in shares.values_mut() {
            *share /= total;
        }
    }

    groups
}
