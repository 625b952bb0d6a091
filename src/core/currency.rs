//! Rate table and the upstream feed abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value of one unit of each currency expressed in the base currency.
///
/// The base currency itself is always present with a rate of `1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.0.insert(code.into(), rate);
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(code, rate)| (code.into(), rate)).collect())
    }
}

/// A complete rate table together with the date the feed says it is valid for.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub effective_date: NaiveDate,
    pub rates: RateTable,
}

impl Default for RateSnapshot {
    /// Empty table dated at the epoch, so any real feed is newer.
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::MIN,
            rates: RateTable::new(),
        }
    }
}

/// Source of daily rate tables.
#[async_trait]
pub trait RateFeed: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateSnapshot>;
}

/// Maps the common currency symbols to ISO codes and upper-cases the result.
pub fn normalize_symbol(symbol: &str) -> String {
    match symbol {
        "€" => "EUR",
        "$" => "USD",
        "£" => "GBP",
        "¥" => "CNY",
        other => other,
    }
    .to_uppercase()
}
