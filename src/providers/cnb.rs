use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::core::currency::{RateFeed, RateSnapshot, RateTable};

pub const DEFAULT_FEED_URL: &str =
    "https://www.cnb.cz/cs/financni_trhy/devizovy_trh/kurzy_devizoveho_trhu/denni_kurz.txt";

/// Daily exchange rate listing published by the Czech National Bank.
pub struct CnbFeed {
    url: String,
    base_currency: String,
}

impl CnbFeed {
    pub fn new(url: &str, base_currency: &str) -> Self {
        CnbFeed {
            url: url.to_string(),
            base_currency: base_currency.to_uppercase(),
        }
    }
}

#[async_trait]
impl RateFeed for CnbFeed {
    #[instrument(name = "CnbFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<RateSnapshot> {
        debug!("Requesting exchange rates from {}", self.url);

        let client = reqwest::Client::builder().user_agent("cnb-fx/1.0").build()?;
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, self.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for URL: {}",
                response.status(),
                self.url
            ));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;

        parse_feed(&text, &self.base_currency)
    }
}

/// Parses the pipe-delimited daily listing.
///
/// ```text
/// 16.10.2026 #201
/// země|měna|množství|kód|kurz
/// EMU|euro|1|EUR|24,335
/// Japonsko|jen|100|JPY|15,412
/// ```
///
/// The first token of line 0 is the effective date, line 1 is the column
/// header and every later line is a rate quoted per lot of `množství` units.
/// Any malformed row rejects the whole feed.
pub fn parse_feed(text: &str, base_currency: &str) -> Result<RateSnapshot> {
    let mut lines = text.trim().lines();

    let header = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| anyhow!("Exchange rate feed is empty"))?;
    let date_token = header
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow!("Missing date in feed header: '{header}'"))?;
    let effective_date = NaiveDate::parse_from_str(date_token, "%d.%m.%Y")
        .with_context(|| format!("Invalid feed date: '{date_token}'"))?;

    let mut rates = RateTable::new();
    for (index, line) in lines.enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let (code, rate) = parse_row(line)
            .with_context(|| format!("Malformed feed row on line {}: '{}'", index + 2, line))?;
        rates.insert(code, rate);
    }
    rates.insert(base_currency.to_uppercase(), 1.0);

    debug!(%effective_date, currencies = rates.len(), "Parsed exchange rate feed");
    Ok(RateSnapshot {
        effective_date,
        rates,
    })
}

fn parse_row(line: &str) -> Result<(String, f64)> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [_country, _name, quantity, code, rate] = fields.as_slice() else {
        bail!("expected 5 fields, found {}", fields.len());
    };

    if code.is_empty() {
        bail!("missing currency code");
    }
    let quantity = parse_decimal(quantity)?;
    let rate = parse_decimal(rate)?;
    if quantity <= 0.0 || rate <= 0.0 {
        bail!("rate and quantity must be positive");
    }

    Ok((code.to_uppercase(), rate / quantity))
}

/// Parses a number written with a decimal comma.
fn parse_decimal(value: &str) -> Result<f64> {
    let number: f64 = value
        .replace(',', ".")
        .parse()
        .with_context(|| format!("Invalid number: '{value}'"))?;
    if !number.is_finite() {
        bail!("Invalid number: '{value}'");
    }
    Ok(number)
}
