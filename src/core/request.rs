//! Turns raw conversion arguments into the JSON response envelope shared by
//! the HTTP endpoint and the CLI.

use crate::core::convert::{ConversionError, convert, default_outputs};
use crate::core::currency::{RateTable, normalize_symbol};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Arguments exactly as the caller supplied them.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub amount: Option<String>,
    pub input_currency: Option<String>,
    pub output_currency: Option<String>,
}

/// Validated arguments: a parsed amount and a non-empty input currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest<'a> {
    pub amount: f64,
    pub input_currency: &'a str,
    pub output_currency: Option<&'a str>,
}

impl RawRequest {
    /// Builds a request from query pairs. A repeated key keeps its first
    /// value and unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawRequest::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "amount" => &mut raw.amount,
                "input_currency" => &mut raw.input_currency,
                "output_currency" => &mut raw.output_currency,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }

    /// Parsed amount; anything that is not a number counts as absent.
    pub fn amount(&self) -> Option<f64> {
        self.amount.as_deref()?.trim().parse().ok()
    }

    /// Checks that `amount` and `input_currency` are present, returning the
    /// error envelope otherwise.
    pub fn required(&self) -> Result<ConversionRequest<'_>, Envelope> {
        let amount = self.amount();
        let input_currency = self.input_currency.as_deref().filter(|s| !s.is_empty());
        match (amount, input_currency) {
            (Some(amount), Some(input_currency)) => Ok(ConversionRequest {
                amount,
                input_currency,
                output_currency: self.output_currency.as_deref().filter(|s| !s.is_empty()),
            }),
            _ => Err(Envelope::failure(
                amount,
                input_currency,
                &ConversionError::MissingArgument,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeInput {
    pub amount: Option<f64>,
    pub currency: String,
}

/// Response body. Fields are declared in key order so the JSON comes out sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub input: EnvelopeInput,
    pub output: Option<BTreeMap<String, f64>>,
}

impl Envelope {
    pub fn success(amount: f64, currency: &str, output: BTreeMap<String, f64>) -> Self {
        Self {
            error: None,
            input: EnvelopeInput {
                amount: Some(amount),
                currency: currency.to_string(),
            },
            output: Some(output),
        }
    }

    pub fn failure(amount: Option<f64>, currency: Option<&str>, error: &ConversionError) -> Self {
        let currency = currency.filter(|c| !c.is_empty()).unwrap_or("unknown");
        Self {
            error: Some(error.to_string()),
            input: EnvelopeInput {
                amount,
                currency: currency.to_string(),
            },
            output: None,
        }
    }

    /// Pretty JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize response")?;
        String::from_utf8(buf).context("Serialized response is not valid UTF-8")
    }
}

/// Runs the whole request against `rates`: argument checks, symbol
/// normalization, output defaulting and conversion.
pub fn respond(raw: &RawRequest, rates: &RateTable) -> Envelope {
    let request = match raw.required() {
        Ok(request) => request,
        Err(envelope) => return envelope,
    };

    let input = normalize_symbol(request.input_currency);
    let outputs = match request.output_currency {
        Some(code) => vec![normalize_symbol(code)],
        None => default_outputs(rates, &input),
    };

    match convert(request.amount, &input, &outputs, rates) {
        Ok(output) => Envelope::success(request.amount, &input, output),
        Err(e) => Envelope::failure(Some(request.amount), Some(&input), &e),
    }
}
