//! Rate table snapshot and provider abstraction.

use crate::core::error::{ConvertError, LoadError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Violations of the rate table invariants, detected at construction.
///
/// Providers map these into [`LoadError::Provider`] so callers never see a
/// partially validated table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("rate for {code} is not a positive finite number: {value}")]
    InvalidRate { code: String, value: f64 },

    #[error("duplicate currency code after normalization: {0}")]
    DuplicateCode(String),

    #[error("base currency {code} reported with rate {value}, expected 1")]
    BaseRateNotUnity { code: String, value: f64 },
}

/// Uppercases and trims a currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// An immutable snapshot of exchange rates against one base currency.
///
/// Rates are keyed by uppercase currency code and expressed relative to the
/// base (base rate is always `1.0`). The sorted map keeps currency listing
/// stable and deterministic for a given snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    rates: BTreeMap<String, f64>,
    last_update: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a validated table from provider-reported entries.
    ///
    /// Codes are normalized to uppercase; every rate must be strictly
    /// positive and finite. A missing base entry is inserted at `1.0`, and
    /// a base entry reported at any other value is rejected.
    pub fn new(
        base: &str,
        entries: impl IntoIterator<Item = (String, f64)>,
        last_update: Option<DateTime<Utc>>,
    ) -> Result<Self, TableError> {
        let base = normalize_code(base);
        let mut rates = BTreeMap::new();

        for (code, value) in entries {
            let code = normalize_code(&code);
            if !(value.is_finite() && value > 0.0) {
                return Err(TableError::InvalidRate { code, value });
            }
            if code == base && (value - 1.0).abs() > 1e-9 {
                return Err(TableError::BaseRateNotUnity { code, value });
            }
            if rates.insert(code.clone(), value).is_some() {
                return Err(TableError::DuplicateCode(code));
            }
        }

        // The base is implicitly rate 1 relative to itself.
        rates.entry(base.clone()).or_insert(1.0);

        debug!(base = %base, currencies = rates.len(), "Built rate table");
        Ok(RateTable {
            base,
            rates,
            last_update,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(&normalize_code(code))
    }

    /// All known currency codes in sorted order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Base-relative rate for a currency.
    pub fn rate(&self, code: &str) -> Result<f64, ConvertError> {
        let code = normalize_code(code);
        self.rates
            .get(&code)
            .copied()
            .ok_or(ConvertError::UnknownCurrency(code))
    }

    /// Exchange rate between two listed currencies, `rate(to) / rate(from)`.
    ///
    /// Both codes are validated even when equal, so an unknown currency
    /// always fails rather than silently yielding `1.0`.
    pub fn cross_rate(&self, from: &str, to: &str) -> Result<f64, ConvertError> {
        let rate_from = self.rate(from)?;
        let rate_to = self.rate(to)?;
        if normalize_code(from) == normalize_code(to) {
            return Ok(1.0);
        }
        Ok(rate_to / rate_from)
    }
}

/// A source of rate snapshots for a given base currency.
#[async_trait]
pub trait RateSnapshotProvider: Send + Sync {
    async fn fetch_latest(&self, base: &str) -> Result<RateTable, LoadError>;
}
