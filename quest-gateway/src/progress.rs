use crate::continent::Continent;
use crate::error::GatewayError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Completion percentage for one continent, always finite and within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ProgressValue(f64);

impl ProgressValue {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidProgress`] for NaN, infinities and
    /// values outside `0..=100`.
    pub fn new(value: f64) -> Result<Self, GatewayError> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GatewayError::InvalidProgress(value))
        }
    }

    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(Self::MIN)
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Per-continent progress parsed from a `get_progress` payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBoard {
    entries: BTreeMap<Continent, f64>,
}

impl ProgressBoard {
    /// Unknown keys and non-numeric values are skipped.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        let entries = payload
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(key, value)| {
                        let continent = key.parse::<Continent>().ok()?;
                        Some((continent, value.as_f64()?))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, continent: Continent) -> Option<f64> {
        self.entries.get(&continent).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every continent has an entry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Continent::ALL
            .iter()
            .all(|continent| self.entries.contains_key(continent))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Continent, f64)> + '_ {
        self.entries.iter().map(|(continent, value)| (*continent, *value))
    }
}
