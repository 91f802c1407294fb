//! Activity sample data model.
//!
//! A sample is one quantity reported by one source over a half-open interval.
//! The engine assumes the count is spread evenly across the interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::span::{seconds_between, TimeSpan};

/// Where a sample came from. Only the classifier looks at these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub bundle_identifier: Option<String>,
    pub product_type: Option<String>,
    pub device_model: Option<String>,
    pub device_name: Option<String>,
}

impl Provenance {
    pub fn with_bundle(mut self, bundle_identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(bundle_identifier.into());
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_device_model(mut self, device_model: impl Into<String>) -> Self {
        self.device_model = Some(device_model.into());
        self
    }

    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = Some(device_name.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Sample {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        value: f64,
        provenance: Provenance,
    ) -> Self {
        Self {
            start,
            end,
            value,
            provenance,
        }
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    pub fn duration_seconds(&self) -> f64 {
        seconds_between(self.start, self.end)
    }

    /// Positive duration and a finite, non-negative value.
    pub fn is_valid(&self) -> bool {
        self.start < self.end && self.value.is_finite() && self.value >= 0.0
    }

    /// Value per second, or `None` for degenerate samples.
    pub fn rate(&self) -> Option<f64> {
        if !self.is_valid() {
            return None;
        }
        let duration = self.duration_seconds();
        if duration > 0.0 {
            Some(self.value / duration)
        } else {
            None
        }
    }
}
