use thiserror::Error;

use crate::state::field::Field;
use crate::state::record::{Dataset, Record};

/// Multiplier applied to the observed minimum.
pub const LOWER_PADDING: f64 = 0.9;
/// Multiplier applied to the observed maximum.
pub const UPPER_PADDING: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("cannot build a scale from an empty dataset")]
    EmptyDataset,
    #[error("record \"{region}\" has no value for field `{field}`")]
    MissingField { field: Field, region: String },
}

/// A closed numeric interval. `start` may be greater than `end`, which is how
/// an inverted (top-down) pixel range is expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }
}

/// Linear map from a data domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Interval,
    range: Interval,
}

impl LinearScale {
    pub fn new(domain: Interval, range: Interval) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    pub fn range(&self) -> Interval {
        self.range
    }

    /// Same range, different domain. Used to sample a scale mid-transition.
    pub fn with_domain(&self, domain: Interval) -> Self {
        Self { domain, range: self.range }
    }

    /// Map a data value to a pixel coordinate. Values outside the domain
    /// extrapolate linearly. A zero-width domain maps everything to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 || !span.is_finite() {
            return self.range.midpoint();
        }
        let t = (value - self.domain.start) / span;
        self.range.start + t * self.range.span()
    }
}

/// Build the scale for `field` over `records`, padding the observed bounds
/// with [`LOWER_PADDING`] and [`UPPER_PADDING`].
pub fn build_scale(
    records: &[Record],
    field: Field,
    range: Interval,
) -> Result<LinearScale, ScaleError> {
    if records.is_empty() {
        return Err(ScaleError::EmptyDataset);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        let v = record.value(field).ok_or_else(|| ScaleError::MissingField {
            field,
            region: record.state.clone(),
        })?;
        min = min.min(v);
        max = max.max(v);
    }

    let domain = Interval::new(min * LOWER_PADDING, max * UPPER_PADDING);
    Ok(LinearScale::new(domain, range))
}

pub fn build_dataset_scale(
    dataset: &Dataset,
    field: Field,
    range: Interval,
) -> Result<LinearScale, ScaleError> {
    build_scale(dataset.records(), field, range)
}
