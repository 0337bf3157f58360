use crate::processing::scale::ScaleError;
use crate::state::field::{Field, FIELD_COUNT};

/// One row of the census table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Region display name, e.g. "Ohio".
    pub state: String,
    /// Short label drawn on the mark, e.g. "OH".
    pub abbr: String,
    values: [Option<f64>; FIELD_COUNT],
}

impl Record {
    pub fn new(state: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            abbr: abbr.into(),
            values: [None; FIELD_COUNT],
        }
    }

    /// Builder-style setter, mostly useful when assembling records by hand.
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        self.values[field.index()] = value;
    }

    pub fn value(&self, field: Field) -> Option<f64> {
        self.values[field.index()]
    }

    /// First recognized field this record has no value for.
    pub fn first_missing(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| self.value(*f).is_none())
    }
}

/// Validated, immutable, ordered set of records.
///
/// Every record carries a finite value for every [`Field`], so scales can be
/// built for any field without failing.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self, ScaleError> {
        if records.is_empty() {
            return Err(ScaleError::EmptyDataset);
        }
        for record in &records {
            if let Some(field) = record.first_missing() {
                return Err(ScaleError::MissingField {
                    field,
                    region: record.state.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Value of `field` for the record at `index`. NaN only for an
    /// out-of-range index, since construction rejects missing values.
    pub fn value(&self, index: usize, field: Field) -> f64 {
        self.records
            .get(index)
            .and_then(|r| r.value(field))
            .unwrap_or(f64::NAN)
    }
}
