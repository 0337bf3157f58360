use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::processing::scale::ScaleError;
use crate::state::field::Field;
use crate::state::record::{Dataset, Record};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("invalid dataset: {0}")]
    Invalid(#[from] ScaleError),
}

/// One CSV row as written on disk. Unparseable numbers become `None` so the
/// row can be reported by region instead of failing on a byte offset.
#[derive(Debug, Deserialize)]
struct RawRow {
    state: String,
    abbr: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    poverty: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    age: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    income: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    healthcare: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    obesity: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    smokes: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> Record {
        let mut record = Record::new(self.state.trim(), self.abbr.trim());
        let values = [
            (Field::Poverty, self.poverty),
            (Field::Age, self.age),
            (Field::Income, self.income),
            (Field::Healthcare, self.healthcare),
            (Field::Obesity, self.obesity),
            (Field::Smokes, self.smokes),
        ];
        for (field, value) in values {
            record.set(field, value.filter(|v| v.is_finite()));
        }
        record
    }
}

const TEXT_COLUMNS: [&str; 2] = ["state", "abbr"];

/// Load and validate the census CSV at `path`.
pub fn load_census(path: &Path) -> Result<Dataset, LoadError> {
    let content = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Fallback: treat non-UTF-8 input as latin1.
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    let dataset = parse_census(text.as_bytes())?;
    tracing::info!("Loaded {} records from {:?}", dataset.len(), path);
    Ok(dataset)
}

/// Parse census rows from any reader. The first row is the header; columns
/// other than the recognized ones are ignored.
pub fn parse_census<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let required = TEXT_COLUMNS
        .into_iter()
        .chain(Field::ALL.into_iter().map(Field::column));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawRow>().enumerate() {
        let record = result?.into_record();
        if let Some(field) = record.first_missing() {
            tracing::warn!(
                "Row {} ({}) has no usable value for `{field}`",
                row + 1,
                record.state
            );
        }
        records.push(record);
    }

    Ok(Dataset::new(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "id,state,abbr,poverty,povertyMoe,age,ageMoe,income,incomeMoe,healthcare,obesity,smokes";

    #[test]
    fn parses_rows_in_order_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\n\
             1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1\n\
             2,Alaska,AK,11.2,0.9,33.3,0.3,71583,1784,15,29.7,19.9\n"
        );
        let ds = parse_census(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        let ak = &ds.records()[1];
        assert_eq!(ak.state, "Alaska");
        assert_eq!(ak.abbr, "AK");
        assert_eq!(ak.value(Field::Income), Some(71583.0));
        assert_eq!(ak.value(Field::Healthcare), Some(15.0));
        assert_eq!(ds.value(0, Field::Smokes), 21.1);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "state,abbr,poverty,age,income,healthcare,obesity\nOhio,OH,1,2,3,4,5\n";
        match parse_census(csv.as_bytes()) {
            Err(LoadError::MissingColumn(c)) => assert_eq!(c, "smokes"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unparseable_value_fails_validation_by_region() {
        let csv = format!(
            "{HEADER}\n\
             1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1\n\
             2,Ohio,OH,14.2,0.5,n/a,0.2,49429,598,12.5,30.4,23.4\n"
        );
        match parse_census(csv.as_bytes()) {
            Err(LoadError::Invalid(ScaleError::MissingField { field, region })) => {
                assert_eq!(field, Field::Age);
                assert_eq!(region, "Ohio");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn header_only_is_an_empty_dataset() {
        let err = parse_census(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ScaleError::EmptyDataset)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_census(Path::new("no/such/census.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
