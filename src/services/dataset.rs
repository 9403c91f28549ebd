use crate::models::{domain::parse_yes_no, Record};
use std::collections::HashMap;
use thiserror::Error;

/// Attribute names used by the locker dataset
pub const ATTR_LATITUDE: &str = "Geolokacija_lat";
pub const ATTR_LONGITUDE: &str = "Geolokacija_lon";
pub const ATTR_TYPE: &str = "Vrsta_paketnika";
pub const ATTR_ACCESSIBLE: &str = "Dostopnost_za_invalide";
pub const ATTR_PARKING: &str = "Dostopnost_parkirisca";
/// Optional precomputed suitability column
pub const ATTR_SUITABILITY: &str = "Ustreznost";

/// Errors that can occur while mapping dataset rows to records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("row {row}: missing attribute {attribute}")]
    MissingAttribute { row: u64, attribute: &'static str },

    #[error("row {row}: invalid value {value:?} for attribute {attribute}")]
    InvalidValue { row: u64, attribute: &'static str, value: String },
}

/// Anything that can hand the ranker a set of lockers
pub trait DatasetSource {
    fn records(&self) -> Result<Vec<Record>, DatasetError>;
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    records: Vec<Record>,
}

impl InMemoryDataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DatasetSource for InMemoryDataset {
    fn records(&self) -> Result<Vec<Record>, DatasetError> {
        Ok(self.records.clone())
    }
}

/// Rows keyed by attribute name; the row index becomes the record id
#[derive(Debug, Clone, Default)]
pub struct AttributeRows {
    rows: Vec<HashMap<String, String>>,
}

impl AttributeRows {
    pub fn new(rows: Vec<HashMap<String, String>>) -> Self {
        Self { rows }
    }
}

impl DatasetSource for AttributeRows {
    fn records(&self) -> Result<Vec<Record>, DatasetError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| Record::from_attributes(i as u64, row))
            .collect()
    }
}

impl Record {
    /// Build a record from a row keyed by the dataset attribute names
    pub fn from_attributes(id: u64, row: &HashMap<String, String>) -> Result<Self, DatasetError> {
        let suitability = match row.get(ATTR_SUITABILITY) {
            Some(value) if !value.trim().is_empty() => Some(parse_f64(id, ATTR_SUITABILITY, value)?),
            _ => None,
        };

        Ok(Record {
            id,
            latitude: parse_f64(id, ATTR_LATITUDE, require(id, row, ATTR_LATITUDE)?)?,
            longitude: parse_f64(id, ATTR_LONGITUDE, require(id, row, ATTR_LONGITUDE)?)?,
            locker_type: require(id, row, ATTR_TYPE)?.trim().to_string(),
            accessible: parse_flag(id, ATTR_ACCESSIBLE, require(id, row, ATTR_ACCESSIBLE)?)?,
            parking: parse_flag(id, ATTR_PARKING, require(id, row, ATTR_PARKING)?)?,
            suitability,
        })
    }
}

fn require<'a>(
    row_id: u64,
    row: &'a HashMap<String, String>,
    attribute: &'static str,
) -> Result<&'a str, DatasetError> {
    row.get(attribute)
        .map(String::as_str)
        .ok_or(DatasetError::MissingAttribute { row: row_id, attribute })
}

fn parse_f64(row_id: u64, attribute: &'static str, value: &str) -> Result<f64, DatasetError> {
    value.trim().parse().map_err(|_| DatasetError::InvalidValue {
        row: row_id,
        attribute,
        value: value.to_string(),
    })
}

fn parse_flag(row_id: u64, attribute: &'static str, value: &str) -> Result<bool, DatasetError> {
    parse_yes_no(value).ok_or_else(|| DatasetError::InvalidValue {
        row: row_id,
        attribute,
        value: value.to_string(),
    })
}
