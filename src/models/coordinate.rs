use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One picked particle as read from the coordinate table. The image name is
/// kept verbatim; numeric cells may carry surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub image_name: String,

    #[serde(deserialize_with = "trimmed_f64")]
    pub x_coord: f64,

    #[serde(deserialize_with = "trimmed_f64")]
    pub y_coord: f64,

    #[serde(default, deserialize_with = "trimmed_optional_f64")]
    pub score: Option<f64>,
}

fn trimmed_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| de::Error::custom(format!("invalid number: '{}'", raw)))
}

fn trimmed_optional_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" => Ok(None),
        value => value
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid number: '{}'", value))),
    }
}

impl CoordinateRecord {
    pub fn new(image_name: impl Into<String>, x_coord: f64, y_coord: f64) -> Self {
        Self {
            image_name: image_name.into(),
            x_coord,
            y_coord,
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether this record survives a score threshold. An empty or NaN score
    /// never passes, not even a threshold of negative infinity.
    pub fn passes_threshold(&self, threshold: f64) -> bool {
        self.score.is_some_and(|score| score >= threshold)
    }
}

/// A fully materialized coordinate table in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    pub records: Vec<CoordinateRecord>,

    /// Resolved from the header when the table is loaded.
    pub has_score: bool,
}

impl CoordinateTable {
    pub fn new(records: Vec<CoordinateRecord>, has_score: bool) -> Self {
        Self { records, has_score }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_threshold() {
        let record = CoordinateRecord::new("mic0001", 1.0, 2.0).with_score(0.5);

        assert!(record.passes_threshold(0.5));
        assert!(record.passes_threshold(f64::NEG_INFINITY));
        assert!(!record.passes_threshold(0.51));
    }

    #[test]
    fn test_missing_score_never_passes() {
        let record = CoordinateRecord::new("mic0001", 1.0, 2.0);
        assert!(!record.passes_threshold(f64::NEG_INFINITY));

        let record = record.with_score(f64::NAN);
        assert!(!record.passes_threshold(f64::NEG_INFINITY));
    }
}
