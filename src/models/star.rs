use crate::error::{ProcessingError, Result};
use std::fmt;

/// Columns that can appear in the particle STAR table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarColumn {
    MicrographName,
    CoordinateX,
    CoordinateY,
    ParticleScore,
    Voltage,
    DefocusU,
    DefocusV,
    DefocusAngle,
    SphericalAberration,
    AmplitudeContrast,
    DetectorPixelSize,
    Magnification,
}

impl StarColumn {
    pub const ALL: [StarColumn; 12] = [
        StarColumn::MicrographName,
        StarColumn::CoordinateX,
        StarColumn::CoordinateY,
        StarColumn::ParticleScore,
        StarColumn::Voltage,
        StarColumn::DefocusU,
        StarColumn::DefocusV,
        StarColumn::DefocusAngle,
        StarColumn::SphericalAberration,
        StarColumn::AmplitudeContrast,
        StarColumn::DetectorPixelSize,
        StarColumn::Magnification,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StarColumn::MicrographName => "MicrographName",
            StarColumn::CoordinateX => "CoordinateX",
            StarColumn::CoordinateY => "CoordinateY",
            StarColumn::ParticleScore => "ParticleScore",
            StarColumn::Voltage => "Voltage",
            StarColumn::DefocusU => "DefocusU",
            StarColumn::DefocusV => "DefocusV",
            StarColumn::DefocusAngle => "DefocusAngle",
            StarColumn::SphericalAberration => "SphericalAberration",
            StarColumn::AmplitudeContrast => "AmplitudeContrast",
            StarColumn::DetectorPixelSize => "DetectorPixelSize",
            StarColumn::Magnification => "Magnification",
        }
    }
}

impl fmt::Display for StarColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StarValue {
    Text(String),
    Number(f64),
    Missing,
}

impl StarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StarValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Option<f64>> for StarValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(StarValue::Missing, StarValue::Number)
    }
}

/// A single-loop STAR table: an ordered column schema and rows matching it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarTable {
    columns: Vec<StarColumn>,
    rows: Vec<Vec<StarValue>>,
}

impl StarTable {
    pub fn new(columns: Vec<StarColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(columns: Vec<StarColumn>, rows: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn push_row(&mut self, row: Vec<StarValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Row has {} values but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[StarColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<StarValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: StarColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn column_index(&self, column: StarColumn) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    pub fn value(&self, row: usize, column: StarColumn) -> Option<&StarValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// All values of one column in row order.
    pub fn column_values(&self, column: StarColumn) -> Option<Vec<&StarValue>> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(|r| &r[col]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_matches_declaration() {
        let mut sorted = StarColumn::ALL;
        sorted.sort();
        assert_eq!(sorted, StarColumn::ALL);
    }

    #[test]
    fn test_push_row_checks_arity() {
        let mut table = StarTable::new(vec![StarColumn::CoordinateX, StarColumn::CoordinateY]);

        assert!(table
            .push_row(vec![StarValue::Number(1.0), StarValue::Number(2.0)])
            .is_ok());
        assert!(matches!(
            table.push_row(vec![StarValue::Number(1.0)]),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_value_lookup() {
        let mut table = StarTable::new(vec![StarColumn::MicrographName, StarColumn::CoordinateX]);
        table
            .push_row(vec![StarValue::Text("a.mrc".to_string()), StarValue::Number(3.5)])
            .unwrap();

        assert_eq!(
            table.value(0, StarColumn::MicrographName).and_then(|v| v.as_str()),
            Some("a.mrc")
        );
        assert_eq!(
            table.value(0, StarColumn::CoordinateX).and_then(|v| v.as_f64()),
            Some(3.5)
        );
        assert!(table.value(0, StarColumn::ParticleScore).is_none());
        assert!(table.value(1, StarColumn::CoordinateX).is_none());
    }
}
