use crate::error::Result;
use crate::models::{
    AcquisitionMetadata, CoordinateRecord, CoordinateTable, StarColumn, StarTable, StarValue,
};
use crate::utils::constants::DEFAULT_IMAGE_EXT;
use tracing::{debug, warn};

/// Strip `prefix_ignore` leading and then `suffix_ignore` trailing characters
/// from an image name. Trimming past either end yields an empty string.
pub fn normalize_image_name(name: &str, prefix_ignore: usize, suffix_ignore: usize) -> String {
    let trimmed: Vec<char> = name.chars().skip(prefix_ignore).collect();
    let keep = trimmed.len().saturating_sub(suffix_ignore);
    trimmed[..keep].iter().collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    pub image_ext: String,
    pub prefix_ignore: usize,
    pub suffix_ignore: usize,
    pub output_len: usize,

    /// Minimum particle score; `None` keeps every row that has a score.
    pub threshold: Option<f64>,

    pub acquisition: AcquisitionMetadata,
}

impl TransformOptions {
    pub fn new(output_len: usize) -> Self {
        Self {
            image_ext: DEFAULT_IMAGE_EXT.to_string(),
            prefix_ignore: 0,
            suffix_ignore: 0,
            output_len,
            threshold: None,
            acquisition: AcquisitionMetadata::default(),
        }
    }

    pub fn with_image_ext(mut self, image_ext: impl Into<String>) -> Self {
        self.image_ext = image_ext.into();
        self
    }

    pub fn with_trim(mut self, prefix_ignore: usize, suffix_ignore: usize) -> Self {
        self.prefix_ignore = prefix_ignore;
        self.suffix_ignore = suffix_ignore;
        self
    }

    /// A threshold of negative infinity is the same as no threshold.
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold.filter(|t| *t != f64::NEG_INFINITY);
        self
    }

    pub fn with_acquisition(mut self, acquisition: AcquisitionMetadata) -> Self {
        self.acquisition = acquisition;
        self
    }
}

/// Row counts after each filtering stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub input_rows: usize,
    pub length_matched: usize,
    pub output_rows: usize,
}

impl TransformReport {
    pub fn length_rejected(&self) -> usize {
        self.input_rows - self.length_matched
    }

    pub fn score_rejected(&self) -> usize {
        self.length_matched - self.output_rows
    }

    pub fn summary(&self) -> String {
        format!(
            "{} input rows, {} rejected by name length, {} rejected by score, {} particles written",
            self.input_rows,
            self.length_rejected(),
            self.score_rejected(),
            self.output_rows
        )
    }
}

pub struct CoordinateTransformer {
    options: TransformOptions,
}

impl CoordinateTransformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Convert a coordinate table into a particle STAR table
    pub fn transform(&self, table: &CoordinateTable) -> Result<StarTable> {
        self.transform_with_report(table).map(|(star, _)| star)
    }

    pub fn transform_with_report(
        &self,
        table: &CoordinateTable,
    ) -> Result<(StarTable, TransformReport)> {
        let opts = &self.options;
        let mut report = TransformReport {
            input_rows: table.len(),
            ..Default::default()
        };

        // Names are normalized once and carried through both filters.
        let length_matched: Vec<(String, &CoordinateRecord)> = table
            .records
            .iter()
            .map(|r| {
                (
                    normalize_image_name(&r.image_name, opts.prefix_ignore, opts.suffix_ignore),
                    r,
                )
            })
            .filter(|(name, _)| name.chars().count() == opts.output_len)
            .collect();
        report.length_matched = length_matched.len();
        debug!(
            "{} of {} rows have a {}-character image name",
            report.length_matched, report.input_rows, opts.output_len
        );

        // Rows without a usable score are dropped even when no threshold is set.
        let survivors: Vec<(String, &CoordinateRecord)> = if table.has_score {
            let threshold = opts.threshold.unwrap_or(f64::NEG_INFINITY);
            length_matched
                .into_iter()
                .filter(|(_, r)| r.passes_threshold(threshold))
                .collect()
        } else {
            length_matched
        };
        report.output_rows = survivors.len();
        if table.has_score {
            debug!(
                "{} rows pass the score threshold {:?}",
                report.output_rows, opts.threshold
            );
        }

        let metadata = opts.acquisition.columns();
        let schema = self.schema(table.has_score, &metadata);
        let mut star = StarTable::with_capacity(schema, survivors.len());

        for (name, record) in survivors {
            let mut row = vec![
                StarValue::Text(format!("{}{}", name, opts.image_ext)),
                StarValue::Number(record.x_coord),
                StarValue::Number(record.y_coord),
            ];
            if table.has_score {
                row.push(record.score.into());
            }
            row.extend(metadata.iter().map(|(_, v)| StarValue::Number(*v)));
            star.push_row(row)?;
        }

        if star.is_empty() && !table.is_empty() {
            warn!("Every coordinate row was filtered out; the STAR table is empty");
        }

        Ok((star, report))
    }

    fn schema(&self, has_score: bool, metadata: &[(StarColumn, f64)]) -> Vec<StarColumn> {
        let mut columns = vec![
            StarColumn::MicrographName,
            StarColumn::CoordinateX,
            StarColumn::CoordinateY,
        ];
        if has_score {
            columns.push(StarColumn::ParticleScore);
        }
        columns.extend(metadata.iter().map(|(column, _)| *column));
        columns
    }
}
