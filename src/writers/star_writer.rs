use crate::error::{ProcessingError, Result};
use crate::models::{StarTable, StarValue};
use crate::utils::constants::{DEFAULT_STAR_BLOCK, STAR_LABEL_PREFIX, STAR_MISSING_VALUE};
use std::io::Write;

pub struct StarWriter {
    block_name: String,
    label_prefix: String,
}

impl StarWriter {
    pub fn new() -> Self {
        Self {
            block_name: DEFAULT_STAR_BLOCK.to_string(),
            label_prefix: STAR_LABEL_PREFIX.to_string(),
        }
    }

    pub fn with_block_name(mut self, block_name: &str) -> Result<Self> {
        if block_name.is_empty() || block_name.chars().any(char::is_whitespace) {
            return Err(ProcessingError::Config(format!(
                "Invalid STAR data block name: '{}'",
                block_name
            )));
        }
        self.block_name = block_name.to_string();
        Ok(self)
    }

    /// Write a single data block with one loop holding the whole table
    pub fn write<W: Write>(&self, table: &StarTable, out: &mut W) -> Result<()> {
        writeln!(out, "data_{}", self.block_name)?;
        writeln!(out)?;
        writeln!(out, "loop_")?;
        for (i, column) in table.columns().iter().enumerate() {
            writeln!(out, "{}{} #{}", self.label_prefix, column, i + 1)?;
        }

        for row in table.rows() {
            let line = row
                .iter()
                .map(format_value)
                .collect::<Result<Vec<_>>>()?
                .join("\t");
            writeln!(out, "{}", line)?;
        }

        out.flush()?;
        Ok(())
    }

    pub fn write_to_string(&self, table: &StarTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(table, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))
    }
}

impl Default for StarWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: &StarValue) -> Result<String> {
    match value {
        StarValue::Number(v) if v.is_nan() => Ok(STAR_MISSING_VALUE.to_string()),
        StarValue::Number(v) => Ok(v.to_string()),
        StarValue::Missing => Ok(STAR_MISSING_VALUE.to_string()),
        StarValue::Text(s) => format_text(s),
    }
}

/// Quote text that would otherwise split or start a quoted token. The quote
/// character is one the value does not contain.
fn format_text(s: &str) -> Result<String> {
    let needs_quotes =
        s.is_empty() || s.starts_with(['"', '\'']) || s.chars().any(char::is_whitespace);
    if !needs_quotes {
        return Ok(s.to_string());
    }

    match ['"', '\''].into_iter().find(|q| !s.contains(*q)) {
        Some(quote) => Ok(format!("{quote}{s}{quote}")),
        None => Err(ProcessingError::InvalidFormat(format!(
            "Cannot quote STAR value containing both quote characters: {}",
            s
        ))),
    }
}
