//! Bulk import — tab-separated roster rows.
//!
//! Each non-blank line holds 16 tab-separated fields: name, retired flag
//! (`yes`, any case, means retired), then seven (current, base) pairs in stat
//! order. Bad rows are reported with their line number and skipped; the rest
//! of the batch still imports. Rows are de-duplicated on a case-insensitive
//! key of name, all 14 numbers and the retired flag.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cat::{CatProfile, Gender, Orientation, Stat};
use crate::constants::{import_format, STAT_COUNT};

/// Gender assigned to every imported cat; the format has no such column.
pub const IMPORT_GENDER: Gender = Gender::Fluid;
/// Orientation assigned to every imported cat.
pub const IMPORT_ORIENTATION: Orientation = Orientation::Omni;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportRowError {
    #[error("Line {line}: expected {expected} tab-separated columns, got {got}.")]
    ColumnCount {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("Line {line}: name is empty.")]
    EmptyName { line: usize },
    #[error("Line {line}: invalid number '{raw}' at column {column}.")]
    InvalidNumber {
        line: usize,
        raw: String,
        column: usize,
    },
}

impl ImportRowError {
    pub fn line(&self) -> usize {
        match self {
            ImportRowError::ColumnCount { line, .. }
            | ImportRowError::EmptyName { line }
            | ImportRowError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Parse one row. `line` is 1-based and only used in errors.
pub fn parse_row(row: &str, line: usize) -> Result<CatProfile, ImportRowError> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() != import_format::COLUMN_COUNT {
        return Err(ImportRowError::ColumnCount {
            line,
            expected: import_format::COLUMN_COUNT,
            got: fields.len(),
        });
    }

    let name = fields[0].trim();
    if name.is_empty() {
        return Err(ImportRowError::EmptyName { line });
    }

    let retired = fields[1]
        .trim()
        .eq_ignore_ascii_case(import_format::RETIRED_YES);

    let mut numbers = [0i32; import_format::NUMERIC_COLUMNS];
    for (i, slot) in numbers.iter_mut().enumerate() {
        let raw = fields[i + 2];
        *slot = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ImportRowError::InvalidNumber {
                line,
                raw: raw.to_string(),
                column: i + 3,
            })?;
    }

    let mut cat = CatProfile::new(name)
        .with_gender(IMPORT_GENDER, IMPORT_ORIENTATION)
        .with_retired(retired);
    for (i, &stat) in Stat::all().iter().enumerate() {
        cat.current.set(stat, numbers[i * 2]);
        cat.base.set(stat, numbers[i * 2 + 1]);
    }
    Ok(cat)
}

/// Result of parsing a pasted block.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    /// Non-blank lines seen.
    pub total_lines: usize,
    pub rows: Vec<CatProfile>,
    pub errors: Vec<ImportRowError>,
}

/// Parse every non-blank line of `text`. Line numbers in errors count
/// non-blank lines only, starting at 1.
pub fn parse_import(text: &str) -> ParsedBatch {
    let mut batch = ParsedBatch::default();
    let normalized = text.replace('\r', "");

    for raw in normalized.split('\n') {
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }
        batch.total_lines += 1;
        match parse_row(row, batch.total_lines) {
            Ok(cat) => batch.rows.push(cat),
            Err(e) => batch.errors.push(e),
        }
    }
    batch
}

/// Identity used to detect duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    name: String,
    numbers: [i32; import_format::NUMERIC_COLUMNS],
    retired: bool,
}

impl DuplicateKey {
    pub fn of(cat: &CatProfile) -> Self {
        let mut numbers = [0i32; import_format::NUMERIC_COLUMNS];
        for i in 0..STAT_COUNT {
            numbers[i * 2] = cat.current.to_array()[i];
            numbers[i * 2 + 1] = cat.base.to_array()[i];
        }
        Self {
            name: cat.name.trim().to_lowercase(),
            numbers,
            retired: cat.retired,
        }
    }
}

/// Sanitize `rows` and drop those already in `existing` or earlier in `rows`.
/// Returns the unique rows and how many were skipped.
pub fn dedupe(existing: &[CatProfile], rows: Vec<CatProfile>) -> (Vec<CatProfile>, usize) {
    let mut seen: HashSet<DuplicateKey> = existing.iter().map(DuplicateKey::of).collect();
    let mut unique = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let clean = row.sanitize();
        if seen.insert(DuplicateKey::of(&clean)) {
            unique.push(clean);
        } else {
            skipped += 1;
        }
    }
    (unique, skipped)
}

/// Outcome reported to the user after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_lines: usize,
    pub parsed_rows: usize,
    pub imported: usize,
    pub skipped_duplicates: usize,
    /// Rendered row errors, in line order.
    pub errors: Vec<String>,
}
