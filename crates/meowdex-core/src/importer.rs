//! Bulk import into the roster.
//!
//! Parsing and de-duplication live in `meowdex_logic::import`; this module
//! runs them against the stored roster inside a single lock acquisition so
//! the duplicate check and the insert see the same roster.

use meowdex_logic::import::{dedupe, parse_import, ImportSummary};

use crate::error::StoreResult;
use crate::roster::{append_new, RosterStore};

impl RosterStore {
    /// Import pasted tab-separated rows into the active profile.
    ///
    /// Bad rows are reported in the summary and skipped. Duplicates of
    /// stored cats or of earlier rows in the batch are counted and skipped.
    pub fn import_text(&self, text: &str) -> StoreResult<ImportSummary> {
        let batch = parse_import(text);
        let parsed_rows = batch.rows.len();

        let state = self.lock();
        let mut cats = state.load()?;
        let (unique, skipped_duplicates) = dedupe(&cats, batch.rows);
        let created = append_new(&mut cats, unique, &state.path())?;
        if !created.is_empty() {
            state.save(&cats)?;
        }
        drop(state);

        let summary = ImportSummary {
            total_lines: batch.total_lines,
            parsed_rows,
            imported: created.len(),
            skipped_duplicates,
            errors: batch.errors.iter().map(ToString::to_string).collect(),
        };
        log::info!(
            "Import: {} lines, {} parsed, {} imported, {} duplicates, {} errors",
            summary.total_lines,
            summary.parsed_rows,
            summary.imported,
            summary.skipped_duplicates,
            summary.errors.len()
        );
        Ok(summary)
    }
}
