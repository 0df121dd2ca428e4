use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::data::export::{export_path_for, write_xlsx};
use crate::data::loader::load_assemble_list;
use crate::data::model::Table;
use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// TableStore – the one live table and the file it came from
// ---------------------------------------------------------------------------

/// Session state: at most one source path and one table.
///
/// Every mutation bumps [`TableStore::revision`], so a view can tell when
/// it needs to drop cached row state.
#[derive(Debug, Default)]
pub struct TableStore {
    source: Option<PathBuf>,
    table: Table,
    revision: u64,
}

impl TableStore {
    /// Import `path` and replace the current table with it.
    ///
    /// On failure the previous table and source path are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let table = load_assemble_list(path)?;
        self.source = Some(path.to_path_buf());
        self.table = table;
        self.bump();
        Ok(self.row_count())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn column_name(&self, col: usize) -> Option<&'static str> {
        self.table.column_name(col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.table.cell(row, col)
    }

    /// Delete every row whose position is in `positions` in one pass.
    ///
    /// Out-of-range and duplicate positions are ignored. Survivors keep their
    /// relative order and are renumbered from zero. Returns how many rows
    /// were removed.
    pub fn remove_rows(&mut self, positions: impl IntoIterator<Item = usize>) -> usize {
        let len = self.table.len();
        let doomed: BTreeSet<usize> = positions.into_iter().filter(|&p| p < len).collect();
        if doomed.is_empty() {
            return 0;
        }

        let mut position = 0;
        self.table.records.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });

        log::debug!("Removed {} rows, {} left", doomed.len(), self.table.len());
        self.bump();
        doomed.len()
    }

    /// Write the table to `path` and clear the session.
    ///
    /// Fails with [`ConvertError::EmptyTable`] (no file written) when there is
    /// nothing to export. On any failure the table is kept.
    pub fn export_to(&mut self, path: &Path) -> Result<PathBuf> {
        write_xlsx(&self.table, path)?;
        self.reset();
        Ok(path.to_path_buf())
    }

    /// Export next to the source file as `<stem>.xlsx`.
    pub fn export(&mut self) -> Result<PathBuf> {
        if self.table.is_empty() {
            return Err(ConvertError::EmptyTable);
        }
        let target = self
            .source
            .as_deref()
            .map(export_path_for)
            .ok_or(ConvertError::NoSource)?;
        self.export_to(&target)
    }

    /// Forget the table and the source path.
    pub fn reset(&mut self) {
        self.table.clear();
        self.source = None;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Outcome of the last user action, shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// How a click on a table row changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Plain click: select only this row.
    Replace,
    /// Ctrl/Cmd-click: add or remove this row.
    Toggle,
    /// Shift-click: select the range from the last clicked row.
    Extend,
}

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// The loaded table and its source file.
    pub store: TableStore,

    /// Selected row positions in the current table.
    pub selection: BTreeSet<usize>,

    /// Row the last non-extending click landed on.
    anchor: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn has_data(&self) -> bool {
        !self.store.is_empty()
    }

    /// Load a cue log; errors end up in the status line.
    pub fn open(&mut self, path: &Path) {
        match self.store.load(path) {
            Ok(rows) => {
                self.clear_selection();
                self.status_message = Some(StatusMessage::Info(format!(
                    "Loaded {rows} rows from {}",
                    file_name(path)
                )));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(StatusMessage::Error(format!("Error: {e}")));
            }
        }
    }

    /// Update the selection after a click on `row`.
    pub fn click_row(&mut self, row: usize, mode: SelectMode) {
        if row >= self.store.row_count() {
            return;
        }
        match mode {
            SelectMode::Replace => {
                self.selection.clear();
                self.selection.insert(row);
                self.anchor = Some(row);
            }
            SelectMode::Toggle => {
                if !self.selection.remove(&row) {
                    self.selection.insert(row);
                }
                self.anchor = Some(row);
            }
            SelectMode::Extend => {
                let anchor = self.anchor.unwrap_or(row);
                self.selection = (anchor.min(row)..=anchor.max(row)).collect();
            }
        }
    }

    /// Remove the selected rows from the table.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let selected = std::mem::take(&mut self.selection);
        let removed = self.store.remove_rows(selected);
        self.anchor = None;
        self.status_message = Some(StatusMessage::Info(format!(
            "Deleted {removed} rows, {} left",
            self.store.row_count()
        )));
    }

    /// Export next to the source file; the session is cleared on success.
    pub fn export(&mut self) {
        match self.store.export() {
            Ok(path) => {
                self.clear_selection();
                self.status_message = Some(StatusMessage::Info(format!(
                    "Saved to {}",
                    path.display()
                )));
            }
            Err(ConvertError::EmptyTable) => {
                self.status_message =
                    Some(StatusMessage::Info("No data to export.".to_string()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(StatusMessage::Error(format!("Error: {e}")));
            }
        }
    }

    /// Drop the table so a new file can be loaded.
    pub fn reset(&mut self) {
        self.store.reset();
        self.clear_selection();
        self.status_message = None;
    }

    pub fn window_title(&self) -> String {
        match self.store.source() {
            Some(path) => format!("{APP_TITLE} - {}", file_name(path)),
            None => APP_TITLE.to_string(),
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
        self.anchor = None;
    }
}

pub const APP_TITLE: &str = "Assemble List → Excel";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::export::tests::read_back;
    use crate::data::model::Record;

    const SAMPLE: &str = "\
Title: Reel 1
Assemble List
=====
Event\tClip\tMasDur\tReel
1\tE\t00:00:05:00\tR1
2\tC\t00:00:03:00\tR1
3\tA\t00:00:01:00\tR1
4\tD\t00:00:04:00\tR1
5\tB\t00:00:02:00\tR1
";

    fn write_source(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn clips(store: &TableStore) -> Vec<String> {
        store.table.records.iter().map(|r| r.clip.clone()).collect()
    }

    fn loaded_store(dir: &Path) -> TableStore {
        let mut store = TableStore::default();
        let path = write_source(dir, "reel1.txt", SAMPLE);
        assert_eq!(store.load(&path).unwrap(), 5);
        store
    }

    #[test]
    fn load_replaces_table_and_remembers_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = loaded_store(dir.path());

        assert_eq!(clips(&store), ["A", "B", "C", "D", "E"]);
        assert_eq!(store.source(), Some(dir.path().join("reel1.txt").as_path()));
        assert_eq!(store.column_count(), 2);
        assert_eq!(store.cell(0, 0), Some("00:00:01:00"));
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());
        let before = store.table.clone();
        let revision = store.revision();

        let bad = write_source(dir.path(), "bad.txt", "Event\tClip\tMasDur\n");
        let err = store.load(&bad).unwrap_err();

        assert!(matches!(err, ConvertError::MarkerNotFound { .. }));
        assert_eq!(&store.table, &before);
        assert_eq!(store.source(), Some(dir.path().join("reel1.txt").as_path()));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn remove_non_contiguous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());
        let revision = store.revision();

        assert_eq!(store.remove_rows([1, 3]), 2);

        assert_eq!(clips(&store), ["A", "C", "E"]);
        assert_eq!(store.row_count(), 3);
        assert!(store.revision() > revision);
    }

    #[test]
    fn remove_ignores_out_of_range_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());

        assert_eq!(store.remove_rows([4, 4, 5, 100]), 1);
        assert_eq!(clips(&store), ["A", "B", "C", "D"]);

        let revision = store.revision();
        assert_eq!(store.remove_rows([7]), 0);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn remove_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());

        assert_eq!(store.remove_rows(0..5), 5);
        assert!(store.is_empty());
    }

    #[test]
    fn export_empty_table_fails_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty.xlsx");
        let mut store = TableStore::default();

        assert!(matches!(
            store.export_to(&target),
            Err(ConvertError::EmptyTable)
        ));
        assert!(matches!(store.export(), Err(ConvertError::EmptyTable)));
        assert!(!target.exists());
    }

    #[test]
    fn export_without_source_fails() {
        let mut store = TableStore::default();
        store.table = Table::from_records(vec![Record::new("1", "A")]);

        assert!(matches!(store.export(), Err(ConvertError::NoSource)));
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn export_writes_next_to_source_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());
        store.remove_rows([0]);
        let expected = store.table.clone();

        let written = store.export().unwrap();

        assert_eq!(written, dir.path().join("reel1.xlsx"));
        assert!(store.is_empty());
        assert_eq!(store.source(), None);

        let rows = read_back(&written);
        assert_eq!(rows.len(), expected.len() + 1);
        assert_eq!(rows[0], ["MasDur", "Clip"]);
        let round_trip: Vec<Record> = rows[1..]
            .iter()
            .map(|r| Record::new(r[0].clone(), r[1].clone()))
            .collect();
        assert_eq!(round_trip, expected.records);
    }

    #[test]
    fn failed_export_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());

        let err = store
            .export_to(&dir.path().join("missing/out.xlsx"))
            .unwrap_err();

        assert!(matches!(err, ConvertError::Write { .. }));
        assert_eq!(store.row_count(), 5);
        assert!(store.source().is_some());
    }

    #[test]
    fn reset_forgets_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = loaded_store(dir.path());

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.source(), None);
    }

    fn loaded_state(dir: &Path) -> AppState {
        let mut state = AppState::default();
        state.open(&write_source(dir, "reel1.txt", SAMPLE));
        state
    }

    #[test]
    fn click_modes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());

        state.click_row(1, SelectMode::Replace);
        state.click_row(3, SelectMode::Extend);
        assert_eq!(state.selection, BTreeSet::from([1, 2, 3]));

        state.click_row(2, SelectMode::Toggle);
        assert_eq!(state.selection, BTreeSet::from([1, 3]));

        state.click_row(0, SelectMode::Extend);
        assert_eq!(state.selection, BTreeSet::from([0, 1, 2]));

        state.click_row(4, SelectMode::Replace);
        assert_eq!(state.selection, BTreeSet::from([4]));

        state.click_row(9, SelectMode::Replace);
        assert_eq!(state.selection, BTreeSet::from([4]));
    }

    #[test]
    fn delete_selected_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());

        state.click_row(1, SelectMode::Replace);
        state.click_row(3, SelectMode::Toggle);
        state.delete_selected();

        assert!(state.selection.is_empty());
        assert_eq!(clips(&state.store), ["A", "C", "E"]);
    }

    #[test]
    fn open_failure_is_reported_and_table_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());

        state.open(&dir.path().join("nope.txt"));

        assert!(matches!(state.status_message, Some(StatusMessage::Error(_))));
        assert_eq!(state.store.row_count(), 5);
        assert_eq!(state.window_title(), format!("{APP_TITLE} - reel1.txt"));
    }

    #[test]
    fn export_resets_title_and_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());

        state.export();

        assert!(!state.has_data());
        assert_eq!(state.window_title(), APP_TITLE);
        assert!(dir.path().join("reel1.xlsx").exists());
        assert!(matches!(state.status_message, Some(StatusMessage::Info(_))));
    }
}
