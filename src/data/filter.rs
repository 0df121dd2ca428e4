use super::model::{Record, Table, DURATION_COLUMN};

// ---------------------------------------------------------------------------
// Raw rows as they come out of the tab-separated reader
// ---------------------------------------------------------------------------

/// The two interesting fields of a source row. `None` means the row was too
/// short to reach that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub duration: Option<String>,
    pub clip: Option<String>,
}

impl RawRow {
    /// A copy of the header row showing up again mid-file.
    pub fn is_repeated_header(&self) -> bool {
        self.duration.as_deref() == Some(DURATION_COLUMN)
    }

    /// Only an empty or missing field counts as "no clip"; a blank clip is a
    /// value.
    pub fn has_clip(&self) -> bool {
        self.clip.as_deref().is_some_and(|c| !c.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Normalisation: drop, sort, project
// ---------------------------------------------------------------------------

/// Turn raw rows into the cleaned table:
///
/// * rows repeating the header (`MasDur == "MasDur"`) are dropped
/// * rows without a clip are dropped
/// * survivors are stably sorted by clip, ascending
pub fn normalize(rows: Vec<RawRow>) -> Table {
    let total = rows.len();
    let mut repeated_headers = 0usize;
    let mut without_clip = 0usize;

    let mut records: Vec<Record> = rows
        .into_iter()
        .filter_map(|row| {
            if row.is_repeated_header() {
                repeated_headers += 1;
                return None;
            }
            if !row.has_clip() {
                without_clip += 1;
                return None;
            }
            Some(Record::new(
                row.duration.unwrap_or_default(),
                row.clip.unwrap_or_default(),
            ))
        })
        .collect();

    // `sort_by` is stable, equal clips keep their file order.
    records.sort_by(|a, b| a.clip.cmp(&b.clip));

    log::debug!(
        "{total} raw rows: {repeated_headers} repeated headers, {without_clip} without clip, {} kept",
        records.len()
    );

    Table::from_records(records)
}
