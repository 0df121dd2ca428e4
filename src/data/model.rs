// ---------------------------------------------------------------------------
// Format constants
// ---------------------------------------------------------------------------

/// Text that marks the start of the tabular section in a cue-log export.
pub const MARKER: &str = "Assemble List";

/// Lines between the marker line and the column header (marker + divider).
pub const HEADER_OFFSET: usize = 2;

/// Duration column name, as it appears in the source header.
pub const DURATION_COLUMN: &str = "MasDur";

/// Clip identifier column name.
pub const CLIP_COLUMN: &str = "Clip";

/// Output columns, in export order.
pub const COLUMNS: [&str; 2] = [DURATION_COLUMN, CLIP_COLUMN];

/// Data rows that fit in one worksheet below the header (Excel allows
/// 1,048,576 rows in total).
pub const MAX_EXPORT_ROWS: usize = 1_048_575;

/// Extension of the exported spreadsheet.
pub const EXPORT_EXTENSION: &str = "xlsx";

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single cue (one row of the cleaned table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// `MasDur` value, kept verbatim (usually a timecode).
    pub duration: String,
    /// `Clip` identifier; never empty once imported.
    pub clip: String,
}

impl Record {
    pub fn new(duration: impl Into<String>, clip: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            clip: clip.into(),
        }
    }

    /// Value of the column at `col` (0 = `MasDur`, 1 = `Clip`).
    pub fn field(&self, col: usize) -> Option<&str> {
        match col {
            0 => Some(&self.duration),
            1 => Some(&self.clip),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the ordered, two-column result of an import
// ---------------------------------------------------------------------------

/// Ordered records. A record's position is its index in `records`, so
/// positions stay dense after every removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_count(&self) -> usize {
        COLUMNS.len()
    }

    pub fn column_name(&self, col: usize) -> Option<&'static str> {
        COLUMNS.get(col).copied()
    }

    /// Cell accessor used by the table view.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.records.get(row).and_then(|r| r.field(col))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
