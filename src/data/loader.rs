use std::path::Path;

use csv::StringRecord;

use super::filter::{normalize, RawRow};
use super::model::{Table, CLIP_COLUMN, DURATION_COLUMN, HEADER_OFFSET, MARKER};
use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the cue table from an "Assemble List" text export.
///
/// The file is read as UTF-8. Everything above the column header (title
/// block, marker line, divider) is skipped; the header sits
/// [`HEADER_OFFSET`] lines below the first line containing [`MARKER`].
pub fn load_assemble_list(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let start = find_data_start(&text).ok_or_else(|| ConvertError::MarkerNotFound {
        path: path.to_path_buf(),
    })?;
    log::info!(
        "Found '{MARKER}' in {}, header expected on line {}",
        path.display(),
        start + 1
    );

    let table = parse_table(&text, start)?;
    log::info!("Imported {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Zero-based line index of the column header, if the marker is present.
pub fn find_data_start(text: &str) -> Option<usize> {
    split_lines(text)
        .position(|line| line.contains(MARKER))
        .map(|i| i + HEADER_OFFSET)
}

/// Lines terminated by `\n`, `\r\n` or a bare `\r`, without terminators.
/// Like [`str::lines`], a trailing terminator yields no empty last line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) if rest[i..].starts_with("\r\n") => (&rest[..i], &rest[i + 2..]),
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

// ---------------------------------------------------------------------------
// Tab-separated section
// ---------------------------------------------------------------------------

/// Parse lines `start..` as a tab-separated table and normalise it.
///
/// Blank lines are skipped, so the first non-blank line is the header.
/// Rows may be shorter or longer than the header. Quotes carry no meaning,
/// a stray `"` stays part of its field.
pub fn parse_table(text: &str, start: usize) -> Result<Table> {
    let body = split_lines(text)
        .skip(start)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let (duration_idx, clip_idx) = locate_columns(&headers)?;

    let dropped = headers.len().saturating_sub(2);
    if dropped > 0 {
        log::debug!("Ignoring {dropped} column(s) besides {DURATION_COLUMN}/{CLIP_COLUMN}");
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawRow {
            duration: record.get(duration_idx).map(str::to_string),
            clip: record.get(clip_idx).map(str::to_string),
        });
    }

    Ok(normalize(rows))
}

/// Positions of the duration and clip columns in the header row.
fn locate_columns(headers: &StringRecord) -> Result<(usize, usize)> {
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    match (position(DURATION_COLUMN), position(CLIP_COLUMN)) {
        (Some(duration), Some(clip)) => Ok((duration, clip)),
        (duration, clip) => {
            let mut missing = Vec::new();
            if duration.is_none() {
                missing.push(DURATION_COLUMN.to_string());
            }
            if clip.is_none() {
                missing.push(CLIP_COLUMN.to_string());
            }
            Err(ConvertError::Schema { missing })
        }
    }
}
