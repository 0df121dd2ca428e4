use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::model::{Table, COLUMNS, EXPORT_EXTENSION, MAX_EXPORT_ROWS};
use crate::error::{ConvertError, Result};

/// `<dir>/<stem>.xlsx` next to the source file.
pub fn export_path_for(source: &Path) -> PathBuf {
    source.with_extension(EXPORT_EXTENSION)
}

/// Write `table` as a single worksheet: bold `MasDur`/`Clip` header in row 0,
/// one record per row below it, no index column.
///
/// An empty table, or one too long for a worksheet, is refused before
/// anything touches the disk.
pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    if table.is_empty() {
        return Err(ConvertError::EmptyTable);
    }
    ensure_fits(table.len())?;

    build_workbook(table)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn ensure_fits(rows: usize) -> Result<()> {
    if rows > MAX_EXPORT_ROWS {
        return Err(ConvertError::TooManyRows {
            rows,
            max: MAX_EXPORT_ROWS,
        });
    }
    Ok(())
}

fn build_workbook(table: &Table) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, record) in table.records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, record.duration.as_str())?;
        worksheet.write_string(row, 1, record.clip.as_str())?;
    }

    worksheet.autofit();
    Ok(workbook)
}

#[cfg(test)]
pub(crate) mod tests {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    use super::*;
    use crate::data::model::Record;

    /// Read every row of the first sheet back as strings.
    pub(crate) fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let sheet = workbook.sheet_names()[0].clone();
        let range = workbook.worksheet_range(&sheet).unwrap();
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    fn sample_table() -> Table {
        Table::from_records(vec![
            Record::new("00:01:00:00", "Ambience"),
            Record::new("", "Bass_01"),
            Record::new("00:00:12:05", "Drums_02"),
        ])
    }

    #[test]
    fn export_path_replaces_extension() {
        assert_eq!(
            export_path_for(Path::new("/cues/reel3.txt")),
            PathBuf::from("/cues/reel3.xlsx")
        );
        assert_eq!(
            export_path_for(Path::new("/cues/reel3.final.txt")),
            PathBuf::from("/cues/reel3.final.xlsx")
        );
        assert_eq!(
            export_path_for(Path::new("/cues/reel3")),
            PathBuf::from("/cues/reel3.xlsx")
        );
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let table = sample_table();

        write_xlsx(&table, &path).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows.len(), table.len() + 1);
        assert_eq!(rows[0], ["MasDur", "Clip"]);
        let data: Vec<Record> = rows[1..]
            .iter()
            .map(|r| Record::new(r[0].clone(), r[1].clone()))
            .collect();
        assert_eq!(data, table.records);
    }

    #[test]
    fn empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let err = write_xlsx(&Table::default(), &path).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyTable));
        assert!(!path.exists());
    }

    #[test]
    fn row_limit_is_its_own_error() {
        assert!(ensure_fits(MAX_EXPORT_ROWS).is_ok());

        let err = ensure_fits(MAX_EXPORT_ROWS + 1).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TooManyRows { rows, max } if rows == MAX_EXPORT_ROWS + 1 && max == MAX_EXPORT_ROWS
        ));
        assert!(err.to_string().contains("1048576 rows"));
    }

    #[test]
    fn unwritable_target_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.xlsx");

        let err = write_xlsx(&sample_table(), &path).unwrap_err();
        assert!(matches!(err, ConvertError::Write { .. }));
    }
}
