use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a cue log and writing the
/// spreadsheet. Every variant leaves the session usable.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find 'Assemble List' in {}", path.display())]
    MarkerNotFound { path: PathBuf },

    #[error("missing column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("malformed tab-separated data: {0}")]
    Csv(#[from] csv::Error),

    #[error("no data to export")]
    EmptyTable,

    #[error("{rows} rows do not fit in one worksheet (at most {max})")]
    TooManyRows { rows: usize, max: usize },

    #[error("no source file known, cannot derive export path")]
    NoSource,

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
