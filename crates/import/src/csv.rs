use kauri_core::RawRow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("could not open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {} after {rows_read} rows: {source}", path.display())]
    RowRead {
        path: PathBuf,
        rows_read: usize,
        #[source]
        source: csv::Error,
    },
}

/// Rows read from one statement file, and the error that cut reading short.
#[derive(Debug)]
pub struct FileRows {
    pub path: PathBuf,
    pub rows: Vec<RawRow>,
    pub error: Option<IngestError>,
}

impl FileRows {
    fn failed(path: PathBuf, error: IngestError) -> Self {
        Self { path, rows: Vec::new(), error: Some(error) }
    }
}

/// Reads a statement file, skipping its header row.
pub fn read_rows(path: &Path) -> FileRows {
    match File::open(path) {
        Ok(file) => read_rows_from(path, file),
        Err(source) => FileRows::failed(
            path.to_path_buf(),
            IngestError::FileOpen { path: path.to_path_buf(), source },
        ),
    }
}

/// Reads rows from any source. Every row must have as many fields as the
/// header; the first one that does not (or any other read failure) stops
/// reading and the rows before it are kept.
pub fn read_rows_from<R: Read>(path: &Path, data: R) -> FileRows {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let mut rows: Vec<RawRow> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(source) => {
                let error = IngestError::RowRead {
                    path: path.to_path_buf(),
                    rows_read: rows.len(),
                    source,
                };
                return FileRows { path: path.to_path_buf(), rows, error: Some(error) };
            }
        }
    }

    FileRows { path: path.to_path_buf(), rows, error: None }
}
