use crate::assembler::RowSet;
use crate::error::ScrapeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for assembled row sets
pub trait RecordSink {
    /// Replace the destination table's content with `rows`
    fn write(&mut self, rows: &RowSet) -> Result<(), ScrapeError>;
}

/// Writes `<dir>/<table>.csv`: UTF-8, header row, no index column
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, table: &str) -> PathBuf {
        csv_path(&self.dir, table)
    }
}

pub fn csv_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.csv", table))
}

impl RecordSink for CsvSink {
    fn write(&mut self, rows: &RowSet) -> Result<(), ScrapeError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&rows.table);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&rows.columns)?;
        for row in &rows.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        log::info!("{} rows saved to {}", rows.len(), path.display());
        Ok(())
    }
}
