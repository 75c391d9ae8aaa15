//! Semicolon-delimited backing file with a fixed header row.
//!
//! Every operation re-reads or rewrites the whole file. Rewrites go through a
//! temp file in the same directory that is renamed over the target, so a
//! failed write never leaves a truncated file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::DELIMITER;
use crate::error::{PriceWatchError, Result};

/// A CSV file owned by one store.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    header: &'static [&'static str],
}

impl CsvFile {
    pub fn new<P: AsRef<Path>>(path: P, header: &'static [&'static str]) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the file with only the header row if it is absent or empty.
    ///
    /// Returns `true` if the header was written.
    pub fn ensure_initialized(&self) -> Result<bool> {
        let empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        if !empty {
            return Ok(false);
        }

        self.create_parent()?;
        let file = File::create(&self.path)?;
        let mut writer = writer_for(file);
        writer.write_record(self.header)?;
        writer.flush()?;
        tracing::debug!("Initialized {}", self.path.display());
        Ok(true)
    }

    /// Read every row in file order.
    ///
    /// Columns are matched by header name, so unknown extra columns are
    /// ignored. Fails with [`PriceWatchError::FileMissing`] if the file does
    /// not exist.
    pub fn read_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PriceWatchError::FileMissing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Append one row, writing the header first if the file is empty.
    ///
    /// A file whose last line has no terminator (e.g. saved by an editor) gets
    /// one before the row is written.
    pub fn append<T: Serialize>(&self, row: &T) -> Result<()> {
        self.create_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let empty = file.metadata()?.len() == 0;

        if !empty {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = writer_for(file);
        if empty {
            writer.write_record(self.header)?;
        }
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }

    /// Replace the file contents with the header followed by `rows`.
    pub fn rewrite<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        self.create_parent()?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = writer_for(tmp.as_file_mut());
            writer.write_record(self.header)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("Rewrote {} ({} rows)", self.path.display(), rows.len());
        Ok(())
    }

    fn create_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

fn writer_for<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}
