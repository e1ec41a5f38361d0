//! Append-only CSV log used when the webhook does not take a submission.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result, StorageAction};

use super::record::SubmissionRecord;

/// Local response log. Appends are serialized through an internal lock so the
/// header is written exactly once and rows never interleave.
#[derive(Debug)]
pub struct ResponseLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ResponseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the file is new or empty
    pub fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let _guard = self.write_lock.lock();
        let wrote_header = self
            .append_locked(record)
            .map_err(|e| Error::storage(StorageAction::Append, &self.path, e))?;

        info!(
            submission_id = %record.id,
            path = %self.path.display(),
            wrote_header,
            "Submission appended to local log"
        );
        Ok(())
    }

    fn append_locked(&self, record: &SubmissionRecord) -> io::Result<bool> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if needs_header {
            writer.write_record(SubmissionRecord::header(record.answers.len()))?;
        }
        writer.write_record(record.to_row())?;
        writer.flush()?;

        Ok(needs_header)
    }

    /// Raw log bytes for export; `None` when nothing was ever saved.
    /// Not decoded, so a hand-edited log in another encoding exports unchanged.
    pub fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(contents) => {
                debug!(path = %self.path.display(), bytes = contents.len(), "Response log read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(StorageAction::Read, &self.path, e)),
        }
    }

    /// Number of data rows (header excluded) in `contents`
    pub fn count_records(&self, contents: &[u8]) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(contents);

        let mut count = 0;
        for row in reader.byte_records() {
            row.map_err(|e| Error::storage(StorageAction::Read, &self.path, e.into()))?;
            count += 1;
        }
        Ok(count)
    }
}
