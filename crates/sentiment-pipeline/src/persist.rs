//! Atomic CSV output.
//!
//! Files are written to a temporary sibling and renamed into place, so an
//! interrupted run leaves either the previous file or the complete new one.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{error::WriteError, table::Table};

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the existing file
    #[default]
    Replace,
    /// Fail with [`WriteError::Exists`]
    Reject,
}

impl OverwritePolicy {
    /// Fail early if `path` exists and may not be replaced.
    pub fn check(self, path: &Path) -> Result<(), WriteError> {
        if self == Self::Reject && path.exists() {
            return Err(WriteError::Exists {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> WriteError + '_ {
    move |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// A CSV file fully written to a temporary sibling of its destination and
/// not yet visible under its final name. Dropping it discards the file.
#[derive(Debug)]
pub struct StagedCsv {
    tmp: NamedTempFile,
    path: PathBuf,
}

impl StagedCsv {
    /// Final destination of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the staged file onto its destination.
    pub fn publish(self, policy: OverwritePolicy) -> Result<(), WriteError> {
        let Self { tmp, path } = self;
        match policy {
            OverwritePolicy::Replace => tmp
                .persist(&path)
                .map(drop)
                .map_err(|err| io_error(&path)(err.error)),
            OverwritePolicy::Reject => tmp.persist_noclobber(&path).map(drop).map_err(|err| {
                if err.error.kind() == io::ErrorKind::AlreadyExists {
                    WriteError::Exists { path: path.clone() }
                } else {
                    io_error(&path)(err.error)
                }
            }),
        }?;
        debug!(path = %path.display(), "Wrote CSV file");
        Ok(())
    }
}

/// Write a CSV file destined for `path` in a single buffered pass, without
/// publishing it yet. Missing parent directories are created.
pub fn stage_csv<F>(path: &Path, write_rows: F) -> Result<StagedCsv, WriteError>
where
    F: FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> csv::Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_error(parent))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(io_error(parent))?;
    {
        let mut wtr = csv::Writer::from_writer(&mut tmp);
        write_rows(&mut wtr).map_err(|source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        wtr.flush().map_err(io_error(path))?;
    }
    tmp.as_file().sync_all().map_err(io_error(path))?;
    Ok(StagedCsv {
        tmp,
        path: path.to_path_buf(),
    })
}

/// Write a CSV file at `path` in a single buffered pass and publish it atomically.
pub fn write_csv_atomic<F>(path: &Path, policy: OverwritePolicy, write_rows: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> csv::Result<()>,
{
    policy.check(path)?;
    stage_csv(path, write_rows)?.publish(policy)
}

/// Write the train and test splits as `train.csv` and `test.csv` under `dir`,
/// creating it if needed. Existing files are replaced.
pub fn save_split(dir: &Path, train: &Table, test: &Table) -> Result<(PathBuf, PathBuf), WriteError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let train_path = dir.join(TRAIN_FILE);
    let test_path = dir.join(TEST_FILE);

    train.write_csv(&train_path, OverwritePolicy::Replace)?;
    test.write_csv(&test_path, OverwritePolicy::Replace)?;
    info!(
        dir = %dir.display(),
        train_rows = train.len(),
        test_rows = test.len(),
        "Saved train/test split"
    );
    Ok((train_path, test_path))
}
