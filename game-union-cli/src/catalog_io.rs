//! Reading and writing catalog files.
//!
//! Catalogs are JSON arrays of records. Outputs are staged to a `.tmp`
//! sibling first and only renamed into place once every output of a run
//! has been written. A failed commit puts the previous files back.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use game_union_core::GameRecord;
use game_union_merge::AuditLog;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogIoError {
    #[error("I/O error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

impl CatalogIoError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Read a catalog file.
///
/// Returns `Ok(None)` if the file does not exist, which the reconciler
/// treats as an absent source. Malformed fields inside a record fall back
/// to their defaults; anything that is not an array of objects is an error.
pub fn read_catalog(path: &Path) -> Result<Option<Vec<GameRecord>>, CatalogIoError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Catalog not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(CatalogIoError::io(path, e)),
    };
    let records: Vec<GameRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CatalogIoError::json(path, e))?;
    log::debug!("Read {} records from {}", records.len(), path.display());
    Ok(Some(records))
}

/// An output written to a temporary file, waiting to be moved into place.
///
/// Dropping it before [`commit_all`] has moved it into place removes the
/// temporary file.
#[derive(Debug)]
pub struct StagedFile {
    target: PathBuf,
    tmp: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn create(
        target: &Path,
        write: impl FnOnce(&mut BufWriter<File>) -> Result<(), CatalogIoError>,
    ) -> Result<Self, CatalogIoError> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogIoError::io(parent, e))?;
        }
        let staged = Self {
            target: target.to_path_buf(),
            tmp: tmp_path(target),
            committed: false,
        };
        let file = File::create(&staged.tmp).map_err(|e| CatalogIoError::io(&staged.tmp, e))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| CatalogIoError::io(&staged.tmp, e))?;
        Ok(staged)
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn tmp_path(target: &Path) -> PathBuf {
    with_suffix(target, ".tmp")
}

fn with_suffix(target: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Stage a unified catalog as a pretty-printed JSON array.
pub fn stage_catalog(path: &Path, records: &[GameRecord]) -> Result<StagedFile, CatalogIoError> {
    StagedFile::create(path, |w| {
        serde_json::to_writer_pretty(&mut *w, records)
            .map_err(|e| CatalogIoError::json(path, e))?;
        writeln!(w).map_err(|e| CatalogIoError::io(path, e))
    })
}

/// Stage the plain-text audit report.
pub fn stage_report(path: &Path, audit: &AuditLog) -> Result<StagedFile, CatalogIoError> {
    StagedFile::create(path, |w| audit.write_to(w).map_err(|e| CatalogIoError::io(path, e)))
}

/// Commit staged outputs together.
///
/// Existing targets are first moved aside to `<target>.bak`. If any rename
/// fails, targets already written are removed and the previous files are
/// restored, so either every output is replaced or none is.
pub fn commit_all(mut staged: Vec<StagedFile>) -> Result<(), CatalogIoError> {
    let mut backups: Vec<(PathBuf, PathBuf)> = Vec::new();
    for file in &staged {
        if file.target.exists() {
            let backup = with_suffix(&file.target, ".bak");
            if let Err(e) = fs::rename(&file.target, &backup) {
                restore(&[], &backups);
                return Err(CatalogIoError::io(&file.target, e));
            }
            backups.push((file.target.clone(), backup));
        }
    }

    let mut written: Vec<PathBuf> = Vec::new();
    for file in &mut staged {
        if let Err(e) = fs::rename(&file.tmp, &file.target) {
            restore(&written, &backups);
            return Err(CatalogIoError::io(&file.target, e));
        }
        file.committed = true;
        written.push(file.target.clone());
    }

    for (_, backup) in &backups {
        let _ = fs::remove_file(backup);
    }
    for target in &written {
        log::debug!("Wrote {}", target.display());
    }
    Ok(())
}

fn restore(written: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    for target in written {
        let _ = fs::remove_file(target);
    }
    for (target, backup) in backups {
        if let Err(e) = fs::rename(backup, target) {
            log::error!(
                "Could not restore {} from {}: {}",
                target.display(),
                backup.display(),
                e
            );
        }
    }
}
