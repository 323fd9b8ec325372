//! Reading, patching, and writing target files.
//!
//! The flow is: [`plan_patch`] reads the file and computes the outcome in
//! memory, [`PatchPlan::commit`] writes it back (or not, for dry runs).
//! [`patch_file`] does both; [`check_file`] only reads.

use std::fs::{self, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{PatchError, PatchResult};
use crate::rule::{CompiledRule, Insertion, PatchOutcome};

/// Knobs for [`PatchPlan::commit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Compute everything but leave the file untouched.
    pub dry_run: bool,
    /// Copy the original to `<file>.<timestamp>.bak` before overwriting.
    pub backup: bool,
}

/// Summary of what happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Whether the marker was (or, for dry runs, would be) inserted.
    pub applied: bool,
    /// Occurrences of the pattern in the original content.
    pub occurrences: usize,
    pub insertion: Option<Insertion>,
    /// Set only when a patch ran in dry-run mode; read-only checks leave it false.
    pub dry_run: bool,
    /// Whether the file on disk was rewritten.
    pub written: bool,
    pub backup_path: Option<PathBuf>,
    pub sha256_before: String,
    pub sha256_after: String,
}

impl FileReport {
    /// Turn "pattern not found" into an error.
    pub fn require_applied(self) -> PatchResult<Self> {
        if self.applied {
            Ok(self)
        } else {
            Err(PatchError::PatternNotFound { path: self.path })
        }
    }
}

/// One line of a dry-run preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    /// 1-based line number in the patched content.
    pub number: usize,
    pub text: String,
    pub inserted: bool,
}

/// A file read into memory together with the computed outcome.
#[derive(Debug, Clone)]
pub struct PatchPlan {
    pub path: PathBuf,
    pub original: String,
    pub outcome: PatchOutcome,
    pub occurrences: usize,
    pub sha256_before: String,
}

impl PatchPlan {
    /// Lines around the insertion point in the patched content.
    ///
    /// Empty when nothing would be inserted.
    pub fn preview(&self, context: usize) -> Vec<PreviewLine> {
        let Some(insertion) = &self.outcome.insertion else {
            return Vec::new();
        };
        let first = insertion.line.saturating_sub(context).max(1);
        let last = insertion.line + context;

        self.outcome
            .content
            .split('\n')
            .enumerate()
            .map(|(idx, text)| (idx + 1, text))
            .filter(|(number, _)| *number >= first && *number <= last)
            .map(|(number, text)| PreviewLine {
                number,
                text: text.trim_end_matches('\r').to_string(),
                inserted: number == insertion.line,
            })
            .collect()
    }

    fn report(&self, dry_run: bool) -> FileReport {
        FileReport {
            path: self.path.clone(),
            applied: self.outcome.applied(),
            occurrences: self.occurrences,
            insertion: self.outcome.insertion.clone(),
            dry_run,
            written: false,
            backup_path: None,
            sha256_before: self.sha256_before.clone(),
            sha256_after: sha256_hex(self.outcome.content.as_bytes()),
        }
    }

    /// Write the outcome back to disk.
    ///
    /// Nothing is written when the pattern was absent (the content would be
    /// identical) or for dry runs. The file is re-hashed first; if it changed
    /// since [`plan_patch`] read it, the write is refused.
    pub fn commit(self, options: &PatchOptions) -> PatchResult<FileReport> {
        let mut report = self.report(options.dry_run);

        if !self.outcome.applied() {
            tracing::info!(path = %self.path.display(), "pattern not found; file left unchanged");
            return Ok(report);
        }
        if options.dry_run {
            tracing::info!(path = %self.path.display(), "dry run; file left unchanged");
            return Ok(report);
        }

        let current = sha256_file(&self.path)?;
        if current != self.sha256_before {
            return Err(PatchError::ConcurrentModification { path: self.path });
        }

        if options.backup {
            let backup_path = write_backup(&self.path, self.original.as_bytes())?;
            tracing::debug!(backup = %backup_path.display(), "wrote backup");
            report.backup_path = Some(backup_path);
        }

        fs::write(&self.path, self.outcome.content.as_bytes())
            .map_err(|source| PatchError::Write { path: self.path.clone(), source })?;
        report.written = true;

        if let Some(insertion) = &report.insertion {
            tracing::info!(
                path = %self.path.display(),
                line = insertion.line,
                "inserted fragment marker"
            );
        }
        Ok(report)
    }
}

/// Read `path` as UTF-8 text.
pub fn read_target(path: &Path) -> PatchResult<String> {
    fs::read_to_string(path).map_err(|source| PatchError::Read { path: path.to_path_buf(), source })
}

/// Read `path` and compute what the rule would do to it.
pub fn plan_patch(path: &Path, rule: &CompiledRule) -> PatchResult<PatchPlan> {
    let original = read_target(path)?;
    let sha256_before = sha256_hex(original.as_bytes());
    let occurrences = rule.count_matches(&original);
    let outcome = rule.apply(&original);
    tracing::debug!(path = %path.display(), occurrences, "planned patch");

    Ok(PatchPlan { path: path.to_path_buf(), original, outcome, occurrences, sha256_before })
}

/// Patch the first occurrence in `path` in place.
pub fn patch_file(
    path: &Path,
    rule: &CompiledRule,
    options: &PatchOptions,
) -> PatchResult<FileReport> {
    plan_patch(path, rule)?.commit(options)
}

/// Report whether `path` needs patching. Never writes.
pub fn check_file(path: &Path, rule: &CompiledRule) -> PatchResult<FileReport> {
    Ok(plan_patch(path, rule)?.report(false))
}

/// Suffixed candidates tried after the plain backup name is taken.
const MAX_BACKUP_SUFFIX: usize = 999;

/// Backup location for `path`: `<file>.<YYYYmmddHHMMSS>.bak` next to it.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    backup_path_with_suffix(path, &stamp, 0)
}

/// `<file>.<stamp>.bak` for `suffix == 0`, `<file>.<stamp>.<suffix>.bak` otherwise.
pub fn backup_path_with_suffix(path: &Path, stamp: &str, suffix: usize) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    if suffix == 0 {
        name.push(format!(".{stamp}.bak"));
    } else {
        name.push(format!(".{stamp}.{suffix}.bak"));
    }
    path.with_file_name(name)
}

/// Copy `contents` to a fresh backup next to `path`.
///
/// Existing backups are never overwritten; a numeric suffix is added when the
/// timestamped name is already taken.
pub fn write_backup(path: &Path, contents: &[u8]) -> PatchResult<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let mut suffix = 0;

    loop {
        let candidate = backup_path_with_suffix(path, &stamp, suffix);
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut file) => {
                file.write_all(contents)
                    .map_err(|source| PatchError::Backup { path: candidate.clone(), source })?;
                return Ok(candidate);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists && suffix < MAX_BACKUP_SUFFIX => {
                suffix += 1;
            }
            Err(source) => return Err(PatchError::Backup { path: candidate, source }),
        }
    }
}

/// SHA-256 of a byte slice as a hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> PatchResult<String> {
    let read_err = |source| PatchError::Read { path: path.to_path_buf(), source };
    let file = fs::File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
