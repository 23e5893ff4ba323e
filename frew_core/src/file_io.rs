//! # File I/O Module
//!
//! Loading and saving of model documents with safety features:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Format validation**: Only `.json` model documents are accepted;
//!   a binary `.fwd` model must first be converted through the engine
//!   (see [`crate::engine::model_to_document`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::file_io::{load_document, save_document, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("model.json");
//!
//! // Acquire lock before a save cycle on a shared drive
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//!
//! let mut doc = load_document(path)?;
//! doc.clear_results();
//! save_document(&doc, path)?;
//!
//! drop(lock); // released
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::ModelDocument;
use crate::errors::{FrewError, FrewResult};

fn check_json_extension(path: &Path) -> FrewResult<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(FrewError::format(
            path.display().to_string(),
            "Model document path must end with .json",
        ));
    }
    Ok(())
}

/// Load a model document from a file.
///
/// # Returns
///
/// * `Ok(ModelDocument)` - Successfully loaded document
/// * `Err(FrewError::NotFound)` - Path does not exist
/// * `Err(FrewError::Format)` - Wrong extension or unparseable content
/// * `Err(FrewError::FileError)` - I/O error
pub fn load_document(path: &Path) -> FrewResult<ModelDocument> {
    if !path.exists() {
        return Err(FrewError::not_found(
            "model file",
            path.display().to_string(),
        ));
    }
    check_json_extension(path)?;

    let mut file = File::open(path)
        .map_err(|e| FrewError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| FrewError::file_error("read", path.display().to_string(), e.to_string()))?;

    let doc: ModelDocument = serde_json::from_str(&contents).map_err(|e| {
        FrewError::format(
            path.display().to_string(),
            format!("Content is not a Frew model document: {e}"),
        )
    })?;
    debug!("loaded model document from {}", path.display());
    Ok(doc)
}

/// Save a model document to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize the document to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the target (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write;
/// a failed rename removes the partial temp file before the error
/// propagates.
pub fn save_document(doc: &ModelDocument, path: &Path) -> FrewResult<()> {
    check_json_extension(path)?;

    let json = serde_json::to_string(doc).map_err(|e| FrewError::Serialization {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        FrewError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FrewError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FrewError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FrewError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("saved model document to {}", path.display());
    Ok(())
}

/// Lock file metadata stored in `.lock` sidecar files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. A `.lock` sidecar with metadata for user visibility
pub struct FileLock {
    model_path: PathBuf,
    lock_path: PathBuf,
    /// The underlying file handle (keeps the OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a model file.
    ///
    /// A lock left behind by a process that is no longer running on this
    /// machine, or that is older than 24 hours, is treated as stale and
    /// taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> FrewResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(FrewError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                FrewError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            FrewError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| FrewError::Serialization {
                reason: e.to_string(),
            })?;
        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            FrewError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;
        lock_file.sync_all().map_err(|e| {
            FrewError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            model_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the model file
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the sidecar; the OS lock releases with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(model_path: &Path) -> PathBuf {
    let mut lock_path = model_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> FrewResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        FrewError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(|e| FrewError::Serialization {
        reason: e.to_string(),
    })
}

/// A lock is stale when the process that created it is gone (same machine
/// only) or the lock is older than 24 hours.
fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().is_some_and(|machine| machine == info.machine) && !process_alive(info.pid) {
        return true;
    }
    (Utc::now() - info.locked_at).num_hours() > 24
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    fs::metadata(format!("/proc/{pid}")).is_ok()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {pid}"), "/NH"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}
