//! Single-writer lock file next to the database.
//!
//! Two syncs on one database would collide on the staging table names, so a
//! sync refuses to start while another process holds the lock.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::CliError;

pub(crate) struct SyncLockGuard {
    path: PathBuf,
}

impl Drop for SyncLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

/// Take the lock, clearing it first if the holder is gone.
pub(crate) fn acquire(lock_path: &Path) -> Result<SyncLockGuard, CliError> {
    match try_acquire(lock_path) {
        Ok(guard) => Ok(guard),
        Err(LockState::Stale) => {
            log::debug!("Removing stale lock {}", lock_path.display());
            let _ = std::fs::remove_file(lock_path);
            try_acquire(lock_path).map_err(|_| CliError::locked(lock_path, None))
        }
        Err(LockState::HeldBy(pid)) => Err(CliError::locked(lock_path, Some(pid))),
        Err(LockState::Unknown) => Err(CliError::locked(lock_path, None)),
    }
}

fn try_acquire(lock_path: &Path) -> Result<SyncLockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(SyncLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
