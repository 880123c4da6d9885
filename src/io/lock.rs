use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Name of the lock file inside `.pmlite/`
pub const LOCK_FILE: &str = ".lock";

/// How long a write command waits for another `pm` process
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive hold on a workspace's store for one read-modify-write cycle.
///
/// The lock file is permanent. Every `pm` process locks the same inode, and
/// the `flock` is released when the handle closes. While held, the file
/// carries the holder's pid so a waiting command can say who it waited on.
pub struct WriteLock {
    file: File,
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("workspace store is busy ({holder}), gave up after {waited:?}")]
    Busy { holder: String, waited: Duration },
    #[error("lock error: {0}")]
    Io(#[from] std::io::Error),
}

impl WriteLock {
    /// Take the write lock for the `.pmlite/` directory `dir`, polling until
    /// `wait` has elapsed.
    pub fn acquire(dir: &Path, wait: Duration) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE);
        let mut file = open_lock_file(&path)?;

        let start = Instant::now();
        let mut logged = false;
        while let Err(e) = try_flock(&file) {
            if start.elapsed() >= wait {
                return Err(LockError::Busy {
                    holder: describe_holder(&mut file),
                    waited: wait,
                });
            }
            if !logged {
                tracing::debug!(path = %path.display(), error = %e, "waiting for workspace lock");
                logged = true;
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        write!(file, "{}", std::process::id())?;
        file.flush()?;
        tracing::debug!(path = %path.display(), "workspace lock acquired");
        Ok(WriteLock { file, path })
    }

    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, DEFAULT_WAIT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        // Clear the pid while still holding the flock; the file stays on disk.
        let _ = self.file.set_len(0);
        tracing::debug!(path = %self.path.display(), "workspace lock released");
    }
}

fn open_lock_file(path: &Path) -> Result<File, LockError> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|source| LockError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn describe_holder(file: &mut File) -> String {
    let mut pid = String::new();
    let read = file
        .seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_string(&mut pid));
    match (read, pid.trim()) {
        (Ok(_), pid) if !pid.is_empty() => format!("held by pid {}", pid),
        _ => "held by another pm process".to_string(),
    }
}

#[cfg(unix)]
fn try_flock(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_flock(_file: &File) -> std::io::Result<()> {
    Ok(())
}
