//! Reading and writing the config file.
//!
//! Writes go to a temporary sibling first and are renamed into place while
//! an advisory `fs2` lock is held on the target, so a concurrent reader sees
//! either the old or the new file, never a half-written one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use fs2::FileExt;
use tracing::debug;

/// Contents of `path`, or an empty document when it does not exist yet.
pub fn read_or_empty(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file missing, starting empty");
            Ok(String::new())
        }
        Err(err) => Err(err),
    }
}

fn with_lock<F, R>(path: &Path, f: F) -> io::Result<R>
where
    F: FnOnce() -> io::Result<R>,
{
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    file.lock_exclusive()?;
    let res = f();
    file.unlock()?;
    res
}

pub fn write_locked(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("yml.tmp");
    with_lock(path, || {
        let mut f = File::create(&tmp)?;
        f.write_all(text.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    })?;
    debug!(path = %path.display(), bytes = text.len(), "config written");
    Ok(())
}
