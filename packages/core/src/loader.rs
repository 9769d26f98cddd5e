//! Reading raw content from, and writing it back to, a resolved target.

use std::io;

use crate::archive::FileHandle;
use crate::error::{Error, Result, Stage};
use crate::fetch::Fetch;
use crate::fs::{self, WriteOptions};
use crate::target::Target;

/// Read the current serialized document behind `target`.
///
/// A standalone file that does not exist is bootstrapped: `blank` is written
/// to create it and returned as if it had been read. Missing archive entries
/// are not created.
pub fn load(
    uri: &str,
    target: &Target,
    blank: impl FnOnce() -> String,
    fetcher: Option<&dyn Fetch>,
) -> Result<String> {
    match target {
        Target::File(handle) => load_file(uri, handle, blank),
        Target::Remote(url) => {
            let fetcher = fetcher.ok_or_else(|| {
                Error::persistence(uri, Stage::Load, "no fetcher configured for remote data source")
            })?;
            log::debug!("Fetching {}...", url);
            fetcher
                .fetch(url)
                .map_err(|e| Error::persistence(uri, Stage::Load, e))
        }
    }
}

// TODO: honour a lock file written by concurrent writers once a locking
// protocol is agreed; until then a single writer per file is assumed.
fn load_file(uri: &str, handle: &FileHandle, blank: impl FnOnce() -> String) -> Result<String> {
    log::debug!("Reading {}...", handle.path().display());
    match handle.contents() {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound && !handle.is_archive_entry() => {
            let contents = blank();
            log::info!(
                "Creating {} for data source {}",
                handle.path().display(),
                uri
            );
            fs::write_string(&contents, handle.path(), WriteOptions::default())
                .map_err(|e| Error::persistence(uri, Stage::Load, e))?;
            Ok(contents)
        }
        Err(e) => Err(Error::persistence(uri, Stage::Load, e)),
    }
}

/// Replace the entire content behind `target` with `data`.
///
/// # Panics
///
/// Panics for remote targets. A remote data source must carry the
/// `READ_ONLY` modifier, which rejects writes before they reach this point;
/// getting here means the modifier set was built wrong.
pub fn store(uri: &str, target: &Target, data: &str) -> Result<()> {
    match target {
        Target::File(handle) => {
            if !handle.is_writable() {
                log::warn!(
                    "Refusing to write {}: target is not writable",
                    handle.path().display()
                );
                return Err(Error::ReadOnly {
                    uri: uri.to_string(),
                });
            }
            log::debug!("Writing {}...", handle.path().display());
            fs::write_string(data, handle.path(), WriteOptions::default())
                .map_err(|e| Error::persistence(uri, Stage::Write, e))
        }
        Target::Remote(_) => {
            reject_remote_sink(uri, target);
            Ok(())
        }
    }
}

/// Fail fast if `target` cannot accept writes at all.
///
/// # Panics
///
/// Panics for remote targets; see [`store`].
pub fn reject_remote_sink(uri: &str, target: &Target) {
    if let Target::Remote(url) = target {
        panic!(
            "HTTP/HTTPS output is unsupported ({}); data source {} must be marked readonly",
            url, uri
        );
    }
}
