//! File handles that may point inside zip archives.
//!
//! A path such as `plugins/bundle.zip/config/settings.json` names the entry
//! `config/settings.json` of the archive `plugins/bundle.zip`. The first
//! existing ancestor of a path that does not exist decides: if it is a
//! regular file, the path is an archive entry; otherwise it is a plain
//! file that has not been created yet.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchiveEntry {
    archive: PathBuf,
    entry: String,
}

/// A readable handle on a standalone file or an entry inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    archive: Option<ArchiveEntry>,
}

impl FileHandle {
    /// Classify `path` as a standalone file or an archive entry.
    ///
    /// This only inspects file metadata; no file is opened.
    pub fn open(path: impl Into<PathBuf>) -> FileHandle {
        let path = path.into();
        let archive = if path.exists() {
            None
        } else {
            Self::find_archive(&path)
        };
        FileHandle { path, archive }
    }

    fn find_archive(path: &Path) -> Option<ArchiveEntry> {
        let ancestor = path.ancestors().skip(1).find(|a| a.exists())?;
        if !ancestor.is_file() {
            return None;
        }

        let inner = path.strip_prefix(ancestor).ok()?;
        let entry = inner
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Some(ArchiveEntry {
            archive: ancestor.to_path_buf(),
            entry,
        })
    }

    /// The full path this handle was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_archive_entry(&self) -> bool {
        self.archive.is_some()
    }

    /// The containing archive, for archive entries.
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_ref().map(|a| a.archive.as_path())
    }

    /// Whether writing to [`path`](Self::path) can succeed.
    ///
    /// Archive entries are never writable. A missing standalone file is
    /// writable when its nearest existing ancestor is a writable directory.
    pub fn is_writable(&self) -> bool {
        if self.archive.is_some() {
            return false;
        }

        let existing = match self.path.ancestors().find(|a| a.exists()) {
            Some(p) => p,
            // A relative path with no existing ancestor lives under the
            // current directory.
            None => Path::new("."),
        };

        match fs::metadata(existing) {
            Ok(attr) if existing == self.path => attr.is_file() && !attr.permissions().readonly(),
            Ok(attr) => attr.is_dir() && !attr.permissions().readonly(),
            Err(_) => false,
        }
    }

    /// Read the whole file or archive entry as UTF-8 text.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] when the file, the archive or
    /// the entry does not exist.
    pub fn contents(&self) -> io::Result<String> {
        match &self.archive {
            None => fs::read_to_string(&self.path),
            Some(entry) => Self::read_entry(entry),
        }
    }

    fn read_entry(entry: &ArchiveEntry) -> io::Result<String> {
        let file = fs::File::open(&entry.archive)?;
        let mut archive = zip::ZipArchive::new(file).map_err(zip_to_io)?;
        let mut zipped = archive.by_name(&entry.entry).map_err(zip_to_io)?;

        let mut contents = String::new();
        zipped.read_to_string(&mut contents)?;
        Ok(contents)
    }
}

fn zip_to_io(error: zip::result::ZipError) -> io::Error {
    match error {
        zip::result::ZipError::Io(e) => e,
        zip::result::ZipError::FileNotFound => {
            io::Error::new(io::ErrorKind::NotFound, "entry not found in archive")
        }
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
