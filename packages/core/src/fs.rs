//! Raw file writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// How [`write_string`] treats the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Append instead of replacing the whole file.
    pub append: bool,
    /// Create the file (and missing parent directories) if absent.
    pub create: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            append: false,
            create: true,
        }
    }
}

/// Write `data` to `path`.
///
/// With the default options the file is created if needed and its previous
/// content is replaced entirely.
pub fn write_string(data: &str, path: &Path, options: WriteOptions) -> io::Result<()> {
    if options.create {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let mut f = fs::OpenOptions::new()
        .write(true)
        .create(options.create)
        .append(options.append)
        .truncate(!options.append)
        .open(path)?;

    f.write_all(data.as_bytes())?;
    f.sync_all()
}
