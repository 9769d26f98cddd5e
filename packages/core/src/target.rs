//! Resolution of a locator to the physical resource behind it.

use std::fmt;
use std::path::Path;

use url::Url;

use crate::archive::FileHandle;
use crate::{Locator, Modifiers};

/// The one concrete I/O endpoint a data source reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A standalone file or an entry inside an archive.
    File(FileHandle),
    /// A remote document. Read only.
    Remote(Url),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::File(handle) => write!(f, "{}", handle.path().display()),
            Target::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Determine the target of `locator`, resolving relative file locations
/// against `root`.
///
/// Pure apart from file metadata lookups; nothing is read or fetched.
pub fn resolve(locator: &Locator, root: &Path) -> Result<Target, url::ParseError> {
    let modifiers = locator.modifiers();
    if !modifiers.is_remote() {
        let location = Path::new(locator.location());
        let path = if location.is_absolute() {
            location.to_path_buf()
        } else {
            root.join(location)
        };
        return Ok(Target::File(FileHandle::open(path)));
    }

    let scheme = if modifiers.contains(Modifiers::HTTPS) {
        "https"
    } else {
        "http"
    };
    let url = Url::parse(&format!("{}://{}", scheme, locator.location()))?;
    Ok(Target::Remote(url))
}
