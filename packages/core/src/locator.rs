//! Data source locators and construction options.
//!
//! A locator is a connection string of the form
//! `[modifier:]*scheme://location`, for example:
//!
//! - `json://plugins/data.json`: a file relative to the configured root
//! - `readonly:ini:///etc/app/settings.ini`: an absolute, read-only file
//! - `https:json://example.com/config.json`: a remote, read-only document

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::Modifiers;

/// Environment variable consulted by [`SourceOptions::from_env`].
pub const ROOT_ENV: &str = "PERSIST_ROOT";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("locator '{locator}' is missing '://'")]
    MissingSeparator { locator: String },

    #[error("locator '{locator}' has no scheme")]
    MissingScheme { locator: String },

    #[error("locator '{locator}' has no location")]
    MissingLocation { locator: String },

    #[error("unknown modifier '{modifier}' in locator '{locator}'")]
    UnknownModifier { locator: String, modifier: String },

    #[error("unsupported scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },
}

/// The logical identity of a data source: modifiers, format scheme, and
/// location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    modifiers: Modifiers,
    scheme: String,
    location: String,
}

impl Locator {
    /// Build a locator from parts without normalizing the modifiers.
    ///
    /// Unlike [`Locator::parse`], this does not add `READ_ONLY` to remote
    /// modifier sets. Writing through such a source panics.
    pub fn new(
        scheme: impl Into<String>,
        location: impl Into<String>,
        modifiers: Modifiers,
    ) -> Self {
        Locator {
            modifiers,
            scheme: scheme.into(),
            location: location.into(),
        }
    }

    /// Parse a connection string.
    ///
    /// ```rust
    /// use persistence_core::{Locator, Modifiers};
    ///
    /// let locator = Locator::parse("https:json://example.com/motd.json").unwrap();
    /// assert_eq!(locator.scheme(), "json");
    /// assert_eq!(locator.location(), "example.com/motd.json");
    /// assert!(locator.modifiers().contains(Modifiers::HTTPS | Modifiers::READ_ONLY));
    /// ```
    pub fn parse(s: &str) -> Result<Self, LocatorError> {
        let (prefix, location) = s
            .split_once("://")
            .ok_or_else(|| LocatorError::MissingSeparator {
                locator: s.to_string(),
            })?;

        let mut parts: Vec<&str> = prefix.split(':').collect();
        let scheme = parts.pop().unwrap_or_default();
        if scheme.is_empty() {
            return Err(LocatorError::MissingScheme {
                locator: s.to_string(),
            });
        }
        if location.is_empty() {
            return Err(LocatorError::MissingLocation {
                locator: s.to_string(),
            });
        }

        let mut modifiers = Modifiers::empty();
        for part in parts {
            let flag = Modifiers::from_locator_name(part).ok_or_else(|| {
                LocatorError::UnknownModifier {
                    locator: s.to_string(),
                    modifier: part.to_string(),
                }
            })?;
            modifiers |= flag;
        }

        // Remote sinks cannot be written to.
        if modifiers.is_remote() {
            modifiers |= Modifiers::READ_ONLY;
        }

        Ok(Locator {
            modifiers,
            scheme: scheme.to_ascii_lowercase(),
            location: location.to_string(),
        })
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The format scheme, lowercased.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The file path, or host and path for remote sources.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modifiers.is_empty() {
            write!(f, "{}:", self.modifiers)?;
        }
        write!(f, "{}://{}", self.scheme, self.location)
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locator::parse(s)
    }
}

/// Environment-level settings shared by the data sources of a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Directory that relative file locations are resolved against.
    pub root: PathBuf,
    /// Timeout for remote fetches, applied by the fetcher.
    pub timeout: Option<Duration>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceOptions {
            root: PathBuf::from("."),
            timeout: None,
        }
    }
}

impl SourceOptions {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        SourceOptions {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the root taken from `PERSIST_ROOT` when set.
    pub fn from_env() -> Self {
        match std::env::var_os(ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::with_root(root),
            _ => Self::default(),
        }
    }
}
