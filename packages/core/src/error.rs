//! Error types for data sources.
//!
//! A data source surfaces exactly two kinds of recoverable failure:
//! - [`Error::ReadOnly`]: the store is not writable. Callers may skip the
//!   write or report it.
//! - [`Error::Persistence`]: the store is broken. Resolution, loading,
//!   parsing, rendering or writing failed; the original cause is kept as the
//!   error source.
//!
//! Writing through a remote target is not an error value at all: it is a
//! programming mistake in whoever built the modifier set, and panics.

use std::fmt;

use crate::locator::LocatorError;

/// Boxed underlying cause of a persistence failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The step of the data source lifecycle that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Load,
    Parse,
    Render,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Resolve => "resolve",
            Stage::Load => "load",
            Stage::Parse => "parse",
            Stage::Render => "render",
            Stage::Write => "write",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("data source {uri} is read only")]
    ReadOnly { uri: String },

    #[error("could not {stage} data source {uri}: {source}")]
    Persistence {
        uri: String,
        stage: Stage,
        #[source]
        source: Cause,
    },

    #[error("{0}")]
    Locator(#[from] LocatorError),
}

impl Error {
    pub(crate) fn persistence(uri: &str, stage: Stage, source: impl Into<Cause>) -> Self {
        Error::Persistence {
            uri: uri.to_string(),
            stage,
            source: source.into(),
        }
    }

    /// Whether this is a read-only violation rather than a broken store.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Error::ReadOnly { .. })
    }

    /// The failed lifecycle step, for persistence failures.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Persistence { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying I/O error, if the cause chain starts with one.
    pub fn io_cause(&self) -> Option<&std::io::Error> {
        match self {
            Error::Persistence { source, .. } => source.downcast_ref::<std::io::Error>(),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
