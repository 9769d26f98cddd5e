//! Persistence core: string-serialized data sources.
//!
//! A data source presents a path-keyed get/set interface over a document
//! that lives in a plain file, inside a zip archive, or (read only) at a
//! URL:
//! - `Locator`: modifiers, format scheme and location of a source
//! - `Target`: the physical resource a locator resolves to
//! - `Format`: parse/render between raw text and a `Model`
//! - `StringDataSource`: lazy resolution, lazy population, and whole-document
//!   write-back on change
//!
//! # Example
//!
//! ```rust
//! use persistence_core::{Reader, Writer, KeyPath, Error};
//!
//! fn bump(store: &mut dyn persistence_core::Store, key: &KeyPath) -> Result<bool, Error> {
//!     let next = match store.get(key)? {
//!         Some(v) => v.parse::<u64>().unwrap_or(0) + 1,
//!         None => 1,
//!     };
//!     store.set(key, Some(&next.to_string()))
//! }
//! ```

pub mod archive;
mod error;
pub mod fetch;
mod format;
pub mod fs;
mod key_path;
pub mod loader;
mod locator;
mod model;
mod modifier;
mod source;
pub mod target;
mod traits;

pub use archive::FileHandle;
pub use error::{Cause, Error, Result, Stage};
pub use fetch::Fetch;
pub use format::{Format, FormatError};
pub use key_path::{KeyPath, KeyPathError};
pub use locator::{Locator, LocatorError, SourceOptions, ROOT_ENV};
pub use model::{Model, TreeModel};
pub use modifier::Modifiers;
pub use source::StringDataSource;
pub use target::Target;
pub use traits::{Reader, Store, Writer};

pub use url::Url;
