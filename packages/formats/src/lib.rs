//! # persistence-formats
//!
//! Concrete serialization formats for string-backed data sources, and a
//! factory that turns a locator into a ready-to-use store.
//!
//! | scheme                | format         |
//! |-----------------------|----------------|
//! | `json`                | [`JsonFormat`] |
//! | `ini`, `properties`   | [`IniFormat`]  |
//!
//! ```rust,no_run
//! use persistence_core::{key, Locator, SourceOptions, Writer};
//! use persistence_formats::connect;
//!
//! let locator = Locator::parse("json://data/players.json")?;
//! let mut store = connect(&locator, &SourceOptions::default(), None)?;
//! store.set(&key!("players.notch.home"), Some("0,64,0"))?;
//! # Ok::<(), persistence_core::Error>(())
//! ```

pub mod ini;
pub mod json;

use std::sync::Arc;

use persistence_core::{
    Error, Fetch, Locator, LocatorError, Modifiers, SourceOptions, Store, StringDataSource,
};

pub use ini::IniFormat;
pub use json::JsonFormat;

/// Build the data source described by `locator`.
///
/// Remote locators read through `fetcher`; without one their first read
/// fails.
pub fn connect(
    locator: &Locator,
    options: &SourceOptions,
    fetcher: Option<Arc<dyn Fetch>>,
) -> Result<Box<dyn Store>, Error> {
    fn finish<F>(source: StringDataSource<F>, fetcher: Option<Arc<dyn Fetch>>) -> Box<dyn Store>
    where
        F: persistence_core::Format + 'static,
        F::Model: 'static,
    {
        match fetcher {
            Some(fetcher) => Box::new(source.with_fetcher(fetcher)),
            None => Box::new(source),
        }
    }

    log::debug!("Connecting data source {}", locator);
    let store = match locator.scheme() {
        "json" => {
            let format = if locator.modifiers().contains(Modifiers::PRETTY_PRINT) {
                JsonFormat::pretty()
            } else {
                JsonFormat::new()
            };
            finish(
                StringDataSource::new(locator.clone(), format, options),
                fetcher,
            )
        }
        "ini" | "properties" => finish(
            StringDataSource::new(locator.clone(), IniFormat, options),
            fetcher,
        ),
        other => {
            return Err(Error::Locator(LocatorError::UnsupportedScheme {
                scheme: other.to_string(),
            }))
        }
    };
    Ok(store)
}
