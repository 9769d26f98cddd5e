//! Opening the store a command runs against.

use std::sync::Arc;

use persistence_core::{Fetch, Locator, SourceOptions, Store};
use persistence_http::ReqwestFetcher;

use crate::commands::CliError;

/// Parse `locator` and connect to it, wiring a fetcher for remote sources.
pub fn open_store(locator: &str, options: &SourceOptions) -> Result<Box<dyn Store>, CliError> {
    let locator = Locator::parse(locator).map_err(persistence_core::Error::from)?;

    let fetcher: Option<Arc<dyn Fetch>> = if locator.modifiers().is_remote() {
        Some(Arc::new(ReqwestFetcher::from_timeout(options.timeout)?))
    } else {
        None
    };

    Ok(persistence_formats::connect(&locator, options, fetcher)?)
}
