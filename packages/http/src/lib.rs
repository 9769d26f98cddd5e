//! # persistence-http
//!
//! Remote reads for persistence data sources.
//!
//! [`ReqwestFetcher`] implements [`persistence_core::Fetch`] with a blocking
//! reqwest client. Remote data sources are read only, so this crate only
//! ever issues `GET` requests.
//!
//! ```ignore
//! use std::sync::Arc;
//! use persistence_core::{key, Locator, Reader, SourceOptions};
//! use persistence_http::ReqwestFetcher;
//!
//! let fetcher = Arc::new(ReqwestFetcher::new()?);
//! let locator = Locator::parse("https:json://example.com/motd.json")?;
//! let options = SourceOptions::default();
//! let mut store = persistence_formats::connect(&locator, &options, Some(fetcher))?;
//! let motd = store.get(&key!("motd"))?;
//! ```

pub mod error;
pub mod fetcher;

pub use error::Error;
pub use fetcher::ReqwestFetcher;
