//! Remote fetching contract.

use url::Url;

/// Synchronously retrieves the body of a remote resource as text.
///
/// Transport failures are returned as-is; timeout policy belongs to the
/// implementation.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: Fetch + ?Sized> Fetch for std::sync::Arc<T> {
    fn fetch(&self, url: &Url) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().fetch(url)
    }
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    fn fetch(&self, url: &Url) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().fetch(url)
    }
}
