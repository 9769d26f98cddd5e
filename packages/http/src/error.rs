#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET {url} returned {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },
}
