use thiserror::Error;

/// Error kinds surfaced by the library.
///
/// `Config` and `PaginationUnsupported` abort a run before any destructive
/// side effect. `Search` is recovered locally by the album resolver, which
/// falls back to the original album edition. `Catalog` covers batch and
/// playlist requests that have no fallback and therefore propagate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what}: {total} results reported but only a single page of {limit} is supported")]
    PaginationUnsupported {
        what: &'static str,
        total: u64,
        limit: u64,
    },

    #[error("search request failed: {0}")]
    Search(String),

    #[error("catalog request failed: {0}")]
    Catalog(String),

    #[error("authentication failed: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Catalog(e.to_string())
    }
}
