use thiserror::Error;

/// Failures surfaced by parsing, derivation and pagination.
///
/// Absence (no extent declared, no matching link, no next page) is never an
/// error; those cases are `Option`/empty results on the individual APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// An extent is present but structurally invalid (wrong arity, bad entry).
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    /// An extent is recognized but out of scope, e.g. a 6-coordinate 3-D bbox.
    /// Distinct from [`Error::InvalidExtent`] so callers can tell bad data
    /// from unsupported data.
    #[error("Unsupported extent: {0}")]
    UnsupportedExtent(String),

    /// A coordinate value is neither a JSON number nor a numeric string.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid date-time: {0}")]
    InvalidDateTime(#[from] chrono::ParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure during a pagination walk, propagated unmodified.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A page fetch during a pagination walk returned a non-success status.
    #[error("Unexpected status {status} fetching {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// The chain of "next" links revisited a URL or exceeded the page cap.
    #[error("Pagination loop suspected after {pages} pages")]
    PaginationLoop { pages: usize },

    /// The API description parsed as neither JSON nor YAML.
    #[error("Invalid API document: {0}")]
    InvalidApiDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
