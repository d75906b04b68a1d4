//! Content script errors.

use thiserror::Error;
use turnstyle_common::url::UrlError;
use turnstyle_storage::StorageError;

/// A request or operation the content script could not complete.
///
/// None of these are fatal to the page; the handler turns them into an error
/// response and keeps serving requests.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The storage backend failed or timed out.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A URL was rejected; the text is shown to the user.
    #[error(transparent)]
    Url(#[from] UrlError),
    /// User input was rejected; the text is shown to the user.
    #[error("{0}")]
    Validation(&'static str),
    /// The reserved styles key cannot hold a page association.
    #[error("'{0}' is reserved and can't be used as a page URL")]
    ReservedKey(String),
    /// A request lacked a field its instruction needs.
    #[error("request is missing '{0}'")]
    MissingField(&'static str),
    /// A request could not be decoded.
    #[error("malformed request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
    /// The configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}
