//! Collaborator traits and error types for the remote storage backend
//!
//! The crawler only ever talks to the backend through these two traits, so
//! tests can substitute in-memory implementations.

use crate::remote::FolderPage;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the storage backend
///
/// `PathNotFound` is the one failure kind the crawler tolerates (an absent
/// `in`/`out` subfolder is treated as empty); everything else is opaque and
/// fatal to the traversal that hit it.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Storage API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed listing payload: {0}")]
    Payload(String),
}

/// Result type for remote storage operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Lists the direct children of a folder, one page at a time
///
/// The shared-collection scope is part of the implementor's identity (the
/// concrete client is constructed against one shared folder), so paths here
/// are always relative to that collection's root.
#[async_trait]
pub trait FolderLister: Send + Sync {
    /// Lists the first page of a folder's direct children.
    ///
    /// `path` is `""` for the collection root, otherwise `/`-prefixed.
    async fn list_folder(&self, path: &str) -> RemoteResult<FolderPage>;

    /// Lists the next page for a cursor returned by a previous call.
    async fn list_folder_continue(&self, cursor: &str) -> RemoteResult<FolderPage>;
}

/// Fetches the full content of a single file
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch_content(&self, path: &str) -> RemoteResult<Vec<u8>>;
}
