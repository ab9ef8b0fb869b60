//! Shared-folder storage client
//!
//! Implements [`FolderLister`] and [`FileFetcher`] against the Dropbox HTTP
//! API, scoped to one publicly shared folder link. Only the three calls the
//! crawler needs are covered: `files/list_folder`,
//! `files/list_folder/continue` and `sharing/get_shared_link_file`.

use crate::config::StorageConfig;
use crate::remote::{FileFetcher, FolderEntry, FolderLister, FolderPage, RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "https://api.dropboxapi.com/2";
const DEFAULT_CONTENT_BASE_URL: &str = "https://content.dropboxapi.com/2";

/// Client for one publicly shared folder tree
///
/// Cloning is cheap; the underlying HTTP client is shared.
#[derive(Debug, Clone)]
pub struct SharedFolderClient {
    http: reqwest::Client,
    shared_link_url: String,
    access_token: Option<String>,
    api_base_url: String,
    content_base_url: String,
}

impl SharedFolderClient {
    /// Creates a client for the given shared link, using the public API
    /// endpoints.
    pub fn new(shared_link_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            shared_link_url: shared_link_url.into(),
            access_token,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            content_base_url: DEFAULT_CONTENT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API and content endpoints (used by tests to point at a
    /// mock server).
    pub fn with_endpoints(
        mut self,
        api_base_url: impl Into<String>,
        content_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.content_base_url = content_base_url.into();
        self
    }

    /// Builds a client from the `[storage]` configuration section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.shared_link_url.clone(), config.access_token.clone())
            .with_endpoints(config.api_base_url.clone(), config.content_base_url.clone())
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl FolderLister for SharedFolderClient {
    async fn list_folder(&self, path: &str) -> RemoteResult<FolderPage> {
        let url = format!("{}/files/list_folder", self.api_base_url);
        let response = self
            .post(&url)
            .json(&ListFolderRequest {
                path,
                shared_link: SharedLink {
                    url: &self.shared_link_url,
                },
            })
            .send()
            .await?;

        let response = check_status(path, response).await?;
        let decoded: ListFolderResponse = response.json().await?;
        Ok(decoded.into_page())
    }

    async fn list_folder_continue(&self, cursor: &str) -> RemoteResult<FolderPage> {
        let url = format!("{}/files/list_folder/continue", self.api_base_url);
        let response = self
            .post(&url)
            .json(&ListFolderContinueRequest { cursor })
            .send()
            .await?;

        let response = check_status(cursor, response).await?;
        let decoded: ListFolderResponse = response.json().await?;
        Ok(decoded.into_page())
    }
}

#[async_trait]
impl FileFetcher for SharedFolderClient {
    async fn fetch_content(&self, path: &str) -> RemoteResult<Vec<u8>> {
        let url = format!("{}/sharing/get_shared_link_file", self.content_base_url);
        let arg = serde_json::to_string(&GetSharedLinkFileArg {
            url: &self.shared_link_url,
            path,
        })
        .map_err(|e| RemoteError::Payload(e.to_string()))?;

        let response = self
            .post(&url)
            .header("Dropbox-API-Arg", arg)
            .send()
            .await?;

        let response = check_status(path, response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[derive(Serialize)]
struct ListFolderRequest<'a> {
    path: &'a str,
    shared_link: SharedLink<'a>,
}

#[derive(Serialize)]
struct SharedLink<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct ListFolderContinueRequest<'a> {
    cursor: &'a str,
}

#[derive(Serialize)]
struct GetSharedLinkFileArg<'a> {
    url: &'a str,
    path: &'a str,
}

#[derive(Deserialize)]
struct ListFolderResponse {
    entries: Vec<RawEntry>,
    cursor: String,
    has_more: bool,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = ".tag")]
    tag: String,
    name: String,
}

impl ListFolderResponse {
    fn into_page(self) -> FolderPage {
        let entries = self
            .entries
            .into_iter()
            .filter_map(|entry| match entry.tag.as_str() {
                "file" => Some(FolderEntry::File { name: entry.name }),
                "folder" => Some(FolderEntry::Folder { name: entry.name }),
                other => {
                    tracing::debug!("Ignoring listing entry '{}' of kind '{}'", entry.name, other);
                    None
                }
            })
            .collect();

        let cursor = self.has_more.then_some(self.cursor);
        FolderPage { entries, cursor }
    }
}

/// Maps a non-success response to the error taxonomy.
///
/// The API reports path lookup failures as HTTP 409 with a
/// `path/...` error summary; those become [`RemoteError::PathNotFound`] so
/// the crawler can tolerate absent subfolders. Everything else is opaque.
async fn check_status(context: &str, response: reqwest::Response) -> RemoteResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status.as_u16() == 409 && is_path_error(&message) {
        return Err(RemoteError::PathNotFound {
            path: context.to_string(),
        });
    }

    Err(RemoteError::Api {
        status: status.as_u16(),
        message,
    })
}

fn is_path_error(body: &str) -> bool {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        error_summary: String,
    }

    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error_summary.starts_with("path/"))
        .unwrap_or(false)
}
