use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    pub output: OutputConfig,
}

/// Remote storage backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Public shared-link URL of the test-case folder tree
    #[serde(rename = "shared-link-url")]
    pub shared_link_url: String,

    /// Static bearer token; the shared folder is public, so this is optional
    #[serde(rename = "access-token", default)]
    pub access_token: Option<String>,

    /// RPC endpoint base (overridable for tests)
    #[serde(rename = "api-base-url", default = "default_api_base_url")]
    pub api_base_url: String,

    /// Content endpoint base (overridable for tests)
    #[serde(rename = "content-base-url", default = "default_content_base_url")]
    pub content_base_url: String,
}

/// Problem-metadata endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    #[serde(rename = "problems-url", default = "default_problems_url")]
    pub problems_url: String,
}

/// Crawl policy configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarvestConfig {
    /// Maximum number of newly processed contest folders per run; 0 = all
    #[serde(default)]
    pub limit: usize,

    /// Contest folder names to exclude entirely
    #[serde(default)]
    pub skip: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the JSON files are written under
    pub directory: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            problems_url: default_problems_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.dropboxapi.com/2".to_string()
}

fn default_content_base_url() -> String {
    "https://content.dropboxapi.com/2".to_string()
}

fn default_problems_url() -> String {
    "https://kenkoooo.com/atcoder/resources/problems.json".to_string()
}
