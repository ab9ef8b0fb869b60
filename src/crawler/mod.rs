//! Test-case crawler
//!
//! This module contains the core crawling logic:
//! - Three-level traversal of the remote tree (contests → problems → files)
//! - Skip-set and limit enforcement at the contest level
//! - Paginated listing and concurrent `in`/`out` download per problem
//! - Join-by-key pairing of input/output files into test-case records

mod coordinator;
mod pairing;

pub use coordinator::TestCaseCrawler;

use crate::config::Config;
use crate::model::TestCase;
use crate::remote::SharedFolderClient;
use std::collections::HashSet;

/// Runs a complete harvest using the configured shared-folder backend
///
/// Builds the concrete storage client from the `[storage]` section, then
/// crawls with the skip set and limit from the `[harvest]` section. This is
/// the entry point the CLI uses; library callers who need custom
/// collaborators construct a [`TestCaseCrawler`] directly.
pub async fn harvest(config: &Config) -> crate::Result<Vec<TestCase>> {
    let client = SharedFolderClient::from_config(&config.storage);
    let crawler = TestCaseCrawler::new(client.clone(), client);

    let skip: HashSet<String> = config.harvest.skip.iter().cloned().collect();
    crawler.crawl(&skip, config.harvest.limit).await
}
