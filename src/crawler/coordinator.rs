//! Crawl orchestration
//!
//! The crawler walks a three-level remote tree:
//!
//! ```text
//! /<contest>/<problem>/{in,out}/<file>
//! ```
//!
//! Contests and problems are processed strictly sequentially; the two
//! `in`/`out` sides of one problem are listed and downloaded concurrently.
//! At most two outbound requests are in flight at any instant.

use crate::crawler::pairing::pair_test_cases;
use crate::model::{TestCase, TestCaseFile};
use crate::remote::{FileFetcher, FolderEntry, FolderLister, RemoteError, RemoteResult};
use std::collections::HashSet;

/// Walks the remote contest tree and assembles test-case records
///
/// Generic over the two storage collaborators so tests can inject in-memory
/// implementations. All state is per-invocation; the crawler itself is
/// stateless and can be reused across calls.
pub struct TestCaseCrawler<L, F> {
    lister: L,
    fetcher: F,
}

impl<L: FolderLister, F: FileFetcher> TestCaseCrawler<L, F> {
    pub fn new(lister: L, fetcher: F) -> Self {
        Self { lister, fetcher }
    }

    /// Crawls every contest folder under the collection root.
    ///
    /// Contest folders named in `skip` are excluded entirely and do not
    /// count toward `limit`. `limit` bounds the number of newly processed
    /// contests this call; `0` means unbounded. Any fatal error aborts the
    /// whole crawl with no partial results.
    pub async fn crawl(
        &self,
        skip: &HashSet<String>,
        limit: usize,
    ) -> crate::Result<Vec<TestCase>> {
        let root = self.lister.list_folder("").await?;
        tracing::info!("Found {} contest folders", root.entries.len());

        let mut test_cases = Vec::new();
        let mut processed = 0;
        for entry in &root.entries {
            let FolderEntry::Folder { name } = entry else {
                tracing::debug!("Ignoring non-folder root entry '{}'", entry.name());
                continue;
            };

            if skip.contains(name) {
                tracing::info!("Skipped contest '{}'", name);
                continue;
            }

            let contest_cases = self.crawl_contest(name).await?;
            test_cases.extend(contest_cases);
            tracing::info!(
                "Finished fetching test cases for '{}' ({} records so far)",
                name,
                test_cases.len()
            );

            processed += 1;
            if limit > 0 && processed == limit {
                tracing::info!("Reached contest limit of {}", limit);
                return Ok(test_cases);
            }
        }

        Ok(test_cases)
    }

    /// Crawls one contest folder: every problem subfolder in listing order.
    ///
    /// Fails fast on the first problem that errors; no partial aggregation
    /// across problems.
    pub async fn crawl_contest(&self, contest_folder_name: &str) -> crate::Result<Vec<TestCase>> {
        let page = self
            .lister
            .list_folder(&format!("/{}", contest_folder_name))
            .await?;

        let mut test_cases = Vec::new();
        for entry in &page.entries {
            let FolderEntry::Folder { name } = entry else {
                continue;
            };

            let problem_cases = self.crawl_problem(contest_folder_name, name).await?;
            tracing::info!(
                "Fetched {} test cases for '{}/{}'",
                problem_cases.len(),
                contest_folder_name,
                name
            );
            test_cases.extend(problem_cases);
        }

        Ok(test_cases)
    }

    /// Crawls one problem folder: concurrent `in`/`out` download, then
    /// pairing.
    ///
    /// The two sides run as joined futures; the first fatal error cancels
    /// the sibling's in-flight work and propagates. Output is sorted by
    /// file name ascending regardless of listing or completion order.
    pub async fn crawl_problem(
        &self,
        contest_folder_name: &str,
        problem_folder_name: &str,
    ) -> crate::Result<Vec<TestCase>> {
        let in_path = format!("/{}/{}/in", contest_folder_name, problem_folder_name);
        let out_path = format!("/{}/{}/out", contest_folder_name, problem_folder_name);

        let (in_files, out_files) = tokio::try_join!(
            self.download_side(&in_path),
            self.download_side(&out_path),
        )?;

        Ok(pair_test_cases(
            contest_folder_name,
            problem_folder_name,
            in_files,
            out_files,
        ))
    }

    /// Downloads one `in` or `out` side, treating an absent folder as empty.
    ///
    /// Some archived problems lack an `out` (rarely an `in`) folder; that
    /// shows up as a path-not-found listing failure and yields zero files.
    async fn download_side(&self, folder_path: &str) -> RemoteResult<Vec<TestCaseFile>> {
        match self.download_folder_files(folder_path).await {
            Ok(files) => Ok(files),
            Err(RemoteError::PathNotFound { .. }) => {
                tracing::debug!("Folder '{}' not found, treating as empty", folder_path);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Lists a folder to exhaustion (following continuation cursors), then
    /// downloads the content of every file entry.
    async fn download_folder_files(&self, folder_path: &str) -> RemoteResult<Vec<TestCaseFile>> {
        let mut entries = Vec::new();
        let mut cursor = {
            let page = self.lister.list_folder(folder_path).await?;
            entries.extend(page.entries);
            page.cursor
        };
        while let Some(c) = cursor {
            let page = self.lister.list_folder_continue(&c).await?;
            entries.extend(page.entries);
            cursor = page.cursor;
        }

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            let FolderEntry::File { name } = entry else {
                continue;
            };

            let file_path = format!("{}/{}", folder_path, name);
            let content = self.fetcher.fetch_content(&file_path).await?;
            files.push(TestCaseFile {
                file_name: name,
                content: String::from_utf8_lossy(&content).into_owned(),
            });
        }

        Ok(files)
    }
}
