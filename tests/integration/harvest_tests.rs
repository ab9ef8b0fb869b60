//! Integration tests for the test-case crawler
//!
//! These tests drive full crawls end-to-end against an in-memory remote
//! tree implementing the storage collaborator traits.

use async_trait::async_trait;
use caseharvest::remote::{
    FileFetcher, FolderEntry, FolderLister, FolderPage, RemoteError, RemoteResult,
};
use caseharvest::{TestCase, TestCaseCrawler};
use std::collections::{HashMap, HashSet};

/// In-memory remote tree. Folder listings are stored as page sequences;
/// continuation cursors are `<path>#<page index>`.
#[derive(Default, Clone)]
struct FakeRemote {
    folders: HashMap<String, Vec<Vec<FolderEntry>>>,
    files: HashMap<String, String>,
    missing: HashSet<String>,
}

impl FakeRemote {
    fn folder(mut self, path: &str, pages: Vec<Vec<FolderEntry>>) -> Self {
        self.folders.insert(path.to_string(), pages);
        self
    }

    fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    fn missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    fn crawler(&self) -> TestCaseCrawler<FakeRemote, FakeRemote> {
        TestCaseCrawler::new(self.clone(), self.clone())
    }

    fn page_at(&self, path: &str, index: usize) -> RemoteResult<FolderPage> {
        let pages = self.folders.get(path).ok_or_else(|| RemoteError::Api {
            status: 409,
            message: format!("unexpected path '{}'", path),
        })?;
        let cursor = (index + 1 < pages.len()).then(|| format!("{}#{}", path, index + 1));
        Ok(FolderPage {
            entries: pages[index].clone(),
            cursor,
        })
    }
}

#[async_trait]
impl FolderLister for FakeRemote {
    async fn list_folder(&self, path: &str) -> RemoteResult<FolderPage> {
        if self.missing.contains(path) {
            return Err(RemoteError::PathNotFound {
                path: path.to_string(),
            });
        }
        self.page_at(path, 0)
    }

    async fn list_folder_continue(&self, cursor: &str) -> RemoteResult<FolderPage> {
        let (path, index) = cursor.rsplit_once('#').expect("malformed test cursor");
        self.page_at(path, index.parse().unwrap())
    }
}

#[async_trait]
impl FileFetcher for FakeRemote {
    async fn fetch_content(&self, path: &str) -> RemoteResult<Vec<u8>> {
        self.files
            .get(path)
            .map(|c| c.as_bytes().to_vec())
            .ok_or_else(|| RemoteError::PathNotFound {
                path: path.to_string(),
            })
    }
}

fn folder(name: &str) -> FolderEntry {
    FolderEntry::Folder {
        name: name.to_string(),
    }
}

fn file(name: &str) -> FolderEntry {
    FolderEntry::File {
        name: name.to_string(),
    }
}

fn no_skip() -> HashSet<String> {
    HashSet::new()
}

/// The reference tree: contest "ABC100" with problems "A" and "B".
///
/// Problem A's `in` listing is split across two pages (001.txt, then
/// 002.txt behind a continuation cursor); everything else is single-page.
fn abc100_remote() -> FakeRemote {
    FakeRemote::default()
        .folder("", vec![vec![folder("ABC100")]])
        .folder("/ABC100", vec![vec![folder("A"), folder("B")]])
        .folder(
            "/ABC100/A/in",
            vec![vec![file("001.txt")], vec![file("002.txt")]],
        )
        .folder(
            "/ABC100/A/out",
            vec![vec![file("001.txt"), file("002.txt")]],
        )
        .folder("/ABC100/B/in", vec![vec![file("003.txt")]])
        .folder("/ABC100/B/out", vec![vec![file("003.txt")]])
        .file("/ABC100/A/in/001.txt", "1 2 3")
        .file("/ABC100/A/in/002.txt", "1 2 3")
        .file("/ABC100/A/out/001.txt", "1 2 3")
        .file("/ABC100/A/out/002.txt", "1 2 3")
        .file("/ABC100/B/in/003.txt", "1 2 3")
        .file("/ABC100/B/out/003.txt", "1 2 3")
}

fn expected_abc100_cases() -> Vec<TestCase> {
    let record = |problem_id: &str, file_name: &str| TestCase {
        contest_id: "abc100".to_string(),
        problem_id: problem_id.to_string(),
        contest_folder_name: "ABC100".to_string(),
        file_name: file_name.to_string(),
        input: "1 2 3".to_string(),
        output: "1 2 3".to_string(),
    };
    vec![
        record("abc100_a", "001.txt"),
        record("abc100_a", "002.txt"),
        record("abc100_b", "003.txt"),
    ]
}

#[tokio::test]
async fn test_end_to_end_crawl_with_paginated_listing() {
    let remote = abc100_remote();
    let cases = remote.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(cases, expected_abc100_cases());
}

#[tokio::test]
async fn test_crawl_is_idempotent_over_unchanged_store() {
    let remote = abc100_remote();
    let crawler = remote.crawler();

    let first = crawler.crawl(&no_skip(), 0).await.unwrap();
    let second = crawler.crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_split_listing_equals_single_page_listing() {
    let paginated = FakeRemote::default()
        .folder("", vec![vec![folder("C")]])
        .folder("/C", vec![vec![folder("A")]])
        .folder(
            "/C/A/in",
            vec![
                vec![file("001.txt")],
                vec![file("002.txt")],
                vec![file("003.txt")],
            ],
        )
        .folder("/C/A/out", vec![vec![]])
        .file("/C/A/in/001.txt", "a")
        .file("/C/A/in/002.txt", "b")
        .file("/C/A/in/003.txt", "c");

    let single = paginated.clone().folder(
        "/C/A/in",
        vec![vec![file("001.txt"), file("002.txt"), file("003.txt")]],
    );

    let from_paginated = paginated.crawler().crawl(&no_skip(), 0).await.unwrap();
    let from_single = single.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(from_paginated.len(), 3);
    assert_eq!(from_paginated, from_single);
}

#[tokio::test]
async fn test_skipped_contests_are_excluded_and_do_not_count() {
    // Root lists three contests; only the last two have subtrees, and the
    // first is skipped. With limit 2 the crawl must process both real ones.
    let remote = FakeRemote::default()
        .folder(
            "",
            vec![vec![folder("OLD001"), folder("NEW001"), folder("NEW002")]],
        )
        .folder("/NEW001", vec![vec![folder("A")]])
        .folder("/NEW001/A/in", vec![vec![file("001.txt")]])
        .folder("/NEW001/A/out", vec![vec![file("001.txt")]])
        .folder("/NEW002", vec![vec![folder("A")]])
        .folder("/NEW002/A/in", vec![vec![file("001.txt")]])
        .folder("/NEW002/A/out", vec![vec![file("001.txt")]])
        .file("/NEW001/A/in/001.txt", "x")
        .file("/NEW001/A/out/001.txt", "y")
        .file("/NEW002/A/in/001.txt", "x")
        .file("/NEW002/A/out/001.txt", "y");

    let skip: HashSet<String> = ["OLD001".to_string()].into();
    let cases = remote.crawler().crawl(&skip, 2).await.unwrap();

    let contest_ids: Vec<&str> = cases.iter().map(|c| c.contest_id.as_str()).collect();
    assert_eq!(contest_ids, vec!["new001", "new002"]);
}

#[tokio::test]
async fn test_limit_processes_exactly_n_contests() {
    let remote = FakeRemote::default()
        .folder("", vec![vec![folder("C1"), folder("C2"), folder("C3")]])
        .folder("/C1", vec![vec![folder("A")]])
        .folder("/C1/A/in", vec![vec![file("001.txt")]])
        .folder("/C1/A/out", vec![vec![file("001.txt")]])
        .folder("/C2", vec![vec![folder("A")]])
        .folder("/C2/A/in", vec![vec![file("001.txt")]])
        .folder("/C2/A/out", vec![vec![file("001.txt")]])
        .file("/C1/A/in/001.txt", "x")
        .file("/C1/A/out/001.txt", "y")
        .file("/C2/A/in/001.txt", "x")
        .file("/C2/A/out/001.txt", "y");
    // /C3 has no subtree: touching it would fail the crawl.

    let cases = remote.crawler().crawl(&no_skip(), 2).await.unwrap();

    let contest_ids: Vec<&str> = cases.iter().map(|c| c.contest_id.as_str()).collect();
    assert_eq!(contest_ids, vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_limit_larger_than_contest_count_processes_all() {
    let remote = abc100_remote();
    let cases = remote.crawler().crawl(&no_skip(), 10).await.unwrap();

    assert_eq!(cases.len(), 3);
}

#[tokio::test]
async fn test_missing_out_folder_is_tolerated() {
    let remote = FakeRemote::default()
        .folder("", vec![vec![folder("ABC200")]])
        .folder("/ABC200", vec![vec![folder("A")]])
        .folder("/ABC200/A/in", vec![vec![file("001.txt")]])
        .missing("/ABC200/A/out")
        .file("/ABC200/A/in/001.txt", "1 2 3");

    let cases = remote.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].input, "1 2 3");
    assert_eq!(cases[0].output, "");
}

#[tokio::test]
async fn test_orphan_out_file_produces_no_record() {
    let remote = FakeRemote::default()
        .folder("", vec![vec![folder("ABC200")]])
        .folder("/ABC200", vec![vec![folder("A")]])
        .folder("/ABC200/A/in", vec![vec![file("001.txt")]])
        .folder(
            "/ABC200/A/out",
            vec![vec![file("001.txt"), file("002.txt")]],
        )
        .file("/ABC200/A/in/001.txt", "in1")
        .file("/ABC200/A/out/001.txt", "out1")
        .file("/ABC200/A/out/002.txt", "out2");

    let cases = remote.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].file_name, "001.txt");
    assert_eq!(cases[0].input, "in1");
    assert_eq!(cases[0].output, "out1");
}

#[tokio::test]
async fn test_fatal_error_returns_no_partial_results() {
    // C1 crawls cleanly; C2's problem listing is undefined and fails with
    // an opaque API error. The whole crawl must error out, discarding C1's
    // already-collected records.
    let remote = FakeRemote::default()
        .folder("", vec![vec![folder("C1"), folder("C2")]])
        .folder("/C1", vec![vec![folder("A")]])
        .folder("/C1/A/in", vec![vec![file("001.txt")]])
        .folder("/C1/A/out", vec![vec![file("001.txt")]])
        .file("/C1/A/in/001.txt", "x")
        .file("/C1/A/out/001.txt", "y");

    let result = remote.crawler().crawl(&no_skip(), 0).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_crawl_contest_scoped_entry_point() {
    let remote = abc100_remote();
    let cases = remote.crawler().crawl_contest("ABC100").await.unwrap();

    assert_eq!(cases, expected_abc100_cases());
}

#[tokio::test]
async fn test_crawl_problem_scoped_entry_point() {
    let remote = abc100_remote();
    let cases = remote.crawler().crawl_problem("ABC100", "B").await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].problem_id, "abc100_b");
}

#[tokio::test]
async fn test_non_folder_entries_at_root_are_ignored() {
    let remote = FakeRemote::default()
        .folder("", vec![vec![file("README.txt"), folder("ABC300")]])
        .folder("/ABC300", vec![vec![folder("A")]])
        .folder("/ABC300/A/in", vec![vec![file("001.txt")]])
        .folder("/ABC300/A/out", vec![vec![file("001.txt")]])
        .file("/ABC300/A/in/001.txt", "x")
        .file("/ABC300/A/out/001.txt", "y");

    let cases = remote.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].contest_id, "abc300");
}

#[tokio::test]
async fn test_non_file_entries_in_side_folders_are_ignored() {
    let remote = FakeRemote::default()
        .folder("", vec![vec![folder("ABC300")]])
        .folder("/ABC300", vec![vec![folder("A")]])
        .folder(
            "/ABC300/A/in",
            vec![vec![folder("nested"), file("001.txt")]],
        )
        .folder("/ABC300/A/out", vec![vec![file("001.txt")]])
        .file("/ABC300/A/in/001.txt", "x")
        .file("/ABC300/A/out/001.txt", "y");

    let cases = remote.crawler().crawl(&no_skip(), 0).await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].file_name, "001.txt");
}
