//! Core data model for harvested test cases
//!
//! All records here are transient: they are built fresh during a crawl pass
//! and handed to the caller as an in-memory sequence.

use serde::Serialize;

/// A matched input/output file pair for one test of one problem
///
/// Serialized field names follow the consumer-facing JSON contract
/// (`contestId`, `problemId`, `contestFolderName`, `fileName`, `in`, `out`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Lowercased contest folder name
    pub contest_id: String,

    /// Lowercased `<contest>_<problem>` identifier
    pub problem_id: String,

    /// Contest folder name as it appears in the remote tree (original case)
    pub contest_folder_name: String,

    /// File name shared by the `in` and `out` sides, extension included
    pub file_name: String,

    /// Content of the `in` file
    #[serde(rename = "in")]
    pub input: String,

    /// Content of the matching `out` file; empty when no match was found
    #[serde(rename = "out")]
    pub output: String,
}

/// One downloaded file from an `in` or `out` subfolder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseFile {
    pub file_name: String,
    pub content: String,
}

/// Builds the problem identifier from the contest and problem folder names.
///
/// The whole identifier is lowercased; the folder names keep their original
/// case elsewhere (see [`TestCase::contest_folder_name`]).
pub fn build_problem_id(contest_folder_name: &str, problem_folder_name: &str) -> String {
    format!("{}_{}", contest_folder_name, problem_folder_name).to_lowercase()
}
