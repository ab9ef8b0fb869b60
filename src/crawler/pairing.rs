//! Input/output file pairing
//!
//! Joins the downloaded `in` and `out` file sets of one problem folder by
//! file name and produces the final sorted record sequence.

use crate::model::{build_problem_id, TestCase, TestCaseFile};
use std::collections::HashMap;

/// Pairs same-named `in`/`out` files into test-case records.
///
/// Every in-file seeds a record; out-files fill in the matching record's
/// output. An out-file with no matching in-file is dropped (warned, not an
/// error), and an in-file with no matching out-file keeps an empty output.
/// The result is sorted by file name ascending — the concurrent download
/// and map iteration give no usable order of their own.
pub(crate) fn pair_test_cases(
    contest_folder_name: &str,
    problem_folder_name: &str,
    in_files: Vec<TestCaseFile>,
    out_files: Vec<TestCaseFile>,
) -> Vec<TestCase> {
    let contest_id = contest_folder_name.to_lowercase();
    let problem_id = build_problem_id(contest_folder_name, problem_folder_name);

    let mut by_file_name: HashMap<String, TestCase> = HashMap::with_capacity(in_files.len());
    for in_file in in_files {
        by_file_name.insert(
            in_file.file_name.clone(),
            TestCase {
                contest_id: contest_id.clone(),
                problem_id: problem_id.clone(),
                contest_folder_name: contest_folder_name.to_string(),
                file_name: in_file.file_name,
                input: in_file.content,
                output: String::new(),
            },
        );
    }

    for out_file in out_files {
        match by_file_name.get_mut(&out_file.file_name) {
            Some(test_case) => test_case.output = out_file.content,
            None => {
                tracing::warn!(
                    "No in file matches out file '{}/{}/out/{}', dropping it",
                    contest_folder_name,
                    problem_folder_name,
                    out_file.file_name
                );
            }
        }
    }

    let mut test_cases: Vec<TestCase> = by_file_name.into_values().collect();
    test_cases.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    for test_case in &test_cases {
        if test_case.output.is_empty() {
            tracing::warn!(
                "No out file matches in file '{}/{}/in/{}', emitting empty out",
                contest_folder_name,
                problem_folder_name,
                test_case.file_name
            );
        }
    }

    test_cases
}
