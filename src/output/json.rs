//! JSON writers for harvest results
//!
//! Layout under the output directory:
//!
//! ```text
//! <dir>/test_cases/<problem_id>.json   one array per problem
//! <dir>/problems.json                  metadata listing
//! <dir>/manifest.json                  crawl manifest (resume support)
//! ```

use crate::metadata::Problem;
use crate::model::TestCase;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const MANIFEST_FILE: &str = "manifest.json";

/// Summary of one completed harvest run
///
/// The `contests` list feeds the skip set of a resumed run, so it carries
/// folder names in their original case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlManifest {
    pub generated_at: DateTime<Utc>,
    pub contests: Vec<String>,
    pub test_case_count: usize,
}

impl CrawlManifest {
    /// Builds a manifest for the given records, merging in contests already
    /// captured by a previous run.
    pub fn new(test_cases: &[TestCase], prior_contests: &[String]) -> Self {
        let mut contests: BTreeSet<String> = prior_contests.iter().cloned().collect();
        contests.extend(test_cases.iter().map(|c| c.contest_folder_name.clone()));

        Self {
            generated_at: Utc::now(),
            contests: contests.into_iter().collect(),
            test_case_count: test_cases.len(),
        }
    }
}

/// Writes one JSON array per problem under `<dir>/test_cases/`.
///
/// Records keep the order the crawler produced (file name ascending within
/// each problem), so a rewrite of unchanged data is byte-identical.
pub fn write_test_cases(dir: &Path, test_cases: &[TestCase]) -> OutputResult<()> {
    let cases_dir = dir.join("test_cases");
    fs::create_dir_all(&cases_dir)?;

    let mut by_problem: BTreeMap<&str, Vec<&TestCase>> = BTreeMap::new();
    for test_case in test_cases {
        by_problem
            .entry(test_case.problem_id.as_str())
            .or_default()
            .push(test_case);
    }

    for (problem_id, cases) in &by_problem {
        let path = cases_dir.join(format!("{}.json", problem_id));
        let json = serde_json::to_vec_pretty(cases)?;
        fs::write(path, json)?;
    }

    tracing::info!(
        "Wrote {} test cases across {} problems to {}",
        test_cases.len(),
        by_problem.len(),
        cases_dir.display()
    );
    Ok(())
}

/// Writes the problem-metadata listing to `<dir>/problems.json`.
pub fn write_problems(dir: &Path, problems: &[Problem]) -> OutputResult<()> {
    fs::create_dir_all(dir)?;

    let path = dir.join("problems.json");
    let json = serde_json::to_vec_pretty(problems)?;
    fs::write(&path, json)?;

    tracing::info!("Wrote {} problems to {}", problems.len(), path.display());
    Ok(())
}

/// Writes the crawl manifest to `<dir>/manifest.json`.
pub fn write_manifest(dir: &Path, manifest: &CrawlManifest) -> OutputResult<()> {
    fs::create_dir_all(dir)?;

    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_vec_pretty(manifest)?;
    fs::write(&path, json)?;

    tracing::info!(
        "Wrote manifest covering {} contests to {}",
        manifest.contests.len(),
        path.display()
    );
    Ok(())
}

/// Reads a prior run's manifest, if one exists.
pub fn read_manifest(dir: &Path) -> OutputResult<Option<CrawlManifest>> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let manifest = serde_json::from_str(&content)?;
    Ok(Some(manifest))
}
