use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::error::Result;
use crate::domain::test_case::TestCaseRecord;
use crate::infrastructure::storage::create_results_folder;

pub const REPORT_FILE: &str = "test_cases.md";
pub const NO_TEST_CASES: &str = "⚠️ No test cases generated.";

const TABLE_CELL_CHARS: usize = 80;

/// Truncate to `max_chars` characters, appending `...` when cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

fn table_cell(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&single_line, TABLE_CELL_CHARS).replace('|', "\\|")
}

pub fn format_markdown(records: &[TestCaseRecord], generated_at: DateTime<Local>) -> String {
    if records.is_empty() {
        return NO_TEST_CASES.to_string();
    }

    let mut body = String::from("# Test Cases Generated\n\n");
    body.push_str(&format!(
        "**Generated on:** {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    body.push_str(&format!("**Total Test Cases:** {}\n\n", records.len()));

    body.push_str("## Test Cases Table\n\n");
    body.push_str("| **Test Case ID** | **Test Scenario** | **Test Steps** | **Expected Result** | **Type** | **Status** |\n");
    body.push_str("|---|---|---|---|---|---|\n");
    for (index, record) in records.iter().enumerate() {
        body.push_str(&format!(
            "| TC{:03} | {} | {} | {} | {} | {} |\n",
            index + 1,
            table_cell(&record.scenario),
            table_cell(&record.steps),
            table_cell(&record.expected),
            table_cell(&record.case_type),
            record.status
        ));
    }

    body.push_str("\n## Detailed Test Cases\n\n");
    for (index, record) in records.iter().enumerate() {
        body.push_str(&format!("### TC{:03}: {}\n\n", index + 1, record.scenario));
        body.push_str(&format!("**Type:** {}\n\n", record.case_type));
        body.push_str(&format!("**Status:** {}\n\n", record.status));
        body.push_str(&format!("**Test Steps:**\n{}\n\n", record.steps));
        body.push_str(&format!("**Expected Result:**\n{}\n\n", record.expected));
        body.push_str("---\n\n");
    }

    body
}

/// Writes `<results_root>/results_<timestamp>/test_cases.md` and returns its path.
pub fn write_report(
    results_root: &Path,
    story: &str,
    analysis: &str,
    records: &[TestCaseRecord],
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let folder = create_results_folder(results_root, now)?;
    let path = folder.join(REPORT_FILE);

    let mut content = String::from("# User Story Test Cases\n\n");
    content.push_str(&format!("**User Story:**\n{}\n\n", story));
    content.push_str(&format!("**Analysis:**\n{}\n\n", analysis));
    content.push_str(&format_markdown(records, now));

    fs::write(&path, content)?;
    Ok(path)
}
