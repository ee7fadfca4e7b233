use crate::domain::test_case::TestCaseRecord;

const BLOCK_SEPARATOR: &str = "---";

/// Last-resort reader for plain-text output: `---` separated blocks whose
/// first four non-blank lines are scenario, steps, expected and type.
pub(crate) fn parse_text_blocks(raw: &str) -> Vec<TestCaseRecord> {
    raw.split(BLOCK_SEPARATOR)
        .filter_map(|block| {
            let lines: Vec<&str> = block
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            match lines.as_slice() {
                [scenario, steps, expected, case_type, ..] => {
                    TestCaseRecord::new(scenario, steps, expected, case_type)
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_complete_block() {
        let raw = "Valid login\nEnter credentials\nDashboard shown\nHappy\n---\n\
                   Wrong password\n  Enter bad password  \nError shown\nNegative\n---\n\
                   Long username\nType 256 chars\nValidation message\nEdge\n";

        let records = parse_text_blocks(raw);

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].scenario, "Wrong password");
        assert_eq!(records[1].steps, "Enter bad password");
        assert_eq!(records[2].case_type, "Edge");
        assert!(records.iter().all(|record| record.status == "Pending"));
    }

    #[test]
    fn drops_short_blocks_and_ignores_extra_lines() {
        let raw = "Only\nthree\nlines\n---\n\nA\n\nB\nC\nD\nE trailing\n";
        let records = parse_text_blocks(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scenario, "A");
        assert_eq!(records[0].case_type, "D");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_text_blocks("").is_empty());
        assert!(parse_text_blocks("---\n---").is_empty());
    }
}
