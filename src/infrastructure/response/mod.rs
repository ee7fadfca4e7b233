use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

/// Removes the reasoning blocks local reasoning models print before their
/// answer. Brackets inside them would otherwise be picked up as records.
pub fn strip_reasoning(response: &str) -> String {
    let cleaned = THINK_TAG_PATTERN.replace_all(response, "");
    let cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_think_block() {
        let input = "<think>maybe [1, 2]?</think>\n[{\"scenario\":\"a\"}]";
        assert_eq!(strip_reasoning(input), "[{\"scenario\":\"a\"}]");
    }

    #[test]
    fn strips_self_closing_think() {
        assert_eq!(strip_reasoning("<think />answer"), "answer");
        assert_eq!(strip_reasoning("<think/>answer"), "answer");
    }

    #[test]
    fn strips_reasoning_block() {
        let input = "<reasoning>line one\nline two</reasoning>Final";
        assert_eq!(strip_reasoning(input), "Final");
    }

    #[test]
    fn leaves_plain_text_alone() {
        let input = "Scenario\nSteps\nExpected\nHappy";
        assert_eq!(strip_reasoning(input), input);
    }
}
