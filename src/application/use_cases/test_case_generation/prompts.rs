pub(crate) const TEST_CASE_SYSTEM_PROMPT: &str =
    "You are a Test Case Generator. Generate exactly 6-8 test cases in valid JSON format.";

pub(crate) const ANALYSIS_SYSTEM_PROMPT: &str =
    "You analyze user stories and explain what the user wants.";

pub(crate) const MISSING_DOMAIN_KNOWLEDGE: &str = "Domain knowledge is not available.";

pub(crate) const DEFAULT_INSTRUCTIONS: &str =
    "Generate multiple test cases (happy, negative, edge) in structured format.";

/// Builds the generation prompt. Missing or blank context and template fall
/// back to fixed defaults.
pub fn compose(
    story: &str,
    analysis: &str,
    domain_context: Option<&str>,
    template: Option<&str>,
) -> String {
    let domain_context = domain_context
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(MISSING_DOMAIN_KNOWLEDGE);
    let template = template
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_INSTRUCTIONS);

    format!(
        r#"
You are a Test Case Generator for Software Applications.

DOMAIN KNOWLEDGE (extracted from project code):
{domain_context}

USER STORY:
{story}

USER STORY ANALYSIS:
{analysis}

INSTRUCTIONS:
{template}

CRITICAL REQUIREMENTS:
- Generate EXACTLY 6-8 test cases (not 1, not 2, but 6-8)
- Each test case must be COMPLETE with all fields filled
- Cover different scenarios: Happy Path, Negative Cases, Edge Cases
- Make test cases SPECIFIC and ACTIONABLE
- Return ONLY valid JSON array format

OUTPUT FORMAT - Return this exact JSON structure:
[
  {{
    "scenario": "Clear description of what is being tested",
    "steps": "Step-by-step test execution instructions",
    "expected": "Expected result or outcome",
    "type": "Happy/Negative/Edge"
  }},
  {{
    "scenario": "Another test scenario",
    "steps": "Test steps for this scenario",
    "expected": "Expected result for this scenario",
    "type": "Happy/Negative/Edge"
  }}
]

Generate exactly 6-8 test cases now:
"#
    )
}

pub fn analysis_prompt(story: &str) -> String {
    format!(
        r#"
You are a User Story Analyzer.
Your task:
- Read the user story carefully.
- Identify what the user *wants to achieve* (the intent).
- Summarize the main goal in 2–3 sentences.
- Extract key requirements (functional needs).

User Story: {story}
"#
    )
}

/// First two `.`-delimited sentences of the story, used when no provider
/// could analyse it.
pub fn fallback_analysis(story: &str) -> String {
    let sentences: Vec<&str> = story
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(2)
        .collect();
    format!("{}.", sentences.join(". "))
}
