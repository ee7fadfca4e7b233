use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

pub const TARGET_TEMPLATE: &str = "test_case_generation_prompt.txt";

/// Reads the knowledge base JSON and re-renders it with two-space indentation.
pub fn load_knowledge_base(path: &Path) -> Option<String> {
    if !path.exists() {
        warn!(path = %path.display(), "Knowledge base not found");
        return None;
    }

    let parsed = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| {
            serde_json::from_str::<serde_json::Value>(&raw).map_err(|err| err.to_string())
        })
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(|err| err.to_string()));

    match parsed {
        Ok(content) => {
            info!(path = %path.display(), "Knowledge base loaded");
            Some(content)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Error loading knowledge base");
            None
        }
    }
}

/// Loads `test_case_generation_prompt.txt` from `dir`, or the first other
/// `*.txt` file in name order. Blank files count as missing.
pub fn load_prompt_template(dir: &Path) -> Option<String> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Prompt template folder not found");
        return None;
    }

    let target = dir.join(TARGET_TEMPLATE);
    if let Some(template) = read_non_blank(&target) {
        info!(path = %target.display(), "Target template loaded");
        return Some(template);
    }
    warn!(path = %target.display(), "Target template not found");

    let mut candidates: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "txt"))
            .collect(),
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Failed to list prompt templates");
            return None;
        }
    };
    candidates.sort();

    let fallback = candidates.into_iter().find_map(|path| {
        let template = read_non_blank(&path)?;
        Some((path, template))
    });
    match fallback {
        Some((path, template)) => {
            warn!(path = %path.display(), "Fallback template loaded");
            Some(template)
        }
        None => {
            warn!(dir = %dir.display(), "No prompt template files found");
            None
        }
    }
}

/// Creates `<base>/results_<YYYYmmdd_HHMMSS>`. Fails if that folder already
/// exists, so an earlier report is never overwritten.
pub fn create_results_folder(base: &Path, now: DateTime<Local>) -> std::io::Result<PathBuf> {
    ensure_dir(base)?;
    let folder = base.join(format!("results_{}", now.format("%Y%m%d_%H%M%S")));
    fs::create_dir(&folder)?;
    Ok(folder)
}

fn read_non_blank(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => Some(content),
        Ok(_) => None,
        Err(err) => {
            if path.exists() {
                warn!(path = %path.display(), error = %err, "Failed to read template");
            }
            None
        }
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn knowledge_base_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge_base.json");
        fs::write(&path, r#"{"endpoints":["login"]}"#).unwrap();

        let content = load_knowledge_base(&path).unwrap();
        assert_eq!(content, "{\n  \"endpoints\": [\n    \"login\"\n  ]\n}");
    }

    #[test]
    fn invalid_or_missing_knowledge_base_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge_base.json");
        assert!(load_knowledge_base(&path).is_none());

        fs::write(&path, "{not json").unwrap();
        assert!(load_knowledge_base(&path).is_none());
    }

    #[test]
    fn target_template_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_other.txt"), "other").unwrap();
        fs::write(dir.path().join(TARGET_TEMPLATE), "target").unwrap();

        assert_eq!(load_prompt_template(dir.path()).as_deref(), Some("target"));
    }

    #[test]
    fn first_txt_file_is_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        assert_eq!(load_prompt_template(dir.path()).as_deref(), Some("first"));
    }

    #[test]
    fn blank_target_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TARGET_TEMPLATE), "  \n").unwrap();
        fs::write(dir.path().join("z.txt"), "fallback").unwrap();

        assert_eq!(load_prompt_template(dir.path()).as_deref(), Some("fallback"));
    }

    #[test]
    fn missing_template_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_prompt_template(&dir.path().join("prompts")).is_none());
    }

    #[test]
    fn results_folder_uses_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let folder = create_results_folder(&dir.path().join("test_results"), now).unwrap();
        assert!(folder.is_dir());
        assert!(folder.ends_with("test_results/results_20240305_140709"));
    }

    #[test]
    fn results_folder_is_never_reused() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("test_results");
        let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        create_results_folder(&base, now).unwrap();

        let err = create_results_folder(&base, now).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    }
}
