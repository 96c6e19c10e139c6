//! Response-format templates, read once at process start.
//!
//! The templates steer the model's output shape; they are advisory to the
//! model and never enforced on the parsed result. A missing or empty file
//! is a fatal startup error.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// One response-format document per generation task. Immutable after load.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub chat: String,
    pub cover_letter: String,
    pub experience: String,
    pub keywords: String,
    pub resume: String,
}

impl PromptTemplates {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            chat: read_template(dir, "chat.md")?,
            cover_letter: read_template(dir, "coverletter.md")?,
            experience: read_template(dir, "experience.md")?,
            keywords: read_template(dir, "keywords.md")?,
            resume: read_template(dir, "resume.md")?,
        })
    }
}

fn read_template(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read response-format template '{}'", path.display()))?;
    if text.trim().is_empty() {
        bail!("Response-format template '{}' is empty", path.display());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_all(dir: &Path) {
        for name in ["chat.md", "coverletter.md", "experience.md", "keywords.md", "resume.md"] {
            fs::write(dir.join(name), "{\"shape\": \"...\"}").unwrap();
        }
    }

    #[test]
    fn test_load_reads_all_five_templates() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());

        let templates = PromptTemplates::load(dir.path()).unwrap();
        assert_eq!(templates.keywords, "{\"shape\": \"...\"}");
        assert_eq!(templates.resume, "{\"shape\": \"...\"}");
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        fs::remove_file(dir.path().join("keywords.md")).unwrap();

        let err = PromptTemplates::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("keywords.md"));
    }

    #[test]
    fn test_empty_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        fs::write(dir.path().join("chat.md"), "  \n").unwrap();

        let err = PromptTemplates::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("chat.md"));
    }

    #[test]
    fn test_repo_schemas_load() {
        // The shipped schemas/ directory must always be loadable.
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas");
        PromptTemplates::load(&dir).unwrap();
    }
}
