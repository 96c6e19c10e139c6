//! Axum route handlers for the generation endpoints.
//!
//! Every endpoint runs the same pipeline: validate required fields,
//! assemble the prompt, call the generative-text service, extract JSON
//! from the reply, return it under `"result"`. What differs per endpoint
//! is captured in a `GenerationTask` record plus each handler's ordered
//! section list.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::AppError;
use crate::generation::extract::{extract_json, Strictness};
use crate::generation::prompt::assemble;
use crate::generation::prompts;
use crate::state::AppState;

/// Per-endpoint configuration record.
pub struct GenerationTask {
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub strictness: Strictness,
}

const CHAT: GenerationTask = GenerationTask {
    name: "chat",
    system_prompt: prompts::CHAT_SYSTEM,
    strictness: Strictness::Strict,
};

const COVER_LETTER: GenerationTask = GenerationTask {
    name: "coverletter",
    system_prompt: prompts::COVER_LETTER_SYSTEM,
    strictness: Strictness::Strict,
};

const EXPERIENCE: GenerationTask = GenerationTask {
    name: "experience",
    system_prompt: prompts::EXPERIENCE_SYSTEM,
    strictness: Strictness::Strict,
};

// Keywords is the only endpoint allowed the brace-scan fallback.
const KEYWORDS: GenerationTask = GenerationTask {
    name: "keywords",
    system_prompt: prompts::KEYWORDS_SYSTEM,
    strictness: Strictness::Lenient,
};

const RESUME_PARSER: GenerationTask = GenerationTask {
    name: "upload-resume",
    system_prompt: prompts::RESUME_PARSER_SYSTEM,
    strictness: Strictness::Strict,
};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: Option<String>,
    pub job_description: Option<String>,
    pub resume: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub job_description: Option<String>,
    pub resume: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    pub job_description: Option<String>,
    pub experience: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    pub job_description: Option<String>,
    pub skills: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeRequest {
    pub resume_text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Field validation — always before the LLM is touched
// ────────────────────────────────────────────────────────────────────────────

fn require_text(field: &str, value: Option<&String>) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(AppError::Validation(format!("Missing or invalid {field}"))),
    }
}

/// Accepts a structured field and returns it as prompt text: strings pass
/// through verbatim, everything else is serialized to JSON text.
fn require_value(field: &str, value: Option<&Value>) -> Result<String, AppError> {
    match value {
        None | Some(Value::Null) => {
            Err(AppError::Validation(format!("Missing or invalid {field}")))
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(AppError::Validation(format!("Missing or invalid {field}")))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v) => serde_json::to_string(v).map_err(|e| AppError::Internal(e.into())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

async fn run_generation(
    state: &AppState,
    task: &GenerationTask,
    sections: &[(&str, &str)],
    response_format: &str,
) -> Result<Json<Value>, AppError> {
    let prompt = assemble(task.system_prompt, sections, response_format);
    debug!(task = task.name, prompt_len = prompt.len(), "dispatching generation prompt");

    let text = state.llm.generate(&prompt).await?;
    debug!(task = task.name, reply_len = text.len(), "model reply received");

    let result = extract_json(&text, task.strictness)?;

    Ok(Json(json!({ "result": result })))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let question = require_text("question", request.question.as_ref())?;
    let job_description = require_text("jobDescription", request.job_description.as_ref())?;
    let resume = require_value("resume", request.resume.as_ref())?;

    run_generation(
        &state,
        &CHAT,
        &[
            ("Job Description", job_description.as_str()),
            ("Candidate Resume (JSON)", resume.as_str()),
            ("User Question", question.as_str()),
        ],
        &state.templates.chat,
    )
    .await
}

/// POST /api/coverletter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<Value>, AppError> {
    let job_description = require_text("jobDescription", request.job_description.as_ref())?;
    let resume = require_value("resume", request.resume.as_ref())?;

    run_generation(
        &state,
        &COVER_LETTER,
        &[
            ("Job Description", job_description.as_str()),
            ("Resume (JSON)", resume.as_str()),
        ],
        &state.templates.cover_letter,
    )
    .await
}

/// POST /api/experience
pub async fn handle_experience(
    State(state): State<AppState>,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<Value>, AppError> {
    let job_description = require_text("jobDescription", request.job_description.as_ref())?;
    let experience = require_value("experience", request.experience.as_ref())?;

    run_generation(
        &state,
        &EXPERIENCE,
        &[
            ("Job Description", job_description.as_str()),
            ("Experience (JSON)", experience.as_str()),
        ],
        &state.templates.experience,
    )
    .await
}

/// POST /api/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<Value>, AppError> {
    let job_description = require_text("jobDescription", request.job_description.as_ref())?;
    let skills = require_value("skills", request.skills.as_ref())?;

    run_generation(
        &state,
        &KEYWORDS,
        &[
            ("Job Description", job_description.as_str()),
            ("Current Skills", skills.as_str()),
        ],
        &state.templates.keywords,
    )
    .await
}

/// POST /api/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Json(request): Json<UploadResumeRequest>,
) -> Result<Json<Value>, AppError> {
    let resume_text = require_text("resumeText", request.resume_text.as_ref())?;

    run_generation(
        &state,
        &RESUME_PARSER,
        &[("Candidate Resume", resume_text.as_str())],
        &state.templates.resume,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_missing_and_blank() {
        assert!(require_text("question", None).is_err());
        assert!(require_text("question", Some(&"   ".to_string())).is_err());
        let err = require_text("question", None).unwrap_err();
        assert!(err.to_string().contains("question"));
    }

    #[test]
    fn test_require_text_passes_content_through() {
        let value = "What should I highlight?".to_string();
        assert_eq!(require_text("question", Some(&value)).unwrap(), value);
    }

    #[test]
    fn test_require_value_serializes_structured_fields() {
        let skills = json!(["Python", "Go"]);
        assert_eq!(
            require_value("skills", Some(&skills)).unwrap(),
            "[\"Python\",\"Go\"]"
        );
    }

    #[test]
    fn test_require_value_passes_strings_verbatim() {
        let resume = json!("plain text resume");
        assert_eq!(
            require_value("resume", Some(&resume)).unwrap(),
            "plain text resume"
        );
    }

    #[test]
    fn test_require_value_rejects_null_and_empty_string() {
        assert!(require_value("resume", Some(&Value::Null)).is_err());
        assert!(require_value("resume", Some(&json!("  "))).is_err());
        assert!(require_value("resume", None).is_err());
    }

    #[test]
    fn test_keywords_is_the_only_lenient_task() {
        assert_eq!(KEYWORDS.strictness, Strictness::Lenient);
        for task in [&CHAT, &COVER_LETTER, &EXPERIENCE, &RESUME_PARSER] {
            assert_eq!(task.strictness, Strictness::Strict);
        }
    }
}
