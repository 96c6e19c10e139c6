//! Prompt assembly — deterministic concatenation of system prompt, labeled
//! input sections, and the response-format template.

/// Builds the full prompt sent to the generative-text service.
///
/// Output shape, parts separated by one blank line:
/// ```text
/// <system prompt>
///
/// <label>:
/// <content>
///
/// Response Format:
/// <template>
/// ```
/// Section order is significant; callers pass sections in their endpoint's
/// fixed order. Pure function — identical inputs yield identical bytes.
pub fn assemble(system_prompt: &str, sections: &[(&str, &str)], response_format: &str) -> String {
    let mut parts = Vec::with_capacity(sections.len() + 2);
    parts.push(system_prompt.to_string());
    for (label, content) in sections {
        parts.push(format!("{label}:\n{content}"));
    }
    parts.push(format!("Response Format:\n{response_format}"));
    parts.join("\n\n")
}
