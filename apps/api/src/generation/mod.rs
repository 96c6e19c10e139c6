// Generation endpoints: prompt assembly, the LLM round trip, and JSON
// extraction from free-text replies.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod extract;
pub mod handlers;
pub mod prompt;
pub mod prompts;
pub mod templates;
