// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Output goes straight into a form field, so no formatting.
pub const PLAIN_TEXT_ONLY: &str = "Do not add markdown or quotes.";

/// Appends the text being worked on to an instruction.
pub fn with_source_text(instruction: &str, text: &str) -> String {
    format!("{instruction}\n\nText: {text}")
}
