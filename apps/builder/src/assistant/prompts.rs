// All LLM prompt constants for the content assistant.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{with_source_text, PLAIN_TEXT_ONLY};

/// Summary rewrite instruction.
pub const SUMMARY_REWRITE: &str = "Rewrite the following professional summary to be more punchy, \
    tech-focused, and impactful. Keep it under 50 words.";

/// Bullet rewrite instruction.
pub const BULLET_REWRITE: &str = "Rewrite the following resume bullet point to use strong action \
    verbs, include metrics if implied, and sound more impressive for a tech role.";

pub fn summary_rewrite_prompt(text: &str) -> String {
    with_source_text(&format!("{SUMMARY_REWRITE} {PLAIN_TEXT_ONLY}"), text)
}

pub fn bullet_rewrite_prompt(text: &str) -> String {
    with_source_text(&format!("{BULLET_REWRITE} {PLAIN_TEXT_ONLY}"), text)
}

/// Summary generation from role and skills.
pub fn summary_generation_prompt(role: &str, skills: &[String]) -> String {
    format!(
        "Write a professional resume summary for a {role} proficient in {}. \
         Keep it under 40 words, professional, and confident.",
        skills.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompts_carry_source_text() {
        let p = summary_rewrite_prompt("I code.");
        assert!(p.contains("under 50 words"));
        assert!(p.ends_with("Text: I code."));
        assert!(bullet_rewrite_prompt("Fixed bugs").contains("action verbs"));
    }

    #[test]
    fn test_generation_prompt_lists_skills() {
        let p = summary_generation_prompt("Engineer", &["Go".into(), "Rust".into()]);
        assert!(p.contains("for a Engineer proficient in Go, Rust."));
        assert!(p.contains("under 40 words"));
    }
}
