//! Content Assistant: rewrites form text and drafts summaries through a
//! `TextGenerator`.
//!
//! Never fails past its boundary: a disabled feature, missing credential,
//! transport error or empty reply all degrade to a fallback (the original text
//! for rewrites, `""` for generated summaries), logged at `warn`.

pub mod prompts;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assistant::prompts::{
    bullet_rewrite_prompt, summary_generation_prompt, summary_rewrite_prompt,
};
use crate::llm_client::{DisabledGenerator, LlmError, TextGenerator, MODEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteKind {
    Summary,
    Bullet,
}

/// Per-operation switches. Both off unless configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssistantFlags {
    pub polish_enabled: bool,
    pub generate_enabled: bool,
}

impl AssistantFlags {
    pub fn all_enabled() -> Self {
        Self {
            polish_enabled: true,
            generate_enabled: true,
        }
    }
}

#[derive(Clone)]
pub struct ContentAssistant {
    generator: Arc<dyn TextGenerator>,
    flags: AssistantFlags,
}

impl Default for ContentAssistant {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ContentAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>, flags: AssistantFlags) -> Self {
        Self { generator, flags }
    }

    /// No service behind it; every call returns its fallback.
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledGenerator), AssistantFlags::default())
    }

    pub fn flags(&self) -> AssistantFlags {
        self.flags
    }

    /// Rewritten `text`, or `text` unchanged if anything goes wrong.
    pub async fn rewrite(&self, text: &str, kind: RewriteKind) -> String {
        if !self.flags.polish_enabled {
            debug!(?kind, "polish disabled; keeping text");
            return text.to_string();
        }
        let prompt = match kind {
            RewriteKind::Summary => summary_rewrite_prompt(text),
            RewriteKind::Bullet => bullet_rewrite_prompt(text),
        };
        match self.call(&prompt).await {
            Ok(rewritten) => rewritten,
            Err(e) => {
                warn!(?kind, error = %e, "rewrite failed; keeping original text");
                text.to_string()
            }
        }
    }

    /// A drafted summary for `role` with `skills`, or `""` if anything goes wrong.
    pub async fn generate_summary(&self, role: &str, skills: &[String]) -> String {
        if !self.flags.generate_enabled {
            debug!("summary generation disabled");
            return String::new();
        }
        match self.call(&summary_generation_prompt(role, skills)).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "summary generation failed");
                String::new()
            }
        }
    }

    /// One attempt; trimmed; blank replies count as failures.
    async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let text = self.generator.generate(prompt, MODEL).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        }
    }

    /// Replies with a fixed string and counts calls.
    struct CannedGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl CannedGenerator {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str, model: &str) -> Result<String, LlmError> {
            assert_eq!(model, MODEL);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    #[tokio::test]
    async fn test_failing_generator_falls_back() {
        let assistant = ContentAssistant::new(Arc::new(FailingGenerator), AssistantFlags::all_enabled());
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Summary).await, "Hello");
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Bullet).await, "Hello");
        assert_eq!(
            assistant.generate_summary("Engineer", &["Go".into()]).await,
            ""
        );
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let assistant =
            ContentAssistant::new(Arc::new(DisabledGenerator), AssistantFlags::all_enabled());
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Summary).await, "Hello");
        assert_eq!(assistant.generate_summary("Engineer", &[]).await, "");
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let generator = CannedGenerator::new("  Shipped faster.\n");
        let assistant = ContentAssistant::new(generator.clone(), AssistantFlags::all_enabled());
        assert_eq!(
            assistant.rewrite("did stuff", RewriteKind::Bullet).await,
            "Shipped faster."
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back() {
        let assistant =
            ContentAssistant::new(CannedGenerator::new("   "), AssistantFlags::all_enabled());
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Summary).await, "Hello");
        assert_eq!(assistant.generate_summary("Engineer", &["Go".into()]).await, "");
    }

    #[tokio::test]
    async fn test_disabled_flags_skip_the_service() {
        let generator = CannedGenerator::new("rewritten");
        let assistant = ContentAssistant::new(generator.clone(), AssistantFlags::default());
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Summary).await, "Hello");
        assert_eq!(assistant.generate_summary("Engineer", &[]).await, "");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_flags_are_independent() {
        let generator = CannedGenerator::new("Drafted.");
        let flags = AssistantFlags {
            polish_enabled: false,
            generate_enabled: true,
        };
        let assistant = ContentAssistant::new(generator, flags);
        assert_eq!(assistant.rewrite("Hello", RewriteKind::Bullet).await, "Hello");
        assert_eq!(assistant.generate_summary("Engineer", &[]).await, "Drafted.");
    }
}
