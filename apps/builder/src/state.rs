use std::sync::Arc;

use tracing::info;

use crate::assistant::{AssistantFlags, ContentAssistant};
use crate::config::Config;
use crate::editor::Editor;
use crate::export::ExportPipeline;
use crate::llm_client::{DisabledGenerator, GeminiClient, LlmError, TextGenerator, MODEL};
use crate::models::seed_resume;

/// Collaborators shared by every editing session.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub assistant: ContentAssistant,
    pub exporter: ExportPipeline,
}

impl AppState {
    /// Wires the assistant and export pipeline from `config`.
    /// Without a credential the assistant runs on `DisabledGenerator`.
    pub fn from_config(config: Config) -> Result<Self, LlmError> {
        let generator: Arc<dyn TextGenerator> = match &config.gemini_api_key {
            Some(key) => {
                info!("LLM client initialized (model: {MODEL})");
                Arc::new(GeminiClient::new(Some(key.clone()))?)
            }
            None => {
                info!("No API key configured; assistant will return fallbacks");
                Arc::new(DisabledGenerator)
            }
        };
        let flags = AssistantFlags {
            polish_enabled: config.polish_enabled,
            generate_enabled: config.generate_enabled,
        };
        Ok(Self {
            assistant: ContentAssistant::new(generator, flags),
            exporter: ExportPipeline::to_directory(config.export_dir.clone()),
            config,
        })
    }

    /// A fresh session on the seed document with the configured template.
    pub fn new_session(&self) -> Editor {
        Editor::new(
            seed_resume(),
            self.config.template,
            self.assistant.clone(),
            self.exporter.clone(),
        )
    }
}
