//! Editor Controller: owns the session's document and template choice.
//!
//! Edits are synchronous whole-document swaps. Assistant and export work is
//! split into begin / run / finish so a job can be in flight while the caller
//! keeps editing: `begin_*` marks the busy key and snapshots what the job needs,
//! the returned job runs without borrowing the editor, and `finish_*` clears the
//! busy key and applies the result to whatever the document is by then.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::assistant::{ContentAssistant, RewriteKind};
use crate::export::{ExportFormat, ExportOutcome, ExportPipeline};
use crate::models::{
    EducationEdit, ExperienceEdit, ItemId, PersonalField, ProjectEdit, Resume,
};
use crate::render::page::Page;
use crate::render::{render, TemplateVariant};

/// Which text a polish job rewrites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PolishTarget {
    Summary,
    ExperienceDescription(ItemId),
}

impl PolishTarget {
    fn kind(&self) -> RewriteKind {
        match self {
            PolishTarget::Summary => RewriteKind::Summary,
            PolishTarget::ExperienceDescription(_) => RewriteKind::Bullet,
        }
    }
}

/// Scope of a busy indicator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusyKey {
    Polish(PolishTarget),
    GenerateSummary,
    Export(ExportFormat),
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

#[must_use = "a begun job keeps its busy flag until finished"]
pub struct PolishJob {
    target: PolishTarget,
    text: String,
    assistant: ContentAssistant,
}

pub struct PolishResult {
    target: PolishTarget,
    text: String,
}

impl PolishJob {
    pub async fn run(self) -> PolishResult {
        let text = self.assistant.rewrite(&self.text, self.target.kind()).await;
        PolishResult {
            target: self.target,
            text,
        }
    }
}

#[must_use = "a begun job keeps its busy flag until finished"]
pub struct GenerateJob {
    role: String,
    skills: Vec<String>,
    assistant: ContentAssistant,
}

pub struct GenerateResult {
    summary: String,
}

impl GenerateJob {
    pub async fn run(self) -> GenerateResult {
        let summary = self
            .assistant
            .generate_summary(&self.role, &self.skills)
            .await;
        GenerateResult { summary }
    }
}

#[must_use = "a begun job keeps its busy flag until finished"]
pub struct ExportJob {
    format: ExportFormat,
    document: Arc<Resume>,
    template: TemplateVariant,
    exporter: ExportPipeline,
}

impl ExportJob {
    pub async fn run(self) -> ExportOutcome {
        self.exporter
            .export(self.format, &self.document, self.template)
            .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Editor
// ────────────────────────────────────────────────────────────────────────────

pub struct Editor {
    document: Arc<Resume>,
    template: TemplateVariant,
    /// In-flight job count per key. Repeated invocations are not de-duplicated.
    busy: HashMap<BusyKey, usize>,
    assistant: ContentAssistant,
    exporter: ExportPipeline,
}

impl Editor {
    pub fn new(
        document: Resume,
        template: TemplateVariant,
        assistant: ContentAssistant,
        exporter: ExportPipeline,
    ) -> Self {
        Self {
            document: Arc::new(document),
            template,
            busy: HashMap::new(),
            assistant,
            exporter,
        }
    }

    pub fn document(&self) -> Arc<Resume> {
        Arc::clone(&self.document)
    }

    pub fn template(&self) -> TemplateVariant {
        self.template
    }

    pub fn select_template(&mut self, template: TemplateVariant) {
        if self.template != template {
            debug!(from = %self.template, to = %template, "template selected");
        }
        self.template = template;
    }

    /// The page for the current document and template.
    pub fn render(&self) -> Page {
        render(&self.document, self.template)
    }

    fn replace(&mut self, next: Resume) {
        self.document = Arc::new(next);
    }

    // ── Busy state ──────────────────────────────────────────────────────────

    pub fn is_busy(&self, key: &BusyKey) -> bool {
        self.busy.get(key).is_some_and(|n| *n > 0)
    }

    pub fn busy_keys(&self) -> impl Iterator<Item = &BusyKey> {
        self.busy.iter().filter(|(_, n)| **n > 0).map(|(k, _)| k)
    }

    fn mark_busy(&mut self, key: BusyKey) {
        *self.busy.entry(key).or_insert(0) += 1;
    }

    fn clear_busy(&mut self, key: &BusyKey) {
        if let Some(n) = self.busy.get_mut(key) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.busy.remove(key);
            }
        }
    }

    // ── Edits ───────────────────────────────────────────────────────────────

    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        let next = self.document.set_personal_field(field, value);
        self.replace(next);
    }

    pub fn add_experience(&mut self) -> ItemId {
        let (next, id) = self.document.add_experience();
        self.replace(next);
        id
    }

    pub fn update_experience(&mut self, id: &ItemId, edit: ExperienceEdit) {
        let next = self.document.update_experience(id, edit);
        self.replace(next);
    }

    pub fn remove_experience(&mut self, id: &ItemId) {
        let next = self.document.remove_experience(id);
        self.replace(next);
    }

    pub fn add_education(&mut self) -> ItemId {
        let (next, id) = self.document.add_education();
        self.replace(next);
        id
    }

    pub fn update_education(&mut self, id: &ItemId, edit: EducationEdit) {
        let next = self.document.update_education(id, edit);
        self.replace(next);
    }

    pub fn remove_education(&mut self, id: &ItemId) {
        let next = self.document.remove_education(id);
        self.replace(next);
    }

    pub fn add_project(&mut self) -> ItemId {
        let (next, id) = self.document.add_project();
        self.replace(next);
        id
    }

    pub fn update_project(&mut self, id: &ItemId, edit: ProjectEdit) {
        let next = self.document.update_project(id, edit);
        self.replace(next);
    }

    pub fn remove_project(&mut self, id: &ItemId) {
        let next = self.document.remove_project(id);
        self.replace(next);
    }

    pub fn set_skills(&mut self, skills: Vec<String>) {
        let next = self.document.set_skills(skills);
        self.replace(next);
    }

    pub fn set_skills_from_csv(&mut self, text: &str) {
        let next = self.document.set_skills_from_csv(text);
        self.replace(next);
    }

    // ── Assistant ───────────────────────────────────────────────────────────

    fn polish_source(&self, target: &PolishTarget) -> Option<&str> {
        match target {
            PolishTarget::Summary => Some(self.document.personal_info.summary.as_str()),
            PolishTarget::ExperienceDescription(id) => self
                .document
                .experience
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.description.as_str()),
        }
    }

    /// `None` when the target text is empty or the item is gone.
    pub fn begin_polish(&mut self, target: PolishTarget) -> Option<PolishJob> {
        let text = self.polish_source(&target)?;
        if text.trim().is_empty() {
            return None;
        }
        let text = text.to_string();
        self.mark_busy(BusyKey::Polish(target.clone()));
        Some(PolishJob {
            target,
            text,
            assistant: self.assistant.clone(),
        })
    }

    /// Writes the rewrite into the current document. An item removed while the
    /// job ran is left removed.
    pub fn finish_polish(&mut self, result: PolishResult) {
        self.clear_busy(&BusyKey::Polish(result.target.clone()));
        match result.target {
            PolishTarget::Summary => {
                self.set_personal_field(PersonalField::Summary, result.text);
            }
            PolishTarget::ExperienceDescription(id) => {
                self.update_experience(&id, ExperienceEdit::Description(result.text));
            }
        }
    }

    pub async fn polish(&mut self, target: PolishTarget) {
        if let Some(job) = self.begin_polish(target) {
            let result = job.run().await;
            self.finish_polish(result);
        }
    }

    pub fn begin_generate_summary(&mut self) -> GenerateJob {
        self.mark_busy(BusyKey::GenerateSummary);
        GenerateJob {
            role: self.document.personal_info.role.clone(),
            skills: self.document.skills.clone(),
            assistant: self.assistant.clone(),
        }
    }

    /// Overwrites the summary only with a non-empty draft.
    pub fn finish_generate_summary(&mut self, result: GenerateResult) {
        self.clear_busy(&BusyKey::GenerateSummary);
        if !result.summary.is_empty() {
            self.set_personal_field(PersonalField::Summary, result.summary);
        }
    }

    pub async fn generate_summary(&mut self) {
        let result = self.begin_generate_summary().run().await;
        self.finish_generate_summary(result);
    }

    // ── Export ──────────────────────────────────────────────────────────────

    pub fn begin_export(&mut self, format: ExportFormat) -> ExportJob {
        self.mark_busy(BusyKey::Export(format));
        info!(%format, template = %self.template, "export started");
        ExportJob {
            format,
            document: self.document(),
            template: self.template,
            exporter: self.exporter.clone(),
        }
    }

    pub fn finish_export(&mut self, format: ExportFormat, outcome: ExportOutcome) -> ExportOutcome {
        self.clear_busy(&BusyKey::Export(format));
        outcome
    }

    pub async fn export(&mut self, format: ExportFormat) -> ExportOutcome {
        let outcome = self.begin_export(format).run().await;
        self.finish_export(format, outcome)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::assistant::AssistantFlags;
    use crate::export::{Bitmap, RasterError, Rasterizer};
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::models::seed_resume;

    struct Echo(&'static str);

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct BrokenRasterizer;

    #[async_trait]
    impl Rasterizer for BrokenRasterizer {
        async fn rasterize(&self, _page: &Page) -> Result<Bitmap, RasterError> {
            Err(RasterError::Backend("boom".into()))
        }
    }

    fn editor_with(generator: Arc<dyn TextGenerator>, dir: &std::path::Path) -> Editor {
        Editor::new(
            seed_resume(),
            TemplateVariant::default(),
            ContentAssistant::new(generator, AssistantFlags::all_enabled()),
            ExportPipeline::to_directory(dir),
        )
    }

    #[test]
    fn test_edits_swap_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        let before = editor.document();
        editor.set_personal_field(PersonalField::FullName, "Sam Lee");
        assert_eq!(before.personal_info.full_name, "Alex Chen");
        assert_eq!(editor.document().personal_info.full_name, "Sam Lee");
    }

    #[test]
    fn test_add_and_remove_items() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        let a = editor.add_experience();
        let b = editor.add_experience();
        assert_ne!(a, b);
        assert_eq!(editor.document().experience.len(), 4);
        editor.remove_experience(&a);
        editor.remove_experience(&a);
        assert_eq!(editor.document().experience.len(), 3);

        let p = editor.add_project();
        editor.update_project(&p, ProjectEdit::Name("CLI".into()));
        assert!(editor.document().projects.iter().any(|x| x.name == "CLI"));
        let e = editor.add_education();
        editor.update_education(&e, EducationEdit::School("MIT".into()));
        editor.remove_education(&e);
        assert!(editor.document().education.iter().all(|x| x.school != "MIT"));
    }

    #[test]
    fn test_template_switch_rerenders_same_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        editor.select_template(TemplateVariant::ExecutiveSuite);
        assert_eq!(editor.template(), TemplateVariant::ExecutiveSuite);
        assert_eq!(editor.render().variant, TemplateVariant::ExecutiveSuite);
        assert_eq!(editor.document().personal_info.full_name, "Alex Chen");
    }

    #[test]
    fn test_skills_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        editor.set_skills_from_csv("Go, Rust ,SQL");
        assert_eq!(editor.document().skills, vec!["Go", "Rust", "SQL"]);
    }

    #[tokio::test]
    async fn test_polish_summary_applies_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Echo("Sharper summary.")), dir.path());
        editor.polish(PolishTarget::Summary).await;
        assert_eq!(editor.document().personal_info.summary, "Sharper summary.");
        assert_eq!(editor.busy_keys().count(), 0);
    }

    #[tokio::test]
    async fn test_polish_failure_keeps_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        let before = editor.document().personal_info.summary.clone();
        editor.polish(PolishTarget::Summary).await;
        assert_eq!(editor.document().personal_info.summary, before);
    }

    #[test]
    fn test_polish_empty_text_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Echo("x")), dir.path());
        editor.set_personal_field(PersonalField::Summary, "");
        assert!(editor.begin_polish(PolishTarget::Summary).is_none());
        assert!(!editor.is_busy(&BusyKey::Polish(PolishTarget::Summary)));
        let missing = PolishTarget::ExperienceDescription(ItemId::from("nope"));
        assert!(editor.begin_polish(missing).is_none());
    }

    #[tokio::test]
    async fn test_busy_scoped_and_other_fields_stay_editable() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Echo("Led the team.")), dir.path());
        let id = ItemId::from("1");
        let target = PolishTarget::ExperienceDescription(id.clone());
        let job = editor.begin_polish(target.clone()).unwrap();
        assert!(editor.is_busy(&BusyKey::Polish(target.clone())));
        assert!(!editor.is_busy(&BusyKey::Polish(PolishTarget::Summary)));

        editor.set_personal_field(PersonalField::Phone, "555-0000");
        let result = job.run().await;
        editor.finish_polish(result);

        let doc = editor.document();
        assert!(!editor.is_busy(&BusyKey::Polish(target)));
        assert_eq!(doc.personal_info.phone, "555-0000");
        assert_eq!(doc.experience.iter().find(|e| e.id == id).unwrap().description, "Led the team.");
    }

    #[tokio::test]
    async fn test_polish_result_for_removed_item_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Echo("New")), dir.path());
        let id = ItemId::from("2");
        let job = editor
            .begin_polish(PolishTarget::ExperienceDescription(id.clone()))
            .unwrap();
        editor.remove_experience(&id);
        let result = job.run().await;
        editor.finish_polish(result);
        assert!(editor.document().experience.iter().all(|e| e.id != id));
        assert_eq!(editor.busy_keys().count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_jobs_counted_separately() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Echo("A")), dir.path());
        let first = editor.begin_polish(PolishTarget::Summary).unwrap();
        let second = editor.begin_polish(PolishTarget::Summary).unwrap();
        let r1 = first.run().await;
        editor.finish_polish(r1);
        assert!(editor.is_busy(&BusyKey::Polish(PolishTarget::Summary)));
        let r2 = second.run().await;
        editor.finish_polish(r2);
        assert!(!editor.is_busy(&BusyKey::Polish(PolishTarget::Summary)));
    }

    #[tokio::test]
    async fn test_generated_summary_overwrites_only_when_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        let before = editor.document().personal_info.summary.clone();
        editor.generate_summary().await;
        assert_eq!(editor.document().personal_info.summary, before);

        let mut editor = editor_with(Arc::new(Echo(" Fresh summary. ")), dir.path());
        editor.generate_summary().await;
        assert_eq!(editor.document().personal_info.summary, "Fresh summary.");
        assert!(!editor.is_busy(&BusyKey::GenerateSummary));
    }

    #[tokio::test]
    async fn test_export_saves_and_clears_busy() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with(Arc::new(Failing), dir.path());
        let outcome = editor.export(ExportFormat::Docx).await;
        assert!(outcome.is_saved());
        assert!(dir.path().join("Alex_Chen_Resume.docx").exists());
        assert!(!editor.is_busy(&BusyKey::Export(ExportFormat::Docx)));
    }

    #[tokio::test]
    async fn test_export_failure_clears_busy_and_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ExportPipeline::new(
            Arc::new(BrokenRasterizer),
            Arc::new(crate::export::A4ImagePdf),
            Arc::new(crate::export::OoxmlDocx),
            Arc::new(crate::export::DirectorySaver::new(dir.path())),
        );
        let mut editor = Editor::new(
            seed_resume(),
            TemplateVariant::MinimalistAts,
            ContentAssistant::disabled(),
            exporter,
        );
        let job = editor.begin_export(ExportFormat::Pdf);
        assert!(editor.is_busy(&BusyKey::Export(ExportFormat::Pdf)));
        let outcome = job.run().await;
        let outcome = editor.finish_export(ExportFormat::Pdf, outcome);
        assert!(matches!(outcome, ExportOutcome::Failed { .. }));
        assert!(!editor.is_busy(&BusyKey::Export(ExportFormat::Pdf)));
        assert_eq!(*editor.document(), seed_resume());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
