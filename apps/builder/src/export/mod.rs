//! Export pipeline: PDF via rasterized page, DOCX via document blocks.
//!
//! Every step runs behind a collaborator trait so the pipeline itself only
//! sequences them. Failures stop at this boundary: they are logged and reported
//! as `ExportOutcome::Failed`, and nothing is saved.

pub mod docx;
pub mod pdf;
pub mod raster;
pub mod save;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::models::Resume;
use crate::render::{render, TemplateVariant};

pub use docx::{docx_blocks, DocBlock, DocxAssembler, DocxError, OoxmlDocx};
pub use pdf::{A4ImagePdf, PdfAssembler, PdfError};
pub use raster::{Bitmap, RasterError, Rasterizer, WireframeRasterizer};
pub use save::{DirectorySaver, FileSaver, SaveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Longest stem kept, in bytes. Leaves room for `_Resume.docx` under the
/// usual 255-byte file name limit.
const MAX_STEM_BYTES: usize = 200;

/// `"Alex Chen"` → `Alex_Chen_Resume.pdf`. Whitespace runs collapse to `_`;
/// path separators and characters Windows rejects also become `_`. Long names
/// are cut at `MAX_STEM_BYTES` on a char boundary. A blank name yields
/// `Resume.<ext>`.
pub fn export_file_name(full_name: &str, format: ExportFormat) -> String {
    let mut stem = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();
    if stem.len() > MAX_STEM_BYTES {
        let mut cut = MAX_STEM_BYTES;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem.truncate(cut);
    }
    if stem.is_empty() {
        format!("Resume.{}", format.extension())
    } else {
        format!("{stem}_Resume.{}", format.extension())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(#[from] RasterError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX assembly failed: {0}")]
    Docx(#[from] DocxError),

    #[error("saving failed: {0}")]
    Save(#[from] SaveError),

    #[error("export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved {
        format: ExportFormat,
        file_name: String,
        path: PathBuf,
        size: usize,
    },
    Failed {
        format: ExportFormat,
        reason: String,
    },
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved { .. })
    }
}

/// Sequences rasterize → assemble → save (PDF) or blocks → assemble → save (DOCX).
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    pdf: Arc<dyn PdfAssembler>,
    docx: Arc<dyn DocxAssembler>,
    saver: Arc<dyn FileSaver>,
}

impl ExportPipeline {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        pdf: Arc<dyn PdfAssembler>,
        docx: Arc<dyn DocxAssembler>,
        saver: Arc<dyn FileSaver>,
    ) -> Self {
        Self {
            rasterizer,
            pdf,
            docx,
            saver,
        }
    }

    /// Built-in collaborators, saving into `dir`.
    pub fn to_directory(dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(WireframeRasterizer::default()),
            Arc::new(A4ImagePdf),
            Arc::new(OoxmlDocx),
            Arc::new(DirectorySaver::new(dir)),
        )
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        resume: &Resume,
        variant: TemplateVariant,
    ) -> ExportOutcome {
        let file_name = export_file_name(&resume.personal_info.full_name, format);
        let result = match format {
            ExportFormat::Pdf => self.write_pdf(resume, variant, &file_name).await,
            ExportFormat::Docx => self.write_docx(resume, &file_name).await,
        };
        match result {
            Ok((path, size)) => {
                info!(%format, file = %file_name, size, "export saved");
                ExportOutcome::Saved {
                    format,
                    file_name,
                    path,
                    size,
                }
            }
            Err(e) => {
                error!(%format, file = %file_name, error = %e, "export failed");
                ExportOutcome::Failed {
                    format,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Captures the page `variant` renders for `resume`.
    pub async fn export_pdf(&self, resume: &Resume, variant: TemplateVariant) -> ExportOutcome {
        self.export(ExportFormat::Pdf, resume, variant).await
    }

    /// Template-independent; the selected variant plays no part.
    pub async fn export_docx(&self, resume: &Resume) -> ExportOutcome {
        self.export(ExportFormat::Docx, resume, TemplateVariant::default())
            .await
    }

    async fn write_pdf(
        &self,
        resume: &Resume,
        variant: TemplateVariant,
        file_name: &str,
    ) -> Result<(PathBuf, usize), ExportError> {
        let page = render(resume, variant);
        let bitmap = self.rasterizer.rasterize(&page).await?;
        let assembler = Arc::clone(&self.pdf);
        let title = resume.personal_info.full_name.clone();
        let bytes =
            tokio::task::spawn_blocking(move || assembler.assemble(&bitmap, &title)).await??;
        let size = bytes.len();
        let path = self.saver.save(bytes, file_name).await?;
        Ok((path, size))
    }

    async fn write_docx(
        &self,
        resume: &Resume,
        file_name: &str,
    ) -> Result<(PathBuf, usize), ExportError> {
        let blocks = docx_blocks(resume);
        let assembler = Arc::clone(&self.docx);
        let bytes = tokio::task::spawn_blocking(move || assembler.assemble(&blocks)).await??;
        let size = bytes.len();
        let path = self.saver.save(bytes, file_name).await?;
        Ok((path, size))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
