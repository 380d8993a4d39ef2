use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resumotion::config::Config;
use resumotion::editor::PolishTarget;
use resumotion::export::{ExportFormat, ExportOutcome};
use resumotion::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuMotion v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config.clone()).context("building collaborators")?;
    let mut editor = state.new_session();

    let page = editor.render();
    info!(
        template = %editor.template(),
        blocks = page.block_count(),
        "Rendered seed document"
    );

    // Preview next to the exports
    tokio::fs::create_dir_all(&config.export_dir)
        .await
        .with_context(|| format!("creating {}", config.export_dir.display()))?;
    let preview = config.export_dir.join("preview.html");
    tokio::fs::write(&preview, page.to_html())
        .await
        .with_context(|| format!("writing {}", preview.display()))?;
    info!("Preview written to {}", preview.display());

    if config.polish_enabled {
        editor.polish(PolishTarget::Summary).await;
        info!(summary = %editor.document().personal_info.summary, "Summary polished");
    }

    for format in [ExportFormat::Pdf, ExportFormat::Docx] {
        match editor.export(format).await {
            ExportOutcome::Saved { path, size, .. } => {
                info!(%format, size, "Saved {}", path.display());
            }
            ExportOutcome::Failed { reason, .. } => {
                warn!(%format, %reason, "Export did not complete");
            }
        }
    }

    Ok(())
}
