use pdf_async_runtime::{EditorOptions, JobKind, PdfUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load_options(path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match EditorOptions::load(&path).await {
        Ok(options) => {
            log::info!("Loaded editor options from {}", path.display());
            let _ = update_tx.send(PdfUpdate::OptionsLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                job: JobKind::Options,
                message: format!("Failed to load options: {e}"),
            });
        }
    }
}

pub async fn handle_save_options(
    options: EditorOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match options.save(&path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::OptionsSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                job: JobKind::Options,
                message: format!("Failed to save options: {e}"),
            });
        }
    }
}
