use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes PDF commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::MergeFiles {
            input_paths,
            output_path,
        } => {
            handlers::compose::handle_merge(input_paths, output_path, update_tx).await;
        }
        PdfCommand::ReverseFile {
            input_path,
            output_path,
        } => {
            handlers::compose::handle_reverse(input_path, output_path, update_tx).await;
        }
        PdfCommand::ExportSequence {
            job,
            output_path,
            image_dpi,
        } => {
            handlers::compose::handle_export(job, output_path, image_dpi, update_tx).await;
        }
        PdfCommand::LoadOptions { path } => {
            handlers::options::handle_load_options(path, update_tx).await;
        }
        PdfCommand::SaveOptions { options, path } => {
            handlers::options::handle_save_options(options, path, update_tx).await;
        }
    }
}
