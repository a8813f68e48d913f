use pdf_async_runtime::{ExportJob, JobKind, PdfUpdate, progress_sender};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_merge(
    input_paths: Vec<PathBuf>,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let file_count = input_paths.len();
    match pdf_compose::merge_files(input_paths, output_path.clone(), progress_sender(update_tx))
        .await
    {
        Ok(page_count) => {
            log::info!("Merged {} files into {}", file_count, output_path.display());
            let _ = update_tx.send(PdfUpdate::MergeComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => {
            log::warn!("Merge failed: {}", e);
            let _ = update_tx.send(PdfUpdate::Error {
                job: JobKind::Merge,
                message: format!("Failed to merge PDFs: {e}"),
            });
        }
    }
}

pub async fn handle_reverse(
    input_path: PathBuf,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let _ = update_tx.send(PdfUpdate::Progress {
        operation: format!("Reversing {}", input_path.display()),
        current: 0,
        total: 1,
    });

    match pdf_compose::reverse_file(input_path, output_path.clone()).await {
        Ok(page_count) => {
            let _ = update_tx.send(PdfUpdate::ReverseComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => {
            log::warn!("Reverse failed: {}", e);
            let _ = update_tx.send(PdfUpdate::Error {
                job: JobKind::Reverse,
                message: format!("Failed to reverse PDF: {e}"),
            });
        }
    }
}

pub async fn handle_export(
    job: ExportJob,
    output_path: PathBuf,
    image_dpi: f32,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match pdf_compose::export_sequence(
        job,
        output_path.clone(),
        image_dpi,
        progress_sender(update_tx),
    )
    .await
    {
        Ok(report) => {
            let _ = update_tx.send(PdfUpdate::ExportComplete {
                path: output_path,
                page_count: report.page_count,
            });
        }
        Err(e) => {
            log::warn!("Export failed: {}", e);
            let _ = update_tx.send(PdfUpdate::Error {
                job: JobKind::Export,
                message: format!("Failed to save PDF: {e}"),
            });
        }
    }
}
