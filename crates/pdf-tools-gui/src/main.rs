#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod jobs;
mod logger;
mod rasterizer;
mod ui_components;
mod views;
mod worker;

use logger::AppLogger;

fn main() -> anyhow::Result<()> {
    let logger = AppLogger::new(500);
    logger.clone().init()?;

    // The worker runs on this runtime for the lifetime of the window
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_drag_and_drop(true)
            .with_title("PDF Tools"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Tools",
        options,
        Box::new(move |cc| Ok(Box::new(app::PdfToolsApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {e}"))?;

    runtime.shutdown_background();
    Ok(())
}
