use std::path::PathBuf;
use tokio::sync::mpsc;

// Re-export types from the library crate
pub use pdf_compose::{EditorOptions, ExportJob, Progress};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    MergeFiles {
        input_paths: Vec<PathBuf>,
        output_path: PathBuf,
    },
    ReverseFile {
        input_path: PathBuf,
        output_path: PathBuf,
    },
    /// Write an edited page sequence; the editor stays busy until a reply arrives
    ExportSequence {
        job: ExportJob,
        output_path: PathBuf,
        image_dpi: f32,
    },
    LoadOptions {
        path: PathBuf,
    },
    SaveOptions {
        options: EditorOptions,
        path: PathBuf,
    },
}

/// Which command an update answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Merge,
    Reverse,
    Export,
    Options,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    MergeComplete {
        path: PathBuf,
        page_count: usize,
    },
    ReverseComplete {
        path: PathBuf,
        page_count: usize,
    },
    ExportComplete {
        path: PathBuf,
        page_count: usize,
    },
    OptionsLoaded {
        options: EditorOptions,
    },
    OptionsSaved {
        path: PathBuf,
    },
    Error {
        job: JobKind,
        message: String,
    },
}

impl PdfUpdate {
    /// The job this update ends, if it is a completion or a failure
    pub fn finished_job(&self) -> Option<JobKind> {
        match self {
            PdfUpdate::Progress { .. } => None,
            PdfUpdate::MergeComplete { .. } => Some(JobKind::Merge),
            PdfUpdate::ReverseComplete { .. } => Some(JobKind::Reverse),
            PdfUpdate::ExportComplete { .. } => Some(JobKind::Export),
            PdfUpdate::OptionsLoaded { .. } | PdfUpdate::OptionsSaved { .. } => {
                Some(JobKind::Options)
            }
            PdfUpdate::Error { job, .. } => Some(*job),
        }
    }
}

impl From<Progress> for PdfUpdate {
    fn from(progress: Progress) -> Self {
        PdfUpdate::Progress {
            operation: progress.operation,
            current: progress.current,
            total: progress.total,
        }
    }
}

/// Progress callback that forwards every report to the UI.
///
/// Send failures are ignored: a closed UI has nobody left to inform.
pub fn progress_sender(
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) -> impl FnMut(Progress) + Send + 'static {
    let update_tx = update_tx.clone();
    move |progress| {
        let _ = update_tx.send(progress.into());
    }
}
