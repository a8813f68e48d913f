use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No page is selected")]
    InvalidSelection,
    #[error("Index {index} is out of range for a sequence of {len} pages")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Unable to read PDF {}: {reason}", path.display())]
    UnreadableDocument { path: PathBuf, reason: String },
    #[error("Unable to read image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },
    #[error("Unable to write {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },
    #[error("{} has no page {} (it has {page_count})", path.display(), page_index + 1)]
    MissingPage {
        path: PathBuf,
        page_index: usize,
        page_count: usize,
    },
    #[error("Failed to render page: {0}")]
    Render(String),
    #[error("An export is in progress")]
    Busy,
    #[error("Nothing to write")]
    NothingToWrite,
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ComposeError {
    pub(crate) fn unreadable_document(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::UnreadableDocument {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unreadable_image(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::WriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Progress of a long-running merge or export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub operation: String,
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(operation: impl Into<String>, current: usize, total: usize) -> Self {
        Self {
            operation: operation.into(),
            current,
            total,
        }
    }

    /// Completed fraction in `0.0..=1.0`; an empty job counts as done
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.current as f32 / self.total as f32).min(1.0)
        }
    }
}

/// Outcome of loading several sources into the editor.
///
/// Unreadable sources are skipped rather than aborting the whole load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of page descriptors added to the sequence
    pub inserted: usize,
    /// Sources that could not be opened, with the error that stopped them
    pub skipped: Vec<(PathBuf, ComposeError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
