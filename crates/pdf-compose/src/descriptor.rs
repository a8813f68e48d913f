//! Page descriptors: lightweight references to one output page and its origin

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Raster formats accepted as page sources
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

/// Identity of a descriptor, stable across moves and reversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        Self(NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::SeqCst))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where an output page comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageOrigin {
    /// A page of an existing PDF (zero-based index)
    PdfPage { path: PathBuf, page_index: usize },
    /// A standalone raster image, converted to a page on export
    Image { path: PathBuf },
}

impl PageOrigin {
    pub fn path(&self) -> &Path {
        match self {
            PageOrigin::PdfPage { path, .. } | PageOrigin::Image { path } => path,
        }
    }

    /// Short human-readable label, e.g. `report.pdf p.3`
    pub fn label(&self) -> String {
        let name = self
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path().display().to_string());
        match self {
            PageOrigin::PdfPage { page_index, .. } => format!("{} p.{}", name, page_index + 1),
            PageOrigin::Image { .. } => name,
        }
    }
}

/// One entry of a [`PageSequence`](crate::PageSequence).
///
/// Descriptors are immutable; reordering moves them, it never edits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    id: DescriptorId,
    origin: PageOrigin,
}

impl PageDescriptor {
    pub fn new(origin: PageOrigin) -> Self {
        Self {
            id: DescriptorId::next(),
            origin,
        }
    }

    pub fn pdf_page(path: impl Into<PathBuf>, page_index: usize) -> Self {
        Self::new(PageOrigin::PdfPage {
            path: path.into(),
            page_index,
        })
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::new(PageOrigin::Image { path: path.into() })
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn origin(&self) -> &PageOrigin {
        &self.origin
    }
}

/// Kind of file a user picked as a page source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
}

impl SourceKind {
    /// Classify by extension (case-insensitive); `None` for unsupported files
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "pdf" {
            Some(SourceKind::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Image)
        } else {
            None
        }
    }
}
