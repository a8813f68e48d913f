use pdf_compose::{PageRasterizer, UnavailableRasterizer};

#[cfg(feature = "pdf-viewer")]
use pdf_compose::{ComposeError, Result};
#[cfg(feature = "pdf-viewer")]
use pdfium_render::prelude::*;
#[cfg(feature = "pdf-viewer")]
use std::path::Path;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
#[cfg(feature = "pdf-viewer")]
pub fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // Try to load from vendor directory (relative to workspace root)
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    // Fallback to system library or default search paths
    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Renders thumbnails through Pdfium
#[cfg(feature = "pdf-viewer")]
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

#[cfg(feature = "pdf-viewer")]
impl PdfiumRasterizer {
    pub fn new() -> std::result::Result<Self, PdfiumError> {
        Ok(Self {
            pdfium: init_pdfium()?,
        })
    }
}

#[cfg(feature = "pdf-viewer")]
impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path, page_index: usize, scale: f32) -> Result<image::RgbaImage> {
        let render_error = |e: PdfiumError| ComposeError::Render(e.to_string());

        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(render_error)?;
        let index = u16::try_from(page_index).map_err(|_| {
            ComposeError::Render(format!("Page index {} is too large", page_index))
        })?;
        let page = document.pages().get(index).map_err(render_error)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page.render_with_config(&config).map_err(render_error)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        image::RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec()).ok_or_else(
            || ComposeError::Render(format!("Unexpected bitmap size {}x{}", width, height)),
        )
    }
}

/// Pick the best rasterizer this build and machine offer.
///
/// Without Pdfium the editor still works; PDF thumbnails become placeholders.
pub fn create_rasterizer() -> Box<dyn PageRasterizer> {
    #[cfg(feature = "pdf-viewer")]
    match PdfiumRasterizer::new() {
        Ok(rasterizer) => return Box::new(rasterizer),
        Err(e) => log::warn!("Pdfium unavailable, PDF thumbnails disabled: {}", e),
    }

    Box::new(UnavailableRasterizer)
}

#[cfg(all(test, feature = "pdf-viewer"))]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object, Stream};

    fn write_sample_pdf(path: &Path) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content = b"0 0 1 rg 100 100 400 600 re f".to_vec();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(vec![Object::Reference(page_id)])),
                ("Count", Object::Integer(1)),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_pdfium_rasterizes_page_at_scale() {
        let Ok(rasterizer) = PdfiumRasterizer::new() else {
            eprintln!("Pdfium library not found, skipping");
            return;
        };
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.pdf");
        write_sample_pdf(&path);

        let image = rasterizer.rasterize(&path, 0, 0.25).unwrap();
        assert!((image.width() as i32 - 153).abs() <= 1);
        assert!((image.height() as i32 - 198).abs() <= 1);
        assert!(image.pixels().any(|p| p.0[2] > 200 && p.0[0] < 50));

        assert!(matches!(
            rasterizer.rasterize(&path, 3, 0.25),
            Err(ComposeError::Render(_))
        ));
    }
}
