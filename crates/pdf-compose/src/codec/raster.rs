//! Raster image to single-page PDF conversion

use crate::types::*;
use image::GenericImageView;
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;
use tempfile::NamedTempFile;

/// Points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// A converted image living in a temporary file.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct TempPdf {
    file: NamedTempFile,
}

impl TempPdf {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Bytes needed for a `width` x `height` plane with `channels` bytes per pixel
fn buffer_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}

/// Build a one-page document showing the image at `path`.
///
/// The page is sized so the image appears at `dpi` pixels per inch.
/// Transparent images keep their alpha channel as a soft mask.
pub fn image_to_document(path: impl AsRef<Path>, dpi: f32) -> Result<Document> {
    let path = path.as_ref();
    if dpi <= 0.0 {
        return Err(ComposeError::Config(format!("Invalid image DPI: {dpi}")));
    }
    let img = image::open(path).map_err(|e| ComposeError::unreadable_image(path, e))?;
    let (width_px, height_px) = img.dimensions();
    if width_px == 0 || height_px == 0 {
        return Err(ComposeError::unreadable_image(path, "image has no pixels"));
    }

    let pixels = buffer_len(width_px, height_px, 1)
        .ok_or_else(|| ComposeError::unreadable_image(path, "image is too large"))?;

    let has_alpha = img.color().has_alpha();
    let rgba = img.to_rgba8();
    let mut rgb = Vec::with_capacity(pixels.saturating_mul(3));
    let mut alpha = Vec::with_capacity(pixels);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut image_dict = image_xobject_dict(width_px, height_px, "DeviceRGB");
    if has_alpha {
        let smask_id = doc.add_object(Stream::new(
            image_xobject_dict(width_px, height_px, "DeviceGray"),
            alpha,
        ));
        image_dict.set("SMask", Object::Reference(smask_id));
    }
    let image_id = doc.add_object(Stream::new(image_dict, rgb));

    let page_width = width_px as f32 * POINTS_PER_INCH / dpi;
    let page_height = height_px as f32 * POINTS_PER_INCH / dpi;
    let content = format!("q {page_width:.4} 0 0 {page_height:.4} 0 0 cm /Im0 Do Q");
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let resources = Dictionary::from_iter(vec![(
        "XObject",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "Im0",
            Object::Reference(image_id),
        )])),
    )]);

    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width.into()),
                Object::Real(page_height.into()),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc.compress();
    Ok(doc)
}

/// Convert the image at `path` into a single-page PDF in a temporary file
pub fn image_to_temp_pdf(path: impl AsRef<Path>, dpi: f32) -> Result<TempPdf> {
    let path = path.as_ref();
    let mut doc = image_to_document(path, dpi)?;

    let mut file = tempfile::Builder::new()
        .prefix("pdf-compose-image-")
        .suffix(".pdf")
        .tempfile()?;
    doc.save_to(&mut file)
        .map_err(|e| ComposeError::write_failure(file.path(), e))?;

    log::debug!(
        "Converted {} to transient PDF {}",
        path.display(),
        file.path().display()
    );
    Ok(TempPdf { file })
}

fn image_xobject_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(color_space.as_bytes().to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ])
}
