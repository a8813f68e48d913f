//! Thumbnail cache for the page editor
//!
//! Previews are keyed by descriptor identity, so reordering never triggers a
//! re-render. A page that cannot be rendered gets a neutral placeholder; the
//! editor stays usable when one source is broken.

use crate::descriptor::{DescriptorId, PageDescriptor, PageOrigin};
use crate::types::*;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 150;
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 200;

const CANVAS_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([220, 220, 220, 255]);
const PLACEHOLDER_BORDER: Rgba<u8> = Rgba([160, 160, 160, 255]);

/// Rasterizes one PDF page to an RGBA bitmap
pub trait PageRasterizer {
    fn rasterize(&self, path: &Path, page_index: usize, scale: f32) -> Result<RgbaImage>;
}

impl<R: PageRasterizer + ?Sized> PageRasterizer for Box<R> {
    fn rasterize(&self, path: &Path, page_index: usize, scale: f32) -> Result<RgbaImage> {
        (**self).rasterize(path, page_index, scale)
    }
}

/// Rasterizer for builds without a PDF renderer: every PDF page becomes a placeholder
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRasterizer;

impl PageRasterizer for UnavailableRasterizer {
    fn rasterize(&self, _path: &Path, _page_index: usize, _scale: f32) -> Result<RgbaImage> {
        Err(ComposeError::Render(
            "PDF rendering is not available in this build".to_string(),
        ))
    }
}

/// A rendered preview
#[derive(Debug, Clone)]
pub struct Thumbnail {
    image: RgbaImage,
    placeholder: bool,
}

impl Thumbnail {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

pub struct ThumbnailCache<R> {
    rasterizer: R,
    width: u32,
    height: u32,
    scale: f32,
    entries: HashMap<DescriptorId, Thumbnail>,
}

impl<R: PageRasterizer> ThumbnailCache<R> {
    pub fn new(rasterizer: R, width: u32, height: u32, scale: f32) -> Self {
        Self {
            rasterizer,
            width,
            height,
            scale,
            entries: HashMap::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: DescriptorId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: DescriptorId) -> Option<&Thumbnail> {
        self.entries.get(&id)
    }

    /// Cached preview for `descriptor`, rendering it on first reference
    pub fn get_or_render(&mut self, descriptor: &PageDescriptor) -> &Thumbnail {
        let id = descriptor.id();
        if !self.entries.contains_key(&id) {
            let thumbnail = self.render(descriptor.origin());
            self.entries.insert(id, thumbnail);
        } else {
            log::debug!("Thumbnail cache hit for {}", descriptor.origin().label());
        }
        &self.entries[&id]
    }

    /// Drop the entry of a descriptor that left the sequence
    pub fn evict(&mut self, id: DescriptorId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Change the preview size or raster scale, dropping entries rendered
    /// with the old settings.
    pub fn reconfigure(&mut self, width: u32, height: u32, scale: f32) {
        if (width, height, scale) != (self.width, self.height, self.scale) {
            self.width = width;
            self.height = height;
            self.scale = scale;
            self.entries.clear();
        }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    fn render(&self, origin: &PageOrigin) -> Thumbnail {
        let rendered = match origin {
            PageOrigin::PdfPage { path, page_index } => {
                self.rasterizer.rasterize(path, *page_index, self.scale)
            }
            PageOrigin::Image { path } => image::open(path)
                .map(|img| img.to_rgba8())
                .map_err(|e| ComposeError::unreadable_image(path, e)),
        };

        match rendered {
            Ok(image) if image.width() > 0 && image.height() > 0 => Thumbnail {
                image: letterbox(&image, self.width, self.height),
                placeholder: false,
            },
            Ok(_) => {
                log::warn!("Empty render for {}, using placeholder", origin.label());
                self.placeholder()
            }
            Err(e) => {
                log::warn!("Thumbnail for {} failed: {}", origin.label(), e);
                self.placeholder()
            }
        }
    }

    fn placeholder(&self) -> Thumbnail {
        Thumbnail {
            image: placeholder(self.width, self.height),
            placeholder: true,
        }
    }
}

/// Scale `image` to fit inside `width`×`height`, preserving aspect ratio,
/// and center it on a white canvas of exactly that size.
pub fn letterbox(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, CANVAS_COLOR);
    if image.width() == 0 || image.height() == 0 || width == 0 || height == 0 {
        return canvas;
    }

    let ratio = f32::min(
        width as f32 / image.width() as f32,
        height as f32 / image.height() as f32,
    );
    let fit_width = ((image.width() as f32 * ratio).round() as u32).clamp(1, width);
    let fit_height = ((image.height() as f32 * ratio).round() as u32).clamp(1, height);
    let resized = imageops::resize(image, fit_width, fit_height, FilterType::Triangle);

    let x = (width - fit_width) / 2;
    let y = (height - fit_height) / 2;
    imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
    canvas
}

/// Neutral grey tile with a darker border
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let edge = x < 2 || y < 2 || x + 2 >= width || y + 2 >= height;
        if edge {
            PLACEHOLDER_BORDER
        } else {
            PLACEHOLDER_FILL
        }
    })
}
