#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_compose::codec::page_dimensions;
use std::path::{Path, PathBuf};

/// Build a document whose page `i` is `base_width + i` points wide, so pages
/// can be told apart after merging.
pub fn create_test_pdf(num_pages: usize, base_width: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(base_width + i as i64),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Two pages that inherit MediaBox and Resources from their page tree node
pub fn create_inherited_pdf(width: i64) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for _ in 0..2 {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(2)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(500),
            ]),
        ),
        (
            "Resources",
            Object::Dictionary(Dictionary::from_iter(vec![(
                "Font",
                Object::Dictionary(Dictionary::from_iter(vec![(
                    "F1",
                    Object::Reference(font_id),
                )])),
            )])),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn save_test_pdf(mut doc: Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

pub fn write_test_pdf(dir: &Path, name: &str, num_pages: usize, base_width: i64) -> PathBuf {
    save_test_pdf(create_test_pdf(num_pages, base_width), dir, name)
}

pub fn write_test_png(dir: &Path, name: &str, width: u32, height: u32, alpha: bool) -> PathBuf {
    let path = dir.join(name);
    if alpha {
        image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 128]))
            .save(&path)
            .unwrap();
    } else {
        image::RgbImage::from_pixel(width, height, image::Rgb([30, 30, 200]))
            .save(&path)
            .unwrap();
    }
    path
}

/// Widths of every page of the PDF at `path`, in page order
pub fn page_widths(path: &Path) -> Vec<f32> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| page_dimensions(&doc, id).unwrap().0)
        .collect()
}

pub fn assert_widths(path: &Path, expected: &[f32]) {
    let widths = page_widths(path);
    assert_eq!(widths.len(), expected.len(), "page count of {}", path.display());
    for (actual, want) in widths.iter().zip(expected) {
        assert!(
            (actual - want).abs() < 0.01,
            "expected widths {:?}, got {:?}",
            expected,
            widths
        );
    }
}
