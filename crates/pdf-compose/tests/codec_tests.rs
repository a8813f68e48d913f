mod common;

use common::*;
use lopdf::Object;
use pdf_compose::codec::{self, PageWriter};
use pdf_compose::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_and_save_pdf() {
    let dir = TempDir::new().unwrap();
    let path = write_test_pdf(dir.path(), "a.pdf", 5, 200);

    let loaded = load_pdf(&path).await.unwrap();
    assert_eq!(codec::page_count(&loaded), 5);

    let copy = dir.path().join("copy.pdf");
    save_pdf(loaded, &copy).await.unwrap();
    assert_widths(&copy, &[200.0, 201.0, 202.0, 203.0, 204.0]);
}

#[tokio::test]
async fn test_load_missing_pdf() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");

    match load_pdf(&missing).await {
        Err(ComposeError::UnreadableDocument { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected UnreadableDocument, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_page_id_reports_missing_page() {
    let doc = create_test_pdf(2, 200);
    let path = std::path::Path::new("a.pdf");

    assert!(codec::page_id(&doc, path, 1).is_ok());
    assert!(matches!(
        codec::page_id(&doc, path, 2),
        Err(ComposeError::MissingPage {
            page_index: 2,
            page_count: 2,
            ..
        })
    ));
}

#[test]
fn test_page_writer_interleaves_sources() {
    let dir = TempDir::new().unwrap();
    let a = create_test_pdf(2, 200);
    let b = create_test_pdf(2, 300);
    let out = dir.path().join("out.pdf");

    let mut writer = PageWriter::new();
    writer.append_page(&b, "b.pdf".as_ref(), 1).unwrap();
    writer.append_page(&a, "a.pdf".as_ref(), 0).unwrap();
    writer.append_page(&b, "b.pdf".as_ref(), 0).unwrap();
    writer.append_page(&a, "a.pdf".as_ref(), 0).unwrap();
    assert_eq!(writer.page_count(), 4);
    writer.save(&out).unwrap();

    assert_widths(&out, &[301.0, 200.0, 300.0, 200.0]);
}

#[test]
fn test_page_writer_shares_resources_within_source() {
    let source = create_inherited_pdf(400);

    let mut writer = PageWriter::new();
    writer.append_document(&source, "inherited.pdf".as_ref()).unwrap();
    let doc = writer.finish();

    // Both pages reference the same copied font
    let fonts: Vec<_> = doc
        .get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let font = resources.get(b"Font").unwrap().as_dict().unwrap();
            font.get(b"F1").unwrap().as_reference().unwrap()
        })
        .collect();
    assert_eq!(fonts.len(), 2);
    assert_eq!(fonts[0], fonts[1]);
}

#[test]
fn test_empty_writer_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.pdf");

    assert!(matches!(
        PageWriter::new().save(&out),
        Err(ComposeError::NothingToWrite)
    ));
    assert!(!out.exists());
}

#[test]
fn test_deep_copy_survives_reference_cycles() {
    let mut source = create_test_pdf(1, 200);
    // Annotation pointing back at its page
    let page_id = *source.get_pages().values().next().unwrap();
    let annot_id = source.add_object(lopdf::Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Text".to_vec())),
        ("P", Object::Reference(page_id)),
    ]));
    source
        .get_dictionary_mut(page_id)
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(annot_id)]));

    let mut writer = PageWriter::new();
    writer.append_page(&source, "a.pdf".as_ref(), 0).unwrap();
    let doc = writer.finish();

    let new_page_id = *doc.get_pages().values().next().unwrap();
    let annots = doc
        .get_dictionary(new_page_id)
        .unwrap()
        .get(b"Annots")
        .unwrap()
        .as_array()
        .unwrap();
    let annot = doc
        .get_dictionary(annots[0].as_reference().unwrap())
        .unwrap();
    assert_eq!(annot.get(b"P").unwrap().as_reference().unwrap(), new_page_id);
}

/// Give page `from` a link annotation whose destination is page `to`
fn add_page_link(doc: &mut lopdf::Document, from: u32, to: u32) {
    let pages = doc.get_pages();
    let (from_id, to_id) = (pages[&(from + 1)], pages[&(to + 1)]);
    let link_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Dest",
            Object::Array(vec![Object::Reference(to_id), Object::Name(b"Fit".to_vec())]),
        ),
    ]));
    doc.get_dictionary_mut(from_id)
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(link_id)]));
}

/// Target of the first link on the output page at `index`
fn link_target(doc: &lopdf::Document, index: u32) -> lopdf::ObjectId {
    let page_id = doc.get_pages()[&(index + 1)];
    let annots = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Annots")
        .unwrap()
        .as_array()
        .unwrap();
    let link = doc
        .get_dictionary(annots[0].as_reference().unwrap())
        .unwrap();
    link.get(b"Dest").unwrap().as_array().unwrap()[0]
        .as_reference()
        .unwrap()
}

fn count_page_objects(doc: &lopdf::Document) -> usize {
    doc.objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .ok()
                .and_then(|dict| dict.get(b"Type").ok())
                .and_then(|ty| ty.as_name().ok())
                == Some(b"Page".as_slice())
        })
        .count()
}

#[test]
fn test_link_to_unexported_page_is_not_copied() {
    let mut source = create_test_pdf(3, 200);
    add_page_link(&mut source, 1, 2);

    let mut writer = PageWriter::new();
    writer.append_page(&source, "a.pdf".as_ref(), 1).unwrap();
    let doc = writer.finish();

    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(count_page_objects(&doc), 1);
    let target = link_target(&doc, 0);
    assert!(matches!(doc.get_object(target), Ok(Object::Null)));
}

#[test]
fn test_link_to_exported_page_points_at_its_copy() {
    let mut source = create_test_pdf(3, 200);
    add_page_link(&mut source, 0, 2);

    let mut writer = PageWriter::new();
    writer.append_page(&source, "a.pdf".as_ref(), 0).unwrap();
    writer.append_page(&source, "a.pdf".as_ref(), 2).unwrap();
    let doc = writer.finish();

    assert_eq!(count_page_objects(&doc), 2);
    assert_eq!(link_target(&doc, 0), doc.get_pages()[&2]);
    let (width, _) = codec::page_dimensions(&doc, doc.get_pages()[&2]).unwrap();
    assert!((width - 202.0).abs() < 0.01);
}

#[test]
fn test_backward_link_points_at_earlier_copy() {
    let mut source = create_test_pdf(2, 200);
    add_page_link(&mut source, 1, 0);

    let mut writer = PageWriter::new();
    writer.append_page(&source, "a.pdf".as_ref(), 0).unwrap();
    writer.append_page(&source, "a.pdf".as_ref(), 1).unwrap();
    let doc = writer.finish();

    assert_eq!(count_page_objects(&doc), 2);
    assert_eq!(link_target(&doc, 1), doc.get_pages()[&1]);
}

#[test]
fn test_image_to_document_sizes_page() {
    let dir = TempDir::new().unwrap();
    let img = write_test_png(dir.path(), "photo.png", 144, 72, false);

    let doc = codec::image_to_document(&img, 72.0).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let (width, height) = codec::page_dimensions(&doc, page_id).unwrap();

    assert!((width - 144.0).abs() < 0.01);
    assert!((height - 72.0).abs() < 0.01);
}

#[test]
fn test_image_with_alpha_gets_soft_mask() {
    let dir = TempDir::new().unwrap();
    let img = write_test_png(dir.path(), "overlay.png", 8, 8, true);

    let doc = codec::image_to_document(&img, 72.0).unwrap();
    let has_smask = doc.objects.values().any(|obj| {
        obj.as_stream()
            .map(|stream| stream.dict.has(b"SMask"))
            .unwrap_or(false)
    });
    assert!(has_smask);
}

#[test]
fn test_image_to_document_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let img = write_test_png(dir.path(), "photo.png", 4, 4, false);
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"nope").unwrap();

    assert!(matches!(
        codec::image_to_document(&img, 0.0),
        Err(ComposeError::Config(_))
    ));
    assert!(matches!(
        codec::image_to_document(&broken, 72.0),
        Err(ComposeError::UnreadableImage { .. })
    ));
}

#[test]
fn test_temp_pdf_is_deleted_on_drop() {
    let dir = TempDir::new().unwrap();
    let img = write_test_png(dir.path(), "photo.png", 10, 10, false);

    let temp = image_to_temp_pdf(&img, 72.0).unwrap();
    let path = temp.path().to_path_buf();
    assert!(path.exists());
    assert_widths(&path, &[10.0]);

    drop(temp);
    assert!(!path.exists());
}

#[test]
fn test_document_store_reference_counting() {
    let dir = TempDir::new().unwrap();
    let a = write_test_pdf(dir.path(), "a.pdf", 3, 200);
    let mut store = DocumentStore::new();

    assert_eq!(store.open(&a).unwrap(), 3);
    assert_eq!(store.open(&a).unwrap(), 3);
    assert_eq!(store.open_documents(), 1);
    assert_eq!(store.reference_count(&a), 0);

    assert!(store.retain(&a));
    assert!(store.retain(&a));
    assert!(!store.release(&a));
    assert!(store.is_open(&a));
    assert!(store.release(&a));
    assert!(!store.is_open(&a));
    assert!(!store.release(&a));

    assert!(store.open(dir.path().join("missing.pdf").as_path()).is_err());
    assert_eq!(store.open_documents(), 0);
}

#[test]
fn test_document_store_closes_unreferenced() {
    let dir = TempDir::new().unwrap();
    let a = write_test_pdf(dir.path(), "a.pdf", 1, 200);
    let b = write_test_pdf(dir.path(), "b.pdf", 1, 300);
    let mut store = DocumentStore::new();

    store.open(&a).unwrap();
    store.open(&b).unwrap();
    store.retain(&b);
    store.close_unreferenced();

    assert!(!store.is_open(&a));
    assert!(store.is_open(&b));
    assert_eq!(store.snapshot().len(), 1);
}
