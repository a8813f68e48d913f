//! Object copying between documents
//!
//! Pages are moved into an output document by deep-copying their dictionaries
//! and everything they reference.

use super::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Guard against malformed page trees whose `Parent` links loop
pub(crate) const MAX_TREE_DEPTH: usize = 64;

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// `cache` maps source object IDs to their copies so shared objects (fonts,
/// images) are copied once per source. An ID is reserved before its target is
/// copied, which keeps reference cycles finite. `Parent` links of page tree
/// nodes are not followed; the caller re-parents copied pages.
///
/// References to other pages (link destinations, annotation targets) are not
/// followed either. They get an ID reserved in `cache` but no object; the
/// caller fills it if that page is appended and nulls it otherwise (see
/// [`fill_unresolved`]).
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            // Dangling references become null rather than failing the whole page
            let copied = match source.get_object(*id) {
                Ok(Object::Dictionary(dict)) if is_page(dict) => {
                    return Ok(Object::Reference(new_id));
                }
                Ok(referenced) => copy_object_deep(output, source, referenced, cache)?,
                Err(_) => Object::Null,
            };
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut copied = stream.clone();
            copied.dict = copy_dictionary(output, source, &stream.dict, cache)?;
            Ok(Object::Stream(copied))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let skip_parent = is_page_tree_node(dict);
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if skip_parent && key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

/// Give every reserved ID that never received an object a null body.
///
/// Returns how many references were nulled.
pub fn fill_unresolved<'a>(
    output: &mut Document,
    reserved: impl IntoIterator<Item = &'a ObjectId>,
) -> usize {
    let mut filled = 0;
    for id in reserved {
        if !output.objects.contains_key(id) {
            output.objects.insert(*id, Object::Null);
            filled += 1;
        }
    }
    filled
}

fn is_page(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name.as_slice() == b"Page")
}

fn is_page_tree_node(dict: &Dictionary) -> bool {
    matches!(
        dict.get(b"Type"),
        Ok(Object::Name(name)) if name.as_slice() == b"Page" || name.as_slice() == b"Pages"
    )
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get page dimensions (width, height) in points, following inherited MediaBox
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let mut current = Some(page_id);
    let mut depth = 0;
    while let Some(id) = current {
        if depth > MAX_TREE_DEPTH {
            break;
        }
        depth += 1;
        let dict = doc.get_dictionary(id)?;
        if let Ok(Object::Array(mb)) = dict.get(b"MediaBox") {
            if mb.len() == 4 {
                let width = extract_number(&mb[2]).unwrap_or(DEFAULT_PAGE_DIMENSIONS.0)
                    - extract_number(&mb[0]).unwrap_or(0.0);
                let height = extract_number(&mb[3]).unwrap_or(DEFAULT_PAGE_DIMENSIONS.1)
                    - extract_number(&mb[1]).unwrap_or(0.0);
                return Ok((width, height));
            }
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    Ok(DEFAULT_PAGE_DIMENSIONS)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
