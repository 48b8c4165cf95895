//! Output-document assembly: page selection, object grafting, page tree.
//!
//! lopdf has no page-copy primitive, so appending pages means moving a
//! source document's objects into the output under fresh object ids and
//! splicing the selected page nodes into the output's page tree. Ids are
//! shifted past the output's current `max_id`; every reference inside the
//! moved objects is rewritten by the same offset.

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::error::{MergeError, Result};

/// An output PDF under construction.
///
/// Starts as an empty catalog with an empty page tree; sources are grafted
/// in with [`OutputDocument::append_pages`] and the finished document is
/// serialized once with [`OutputDocument::into_bytes`].
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_refs: Vec<ObjectId>,
}

impl OutputDocument {
    /// Create an empty output document.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");

        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0i64,
            }
            .into(),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            document,
            pages_id,
            page_refs: Vec::new(),
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Graft the selected pages of `source` onto the output.
    ///
    /// `indices` are zero-based page indices into `source`, already
    /// resolved and ascending; pages land in exactly that order. The whole
    /// source object set moves across (unreferenced leftovers are pruned
    /// at serialization time).
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if an index does not exist in the source -
    /// callers resolve ranges against the actual page count, so this
    /// indicates a bug rather than bad input.
    pub fn append_pages(&mut self, source: Document, indices: &[usize]) -> Result<usize> {
        if indices.is_empty() {
            return Ok(0);
        }

        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        let offset = self.document.max_id;
        let source_max_id = source.max_id;

        for (old_id, object) in source.objects.into_iter() {
            let new_id = (old_id.0 + offset, old_id.1);
            self.document
                .objects
                .insert(new_id, remap_object_refs(object, offset));
        }
        self.document.max_id = source_max_id + offset;

        for &index in indices {
            let &page_id = source_pages.get(index).ok_or_else(|| {
                MergeError::merge_failed(format!(
                    "resolved page index {index} exceeds source page count {}",
                    source_pages.len()
                ))
            })?;

            let new_page_id = (page_id.0 + offset, page_id.1);
            self.reparent_page(new_page_id)?;
            self.page_refs.push(new_page_id);
        }

        Ok(indices.len())
    }

    /// Point a grafted page node at the output's page tree root.
    fn reparent_page(&mut self, page_id: ObjectId) -> Result<()> {
        let page_obj = self.document.get_object_mut(page_id).map_err(|e| {
            MergeError::merge_failed(format!("grafted page object missing: {e}"))
        })?;

        if let Object::Dictionary(dict) = page_obj {
            dict.set("Parent", Object::Reference(self.pages_id));
            Ok(())
        } else {
            Err(MergeError::merge_failed("page object is not a dictionary"))
        }
    }

    /// Finalize the page tree and serialize to bytes.
    ///
    /// Prunes objects left unreferenced by page selection, renumbers for a
    /// contiguous id space and compresses streams before writing.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self
            .page_refs
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let count = self.page_refs.len() as i64;

        let pages_obj = self
            .document
            .get_object_mut(self.pages_id)
            .map_err(|e| MergeError::merge_failed(format!("failed to get pages object: {e}")))?;

        if let Object::Dictionary(dict) = pages_obj {
            dict.set("Kids", Object::Array(kids));
            dict.set("Count", Object::Integer(count));
        } else {
            return Err(MergeError::merge_failed("pages object is not a dictionary"));
        }

        self.document.prune_objects();
        self.document.renumber_objects();
        self.document.compress();

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| MergeError::merge_failed(format!("failed to serialize output: {e}")))?;

        Ok(buffer)
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively shift every reference inside an object by `offset`.
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}
