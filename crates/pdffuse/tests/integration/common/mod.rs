//! Shared helpers for integration tests.
//!
//! Fixture PDFs are synthesized in memory with lopdf. Every page carries a
//! marker string (`"<prefix>-<pageno>"`, 1-based) in its content stream so
//! tests can verify exactly which source pages ended up where.

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use pdffuse::io::SourceFile;

/// Build a PDF with `pages` pages, each marked `"<prefix>-<n>"`.
pub fn pdf_with_markers(pages: usize, prefix: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 0..pages {
        let content = format!("BT /F1 12 Tf 50 700 Td ({prefix}-{}) Tj ET", n + 1);
        let content_id = doc.new_object_id();
        doc.objects.insert(
            content_id,
            Object::Stream(Stream::new(Dictionary::new(), content.into_bytes())),
        );

        let page_id = doc.new_object_id();
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(page_id, page.into());
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    doc.objects.insert(
        catalog_id,
        dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }
        .into(),
    );
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Source file without a declared range.
pub fn source(name: &str, pages: usize) -> SourceFile {
    SourceFile::new(name, pdf_with_markers(pages, marker_prefix(name)))
}

/// Source file with a declared range.
pub fn source_with_range(name: &str, pages: usize, range: &str) -> SourceFile {
    SourceFile::with_range(name, pdf_with_markers(pages, marker_prefix(name)), range)
}

/// Marker prefix for a file name: `"a.pdf"` marks pages `"a-1"`, `"a-2"`, ...
fn marker_prefix(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Read back the page markers of a merged document, in page order.
pub fn page_markers(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    let mut markers = Vec::new();

    for (_, page_id) in doc.get_pages() {
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
        let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();

        let content = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        let text = String::from_utf8_lossy(&content);

        let open = text.find('(').expect("marker not found in content stream");
        let close = text[open..].find(')').unwrap() + open;
        markers.push(text[open + 1..close].to_string());
    }

    markers
}

/// Build a one-page PDF whose trailer carries an `Encrypt` entry.
pub fn encrypted_pdf_bytes() -> Vec<u8> {
    let mut doc = Document::load_mem(&pdf_with_markers(1, "locked")).unwrap();

    let encrypt_id = doc.add_object(dictionary! { "Filter" => "Standard" });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Total page count of a serialized document.
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).unwrap().get_pages().len()
}
