use crate::epub::util::{TestEpub, assert_well_formed, minimal_document};
use toepub::EpubBuilder;
use toepub::document::{Chapter, MediaType, Resource};

const MIMETYPE: &[u8] = b"application/epub+zip";

#[test]
fn test_mimetype_is_first_and_stored() {
    let mut epub = TestEpub::build(minimal_document());
    let bytes = &epub.bytes;

    // Local file header of the very first entry
    assert_eq!(b"PK\x03\x04", &bytes[..4]);
    assert_eq!([0, 0], bytes[8..10], "compression method must be `stored`");
    assert_eq!([8, 0], bytes[26..28], "file name length");
    assert_eq!(b"mimetype", &bytes[30..38]);

    let extra_len = u16::from_le_bytes([bytes[28], bytes[29]]) as usize;
    let data_start = 38 + extra_len;
    assert_eq!(MIMETYPE, &bytes[data_start..data_start + MIMETYPE.len()]);

    assert_eq!("mimetype", epub.names()[0]);
    assert!(epub.is_stored("mimetype"));
    assert_eq!(MIMETYPE, epub.read_bytes("mimetype").as_slice());
}

#[test]
fn test_mimetype_stored_regardless_of_compression() {
    for level in [0, 1, 6, 9] {
        let bytes = EpubBuilder::new()
            .compression(level)
            .build(minimal_document())
            .unwrap();
        let mut epub = TestEpub::from_bytes(bytes);

        assert_eq!("mimetype", epub.names()[0]);
        assert!(epub.is_stored("mimetype"), "level {level}");
    }
}

#[test]
fn test_compression_level() {
    let stored = EpubBuilder::new()
        .compression(0)
        .build(minimal_document())
        .unwrap();
    let mut epub = TestEpub::from_bytes(stored);

    for name in epub.names() {
        assert!(epub.is_stored(&name), "{name} should be stored");
    }

    let mut epub = TestEpub::build(minimal_document());
    assert!(!epub.is_stored("OEBPS/content.opf"));
    assert!(!epub.is_stored("OEBPS/styles/default.css"));
}

#[test]
fn test_entry_order() {
    let mut document = minimal_document();
    document.add_resource(Resource::new(
        "img",
        "images/photo one.png",
        MediaType::Png,
        b"\x89PNG\r\n\x1a\n".to_vec(),
    ));

    let mut epub = TestEpub::build(document);

    #[rustfmt::skip]
    let expected = [
        "mimetype",
        "META-INF/container.xml",
        "OEBPS/content.opf",
        "OEBPS/nav.xhtml",
        "OEBPS/content/chapter-001.xhtml",
        "OEBPS/content/colophon.xhtml",
        "OEBPS/images/photo one.png",
        "OEBPS/styles/default.css",
    ];
    assert_eq!(expected.as_slice(), epub.names().as_slice());
}

#[test]
fn test_end_to_end() {
    let mut epub = TestEpub::build(minimal_document());

    let container = epub.read("META-INF/container.xml");
    assert!(container.contains(r#"full-path="OEBPS/content.opf""#), "{container}");

    let package = epub.package();
    assert!(package.contains("<dc:title>T</dc:title>"), "{package}");
    assert_eq!(2, package.matches("<itemref ").count(), "{package}");

    let chapter = epub.read("OEBPS/content/chapter-001.xhtml");
    assert!(chapter.contains("<p>hi</p>"), "{chapter}");
    // Untitled chapters fall back to the book title
    assert!(chapter.contains("<title>T</title>"), "{chapter}");

    let colophon = epub.read("OEBPS/content/colophon.xhtml");
    assert!(colophon.contains("<title>About This EPUB</title>"), "{colophon}");

    let css = epub.read("OEBPS/styles/default.css");
    assert!(css.contains("body {"), "{css}");

    for name in [
        "META-INF/container.xml",
        "OEBPS/content.opf",
        "OEBPS/nav.xhtml",
        "OEBPS/content/chapter-001.xhtml",
        "OEBPS/content/colophon.xhtml",
    ] {
        assert_well_formed(&epub.read(name));
    }
}

#[test]
fn test_resources_keep_raw_bytes() {
    let data = b"\x89PNG\r\n\x1a\n\x00\x01\x02".to_vec();
    let mut document = minimal_document();
    document.add_resource(Resource::new("img", "images/x.png", MediaType::Png, data.clone()));
    document.add_resource(Resource::cover(b"\xFF\xD8\xFF\xE0".to_vec(), MediaType::Jpeg));

    let mut epub = TestEpub::build(document);

    assert_eq!(data, epub.read_bytes("OEBPS/images/x.png"));
    assert_eq!(b"\xFF\xD8\xFF\xE0", epub.read_bytes("OEBPS/images/cover.jpg").as_slice());
}

#[test]
fn test_write_into_writer() {
    let builder = EpubBuilder::new();
    let cursor = builder
        .write(minimal_document(), std::io::Cursor::new(Vec::new()))
        .unwrap();

    let mut epub = TestEpub::from_bytes(cursor.into_inner());
    assert_eq!("mimetype", epub.names()[0]);
}

#[test]
fn test_builder_reuse_across_threads() {
    let builder = std::sync::Arc::new(EpubBuilder::new());

    let handles = (0..4)
        .map(|i| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                let mut document = minimal_document();
                document.metadata.title = format!("Book {i}");
                document.add_chapter(Chapter::new("ch2", "", "<p/>", "content/chapter-002.xhtml", 1));
                builder.build(document).unwrap()
            })
        })
        .collect::<Vec<_>>();

    for (i, handle) in handles.into_iter().enumerate() {
        let mut epub = TestEpub::from_bytes(handle.join().unwrap());
        let package = epub.package();

        assert!(package.contains(&format!("<dc:title>Book {i}</dc:title>")), "{package}");
        assert_eq!(3, package.matches("<itemref ").count());
    }
}
