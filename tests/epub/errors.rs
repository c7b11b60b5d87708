use crate::epub::util::minimal_document;
use toepub::document::{Chapter, Document, MediaType, Resource};
use toepub::EpubBuilder;
use toepub::errors::{BuildError, BuildPhase, DocumentError};

#[test]
fn test_missing_title() {
    for title in ["", "   "] {
        let mut document = minimal_document();
        document.metadata.title = title.to_owned();

        let error = toepub::build(document).unwrap_err();
        assert!(matches!(error, BuildError::MissingTitle), "{error:?}");
        assert!(error.is_invalid_document());
        assert_eq!(None, error.phase());
    }
}

#[test]
fn test_no_chapters() {
    let mut document = minimal_document();
    document.chapters.clear();

    let error = toepub::build(document).unwrap_err();
    assert!(matches!(error, BuildError::NoChapters), "{error:?}");
    assert_eq!("Document contains no chapters", error.to_string());
}

#[test]
fn test_nothing_written_for_invalid_document() {
    let mut sink = std::io::Cursor::new(Vec::new());
    assert!(EpubBuilder::new().write(Document::new(), &mut sink).is_err());
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_structural_errors() {
    #[rustfmt::skip]
    let cases: [(fn(&mut Document), DocumentError); 6] = [
        (
            |d| d.add_chapter(Chapter::new("ch1", "", "", "content/other.xhtml", 1)),
            DocumentError::DuplicateId("ch1".to_owned()),
        ),
        (
            |d| d.add_chapter(Chapter::new("ch2", "", "", "content/chapter-001.xhtml", 1)),
            DocumentError::DuplicateFileName("content/chapter-001.xhtml".to_owned()),
        ),
        (
            |d| d.add_chapter(Chapter::new("nav", "", "", "content/nav.xhtml", 1)),
            DocumentError::Reserved("nav".to_owned()),
        ),
        (
            |d| d.add_resource(Resource::new("img", "images/x.png", MediaType::Png, Vec::new())),
            DocumentError::EmptyResource("img".to_owned()),
        ),
        (
            |d| {
                d.add_resource(Resource::cover(vec![1], MediaType::Png));
                let mut second = Resource::new("alt", "images/alt.png", MediaType::Png, vec![1]);
                second.is_cover = true;
                d.add_resource(second);
            },
            DocumentError::MultipleCovers { first: "cover-image".to_owned(), second: "alt".to_owned() },
        ),
        (
            |d| d.chapters[0].level = 7,
            DocumentError::InvalidLevel { id: "ch1".to_owned(), level: 7 },
        ),
    ];

    for (corrupt, expected) in cases {
        let mut document = minimal_document();
        corrupt(&mut document);

        match toepub::build(document) {
            Err(BuildError::Document(error)) => assert_eq!(expected, error),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_colophon_name_collision_is_avoided() {
    let mut document = minimal_document();
    document.add_chapter(Chapter::new("colophon", "", "<p/>", "content/colophon.xhtml", 1));

    let bytes = toepub::build(document).unwrap();
    let mut epub = crate::epub::util::TestEpub::from_bytes(bytes);

    assert!(epub.names().contains(&"OEBPS/content/colophon-2.xhtml".to_owned()));
}

#[test]
fn test_phase_display() {
    #[rustfmt::skip]
    let expected = [
        (BuildPhase::Package, "package document"),
        (BuildPhase::Navigation, "navigation document"),
        (BuildPhase::Content { chapter: "ch1".to_owned() }, "content document of chapter `ch1`"),
        (BuildPhase::Resource { id: "img".to_owned() }, "resource `img`"),
    ];

    for (phase, message) in expected {
        assert_eq!(message, phase.to_string());
    }
}
