use crate::epub::util::{TestEpub, attributes, minimal_document, texts};
use toepub::document::{Chapter, DateTime, MediaType, Resource};

#[test]
fn test_manifest_and_spine_counts() {
    #[rustfmt::skip]
    let cases = [
        // (chapters, resources)
        (1, 0),
        (1, 2),
        (3, 1),
        (5, 4),
    ];

    for (chapters, resources) in cases {
        let mut document = minimal_document();
        document.chapters.clear();

        for order in 0..chapters {
            document.add_chapter(Chapter::new(
                Chapter::numbered_id(order),
                "",
                "<p/>",
                Chapter::numbered_file_name(order),
                order,
            ));
        }
        for i in 0..resources {
            document.add_resource(Resource::new(
                format!("img-{i}"),
                format!("images/{i}.gif"),
                MediaType::Gif,
                b"GIF89a".to_vec(),
            ));
        }

        let package = TestEpub::build(document).package();

        // Chapters (+ colophon), resources, nav, and stylesheet
        assert_eq!(chapters + 1 + resources + 2, attributes(&package, "item", "id").len());
        assert_eq!(chapters + 1, attributes(&package, "itemref", "idref").len());
    }
}

#[test]
fn test_manifest_references() {
    let mut document = minimal_document();
    document.add_chapter(Chapter::new("two", "", "<p/>", "content/part two.xhtml", 1));
    document.add_resource(Resource::cover(b"\x89PNG".to_vec(), MediaType::Png));

    let package = TestEpub::build(document).package();
    let ids = attributes(&package, "item", "id");
    let hrefs = attributes(&package, "item", "href");

    #[rustfmt::skip]
    let expected = [
        ("nav", "nav.xhtml"),
        ("css", "styles/default.css"),
        ("ch1", "content/chapter-001.xhtml"),
        ("two", "content/part%20two.xhtml"),
        ("colophon", "content/colophon.xhtml"),
        ("cover-image", "images/cover.png"),
    ];
    let actual = ids.iter().map(String::as_str).zip(hrefs.iter().map(String::as_str));
    assert_eq!(expected.to_vec(), actual.collect::<Vec<_>>());

    assert_eq!(["nav", "cover-image"], attributes(&package, "item", "properties").as_slice());
    assert!(package.contains(r#"<meta name="cover" content="cover-image"/>"#), "{package}");
}

#[test]
fn test_spine_follows_order_field() {
    let mut document = minimal_document();
    document.chapters.clear();
    document.add_chapter(Chapter::new("c", "", "<p/>", "content/c.xhtml", 2));
    document.add_chapter(Chapter::new("a", "", "<p/>", "content/a.xhtml", 0));
    document.add_chapter(Chapter::new("b", "", "<p/>", "content/b.xhtml", 1));

    let package = TestEpub::build(document).package();

    assert_eq!(
        ["a", "b", "c", "colophon"],
        attributes(&package, "itemref", "idref").as_slice(),
    );
}

#[test]
fn test_metadata_escaping_round_trip() {
    #[rustfmt::skip]
    let values = [
        "Tom & Jerry",
        "1 < 2 > 0",
        "\"Quoted\" 'single'",
        "<b>not markup</b> &amp; literal",
    ];

    for value in values {
        let mut document = minimal_document();
        document.metadata.title = value.to_owned();
        document.metadata.authors = vec![value.to_owned(), "Second".to_owned()];
        document.metadata.rights = Some(value.to_owned());

        let mut epub = TestEpub::build(document);
        let package = epub.package();
        crate::epub::util::assert_well_formed(&package);

        assert_eq!([value], texts(&package, "dc:title").as_slice());
        assert_eq!([value, "Second"], texts(&package, "dc:creator").as_slice());
        assert_eq!([value], texts(&package, "dc:rights").as_slice());

        // The navigation document and untitled chapters carry the book title too
        let nav = epub.nav();
        crate::epub::util::assert_well_formed(&nav);
        assert_eq!([value], texts(&nav, "title").as_slice());

        let chapter = epub.read("OEBPS/content/chapter-001.xhtml");
        assert_eq!([value], texts(&chapter, "title").as_slice());
    }
}

#[test]
fn test_defaults_filled() {
    let mut document = minimal_document();
    document.metadata.language.clear();

    let package = TestEpub::build(document).package();

    assert_eq!(["en"], texts(&package, "dc:language").as_slice());
    assert!(package.contains(r#"xml:lang="en""#), "{package}");

    let identifier = &texts(&package, "dc:identifier")[0];
    assert!(identifier.starts_with("urn:uuid:"), "{identifier}");
    assert_eq!(45, identifier.len());

    // Date-only publication date
    let date = &texts(&package, "dc:date")[0];
    assert_eq!(10, date.len(), "{date}");

    let modified = texts(&package, "meta")
        .into_iter()
        .find(|text| text.ends_with('Z'))
        .unwrap();
    assert!(DateTime::parse(&modified).is_some(), "{modified}");
    assert_eq!(20, modified.len(), "{modified}");
}

#[test]
fn test_given_metadata_kept() {
    let mut document = minimal_document();
    document.metadata.identifier = "urn:isbn:9780000000001".to_owned();
    document.metadata.language = "ja".to_owned();
    document.metadata.date = DateTime::parse("2020-02-29");
    document.metadata.description = Some("A description".to_owned());
    document.metadata.publisher = Some("A publisher".to_owned());

    let package = TestEpub::build(document).package();

    assert_eq!(["urn:isbn:9780000000001"], texts(&package, "dc:identifier").as_slice());
    assert_eq!(["ja"], texts(&package, "dc:language").as_slice());
    assert_eq!(["2020-02-29"], texts(&package, "dc:date").as_slice());
    assert_eq!(["A description"], texts(&package, "dc:description").as_slice());
    assert_eq!(["A publisher"], texts(&package, "dc:publisher").as_slice());
    assert!(package.contains(r#"<dc:identifier id="uid">"#), "{package}");
    assert!(package.contains(r#"unique-identifier="uid""#), "{package}");
}
