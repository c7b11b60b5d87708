use crate::epub::util::{TestEpub, assert_well_formed, attributes, minimal_document, texts};
use toepub::document::{Chapter, Document, Heading, TableOfContents};

fn compact(xml: &str) -> String {
    xml.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn test_empty_toc() {
    let nav = TestEpub::build(minimal_document()).nav();

    assert_well_formed(&nav);
    assert!(compact(&nav).contains("<h1>Table of Contents</h1> <ol> </ol>"), "{nav}");
    // Landmarks are still written
    assert_eq!(
        ["nav.xhtml", "content/chapter-001.xhtml"],
        attributes(&nav, "a", "href").as_slice(),
    );
}

#[test]
fn test_nested_toc() {
    let mut document = minimal_document();
    document.add_chapter(Chapter::new("ch2", "", "<p/>", "content/chapter-002.xhtml", 1));
    document.toc = TableOfContents::from_headings([
        Heading::new(1, "Part & One", "content/chapter-001.xhtml"),
        Heading::new(3, "Skipped <h2>", "content/chapter-001.xhtml#deep"),
        Heading::new(2, "Section", "content/chapter-001.xhtml#section"),
        Heading::new(1, "Part Two", "content/chapter-002.xhtml"),
    ]);

    let nav = TestEpub::build(document).nav();
    assert_well_formed(&nav);

    assert_eq!(
        ["Part & One", "Skipped <h2>", "Section", "Part Two", "Table of Contents", "Start of Content"],
        texts(&nav, "a").as_slice(),
    );
    assert!(compact(&nav).contains(concat!(
        r#"<li> <a href="content/chapter-001.xhtml">Part &amp; One</a> <ol> "#,
        r#"<li> <a href="content/chapter-001.xhtml#deep">Skipped &lt;h2&gt;</a> </li> "#,
        r#"<li> <a href="content/chapter-001.xhtml#section">Section</a> </li> "#,
        r#"</ol> </li> "#,
        r#"<li> <a href="content/chapter-002.xhtml">Part Two</a> </li> </ol>"#,
    )), "{nav}");
}

#[test]
fn test_nav_structure() {
    let mut document = minimal_document();
    document.metadata.language = "de".to_owned();

    let nav = TestEpub::build(document).nav();

    assert!(nav.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#), "{nav}");
    assert!(nav.contains("<!DOCTYPE html>"), "{nav}");
    assert!(nav.contains(concat!(
        r#"<html xmlns="http://www.w3.org/1999/xhtml" "#,
        r#"xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="de" lang="de">"#,
    )), "{nav}");
    assert!(nav.contains(r#"<nav epub:type="toc" id="toc">"#), "{nav}");
    assert!(nav.contains(r#"<nav epub:type="landmarks" id="landmarks" hidden="">"#), "{nav}");
    assert_eq!(["toc", "landmarks"], attributes(&nav, "nav", "epub:type").as_slice());
    assert_eq!(["toc", "bodymatter"], attributes(&nav, "a", "epub:type").as_slice());
}

#[test]
fn test_appended_documents_toc() {
    let mut part = Document::new();
    part.metadata.title = "Book".to_owned();
    part.add_chapter(Chapter::new("intro", "Intro", "<h1 id=\"top\">Intro</h1>", "intro.xhtml", 0));
    part.toc = TableOfContents::from_headings([Heading::new(1, "Intro", "intro.xhtml#top")]);

    let mut book = Document::new();
    book.append(part.clone());
    book.append(part);

    let mut epub = TestEpub::build(book);
    let nav = epub.nav();

    assert_eq!(
        [
            "content/chapter-001.xhtml#top",
            "content/chapter-002.xhtml#top",
            "nav.xhtml",
            "content/chapter-001.xhtml",
        ],
        attributes(&nav, "a", "href").as_slice(),
    );
    assert!(epub.read("OEBPS/content/chapter-002.xhtml").contains("<h1 id=\"top\">Intro</h1>"));
}
