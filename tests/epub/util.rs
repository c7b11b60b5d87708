use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use toepub::document::{Chapter, Document};
use zip::ZipArchive;

/// The smallest buildable document: title `T` and one chapter `ch1`.
pub fn minimal_document() -> Document {
    let mut document = Document::new();
    document.metadata.title = "T".to_owned();
    document.add_chapter(Chapter::new(
        "ch1",
        "",
        "<p>hi</p>",
        "content/chapter-001.xhtml",
        0,
    ));
    document
}

pub struct TestEpub {
    pub bytes: Vec<u8>,
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl TestEpub {
    pub fn build(document: Document) -> Self {
        Self::from_bytes(toepub::build(document).unwrap())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            archive: ZipArchive::new(Cursor::new(bytes.clone())).unwrap(),
            bytes,
        }
    }

    /// Entry names in archive order.
    pub fn names(&mut self) -> Vec<String> {
        (0..self.archive.len())
            .map(|i| self.archive.by_index(i).unwrap().name().to_owned())
            .collect()
    }

    pub fn read(&mut self, name: &str) -> String {
        let mut content = String::new();
        self.archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    pub fn read_bytes(&mut self, name: &str) -> Vec<u8> {
        let mut content = Vec::new();
        self.archive
            .by_name(name)
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        content
    }

    pub fn is_stored(&mut self, name: &str) -> bool {
        self.archive.by_name(name).unwrap().compression() == zip::CompressionMethod::Stored
    }

    pub fn package(&mut self) -> String {
        self.read("OEBPS/content.opf")
    }

    pub fn nav(&mut self) -> String {
        self.read("OEBPS/nav.xhtml")
    }
}

/// Parses `xml` to the end, panicking if it is not well-formed.
pub fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => panic!("malformed XML at {}: {error}\n{xml}", reader.error_position()),
        }
    }
    assert_eq!(0, depth, "unclosed elements\n{xml}");
}

/// Unescaped text of every `tag` element.
pub fn texts(xml: &str, tag: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut found = Vec::new();
    let mut raw: Option<String> = None;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(start) if start.name().as_ref() == tag.as_bytes() => {
                raw = Some(String::new());
            }
            Event::Text(text) => {
                if let Some(raw) = &mut raw {
                    raw.push_str(std::str::from_utf8(&text).unwrap());
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(raw) = &mut raw {
                    raw.push('&');
                    raw.push_str(std::str::from_utf8(&reference).unwrap());
                    raw.push(';');
                }
            }
            Event::End(end) if end.name().as_ref() == tag.as_bytes() => {
                if let Some(raw) = raw.take() {
                    found.push(quick_xml::escape::unescape(&raw).unwrap().into_owned());
                }
            }
            Event::Eof => break found,
            _ => {}
        }
    }
}

/// Values of every `attribute` on `tag` elements, in document order.
pub fn attributes(xml: &str, tag: &str, attribute: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut found = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(element) | Event::Empty(element)
                if element.name().as_ref() == tag.as_bytes() =>
            {
                if let Some(value) = element.try_get_attribute(attribute).unwrap() {
                    let raw = std::str::from_utf8(&value.value).unwrap();
                    found.push(quick_xml::escape::unescape(raw).unwrap().into_owned());
                }
            }
            Event::Eof => break found,
            _ => {}
        }
    }
}
