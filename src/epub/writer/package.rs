use crate::document::{DateTime, Document};
use crate::epub::consts::{ids, opf, paths, xml};
use crate::epub::writer::{DocumentWriter, EpubWriter, EpubWriterContext, render};
use crate::errors::{BuildPhase, BuildResult};
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::{Seek, Write};

mod manifest;
mod metadata;
mod spine;

pub(super) struct PackageWriter<'w, 'ebook> {
    ctx: &'w EpubWriterContext<'ebook>,
    writer: &'w mut DocumentWriter,
}

impl<'w, 'ebook> PackageWriter<'w, 'ebook> {
    fn new(ctx: &'w EpubWriterContext<'ebook>, writer: &'w mut DocumentWriter) -> Self {
        Self { ctx, writer }
    }

    fn write_opf(mut self) -> WriterResult<()> {
        let language = self.ctx.document.metadata.language.as_str();

        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: opf::PACKAGE,
            attributes: {
                xml::XMLNS     => opf::OPF_NS,
                opf::VERSION   => opf::EPUB3_VERSION,
                opf::UNIQUE_ID => ids::UNIQUE_IDENTIFIER,
                xml::LANG where !language.is_empty() => language,
            }
            inner_content: {
                self.write_metadata()?;
                self.write_manifest()?;
                self.write_spine()?;
            }
        }
    }
}

/// Renders the OPF package document (metadata, manifest, and spine).
///
/// `dcterms:modified` is set to the current time.
///
/// # Examples
/// ```
/// # use toepub::document::{Chapter, Document};
/// let mut document = Document::new();
/// document.metadata.title = "\"Quotes\" & <Tags>".to_owned();
/// document.add_chapter(Chapter::new("ch1", "One", "<p>1</p>", "content/chapter-001.xhtml", 0));
///
/// let opf = toepub::render_package_document(&document).unwrap();
/// assert!(opf.contains("<dc:title>&quot;Quotes&quot; &amp; &lt;Tags&gt;</dc:title>"));
/// assert!(opf.contains(r#"<itemref idref="ch1"/>"#));
/// ```
pub fn render_package_document(document: &Document) -> BuildResult<String> {
    let ctx = EpubWriterContext::new(document, DateTime::now());

    render(
        || BuildPhase::Package,
        |writer| PackageWriter::new(&ctx, writer).write_opf(),
    )
}

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_package(&mut self) -> BuildResult<()> {
        let opf = render(
            || BuildPhase::Package,
            |writer| PackageWriter::new(&self.ctx, writer).write_opf(),
        )?;
        log::debug!(
            "writing package document ({} spine items, {} resources)",
            self.ctx.chapters.len(),
            self.ctx.document.resources.len(),
        );
        self.write_entry(&paths::in_package(paths::PACKAGE), opf.as_bytes(), || {
            BuildPhase::Package
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PackageWriter;
    use crate::document::{Chapter, DateTime, Document, MediaType, Resource};
    use crate::epub::writer::EpubWriterContext;
    use crate::writer::xml::XmlWriter;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    pub(super) fn render(document: &Document) -> String {
        let ctx = EpubWriterContext::new(document, DateTime::from_unix(1_700_000_000));
        let mut writer = XmlWriter::new(Vec::new());
        PackageWriter::new(&ctx, &mut writer).write_opf().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    pub(super) fn document() -> Document {
        let mut document = Document::new();
        document.metadata.title = "Title".to_owned();
        document.metadata.identifier = "urn:isbn:9780000000000".to_owned();
        document.add_chapter(Chapter::new("b", "B", "", "content/b.xhtml", 1));
        document.add_chapter(Chapter::new("a", "A", "", "content/a file.xhtml", 0));
        document.add_resource(Resource::new("img", "images/pic.png", MediaType::Png, vec![1]));
        document.add_resource(Resource::cover(vec![1], MediaType::Jpeg));
        document
    }

    /// Unescaped text of every `tag` element.
    pub(super) fn texts(xml: &str, tag: &str) -> Vec<String> {
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
                // Entity references are reported separately from text
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

    #[test]
    fn test_package_element() {
        let opf = render(&document());

        assert!(opf.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#), "{opf}");
        assert!(opf.contains(
            r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid" xml:lang="en">"#
        ), "{opf}");
        assert!(opf.trim_end().ends_with("</package>"), "{opf}");
    }

    #[test]
    fn test_sections_in_order() {
        let opf = render(&document());
        let metadata = opf.find("<metadata").unwrap();
        let manifest = opf.find("<manifest>").unwrap();
        let spine = opf.find("<spine>").unwrap();

        assert!(metadata < manifest && manifest < spine, "{opf}");
    }
}
