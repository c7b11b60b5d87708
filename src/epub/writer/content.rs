use crate::document::Chapter;
use crate::epub::consts::{epub, mime, paths, xhtml, xml};
use crate::epub::writer::{DocumentWriter, EpubWriter, render};
use crate::errors::{BuildPhase, BuildResult};
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::{Seek, Write};

struct ContentWriter<'w, 'ebook> {
    writer: &'w mut DocumentWriter,
    chapter: &'ebook Chapter,
    book_title: &'ebook str,
}

impl<'w, 'ebook> ContentWriter<'w, 'ebook> {
    fn new(writer: &'w mut DocumentWriter, chapter: &'ebook Chapter, book_title: &'ebook str) -> Self {
        Self {
            writer,
            chapter,
            book_title,
        }
    }

    fn write_xhtml(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?.write_doctype(xhtml::DOCTYPE)?;

        write_element! {
            writer: self.writer,
            tag: xhtml::HTML,
            attributes: {
                xml::XMLNS  => xhtml::XHTML_NS,
                epub::XMLNS => epub::EPUB_NS,
            }
            inner_content: {
                self.write_head()?;
                self.write_body()?;
            }
        }
    }

    fn write_head(&mut self) -> WriterResult<()> {
        let title = match self.chapter.title.trim() {
            "" => self.book_title,
            title => title,
        };
        // Relative to the chapter's own directory so the link resolves in the package
        let stylesheet = uri::encode(&uri::relativize(
            uri::parent(&self.chapter.file_name),
            paths::STYLESHEET,
        ))
        .into_owned();

        write_element! {
            writer: self.writer,
            tag: xhtml::HEAD,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::META,
                    attributes: {
                        xhtml::CHARSET => xhtml::UTF8,
                    }
                }?;
                write_element! {
                    writer: self.writer,
                    tag: xhtml::TITLE,
                    text: title,
                }?;
                write_element! {
                    writer: self.writer,
                    tag: xhtml::LINK,
                    attributes: {
                        xhtml::REL  => xhtml::STYLESHEET,
                        xhtml::TYPE => mime::CSS,
                        xhtml::HREF => stylesheet.as_str(),
                    }
                }?;
            }
        }
    }

    fn write_body(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::BODY,
            attributes: {
                epub::TYPE => epub::BODYMATTER,
            }
            inner_content: {
                // Chapter content is trusted XHTML and is written unescaped
                self.writer.write_trusted_markup("\n")?;
                self.writer.write_trusted_markup(&self.chapter.content)?;
                self.writer.write_trusted_markup("\n")?;
            }
        }
    }
}

/// Renders the XHTML content document of a chapter.
///
/// The `<title>` is the chapter title, or `book_title` if the chapter has none.
/// [`Chapter::content`] is inserted into `<body>` verbatim.
///
/// # Examples
/// ```
/// # use toepub::document::Chapter;
/// let chapter = Chapter::new("ch1", "", "<p>a &amp; b</p>", "content/chapter-001.xhtml", 0);
/// let xhtml = toepub::render_content_document(&chapter, "Tom & Jerry").unwrap();
///
/// assert!(xhtml.contains("<title>Tom &amp; Jerry</title>"));
/// assert!(xhtml.contains("<p>a &amp; b</p>"));
/// assert!(xhtml.contains(r#"href="../styles/default.css""#));
/// ```
pub fn render_content_document(chapter: &Chapter, book_title: &str) -> BuildResult<String> {
    render(
        || BuildPhase::Content {
            chapter: chapter.id.clone(),
        },
        |writer| ContentWriter::new(writer, chapter, book_title).write_xhtml(),
    )
}

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_content_documents(&mut self) -> BuildResult<()> {
        let book_title = self.ctx.document.metadata.title.as_str();

        for chapter in self.ctx.chapters.clone() {
            let xhtml = render_content_document(chapter, book_title)?;

            log::debug!("writing content document {}", chapter.file_name);
            self.write_entry(&paths::in_package(&chapter.file_name), xhtml.as_bytes(), || {
                BuildPhase::Content {
                    chapter: chapter.id.clone(),
                }
            })?;
        }
        Ok(())
    }
}
