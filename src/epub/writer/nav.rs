use crate::document::{Chapter, Document, TocEntry};
use crate::epub::consts::{epub, ids, mime, paths, xhtml, xml};
use crate::epub::writer::{DocumentWriter, EpubWriter, render};
use crate::errors::{BuildPhase, BuildResult};
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::{Seek, Write};

const TOC_HEADING: &str = "Table of Contents";
const LANDMARKS_HEADING: &str = "Landmarks";
const START_OF_CONTENT: &str = "Start of Content";

struct NavWriter<'w, 'ebook> {
    writer: &'w mut DocumentWriter,
    document: &'ebook Document,
    /// Target of the "start of content" landmark.
    first_chapter: Option<&'ebook Chapter>,
}

impl<'w, 'ebook> NavWriter<'w, 'ebook> {
    fn new(
        writer: &'w mut DocumentWriter,
        document: &'ebook Document,
        first_chapter: Option<&'ebook Chapter>,
    ) -> Self {
        Self {
            writer,
            document,
            first_chapter,
        }
    }

    fn write_xhtml(mut self) -> WriterResult<()> {
        let language = self.document.metadata.language.as_str();

        self.writer.write_utf8_declaration()?.write_doctype(xhtml::DOCTYPE)?;

        write_element! {
            writer: self.writer,
            tag: xhtml::HTML,
            attributes: {
                xml::XMLNS  => xhtml::XHTML_NS,
                epub::XMLNS => epub::EPUB_NS,
                xml::LANG   where !language.is_empty() => language,
                xhtml::LANG where !language.is_empty() => language,
            }
            inner_content: {
                self.write_head()?;
                self.write_body()?;
            }
        }
    }

    fn write_head(&mut self) -> WriterResult<()> {
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
                    text: &self.document.metadata.title,
                }?;
                write_element! {
                    writer: self.writer,
                    tag: xhtml::LINK,
                    attributes: {
                        xhtml::REL  => xhtml::STYLESHEET,
                        xhtml::TYPE => mime::CSS,
                        xhtml::HREF => paths::STYLESHEET,
                    }
                }?;
            }
        }
    }

    fn write_body(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::BODY,
            inner_content: {
                self.write_toc()?;
                self.write_landmarks()?;
            }
        }
    }

    fn write_toc(&mut self) -> WriterResult<()> {
        let document = self.document;

        write_element! {
            writer: self.writer,
            tag: xhtml::NAV,
            attributes: {
                epub::TYPE => epub::TOC,
                xml::ID    => ids::TOC,
            }
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::H1,
                    text: TOC_HEADING,
                }?;
                // An empty table of contents still produces an (empty) list
                self.write_entries(&document.toc.entries)?;
            }
        }
    }

    fn write_entries(&mut self, entries: &[TocEntry]) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::ORDERED_LIST,
            inner_content: {
                for entry in entries {
                    self.write_entry(entry)?;
                }
            }
        }
    }

    fn write_entry(&mut self, entry: &TocEntry) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::LIST_ITEM,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::ANCHOR,
                    text: &entry.title,
                    attributes: {
                        xhtml::HREF => entry.href.as_str(),
                    }
                }?;
                if !entry.children.is_empty() {
                    self.write_entries(&entry.children)?;
                }
            }
        }
    }

    fn write_landmarks(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::NAV,
            attributes: {
                epub::TYPE    => epub::LANDMARKS,
                xml::ID       => ids::LANDMARKS,
                xhtml::HIDDEN => "",
            }
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::H2,
                    text: LANDMARKS_HEADING,
                }?;
                write_element! {
                    writer: self.writer,
                    tag: xhtml::ORDERED_LIST,
                    inner_content: {
                        self.write_landmark(epub::TOC, paths::NAV, TOC_HEADING)?;
                        if let Some(chapter) = self.first_chapter {
                            let href = uri::encode(&chapter.file_name);
                            self.write_landmark(epub::BODYMATTER, &href, START_OF_CONTENT)?;
                        }
                    }
                }?;
            }
        }
    }

    fn write_landmark(&mut self, epub_type: &str, href: &str, label: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::LIST_ITEM,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::ANCHOR,
                    text: label,
                    attributes: {
                        epub::TYPE  => epub_type,
                        xhtml::HREF => href,
                    }
                }?;
            }
        }
    }
}

/// Renders the EPUB 3 navigation document.
///
/// The table of contents is written as nested ordered lists with entry hrefs
/// used as-is. The landmarks point at this document and, if there is one,
/// at the first chapter in reading order.
pub fn render_navigation_document(document: &Document) -> BuildResult<String> {
    let first_chapter = document.chapters_in_order().first().copied();

    render(
        || BuildPhase::Navigation,
        |writer| NavWriter::new(writer, document, first_chapter).write_xhtml(),
    )
}

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_nav(&mut self) -> BuildResult<()> {
        let document = self.ctx.document;
        let first_chapter = self.ctx.chapters.first().copied();

        let nav = render(
            || BuildPhase::Navigation,
            |writer| NavWriter::new(writer, document, first_chapter).write_xhtml(),
        )?;
        log::debug!("writing navigation document ({} toc entries)", document.toc.len());
        self.write_entry(&paths::in_package(paths::NAV), nav.as_bytes(), || {
            BuildPhase::Navigation
        })
    }
}
