//! EPUB 3 packaging of a [`Document`].
//!
//! # Archive layout
//! ```text
//! mimetype                      (stored, always the first entry)
//! META-INF/container.xml
//! OEBPS/content.opf             (package document)
//! OEBPS/nav.xhtml               (navigation document)
//! OEBPS/content/*.xhtml         (one content document per chapter)
//! OEBPS/images/*                (resources, at their own file names)
//! OEBPS/styles/default.css
//! ```
//!
//! Every build appends a short "About This EPUB" chapter after the last chapter.

mod colophon;
pub(crate) mod consts;
mod writer;

use crate::document::Document;
use crate::errors::BuildResult;
use std::io::{Cursor, Seek, Write};
use writer::{EpubBuildConfig, EpubWriter};

pub use writer::content::render_content_document;
pub use writer::nav::render_navigation_document;
pub use writer::package::render_package_document;

/// Configuration to build a [`Document`] into an EPUB.
///
/// The builder holds no per-build state; a single instance can be shared
/// and reused across any number of (concurrent) builds.
///
/// # Options
/// - [`compression`](Self::compression) (Default: `6`)
///
/// # Examples
/// ```
/// # use toepub::EpubBuilder;
/// # use toepub::document::{Chapter, Document};
/// let mut document = Document::new();
/// document.metadata.title = "My Book".to_owned();
/// document.add_chapter(Chapter::new("ch1", "Hello", "<p>Hello</p>", "content/chapter-001.xhtml", 0));
///
/// let epub = EpubBuilder::new().compression(9).build(document).unwrap();
/// assert_eq!(b"PK\x03\x04", &epub[..4]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EpubBuilder {
    config: EpubBuildConfig,
}

impl EpubBuilder {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the *deflate* compression level of every entry except `mimetype`.
    ///
    /// The given compression level must be within the range `[0, 9]`.
    /// If the level is greater than the maximum bound, it is set to `9`.
    ///
    /// A compression level of `0` equates to no compression.
    ///
    /// Default: `6`
    pub fn compression(&mut self, level: u8) -> &mut Self {
        self.config.compression = level.min(9);
        self
    }

    /// Builds `document` into an in-memory EPUB archive.
    ///
    /// Nothing is returned unless every phase succeeds.
    ///
    /// # Errors
    /// - [`BuildError::MissingTitle`](crate::BuildError::MissingTitle)
    ///   and [`BuildError::NoChapters`](crate::BuildError::NoChapters)
    ///   if the document cannot be built.
    /// - [`BuildError::Document`](crate::BuildError::Document)
    ///   if chapters or resources are inconsistent (e.g., duplicate ids).
    /// - [`BuildError::Render`](crate::BuildError::Render) or
    ///   [`BuildError::Archive`](crate::BuildError::Archive) if a phase fails.
    pub fn build(&self, document: Document) -> BuildResult<Vec<u8>> {
        self.write(document, Cursor::new(Vec::new()))
            .map(Cursor::into_inner)
    }

    /// Builds `document` into the given `writer`.
    ///
    /// On error, `writer` may have received a partial archive.
    /// Prefer [`Self::build`] or write into a temporary file when that matters.
    pub fn write<W: Write + Seek>(&self, document: Document, writer: W) -> BuildResult<W> {
        let document = prepare(document)?;
        let mut writer = EpubWriter::new(&self.config, &document, writer).write()?;

        log::info!(
            "built \"{}\" ({} chapters, {} resources, {} bytes)",
            document.metadata.title,
            document.chapters.len(),
            document.resources.len(),
            writer.stream_position().unwrap_or_default(),
        );
        Ok(writer)
    }
}

/// Builds `document` with the default [`EpubBuilder`] options.
///
/// # Examples
/// ```
/// # use toepub::document::{Chapter, Document};
/// let mut document = Document::new();
/// document.metadata.title = "T".to_owned();
/// document.add_chapter(Chapter::new("ch1", "", "<p>hi</p>", "content/chapter-001.xhtml", 0));
///
/// let epub = toepub::build(document).unwrap();
/// assert!(!epub.is_empty());
/// ```
pub fn build(document: Document) -> BuildResult<Vec<u8>> {
    EpubBuilder::new().build(document)
}

/// Fills in metadata defaults, validates, and appends the colophon.
fn prepare(mut document: Document) -> BuildResult<Document> {
    document.metadata.ensure_defaults();
    document.validate()?;

    for chapter in &document.chapters {
        if chapter.content.trim().is_empty() {
            log::warn!("chapter `{}` ({}) has an empty body", chapter.id, chapter.file_name);
        }
    }

    let colophon = colophon::create(&document);
    log::debug!("appending `{}` as {}", colophon::TITLE, colophon.file_name);
    document.add_chapter(colophon);

    Ok(document)
}
