mod container;
pub(super) mod content;
pub(super) mod nav;
pub(super) mod package;
mod resource;
mod stylesheet;

use crate::document::{Chapter, DateTime, Document};
use crate::epub::consts::{mime, paths};
use crate::errors::{BuildError, BuildPhase, BuildResult};
use crate::writer::WriterResult;
use crate::writer::xml::XmlWriter;
use crate::writer::zip::{ZipFileOptionsExt, ZipWriter};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;

#[derive(Clone, Debug)]
pub(super) struct EpubBuildConfig {
    /// See [`super::EpubBuilder::compression`]
    pub(super) compression: u8,
}

impl Default for EpubBuildConfig {
    fn default() -> Self {
        Self { compression: 6 }
    }
}

/// Read-only state shared by every phase of a single build.
pub(super) struct EpubWriterContext<'ebook> {
    document: &'ebook Document,
    /// Chapters in reading order.
    chapters: Vec<&'ebook Chapter>,
    /// Timestamp of this build (`dcterms:modified` and ZIP entry times).
    modified: DateTime,
}

impl<'ebook> EpubWriterContext<'ebook> {
    pub(super) fn new(document: &'ebook Document, modified: DateTime) -> Self {
        Self {
            chapters: document.chapters_in_order(),
            document,
            modified,
        }
    }
}

pub(super) struct EpubWriter<'ebook, W: Write + Seek> {
    ctx: EpubWriterContext<'ebook>,
    zip: ZipWriter<W>,
}

impl<'ebook, W: Write + Seek> EpubWriter<'ebook, W> {
    pub(super) fn new(config: &EpubBuildConfig, document: &'ebook Document, writer: W) -> Self {
        let ctx = EpubWriterContext::new(document, DateTime::now());

        Self {
            zip: ZipWriter::new(
                writer,
                SimpleFileOptions::default()
                    .zip_last_modified_date(ctx.modified)
                    .zip_compression_level(config.compression),
            ),
            ctx,
        }
    }

    /// Writes every entry in the order reading systems expect:
    /// `mimetype` first, then the container, package, navigation,
    /// content documents, resources, and the stylesheet.
    pub(super) fn write(mut self) -> BuildResult<W> {
        self.write_mimetype()?;
        self.write_container()?;
        self.write_package()?;
        self.write_nav()?;
        self.write_content_documents()?;
        self.write_resources()?;
        self.write_stylesheet()?;

        self.zip.finish().map_err(|source| BuildError::Archive {
            phase: BuildPhase::Finish,
            source,
        })
    }

    fn write_mimetype(&mut self) -> BuildResult<()> {
        // EPUB requires that the mimetype file must be uncompressed
        self.zip
            .start_uncompressed_file(paths::MIMETYPE)
            .and_then(|()| self.zip.write_all(mime::EPUB.as_bytes()))
            .map_err(|source| BuildError::Archive {
                phase: BuildPhase::Mimetype,
                source,
            })
    }

    /// Adds a complete entry using the configured compression.
    fn write_entry(
        &mut self,
        name: &str,
        data: &[u8],
        phase: impl FnOnce() -> BuildPhase,
    ) -> BuildResult<()> {
        self.zip
            .start_file(name)
            .and_then(|()| self.zip.write_all(data))
            .map_err(|source| BuildError::Archive {
                phase: phase(),
                source,
            })
    }
}

/// Element names are always static constants.
type DocumentWriter = XmlWriter<'static, Vec<u8>>;

/// Runs an XML generator against an in-memory buffer.
fn render(
    phase: impl FnOnce() -> BuildPhase,
    generate: impl FnOnce(&mut DocumentWriter) -> WriterResult<()>,
) -> BuildResult<String> {
    let mut writer = XmlWriter::new(Vec::new());

    generate(&mut writer)
        .and_then(|()| {
            String::from_utf8(writer.into_inner())
                .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
        })
        .map_err(|source| BuildError::Render {
            phase: phase(),
            source,
        })
}
