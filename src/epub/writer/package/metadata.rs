use crate::epub::consts::{dc, ids, opf, xml};
use crate::epub::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;

const GENERATOR: &str = concat!("toepub v", env!("CARGO_PKG_VERSION"));

impl PackageWriter<'_, '_> {
    pub(super) fn write_metadata(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::METADATA,
            attributes: {
                dc::XMLNS_DC => dc::DUBLIN_CORE_NS,
            }
            inner_content: {
                self.write_dublin_core()?;
                self.write_dates()?;
                self.write_generator_and_cover()?;
            }
        }
    }

    fn write_dublin_core(&mut self) -> WriterResult<()> {
        let metadata = &self.ctx.document.metadata;

        write_element! {
            writer: self.writer,
            tag: dc::IDENTIFIER,
            text: &metadata.identifier,
            attributes: {
                xml::ID => ids::UNIQUE_IDENTIFIER,
            }
        }?;
        write_element! {
            writer: self.writer,
            tag: dc::TITLE,
            text: &metadata.title,
        }?;
        write_element! {
            writer: self.writer,
            tag: dc::LANGUAGE,
            text: &metadata.language,
        }?;
        for author in &metadata.authors {
            write_element! {
                writer: self.writer,
                tag: dc::CREATOR,
                text: author,
            }?;
        }

        // Optional entries
        let optional = [
            (dc::DESCRIPTION, &metadata.description),
            (dc::PUBLISHER, &metadata.publisher),
            (dc::RIGHTS, &metadata.rights),
        ];
        for (tag, value) in optional {
            if let Some(value) = value {
                write_element! {
                    writer: self.writer,
                    tag: tag,
                    text: value,
                }?;
            }
        }
        Ok(())
    }

    fn write_dates(&mut self) -> WriterResult<()> {
        // Publication date (dc:date) is date-only
        if let Some(date) = self.ctx.document.metadata.date {
            write_element! {
                writer: self.writer,
                tag: dc::DATE,
                text: &date.date().to_string(),
            }?;
        }
        // The modified date always reflects this build, not `Metadata::date`
        write_element! {
            writer: self.writer,
            tag: opf::META,
            text: &self.ctx.modified.to_string(),
            attributes: {
                opf::PROPERTY => dc::MODIFIED,
            }
        }
    }

    fn write_generator_and_cover(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::META,
            attributes: {
                opf::NAME    => opf::GENERATOR,
                opf::CONTENT => GENERATOR,
            }
        }?;

        // Legacy (EPUB 2) cover reference for older reading systems
        if let Some(cover) = self.ctx.document.cover() {
            write_element! {
                writer: self.writer,
                tag: opf::META,
                attributes: {
                    opf::NAME    => opf::COVER,
                    opf::CONTENT => cover.id.as_str(),
                }
            }?;
        }
        Ok(())
    }
}
