use crate::epub::consts::{mime, ocf, paths, xml};
use crate::epub::writer::{DocumentWriter, EpubWriter, render};
use crate::errors::{BuildPhase, BuildResult};
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::{Seek, Write};

struct ContainerWriter<'w> {
    writer: &'w mut DocumentWriter,
}

impl<'w> ContainerWriter<'w> {
    fn new(writer: &'w mut DocumentWriter) -> Self {
        Self { writer }
    }

    fn write_container(self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: ocf::CONTAINER,
            attributes: {
                ocf::VERSION => ocf::CONTAINER_VERSION,
                xml::XMLNS   => ocf::CONTAINER_NS,
            }
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: ocf::ROOT_FILES,
                    inner_content: {
                        write_element! {
                            writer: self.writer,
                            tag: ocf::ROOT_FILE,
                            attributes: {
                                ocf::FULL_PATH  => paths::in_package(paths::PACKAGE).as_str(),
                                ocf::MEDIA_TYPE => mime::OEBPS_PACKAGE,
                            }
                        }?;
                    }
                }?;
            }
        }
    }
}

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_container(&mut self) -> BuildResult<()> {
        let container = render(
            || BuildPhase::Container,
            |writer| ContainerWriter::new(writer).write_container(),
        )?;
        log::debug!("writing {}", paths::CONTAINER);
        self.write_entry(paths::CONTAINER, container.as_bytes(), || {
            BuildPhase::Container
        })
    }
}
