use crate::epub::consts::paths;
use crate::epub::writer::EpubWriter;
use crate::errors::{BuildPhase, BuildResult};
use std::io::{Seek, Write};

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_resources(&mut self) -> BuildResult<()> {
        let document = self.ctx.document;

        for resource in &document.resources {
            log::debug!(
                "writing resource {} ({}, {} bytes)",
                resource.file_name,
                resource.media_type,
                resource.data.len(),
            );
            // The archive entry keeps the raw file name; only manifest hrefs are encoded
            self.write_entry(&paths::in_package(&resource.file_name), &resource.data, || {
                BuildPhase::Resource {
                    id: resource.id.clone(),
                }
            })?;
        }
        Ok(())
    }
}
