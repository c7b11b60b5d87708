use crate::epub::consts::{ids, mime, opf, paths, xml};
use crate::epub::writer::package::PackageWriter;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;

impl PackageWriter<'_, '_> {
    pub(super) fn write_manifest(&mut self) -> WriterResult<()> {
        let ctx = self.ctx;

        write_element! {
            writer: self.writer,
            tag: opf::MANIFEST,
            inner_content: {
                // Generated entries
                self.write_item(ids::NAV, paths::NAV, mime::XHTML, Some(opf::NAV_PROPERTY))?;
                self.write_item(ids::STYLESHEET, paths::STYLESHEET, mime::CSS, None)?;

                for chapter in &ctx.chapters {
                    self.write_item(&chapter.id, &chapter.file_name, mime::XHTML, None)?;
                }
                for resource in &ctx.document.resources {
                    let properties = resource.is_cover.then_some(opf::COVER_IMAGE_PROPERTY);
                    self.write_item(
                        &resource.id,
                        &resource.file_name,
                        resource.media_type.as_str(),
                        properties,
                    )?;
                }
            }
        }
    }

    fn write_item(
        &mut self,
        id: &str,
        file_name: &str,
        media_type: &str,
        properties: Option<&str>,
    ) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::ITEM,
            attributes: {
                xml::ID         => id,
                opf::HREF       => &*uri::encode(file_name),
                opf::MEDIA_TYPE => media_type,
                opf::PROPERTIES => properties,
            }
        }
    }
}
