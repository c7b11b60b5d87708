use crate::epub::consts::opf;
use crate::epub::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;

impl PackageWriter<'_, '_> {
    /// Chapters are referenced by `order`, never by their position in the document.
    pub(super) fn write_spine(&mut self) -> WriterResult<()> {
        let ctx = self.ctx;

        write_element! {
            writer: self.writer,
            tag: opf::SPINE,
            inner_content: {
                for chapter in &ctx.chapters {
                    write_element! {
                        writer: self.writer,
                        tag: opf::ITEMREF,
                        attributes: {
                            opf::IDREF => chapter.id.as_str(),
                        }
                    }?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Chapter;
    use crate::epub::writer::package::tests::{document, render};

    fn idrefs(opf: &str) -> Vec<&str> {
        opf.match_indices(r#"<itemref idref=""#)
            .filter_map(|(i, matched)| {
                let rest = &opf[i + matched.len()..];
                rest.find('"').map(|end| &rest[..end])
            })
            .collect()
    }

    #[test]
    fn test_spine_follows_order() {
        let mut document = document();
        document.add_chapter(Chapter::new("z", "Z", "", "content/z.xhtml", 0));

        // Stable: "a" and "z" share order 0 and keep insertion order
        assert_eq!(["a", "z", "b"], idrefs(&render(&document)).as_slice());
    }

    #[test]
    fn test_spine_without_chapters() {
        let mut document = document();
        document.chapters.clear();

        let opf = render(&document);
        assert!(idrefs(&opf).is_empty());
        assert!(opf.contains("<spine>"), "{opf}");
    }
}
