//! The trailing "About This EPUB" page appended to every book.

use crate::document::{Chapter, Document};

pub(crate) const TITLE: &str = "About This EPUB";
const ID: &str = "colophon";
const FILE_STEM: &str = "content/colophon";

const CONTENT: &str = r#"<hr style="margin: 3em 0;"/>
<div style="text-align: center; font-family: monospace; white-space: pre-wrap; padding: 2em 1em; background-color: #f9f9f9; border: 1px solid #ddd; margin: 2em 0;">
<p>This EPUB was packaged by toepub.</p>
<p>Happy reading!</p>
</div>"#;

/// Creates the colophon chapter, placed after every existing chapter.
///
/// The id and file name receive a numeric suffix (`colophon-2`) if
/// the document already uses them.
pub(crate) fn create(document: &Document) -> Chapter {
    let order = document
        .chapters
        .iter()
        .map(|chapter| chapter.order + 1)
        .max()
        .unwrap_or_default();

    let id = unique(ID, |id| {
        document.chapters.iter().any(|chapter| chapter.id == id)
            || document.resources.iter().any(|resource| resource.id == id)
    });
    let file_name = unique(FILE_STEM, |stem| {
        let file_name = format!("{stem}.xhtml");
        document.chapters.iter().any(|chapter| chapter.file_name == file_name)
            || document.resources.iter().any(|resource| resource.file_name == file_name)
    }) + ".xhtml";

    Chapter::new(id, TITLE, CONTENT, file_name, order)
}

fn unique(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_owned();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_owned())
}
