use crate::epub::consts::paths;
use crate::epub::writer::EpubWriter;
use crate::errors::{BuildPhase, BuildResult};
use std::io::{Seek, Write};

/// Written to every package, whether or not a chapter links it.
pub(crate) const DEFAULT_STYLESHEET: &str = include_str!("default.css");

impl<W: Write + Seek> EpubWriter<'_, W> {
    pub(super) fn write_stylesheet(&mut self) -> BuildResult<()> {
        log::debug!("writing {}", paths::STYLESHEET);
        self.write_entry(
            &paths::in_package(paths::STYLESHEET),
            DEFAULT_STYLESHEET.as_bytes(),
            || BuildPhase::Stylesheet,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_STYLESHEET;

    #[test]
    fn test_default_stylesheet_selectors() {
        #[rustfmt::skip]
        let selectors = [
            "body {", "h1, h2, h3, h4, h5, h6 {", "p {", "pre, code {", "blockquote {",
            "ul, ol {", "table {", "th, td {", "img {", "a {", ".task-list-item input {",
        ];

        for selector in selectors {
            assert!(DEFAULT_STYLESHEET.contains(selector), "missing `{selector}`");
        }
    }
}
