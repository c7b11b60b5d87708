//! # toepub
//!
//! Assembles EPUB 3 packages from a format-agnostic [`Document`].
//!
//! Input parsers hand over a [`Document`] with chapters (XHTML body fragments),
//! resources, and a table of contents. [`EpubBuilder`] then writes the
//! package document, navigation document, one content document per chapter,
//! the resources, and a default stylesheet into a ZIP container.
//!
//! ## Examples
//! Building an EPUB in memory:
//! ```rust
//! use toepub::document::{Chapter, Document, Heading, TableOfContents};
//!
//! let mut document = Document::new();
//! document.metadata.title = "Tom & Jerry".to_owned();
//! document.metadata.authors.push("Jane Doe".to_owned());
//!
//! document.add_chapter(Chapter::new(
//!     "chapter-001",
//!     "Introduction",
//!     r#"<h1 id="intro">Introduction</h1><p>Hello!</p>"#,
//!     "content/chapter-001.xhtml",
//!     0,
//! ));
//! document.toc = TableOfContents::from_headings([
//!     Heading::new(1, "Introduction", "content/chapter-001.xhtml#intro"),
//! ]);
//!
//! let epub: Vec<u8> = toepub::build(document).unwrap();
//! assert!(epub.starts_with(b"PK\x03\x04"));
//! ```
//! Rejecting an invalid document:
//! ```rust
//! # use toepub::Document;
//! let error = toepub::build(Document::new()).unwrap_err();
//!
//! assert!(error.is_invalid_document());
//! assert_eq!("Required metadata is missing: title", error.to_string());
//! ```

pub mod document;
pub mod epub;
pub mod errors;
mod util;
mod writer;

pub use self::{
    document::{Chapter, Document, MediaType, Metadata, Resource, TableOfContents},
    epub::{
        EpubBuilder, build, render_content_document, render_navigation_document,
        render_package_document,
    },
    errors::{BuildError, BuildResult},
};
