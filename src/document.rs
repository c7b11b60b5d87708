//! The format-agnostic document model handed to the [`EpubBuilder`](crate::EpubBuilder).
//!
//! Input parsers populate a [`Document`] with [chapters](Chapter), [resources](Resource),
//! and a [table of contents](TableOfContents) before it is built into an EPUB.

mod metadata;
mod resource;
mod toc;

use crate::epub::consts;
use crate::errors::{BuildError, BuildResult, DocumentError};
use std::collections::{HashMap, HashSet};

pub use metadata::datetime::{Date, DateTime, Time};
pub use metadata::{DEFAULT_LANGUAGE, Metadata};
pub use resource::{MediaType, Resource};
pub use toc::{Heading, MAX_LEVEL, TableOfContents, TocEntry};

/// One reading-order content unit, rendered as its own XHTML file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    /// Unique manifest id.
    pub id: String,
    pub title: String,
    /// Depth of the heading that produced this chapter (`1-6`).
    pub level: u8,
    /// Well-formed XHTML body fragment, without `<html>` or `<body>`.
    ///
    /// Inserted into the content document verbatim.
    pub content: String,
    /// Path relative to the package root (e.g., `content/chapter-001.xhtml`).
    pub file_name: String,
    /// Zero-based reading-order position.
    pub order: usize,
}

impl Chapter {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        file_name: impl Into<String>,
        order: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level: 1,
            content: content.into(),
            file_name: file_name.into(),
            order,
        }
    }

    /// The canonical id for the chapter at `order` (`chapter-001` for `0`).
    pub fn numbered_id(order: usize) -> String {
        format!("chapter-{:03}", order + 1)
    }

    /// The canonical file name for the chapter at `order`
    /// (`content/chapter-001.xhtml` for `0`).
    pub fn numbered_file_name(order: usize) -> String {
        format!("content/{}.xhtml", Self::numbered_id(order))
    }
}

impl Default for Chapter {
    fn default() -> Self {
        Self::new("", "", "", "", 0)
    }
}

/// The aggregate root: metadata, chapters, resources, and table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub metadata: Metadata,
    pub chapters: Vec<Chapter>,
    pub resources: Vec<Resource>,
    pub toc: TableOfContents,
}

impl Document {
    /// An empty document with [`Metadata::new`].
    pub fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            ..Self::default()
        }
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Returns `true` if the document has a title and at least one chapter.
    pub fn is_valid(&self) -> bool {
        self.metadata.is_valid() && !self.chapters.is_empty()
    }

    /// Checks the invariants the package relies on.
    ///
    /// # Errors
    /// - [`BuildError::MissingTitle`] if the title is blank.
    /// - [`BuildError::NoChapters`] if there are no chapters.
    /// - [`BuildError::Document`] if ids or file names collide (with each other or
    ///   with generated package items), a resource has no data,
    ///   more than one resource is the cover, or a chapter level is outside `1-6`.
    pub fn validate(&self) -> BuildResult<()> {
        self.metadata.validate()?;

        if self.chapters.is_empty() {
            return Err(BuildError::NoChapters);
        }

        let mut ids = HashSet::new();
        let mut file_names = HashSet::new();
        let mut claim = |id: &str, file_name: &str| -> Result<(), DocumentError> {
            if consts::RESERVED_IDS.contains(&id) {
                return Err(DocumentError::Reserved(id.to_owned()));
            }
            if consts::RESERVED_FILE_NAMES.contains(&file_name) {
                return Err(DocumentError::Reserved(file_name.to_owned()));
            }
            if !ids.insert(id.to_owned()) {
                return Err(DocumentError::DuplicateId(id.to_owned()));
            }
            if !file_names.insert(file_name.to_owned()) {
                return Err(DocumentError::DuplicateFileName(file_name.to_owned()));
            }
            Ok(())
        };

        for chapter in &self.chapters {
            if !(1..=MAX_LEVEL).contains(&chapter.level) {
                return Err(DocumentError::InvalidLevel {
                    id: chapter.id.clone(),
                    level: chapter.level,
                }
                .into());
            }
            claim(&chapter.id, &chapter.file_name)?;
        }

        let mut cover: Option<&str> = None;
        for resource in &self.resources {
            claim(&resource.id, &resource.file_name)?;

            if resource.data.is_empty() {
                return Err(DocumentError::EmptyResource(resource.id.clone()).into());
            }
            if resource.is_cover {
                if let Some(first) = cover {
                    return Err(DocumentError::MultipleCovers {
                        first: first.to_owned(),
                        second: resource.id.clone(),
                    }
                    .into());
                }
                cover = Some(resource.id.as_str());
            }
        }

        Ok(())
    }

    /// The resource marked as the cover, if any.
    pub fn cover(&self) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.is_cover)
    }

    /// Chapters sorted by [`Chapter::order`].
    ///
    /// Chapters with equal order keep their relative position.
    pub fn chapters_in_order(&self) -> Vec<&Chapter> {
        let mut chapters = self.chapters.iter().collect::<Vec<_>>();
        chapters.sort_by_key(|chapter| chapter.order);
        chapters
    }

    /// Appends a separately parsed document, as when several input files
    /// are combined into one book.
    ///
    /// Appended chapters are renumbered after the existing ones
    /// (`chapter-NNN`, `content/chapter-NNN.xhtml`) and the appended table of
    /// contents is updated to point at the new file names.
    /// Metadata is taken from `other` only if `self` has no chapters yet.
    ///
    /// # Examples
    /// ```
    /// # use toepub::document::{Chapter, Document, Heading, TableOfContents};
    /// let mut part = Document::new();
    /// part.add_chapter(Chapter::new("intro", "Intro", "<p/>", "intro.xhtml", 0));
    /// part.toc = TableOfContents::from_headings([Heading::new(1, "Intro", "intro.xhtml#top")]);
    ///
    /// let mut book = Document::new();
    /// book.append(part.clone());
    /// book.append(part);
    ///
    /// assert_eq!("chapter-002", book.chapters[1].id);
    /// assert_eq!("content/chapter-002.xhtml", book.chapters[1].file_name);
    /// assert_eq!("content/chapter-002.xhtml#top", book.toc.entries[1].href);
    /// ```
    pub fn append(&mut self, other: Document) {
        let Document {
            metadata,
            mut chapters,
            resources,
            mut toc,
        } = other;

        if self.chapters.is_empty() {
            self.metadata = metadata;
        }

        chapters.sort_by_key(|chapter| chapter.order);

        let offset = self.chapters.len();
        let mut renamed = HashMap::new();

        for (i, mut chapter) in chapters.into_iter().enumerate() {
            chapter.order = offset + i;
            chapter.id = Chapter::numbered_id(chapter.order);

            let file_name = Chapter::numbered_file_name(chapter.order);
            renamed.insert(std::mem::replace(&mut chapter.file_name, file_name.clone()), file_name);
            self.chapters.push(chapter);
        }

        toc.rewrite_hrefs(|href| {
            let (path, fragment) = match href.split_once('#') {
                Some((path, fragment)) => (path, Some(fragment)),
                None => (href, None),
            };
            let renamed = renamed.get(path)?;

            Some(match fragment {
                Some(fragment) => format!("{renamed}#{fragment}"),
                None => renamed.clone(),
            })
        });

        self.toc.entries.extend(toc.entries);
        self.resources.extend(resources);
    }
}
