//! Hierarchical table of contents built from flat heading records.

/// Deepest supported heading level (`h6`).
pub const MAX_LEVEL: u8 = 6;

/// A heading found in a content document, in reading order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// `1-6`; values outside the range are clamped.
    pub level: u8,
    pub title: String,
    /// Package-relative link, e.g. `content/chapter-001.xhtml#intro`.
    pub href: String,
}

impl Heading {
    pub fn new(level: u8, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            href: href.into(),
        }
    }
}

/// A node of the [`TableOfContents`].
///
/// Every child is strictly deeper than its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub href: String,
    pub level: u8,
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, href: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            level: level.clamp(1, MAX_LEVEL),
            children: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        1 + self.children.iter().map(TocEntry::len).sum::<usize>()
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a TocEntry>) {
        out.push(self);
        for child in &self.children {
            child.flatten_into(out);
        }
    }

    fn rewrite_hrefs(&mut self, rewrite: &mut impl FnMut(&str) -> Option<String>) {
        if let Some(href) = rewrite(&self.href) {
            self.href = href;
        }
        for child in &mut self.children {
            child.rewrite_hrefs(rewrite);
        }
    }
}

/// The navigation hierarchy of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableOfContents {
    /// Top-level entries in reading order.
    pub entries: Vec<TocEntry>,
}

impl TableOfContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nests a flat, ordered heading sequence by level.
    ///
    /// Each heading becomes a child of the nearest preceding heading that is
    /// shallower than itself, or a top-level entry if there is none.
    /// Skipped levels are tolerated: an `h3` directly after an `h1`
    /// nests under the `h1`.
    ///
    /// # Examples
    /// ```
    /// # use toepub::document::{Heading, TableOfContents};
    /// let toc = TableOfContents::from_headings([
    ///     Heading::new(1, "A", "a.xhtml"),
    ///     Heading::new(3, "B", "a.xhtml#b"),
    ///     Heading::new(1, "C", "c.xhtml"),
    /// ]);
    ///
    /// assert_eq!(2, toc.entries.len());
    /// assert_eq!("B", toc.entries[0].children[0].title);
    /// assert_eq!(3, toc.len());
    /// ```
    pub fn from_headings(headings: impl IntoIterator<Item = Heading>) -> Self {
        let mut roots = Vec::new();
        // Open entries, shallowest first
        let mut open: Vec<TocEntry> = Vec::new();

        fn close(closed: TocEntry, open: &mut [TocEntry], roots: &mut Vec<TocEntry>) {
            match open.last_mut() {
                Some(parent) => parent.children.push(closed),
                None => roots.push(closed),
            }
        }

        for heading in headings {
            let entry = TocEntry::new(heading.title, heading.href, heading.level);

            while let Some(closed) = open.pop_if(|top| top.level >= entry.level) {
                close(closed, &mut open, &mut roots);
            }
            open.push(entry);
        }
        while let Some(closed) = open.pop() {
            close(closed, &mut open, &mut roots);
        }

        Self { entries: roots }
    }

    pub fn push(&mut self, entry: TocEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries at every depth.
    pub fn len(&self) -> usize {
        self.entries.iter().map(TocEntry::len).sum()
    }

    /// All entries in depth-first pre-order, which is the original heading order.
    pub fn flatten(&self) -> Vec<&TocEntry> {
        let mut flat = Vec::with_capacity(self.len());
        for entry in &self.entries {
            entry.flatten_into(&mut flat);
        }
        flat
    }

    /// Replaces every href for which `rewrite` returns [`Some`].
    pub(crate) fn rewrite_hrefs(&mut self, mut rewrite: impl FnMut(&str) -> Option<String>) {
        for entry in &mut self.entries {
            entry.rewrite_hrefs(&mut rewrite);
        }
    }
}
