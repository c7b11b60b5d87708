pub mod datetime;

use crate::errors::{BuildError, BuildResult};
use datetime::DateTime;

/// The language assigned when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Dublin Core publication metadata.
///
/// Empty strings, empty lists, and [`None`] all mean "absent":
/// [`Metadata::merge`] never lets an absent field replace a present one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// `dc:title`, required before building.
    pub title: String,
    /// `dc:creator`, one per author in order.
    pub authors: Vec<String>,
    /// `dc:language` as a BCP 47 tag (e.g., `en-US`).
    pub language: String,
    /// `dc:identifier`, typically a `urn:uuid:` URN or an ISBN.
    pub identifier: String,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub rights: Option<String>,
    /// Publication date (`dc:date`).
    pub date: Option<DateTime>,
    /// Path of the image to promote to the cover.
    pub cover_image_path: Option<String>,
}

impl Metadata {
    /// Metadata with only the [default language](DEFAULT_LANGUAGE) set.
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            ..Self::default()
        }
    }

    /// Returns a copy of `self` where every field present in `overrides` wins.
    ///
    /// # Examples
    /// ```
    /// # use toepub::document::Metadata;
    /// let mut parsed = Metadata::new();
    /// parsed.title = "Extracted".to_owned();
    /// parsed.authors = vec!["Jane".to_owned()];
    ///
    /// let mut overrides = Metadata::default();
    /// overrides.title = "Override".to_owned();
    ///
    /// let merged = parsed.merge(&overrides);
    /// assert_eq!("Override", merged.title);
    /// assert_eq!(["Jane"], merged.authors.as_slice());
    /// assert_eq!("en", merged.language);
    /// ```
    pub fn merge(&self, overrides: &Metadata) -> Metadata {
        fn pick_str(base: &str, over: &str) -> String {
            let picked = if over.is_empty() { base } else { over };
            picked.to_owned()
        }
        fn pick_opt<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.as_ref().or(base.as_ref()).cloned()
        }

        Metadata {
            title: pick_str(&self.title, &overrides.title),
            authors: if overrides.authors.is_empty() {
                self.authors.clone()
            } else {
                overrides.authors.clone()
            },
            language: pick_str(&self.language, &overrides.language),
            identifier: pick_str(&self.identifier, &overrides.identifier),
            description: pick_opt(&self.description, &overrides.description),
            publisher: pick_opt(&self.publisher, &overrides.publisher),
            rights: pick_opt(&self.rights, &overrides.rights),
            date: overrides.date.or(self.date),
            cover_image_path: pick_opt(&self.cover_image_path, &overrides.cover_image_path),
        }
    }

    /// Fills in the structural defaults:
    /// - language → `en`
    /// - identifier → a fresh `urn:uuid:` URN
    /// - date → the current time
    pub fn ensure_defaults(&mut self) {
        if self.language.trim().is_empty() {
            self.language = DEFAULT_LANGUAGE.to_owned();
        }
        if self.identifier.trim().is_empty() {
            self.identifier = format!("urn:uuid:{}", uuid::Uuid::new_v4());
        }
        if self.date.is_none() {
            self.date = Some(DateTime::now());
        }
    }

    /// Returns `true` if the title is present.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Fails with [`BuildError::MissingTitle`] if the title is blank.
    pub fn validate(&self) -> BuildResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(BuildError::MissingTitle)
        }
    }

    /// The first author, if any.
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}
