//! Error-related types for building an EPUB from a [`Document`](crate::Document).

use std::fmt::Display;

/// Alias for `Result<T, BuildError>`.
pub type BuildResult<T> = Result<T, BuildError>;

/// Possible errors when [building](crate::EpubBuilder::build) an EPUB.
///
/// # Variants
/// ## Invalid document
/// Detected before anything is written, so no output is produced:
/// - [`NoChapters`](BuildError::NoChapters)
/// - [`MissingTitle`](BuildError::MissingTitle)
/// - [`Document`](BuildError::Document)
/// ## Internal
/// A generator or the archive writer failed while serializing:
/// - [`Render`](BuildError::Render)
/// - [`Archive`](BuildError::Archive)
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    /// The document has no chapters to convert.
    #[error("Document contains no chapters")]
    NoChapters,

    /// The metadata title is blank after defaults were applied.
    #[error("Required metadata is missing: title")]
    MissingTitle,

    /// The document breaks a structural invariant,
    /// such as two chapters sharing the same id.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A content, navigation, or package document could not be rendered.
    #[error("Failed to render the {phase}")]
    Render {
        phase: BuildPhase,
        #[source]
        source: std::io::Error,
    },

    /// The archive writer rejected an entry.
    #[error("Failed to write the {phase} to the archive")]
    Archive {
        phase: BuildPhase,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Returns `true` if the error was caused by the given document
    /// rather than by an internal failure.
    ///
    /// # Examples
    /// ```
    /// # use toepub::errors::BuildError;
    /// let error = toepub::build(toepub::Document::new()).unwrap_err();
    ///
    /// assert!(error.is_invalid_document());
    /// assert!(matches!(error, BuildError::MissingTitle));
    /// ```
    pub fn is_invalid_document(&self) -> bool {
        matches!(
            self,
            Self::NoChapters | Self::MissingTitle | Self::Document(_)
        )
    }

    /// The phase that failed, if the error occurred while serializing.
    pub fn phase(&self) -> Option<&BuildPhase> {
        match self {
            Self::Render { phase, .. } | Self::Archive { phase, .. } => Some(phase),
            _ => None,
        }
    }
}

/// The serialization step during which a [`BuildError`] occurred.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildPhase {
    /// The uncompressed `mimetype` entry.
    Mimetype,
    /// `META-INF/container.xml`.
    Container,
    /// The OPF package document.
    Package,
    /// The navigation document.
    Navigation,
    /// The content document of the chapter with the given id.
    Content { chapter: String },
    /// The resource with the given manifest id.
    Resource { id: String },
    /// The default stylesheet.
    Stylesheet,
    /// Writing the archive's central directory.
    Finish,
}

impl Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mimetype => f.write_str("mimetype"),
            Self::Container => f.write_str("container document"),
            Self::Package => f.write_str("package document"),
            Self::Navigation => f.write_str("navigation document"),
            Self::Content { chapter } => write!(f, "content document of chapter `{chapter}`"),
            Self::Resource { id } => write!(f, "resource `{id}`"),
            Self::Stylesheet => f.write_str("default stylesheet"),
            Self::Finish => f.write_str("archive central directory"),
        }
    }
}

/// Structural problems within a [`Document`](crate::Document).
///
/// Manifest ids are shared between chapters and resources,
/// as are file names.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Two chapters or resources share the same manifest id.
    #[error("Duplicate manifest id: {0}")]
    DuplicateId(String),

    /// Two chapters or resources share the same file name.
    #[error("Duplicate file name: {0}")]
    DuplicateFileName(String),

    /// An id or file name collides with a generated package item
    /// (e.g., `nav` or `nav.xhtml`).
    #[error("Reserved for a generated package item: {0}")]
    Reserved(String),

    /// A resource carries no bytes.
    #[error("Resource has no data: {0}")]
    EmptyResource(String),

    /// More than one resource is marked as the cover.
    #[error("Multiple cover resources: {first} and {second}")]
    MultipleCovers { first: String, second: String },

    /// A chapter's heading level is outside `1-6`.
    #[error("Chapter {id} has level {level} (expected 1-6)")]
    InvalidLevel { id: String, level: u8 },

    /// A media type outside the supported resource set.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
}
