use crate::errors::DocumentError;
use std::fmt::Display;
use std::str::FromStr;

/// Media types supported for embedded resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
    /// `image/gif`
    Gif,
    /// `image/svg+xml`
    Svg,
    /// `text/css`
    Css,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
            Self::Css => "text/css",
        }
    }

    /// The preferred file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Svg => "svg",
            Self::Css => "css",
        }
    }

    /// Case-insensitive lookup, with or without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');

        [
            ("png", Self::Png),
            ("jpg", Self::Jpeg),
            ("jpeg", Self::Jpeg),
            ("gif", Self::Gif),
            ("svg", Self::Svg),
            ("css", Self::Css),
        ]
        .into_iter()
        .find_map(|(ext, media_type)| extension.eq_ignore_ascii_case(ext).then_some(media_type))
    }

    /// Detects an image format from its leading bytes.
    ///
    /// # Examples
    /// ```
    /// # use toepub::document::MediaType;
    /// assert_eq!(Some(MediaType::Gif), MediaType::sniff(b"GIF89a\x01\x00"));
    /// assert_eq!(Some(MediaType::Svg), MediaType::sniff(b"  <svg xmlns='http://www.w3.org/2000/svg'/>"));
    /// assert_eq!(None, MediaType::sniff(b"plain text"));
    /// ```
    pub fn sniff(data: &[u8]) -> Option<Self> {
        const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
        const JPEG_SIGNATURE: &[u8] = b"\xFF\xD8\xFF";

        if data.starts_with(PNG_SIGNATURE) {
            return Some(Self::Png);
        }
        if data.starts_with(JPEG_SIGNATURE) {
            return Some(Self::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        // SVG is text; look for the root element near the start
        let head = &data[..data.len().min(1024)];
        let head = String::from_utf8_lossy(head);
        let head = head.trim_start();
        // An XML prolog alone is not enough; XHTML and OPF files start with one too
        let near_start = match head.char_indices().nth(256) {
            Some((end, _)) => &head[..end],
            None => head,
        };

        near_start.contains("<svg").then_some(Self::Svg)
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Css)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DocumentError;

    fn from_str(mime: &str) -> Result<Self, Self::Err> {
        let essence = mime.split(';').next().unwrap_or_default().trim();

        [Self::Png, Self::Jpeg, Self::Gif, Self::Svg, Self::Css]
            .into_iter()
            .find(|media_type| essence.eq_ignore_ascii_case(media_type.as_str()))
            .ok_or_else(|| DocumentError::UnsupportedMediaType(mime.to_owned()))
    }
}

/// An embedded asset such as an image or stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Unique manifest id.
    pub id: String,
    /// Path relative to the package root (e.g., `images/photo.png`).
    pub file_name: String,
    pub media_type: MediaType,
    pub data: Vec<u8>,
    /// At most one resource per document may be the cover.
    pub is_cover: bool,
}

impl Resource {
    /// The id given to the [cover](Self::cover) resource.
    pub const COVER_ID: &'static str = "cover-image";

    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        media_type: MediaType,
        data: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            media_type,
            data,
            is_cover: false,
        }
    }

    /// Creates the cover image resource at `images/cover.<ext>`.
    ///
    /// # Examples
    /// ```
    /// # use toepub::document::{MediaType, Resource};
    /// let cover = Resource::cover(vec![0xFF, 0xD8, 0xFF, 0xE0], MediaType::Jpeg);
    ///
    /// assert_eq!("cover-image", cover.id);
    /// assert_eq!("images/cover.jpg", cover.file_name);
    /// assert!(cover.is_cover);
    /// ```
    pub fn cover(data: Vec<u8>, media_type: MediaType) -> Self {
        Self {
            is_cover: true,
            ..Self::new(
                Self::COVER_ID,
                format!("images/cover.{}", media_type.extension()),
                media_type,
                data,
            )
        }
    }
}
