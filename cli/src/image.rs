//! Local images referenced by the input files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use toepub::document::{MediaType, Resource};

const IMAGE_DIR: &str = "images";

/// Reads the image at `path`, detecting its type from the content or the extension.
///
/// Errors are warning messages prefixed with `label` (e.g., `Cover image`).
pub fn read_image(path: &Path, label: &str) -> Result<(Vec<u8>, MediaType), String> {
    let data = fs::read(path)
        .map_err(|error| format!("{label} {} could not be read: {error}", path.display()))?;

    if data.is_empty() {
        return Err(format!("{label} {} is empty", path.display()));
    }

    let media_type = MediaType::sniff(&data)
        .or_else(|| {
            path.extension()
                .and_then(|extension| extension.to_str())
                .and_then(MediaType::from_extension)
        })
        .filter(MediaType::is_image)
        .ok_or_else(|| format!("{label} {} has an unsupported format", path.display()))?;

    Ok((data, media_type))
}

/// Images embedded from `<img src>` references, shared by all input files.
///
/// Each source file is embedded once, as `images/<stem>.<ext>` with the id
/// `img-<stem>`; stems are sanitized and made unique.
#[derive(Debug, Default)]
pub struct ImageSet {
    embedded: HashMap<PathBuf, String>,
    stems: HashSet<String>,
    resources: Vec<Resource>,
    warnings: Vec<String>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embeds the image `src` refers to and returns the href to use from a chapter.
    ///
    /// `src` is resolved against `base_dir`. Remote and `data:` URLs are left alone
    /// ([`None`]), as are images that cannot be read, which are recorded as warnings.
    pub fn embed(&mut self, base_dir: &Path, src: &str) -> Option<String> {
        let src = src.trim();
        if is_external(src) {
            return None;
        }
        let relative = src.split(['?', '#']).next().unwrap_or(src);
        if relative.is_empty() {
            return None;
        }

        let path = base_dir.join(relative);
        if let Some(file_name) = self.embedded.get(&path) {
            return Some(chapter_href(file_name));
        }

        let (data, media_type) = match read_image(&path, "Image") {
            Ok(image) => image,
            Err(warning) => {
                log::warn!("{warning}");
                self.warnings.push(warning);
                return None;
            }
        };

        let stem = self.unique_stem(&path);
        let file_name = format!("{IMAGE_DIR}/{stem}.{}", media_type.extension());
        log::debug!("embedding {} as {file_name}", path.display());

        self.resources.push(Resource::new(
            format!("img-{stem}"),
            file_name.clone(),
            media_type,
            data,
        ));
        let href = chapter_href(&file_name);
        self.embedded.insert(path, file_name);
        Some(href)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The embedded resources and the warnings collected along the way.
    pub fn into_parts(self) -> (Vec<Resource>, Vec<String>) {
        (self.resources, self.warnings)
    }

    fn unique_stem(&mut self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|stem| sanitize(&stem.to_string_lossy()))
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "image".to_owned());

        // `cover` is kept free for the cover image
        let mut candidate = stem.clone();
        let mut suffix = 1;
        while candidate == "cover" || self.stems.contains(&candidate) {
            suffix += 1;
            candidate = format!("{stem}-{suffix}");
        }
        self.stems.insert(candidate.clone());
        candidate
    }
}

fn is_external(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    ["http://", "https://", "data:", "//"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Chapters live in `content/`, next to the image directory.
fn chapter_href(file_name: &str) -> String {
    format!("../{file_name}")
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '-',
        })
        .collect()
}
