//! Converts input files into an EPUB on disk.

use crate::image::{self, ImageSet};
use crate::source;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use toepub::document::{Heading, Metadata, Resource, TableOfContents};
use toepub::{BuildError, Document, EpubBuilder};

pub const DEFAULT_OUTPUT: &str = "output.epub";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("No supported input files found")]
    NoInput,
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("Output path is not writable: {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub const GENERAL: u8 = 1;
    pub const INPUT_NOT_FOUND: u8 = 64;
    pub const FORMAT: u8 = 65;
    pub const OUTPUT: u8 = 66;
    pub const INTERNAL: u8 = 70;

    /// The process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_) => Self::INPUT_NOT_FOUND,
            Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Self::INPUT_NOT_FOUND
            }
            Self::UnsupportedFormat(_) => Self::FORMAT,
            Self::Build(error) if error.is_invalid_document() => Self::FORMAT,
            Self::Build(_) => Self::INTERNAL,
            Self::Output { .. } => Self::OUTPUT,
            Self::NoInput | Self::Read { .. } => Self::GENERAL,
        }
    }
}

/// What to convert and how.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub inputs: Vec<PathBuf>,
    /// Defaults to [`default_output_path`].
    pub output: Option<PathBuf>,
    /// Merged over the metadata extracted from the inputs.
    pub metadata: Metadata,
    pub compression: u8,
}

#[derive(Clone, Debug)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub input_files: usize,
    pub chapters: usize,
    pub images: usize,
    /// Size of the written archive in bytes.
    pub output_size: u64,
    pub duration: Duration,
    pub warnings: Vec<String>,
}

/// Converts `options.inputs` and writes the EPUB.
///
/// The target file is replaced atomically; on error it is left untouched.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport, ConvertError> {
    let started = Instant::now();
    let mut warnings = Vec::new();

    let files = source::collect_inputs(&options.inputs)?;
    let mut document = Document::new();
    let mut images = ImageSet::new();
    for file in &files {
        document.append(source::load(file, &mut images)?);
    }

    log::debug!("embedding {} referenced images", images.len());
    let (resources, image_warnings) = images.into_parts();
    for resource in resources {
        document.add_resource(resource);
    }
    warnings.extend(image_warnings);

    // Nest headings across file boundaries
    let headings = document
        .toc
        .flatten()
        .into_iter()
        .map(|entry| Heading::new(entry.level, entry.title.clone(), entry.href.clone()))
        .collect::<Vec<_>>();
    document.toc = TableOfContents::from_headings(headings);

    document.metadata = document.metadata.merge(&options.metadata);
    if document.metadata.title.trim().is_empty() {
        document.metadata.title = files
            .first()
            .and_then(|file| file.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    if let Some(cover) = document.metadata.cover_image_path.clone() {
        match load_cover(Path::new(&cover)) {
            Ok(resource) => document.add_resource(resource),
            Err(warning) => {
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    let chapters = document.chapters.len();
    let images = document
        .resources
        .iter()
        .filter(|resource| resource.media_type.is_image())
        .count();

    let epub = EpubBuilder::new()
        .compression(options.compression)
        .build(document)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&options.inputs));
    write_atomically(&output, &epub).map_err(|source| ConvertError::Output {
        path: output.clone(),
        source,
    })?;

    Ok(ConvertReport {
        output,
        input_files: files.len(),
        chapters,
        images,
        output_size: epub.len() as u64,
        duration: started.elapsed(),
        warnings,
    })
}

/// Reads the cover image at `path`.
///
/// Errors are returned as warning messages; a missing cover never fails a conversion.
fn load_cover(path: &Path) -> Result<Resource, String> {
    let (data, media_type) = image::read_image(path, "Cover image")?;
    Ok(Resource::cover(data, media_type))
}

/// The output path used when none is given:
/// - a single file: the same path with an `.epub` extension
/// - a single directory: its name with an `.epub` extension, in the working directory
/// - anything else: [`DEFAULT_OUTPUT`]
pub fn default_output_path(inputs: &[PathBuf]) -> PathBuf {
    let [input] = inputs else {
        return PathBuf::from(DEFAULT_OUTPUT);
    };

    if input.is_dir() {
        let name = input.file_name().map(PathBuf::from).or_else(|| {
            input
                .canonicalize()
                .ok()
                .and_then(|path| path.file_name().map(PathBuf::from))
        });
        match name {
            Some(name) => name.with_extension("epub"),
            None => PathBuf::from(DEFAULT_OUTPUT),
        }
    } else {
        input.with_extension("epub")
    }
}

fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}
