use crate::convert::{self, ConvertError, ConvertOptions};
use crate::output::{self, OutputFormat};
use clap::Args;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use toepub::document::{DateTime, Metadata};

#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// XHTML/HTML files (.xhtml, .html, .htm) or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output EPUB path [default: <input>.epub, or output.epub for several inputs]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Book title [default: the document title or the first file name]
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author name (repeatable)
    #[arg(short, long = "author", value_name = "AUTHOR")]
    pub authors: Vec<String>,

    /// Language code, e.g. `en` or `fr-CA`
    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub publisher: Option<String>,

    #[arg(long)]
    pub rights: Option<String>,

    /// Publication date (`YYYY-MM-DD` or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<DateTime>,

    /// Unique identifier [default: a generated `urn:uuid:`]
    #[arg(long)]
    pub identifier: Option<String>,

    /// Cover image (PNG, JPEG, GIF or SVG)
    #[arg(short, long)]
    pub cover: Option<PathBuf>,

    /// Deflate level of the archive entries (0 = stored)
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression: u8,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

fn parse_date(raw: &str) -> Result<DateTime, String> {
    DateTime::parse(raw).ok_or_else(|| format!("`{raw}` is not a valid date"))
}

impl ConvertCommand {
    pub fn options(&self) -> ConvertOptions {
        let metadata = Metadata {
            title: self.title.clone().unwrap_or_default(),
            authors: self.authors.clone(),
            language: self.language.clone().unwrap_or_default(),
            identifier: self.identifier.clone().unwrap_or_default(),
            description: self.description.clone(),
            publisher: self.publisher.clone(),
            rights: self.rights.clone(),
            date: self.date,
            cover_image_path: self
                .cover
                .as_ref()
                .map(|cover| cover.to_string_lossy().into_owned()),
        };

        ConvertOptions {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            metadata,
            compression: self.compression,
        }
    }

    pub fn run(&self) -> ExitCode {
        if self.format == OutputFormat::Human {
            self.print_progress();
        }

        let result = convert::convert(&self.options());
        if let Err(error) = &result {
            log::debug!("conversion failed: {error:?}");
        }

        let reported = output::report(
            self.format,
            &result,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        );

        match (result, reported) {
            (Err(error), _) => ExitCode::from(error.exit_code()),
            (Ok(_), Err(_)) => ExitCode::from(ConvertError::GENERAL),
            (Ok(_), Ok(())) => ExitCode::SUCCESS,
        }
    }

    fn print_progress(&self) {
        match self.inputs.as_slice() {
            [input] if input.is_dir() => eprintln!("Converting directory: {}", input.display()),
            [input] => eprintln!("Converting: {}", input.display()),
            inputs => eprintln!("Converting {} files...", inputs.len()),
        }
    }
}
