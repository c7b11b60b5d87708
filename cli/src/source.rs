//! XHTML/HTML input files.
//!
//! Every input goes through an HTML5 parser, so tag soup is accepted. The body
//! is written back out as well-formed XHTML: void elements are self-closed,
//! entities are decoded, and scripts are removed.

use crate::convert::ConvertError;
use crate::image::ImageSet;
use quick_xml::escape::escape;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use toepub::document::{Chapter, Document, Heading, TableOfContents};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["xhtml", "html", "htm"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Foreign roots that need their namespace declared in XHTML.
const FOREIGN_NAMESPACES: &[(&str, &str)] = &[
    ("svg", "http://www.w3.org/2000/svg"),
    ("math", "http://www.w3.org/1998/Math/MathML"),
];

/// Attribute prefixes bound in a chapter document.
const BOUND_PREFIXES: &[&str] = &["xml", "xmlns", "epub"];

/// Returns `true` if `path` has a [supported extension](SUPPORTED_EXTENSIONS).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(extension))
        })
}

/// Expands `inputs` into a sorted list of source files.
///
/// Directories contribute their supported files (non-recursive).
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let entries = fs::read_dir(input).map_err(|source| ConvertError::Read {
                path: input.clone(),
                source,
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|source| ConvertError::Read {
                        path: input.clone(),
                        source,
                    })?
                    .path();

                if path.is_file() && is_supported(&path) {
                    files.push(path);
                }
            }
        } else if !input.exists() {
            return Err(ConvertError::InputNotFound(input.clone()));
        } else if is_supported(input) {
            files.push(input.clone());
        } else {
            return Err(ConvertError::UnsupportedFormat(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(ConvertError::NoInput);
    }
    files.sort();
    Ok(files)
}

/// Reads and parses the source at `path` into a single-chapter [`Document`].
///
/// Local images are embedded through `images`, relative to the directory of `path`.
pub fn load(path: &Path, images: &mut ImageSet) -> Result<Document, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let base_dir = path.parent().unwrap_or(Path::new(""));
    let source = Source::parse_with_images(&text, &mut |src| images.embed(base_dir, src));

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::debug!(
        "parsed {} ({} headings, {} bytes of body)",
        path.display(),
        source.headings.len(),
        source.body.len(),
    );
    Ok(source.into_document(&file_name, &stem))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceHeading {
    pub level: u8,
    pub title: String,
    pub id: Option<String>,
}

/// The parts of an input file that end up in the EPUB.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    /// Text of the `<title>` in the head.
    pub title: Option<String>,
    /// `<meta name="author">` values, in document order.
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    /// The body content serialized as XHTML.
    pub body: String,
    pub headings: Vec<SourceHeading>,
}

impl Source {
    /// Parses `text`, leaving image references untouched.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_images(text, &mut |_| None)
    }

    /// Parses `text`; `resolve_image` maps each `<img src>` to its new href,
    /// or [`None`] to keep it.
    pub fn parse_with_images(
        text: &str,
        resolve_image: &mut dyn FnMut(&str) -> Option<String>,
    ) -> Self {
        let html = Html::parse_document(text);
        let root = html.root_element();

        let mut source = Source::default();
        if let Some(head) = child_element(root, "head") {
            source.read_head(head);
        }

        if let Some(body) = child_element(root, "body") {
            let mut writer = BodyWriter::new(body, resolve_image);
            writer.write_children(body);

            source.body = writer.out.trim().to_owned();
            source.headings = writer.headings;
        }
        source
    }

    fn read_head(&mut self, head: ElementRef<'_>) {
        for element in head.children().filter_map(ElementRef::wrap) {
            let value = element.value();

            match value.name() {
                "title" if self.title.is_none() => {
                    self.title = Some(collapse_whitespace(element.text()))
                        .filter(|title| !title.is_empty());
                }
                "meta" => {
                    let (Some(name), Some(content)) = (value.attr("name"), value.attr("content"))
                    else {
                        continue;
                    };
                    let content = collapse_whitespace([content]);
                    if content.is_empty() {
                        continue;
                    }

                    match name.to_ascii_lowercase().as_str() {
                        "author" => self.authors.push(content),
                        "description" => {
                            self.description.get_or_insert(content);
                        }
                        "language" => {
                            self.language.get_or_insert(content);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    /// Turns the source into a [`Document`] with one chapter at `file_name`.
    ///
    /// The chapter is titled after the first heading, or `stem` if there is none.
    pub fn into_document(self, file_name: &str, stem: &str) -> Document {
        let (title, level) = match self.headings.first() {
            Some(heading) => (heading.title.clone(), heading.level),
            None => (stem.to_owned(), 1),
        };

        let mut document = Document::new();
        document.metadata.title = self.title.unwrap_or_default();
        document.metadata.authors = self.authors;
        document.metadata.description = self.description;
        if let Some(language) = self.language {
            document.metadata.language = language;
        }

        document.toc = TableOfContents::from_headings(self.headings.into_iter().map(|heading| {
            let href = match heading.id {
                Some(id) => format!("{file_name}#{id}"),
                None => file_name.to_owned(),
            };
            Heading::new(heading.level, heading.title, href)
        }));

        let mut chapter = Chapter::new(Chapter::numbered_id(0), title, self.body, file_name, 0);
        chapter.level = level;
        document.add_chapter(chapter);
        document
    }
}

/// Serializes body content as XHTML while collecting its headings.
struct BodyWriter<'r> {
    out: String,
    headings: Vec<SourceHeading>,
    /// Ids present in the body plus the ones generated for headings.
    ids: HashSet<String>,
    resolve_image: &'r mut dyn FnMut(&str) -> Option<String>,
}

impl<'r> BodyWriter<'r> {
    fn new(body: ElementRef<'_>, resolve_image: &'r mut dyn FnMut(&str) -> Option<String>) -> Self {
        let ids = body
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|element| element.value().id())
            .map(str::to_owned)
            .collect();

        Self {
            out: String::new(),
            headings: Vec::new(),
            ids,
            resolve_image,
        }
    }

    fn write_children(&mut self, parent: ElementRef<'_>) {
        for node in parent.children() {
            match node.value() {
                Node::Text(text) => self.out.push_str(&escape(&**text)),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(node) {
                        self.write_element(element);
                    }
                }
                // Comments, doctypes, and processing instructions are dropped
                _ => {}
            }
        }
    }

    fn write_element(&mut self, element: ElementRef<'_>) {
        let value = element.value();
        let name = value.name();

        if name == "script" {
            return;
        }
        // Names XML cannot express are unwrapped
        if !is_writable_name(name) {
            self.write_children(element);
            return;
        }

        let id = match heading_level(name) {
            Some(level) => self.collect_heading(element, level),
            None => value.id().filter(|id| !id.is_empty()).map(str::to_owned),
        };

        self.out.push('<');
        self.out.push_str(name);
        let mut written = vec!["id"];
        if let Some(id) = &id {
            self.push_attribute("id", id);
        }
        if let Some((_, namespace)) = FOREIGN_NAMESPACES.iter().find(|(root, _)| *root == name)
            && value.attr("xmlns").is_none()
        {
            self.push_attribute("xmlns", namespace);
        }

        // Foreign attributes lose their prefix, so `href` may appear twice
        for (attribute, attribute_value) in value.attrs() {
            if written.contains(&attribute) || !is_writable_attribute(attribute) {
                continue;
            }
            written.push(attribute);
            if name == "img" && attribute == "src" {
                let src = (self.resolve_image)(attribute_value);
                self.push_attribute(attribute, src.as_deref().unwrap_or(attribute_value));
            } else {
                self.push_attribute(attribute, attribute_value);
            }
        }

        if VOID_ELEMENTS.contains(&name) {
            self.out.push_str("/>");
            return;
        }

        self.out.push('>');
        self.write_children(element);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    /// Records a heading and returns its id, generating one if it has none.
    fn collect_heading(&mut self, element: ElementRef<'_>, level: u8) -> Option<String> {
        let title = collapse_whitespace(element.text());
        let id = element.value().id().filter(|id| !id.is_empty());

        // Headings without text cannot label a navigation entry
        if title.is_empty() {
            return id.map(str::to_owned);
        }

        let id = match id {
            Some(id) => id.to_owned(),
            None => self.unique_id(&title),
        };
        self.headings.push(SourceHeading {
            level,
            title,
            id: Some(id.clone()),
        });
        Some(id)
    }

    fn unique_id(&mut self, title: &str) -> String {
        let slug = slugify(title);
        let mut id = slug.clone();
        let mut suffix = 1;

        while self.ids.contains(&id) {
            suffix += 1;
            id = format!("{slug}-{suffix}");
        }
        self.ids.insert(id.clone());
        id
    }

    fn push_attribute(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape(value));
        self.out.push('"');
    }
}

fn child_element<'a>(parent: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == name)
}

fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

/// An XML name without a namespace prefix.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_writable_name(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => BOUND_PREFIXES.contains(&prefix) && is_xml_name(local),
        None => is_xml_name(name),
    }
}

/// Event handler attributes are dropped along with scripts.
fn is_writable_attribute(name: &str) -> bool {
    !name.to_ascii_lowercase().starts_with("on") && is_writable_name(name)
}

/// Turns heading text into an id: `Getting Started!` → `getting-started`.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    match slug.chars().next() {
        None => "section".to_owned(),
        Some(first) if !first.is_alphabetic() => format!("h-{slug}"),
        Some(_) => slug.to_owned(),
    }
}

fn collapse_whitespace<'a>(text: impl IntoIterator<Item = &'a str>) -> String {
    let text: String = text.into_iter().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
