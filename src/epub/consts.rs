pub(crate) mod paths {
    pub(crate) const MIMETYPE: &str = "mimetype";
    pub(crate) const CONTAINER: &str = "META-INF/container.xml";
    /// Directory holding the package document and everything it references.
    pub(crate) const PACKAGE_DIR: &str = "OEBPS";
    // Relative to `PACKAGE_DIR`
    pub(crate) const PACKAGE: &str = "content.opf";
    pub(crate) const NAV: &str = "nav.xhtml";
    pub(crate) const STYLESHEET: &str = "styles/default.css";

    /// Archive entry name of a package-relative file.
    pub(crate) fn in_package(file_name: &str) -> String {
        format!("{PACKAGE_DIR}/{}", file_name.trim_start_matches('/'))
    }
}

pub(crate) mod ids {
    pub(crate) const UNIQUE_IDENTIFIER: &str = "uid";
    pub(crate) const NAV: &str = "nav";
    pub(crate) const STYLESHEET: &str = "css";
    pub(crate) const TOC: &str = "toc";
    pub(crate) const LANDMARKS: &str = "landmarks";
}

/// Manifest ids that chapters and resources must not use.
pub(crate) const RESERVED_IDS: &[&str] = &[ids::NAV, ids::STYLESHEET];
/// Package-relative file names that chapters and resources must not use.
pub(crate) const RESERVED_FILE_NAMES: &[&str] = &[paths::PACKAGE, paths::NAV, paths::STYLESHEET];

pub(crate) mod mime {
    pub(crate) const EPUB: &str = "application/epub+zip";
    pub(crate) const OEBPS_PACKAGE: &str = "application/oebps-package+xml";
    pub(crate) const XHTML: &str = "application/xhtml+xml";
    pub(crate) const CSS: &str = "text/css";
}

pub(crate) mod xml {
    pub(crate) const XMLNS: &str = "xmlns";
    pub(crate) const ID: &str = "id";
    pub(crate) const LANG: &str = "xml:lang";
}

pub(crate) mod ocf {
    pub(crate) const CONTAINER: &str = "container";
    pub(crate) const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";
    pub(crate) const CONTAINER_VERSION: &str = "1.0";
    pub(crate) const VERSION: &str = "version";
    pub(crate) const ROOT_FILES: &str = "rootfiles";
    pub(crate) const ROOT_FILE: &str = "rootfile";
    pub(crate) const FULL_PATH: &str = "full-path";
    pub(crate) const MEDIA_TYPE: &str = "media-type";
}

pub(crate) mod opf {
    pub(crate) const OPF_NS: &str = "http://www.idpf.org/2007/opf";
    pub(crate) const PACKAGE: &str = "package";
    pub(crate) const VERSION: &str = "version";
    pub(crate) const EPUB3_VERSION: &str = "3.0";
    pub(crate) const UNIQUE_ID: &str = "unique-identifier";

    pub(crate) const METADATA: &str = "metadata";
    pub(crate) const META: &str = "meta";
    pub(crate) const NAME: &str = "name";
    pub(crate) const CONTENT: &str = "content";
    pub(crate) const PROPERTY: &str = "property";
    pub(crate) const GENERATOR: &str = "generator";
    pub(crate) const COVER: &str = "cover";

    pub(crate) const MANIFEST: &str = "manifest";
    pub(crate) const ITEM: &str = "item";
    pub(crate) const HREF: &str = "href";
    pub(crate) const MEDIA_TYPE: &str = "media-type";
    pub(crate) const PROPERTIES: &str = "properties";
    pub(crate) const NAV_PROPERTY: &str = "nav";
    pub(crate) const COVER_IMAGE_PROPERTY: &str = "cover-image";

    pub(crate) const SPINE: &str = "spine";
    pub(crate) const ITEMREF: &str = "itemref";
    pub(crate) const IDREF: &str = "idref";
}

pub(crate) mod dc {
    pub(crate) const XMLNS_DC: &str = "xmlns:dc";
    pub(crate) const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";
    pub(crate) const IDENTIFIER: &str = "dc:identifier";
    pub(crate) const TITLE: &str = "dc:title";
    pub(crate) const LANGUAGE: &str = "dc:language";
    pub(crate) const CREATOR: &str = "dc:creator";
    pub(crate) const DESCRIPTION: &str = "dc:description";
    pub(crate) const PUBLISHER: &str = "dc:publisher";
    pub(crate) const RIGHTS: &str = "dc:rights";
    pub(crate) const DATE: &str = "dc:date";
    pub(crate) const MODIFIED: &str = "dcterms:modified";
}

pub(crate) mod xhtml {
    pub(crate) const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
    pub(crate) const DOCTYPE: &str = "html";
    pub(crate) const HTML: &str = "html";
    pub(crate) const HEAD: &str = "head";
    pub(crate) const META: &str = "meta";
    pub(crate) const CHARSET: &str = "charset";
    pub(crate) const UTF8: &str = "UTF-8";
    pub(crate) const TITLE: &str = "title";
    pub(crate) const LINK: &str = "link";
    pub(crate) const REL: &str = "rel";
    pub(crate) const STYLESHEET: &str = "stylesheet";
    pub(crate) const TYPE: &str = "type";
    pub(crate) const HREF: &str = "href";
    pub(crate) const LANG: &str = "lang";
    pub(crate) const BODY: &str = "body";
    pub(crate) const NAV: &str = "nav";
    pub(crate) const HIDDEN: &str = "hidden";
    pub(crate) const H1: &str = "h1";
    pub(crate) const H2: &str = "h2";
    pub(crate) const ORDERED_LIST: &str = "ol";
    pub(crate) const LIST_ITEM: &str = "li";
    pub(crate) const ANCHOR: &str = "a";
}

pub(crate) mod epub {
    pub(crate) const XMLNS: &str = "xmlns:epub";
    pub(crate) const EPUB_NS: &str = "http://www.idpf.org/2007/ops";
    pub(crate) const TYPE: &str = "epub:type";
    pub(crate) const TOC: &str = "toc";
    pub(crate) const LANDMARKS: &str = "landmarks";
    pub(crate) const BODYMATTER: &str = "bodymatter";
}
