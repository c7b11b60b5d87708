use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::borrow::Cow;

/// Characters that must be percent-encoded within an href path.
///
/// `/` is kept so directory separators survive.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

/// Percent-encodes a raw file path so it can be used as an href.
pub(crate) fn encode(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, PATH).into()
}

/// Expresses `target` relative to the directory `from_dir`.
///
/// Both paths are relative to the same root (e.g., the package directory).
pub(crate) fn relativize(from_dir: &str, target: &str) -> String {
    let from = segments(from_dir);
    let to = segments(target);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = Vec::with_capacity(from.len() - common + to.len() - common);
    relative.extend(std::iter::repeat_n("..", from.len() - common));
    relative.extend(&to[common..]);

    relative.join("/")
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}
