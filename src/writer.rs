pub(crate) mod xml;
pub(crate) mod zip;

/// Both the XML event writer and the ZIP writer report failures as [`std::io::Error`];
/// callers attach the build phase when converting into a
/// [`BuildError`](crate::errors::BuildError).
pub(crate) type WriterResult<T> = std::io::Result<T>;
