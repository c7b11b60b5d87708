use crate::document::DateTime;
use crate::writer::WriterResult;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime as ZipDateTime};

pub(crate) trait ZipFileOptionsExt {
    fn zip_compression_level(self, level: u8) -> Self;

    fn zip_last_modified_date(self, date: DateTime) -> Self;
}

impl ZipFileOptionsExt for SimpleFileOptions {
    fn zip_compression_level(self, level: u8) -> Self {
        match level {
            0 => self.compression_method(CompressionMethod::Stored),
            level => self
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level.min(9)))),
        }
    }

    fn zip_last_modified_date(self, datetime: DateTime) -> Self {
        let date = datetime.date();
        let time = datetime.time();

        // DOS timestamps only cover 1980-2107; out-of-range dates fall back to the zip default.
        let datetime = ZipDateTime::from_date_and_time(
            date.year().clamp(0, 9999) as u16,
            date.month(),
            date.day(),
            time.hour(),
            time.minute(),
            time.second(),
        )
        .unwrap_or_default();

        self.last_modified_time(datetime)
    }
}

/// Sequential ZIP writer over a seekable sink.
///
/// Entries are written with sizes patched into their local headers,
/// so no data descriptors follow the stored `mimetype` entry.
pub(crate) struct ZipWriter<W: Write + Seek> {
    inner: zip::ZipWriter<W>,
    options: SimpleFileOptions,
}

impl<W: Write + Seek> ZipWriter<W> {
    pub(crate) fn new(writer: W, options: SimpleFileOptions) -> Self {
        Self {
            inner: zip::ZipWriter::new(writer),
            options,
        }
    }

    fn start_zip_file_entry(&mut self, name: &str, options: SimpleFileOptions) -> WriterResult<()> {
        self.inner
            // Archive entries are always relative to the container root.
            .start_file(name.trim_start_matches('/'), options)
            .map_err(from_zip_error)
    }

    /// Starts an entry that is always stored, whatever the configured compression.
    pub(crate) fn start_uncompressed_file(&mut self, name: &str) -> WriterResult<()> {
        // A stored entry must not carry the deflate level
        let options = self
            .options
            .compression_method(CompressionMethod::Stored)
            .compression_level(None);
        self.start_zip_file_entry(name, options)
    }

    pub(crate) fn start_file(&mut self, name: &str) -> WriterResult<()> {
        self.start_zip_file_entry(name, self.options)
    }

    pub(crate) fn finish(self) -> WriterResult<W> {
        self.inner.finish().map_err(from_zip_error)
    }
}

impl<W: Write + Seek> Write for ZipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

fn from_zip_error(error: zip::result::ZipError) -> std::io::Error {
    match error {
        zip::result::ZipError::Io(error) => error,
        error => std::io::Error::other(error),
    }
}

#[cfg(test)]
mod tests {
    use super::{ZipFileOptionsExt, ZipWriter};
    use crate::document::DateTime;
    use std::io::{Cursor, Read, Write};
    use zip::CompressionMethod;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_uncompressed_entry_ignores_compression_level() {
        let options = SimpleFileOptions::default()
            .zip_compression_level(9)
            .zip_last_modified_date(DateTime::from_unix(1_700_000_000));
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()), options);

        zip.start_uncompressed_file("mimetype").unwrap();
        zip.write_all(b"application/epub+zip").unwrap();
        zip.start_file("/OEBPS/a.txt").unwrap();
        zip.write_all(&[b'a'; 512]).unwrap();

        let bytes = zip.finish().unwrap().into_inner();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mimetype = archive.by_index(0).unwrap();
        assert_eq!("mimetype", mimetype.name());
        assert_eq!(CompressionMethod::Stored, mimetype.compression());
        drop(mimetype);

        let mut text = archive.by_name("OEBPS/a.txt").unwrap();
        assert_eq!(CompressionMethod::Deflated, text.compression());
        let mut content = String::new();
        text.read_to_string(&mut content).unwrap();
        assert_eq!(512, content.len());
    }

    #[test]
    fn test_level_zero_stores_everything() {
        let options = SimpleFileOptions::default().zip_compression_level(0);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()), options);
        zip.start_file("a.txt").unwrap();
        zip.write_all(b"abc").unwrap();

        let bytes = zip.finish().unwrap().into_inner();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(
            CompressionMethod::Stored,
            archive.by_name("a.txt").unwrap().compression()
        );
    }
}
