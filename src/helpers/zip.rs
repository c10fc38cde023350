//! ZIP archive helper utilities for packaging deployment archives.
//! Provides convenient methods for writing deflated entries.

use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Entry options shared by every file written into a deployment archive.
pub fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Helper trait for writing archive entries from memory or from disk.
pub trait ZipWriterHelper {
    /// Writes an in-memory text entry under the given archive name
    fn write_text(&mut self, name: &str, text: &str) -> ZipResult<()>;

    /// Copies a file from disk into the archive under the given archive name
    fn write_path(&mut self, name: &str, path: &Path) -> ZipResult<()>;
}

impl<W: Write + Seek> ZipWriterHelper for ZipWriter<W> {
    fn write_text(&mut self, name: &str, text: &str) -> ZipResult<()> {
        self.start_file(name, deflated())?;
        self.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_path(&mut self, name: &str, path: &Path) -> ZipResult<()> {
        let mut file = File::open(path)?;
        self.start_file(name.replace('\\', "/"), deflated())?;
        std::io::copy(&mut file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Read;
    use zip::result::ZipError;
    use zip::ZipArchive;

    #[test]
    fn write_text_and_path_entries() {
        let directory = tempfile::tempdir().unwrap();
        let source = directory.path().join("module.py");
        std::fs::write(&source, "print('hello')\n").unwrap();

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.write_text("bootstrap.py", "import sys\n").unwrap();
        writer.write_path("pkg\\module.py", &source).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "bootstrap.py");

        let mut content = String::new();
        let mut entry = archive.by_name("pkg/module.py").unwrap();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "print('hello')\n");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        drop(entry);

        assert!(matches!(archive.by_name("pkg\\module.py"), Err(ZipError::FileNotFound)));
    }
}
