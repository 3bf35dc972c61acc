//! Export sinks: where a finished schematic goes.
//!
//! The compiler never writes anything itself. A [`Schematic`](crate::Schematic)
//! hands its document text to an [`ExportSink`], together with an optional
//! file name hint.
//!
//! - [`FileSink`] - Atomic write to a file or into a directory
//! - [`WriterSink`] - Streams into any [`Write`] (stdout, a socket, a buffer)
//! - [`MemorySink`] - Keeps documents in memory

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use tempfile::NamedTempFile;
use thiserror::Error;

/// File name used by [`FileSink`] when targeting a directory without a hint.
pub const DEFAULT_FILE_NAME: &str = "flowsheet.svg";

/// Errors raised while persisting a document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to persist `{path}`: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Accepts finished document text.
pub trait ExportSink {
    /// Persists `document`. `hint` is a suggested file name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the document could not be stored.
    fn export(&mut self, document: &str, hint: Option<&str>) -> Result<(), ExportError>;
}

/// Writes documents to disk through a temporary file that is renamed into
/// place, so readers never observe a half-written file.
///
/// If the target is an existing directory the document is written to
/// `<dir>/<hint>` (or `<dir>/flowsheet.svg`); otherwise the target is the file
/// path itself and the hint is ignored.
///
/// # Examples
///
/// ```
/// # use flowsheet::sink::{ExportSink, FileSink};
/// let dir = tempfile::tempdir().unwrap();
///
/// let mut sink = FileSink::new(dir.path());
/// sink.export("<svg/>", Some("plant.svg")).unwrap();
///
/// let written = std::fs::read_to_string(dir.path().join("plant.svg")).unwrap();
/// assert_eq!(written, "<svg/>");
/// ```
#[derive(Debug, Clone)]
pub struct FileSink {
    target: PathBuf,
    last_written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            last_written: None,
        }
    }

    /// Returns the path of the most recently written file.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    fn resolve(&self, hint: Option<&str>) -> PathBuf {
        if self.target.is_dir() {
            let file_name = hint
                .and_then(|hint| Path::new(hint).file_name())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
            self.target.join(file_name)
        } else {
            self.target.clone()
        }
    }
}

impl ExportSink for FileSink {
    fn export(&mut self, document: &str, hint: Option<&str>) -> Result<(), ExportError> {
        let path = self.resolve(hint);
        info!(path:? = path; "Writing SVG file");

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent).inspect_err(|err| {
            error!(path:? = parent, err:% = err; "Failed to create temporary file");
        })?;
        temp.write_all(document.as_bytes()).inspect_err(|err| {
            error!(path:? = path, err:% = err; "Failed to write SVG content");
        })?;
        temp.flush()?;

        temp.persist(&path).map_err(|err| {
            error!(path:? = path, err:% = err.error; "Failed to move SVG file into place");
            ExportError::Persist {
                path: path.clone(),
                source: err.error,
            }
        })?;

        debug!(path:? = path, bytes = document.len(); "SVG file written");
        self.last_written = Some(path);
        Ok(())
    }
}

/// Streams documents into a writer. The hint is ignored.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for WriterSink<W> {
    fn export(&mut self, document: &str, _hint: Option<&str>) -> Result<(), ExportError> {
        self.writer.write_all(document.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects `(hint, document)` pairs in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<(Option<String>, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[(Option<String>, String)] {
        &self.documents
    }
}

impl ExportSink for MemorySink {
    fn export(&mut self, document: &str, hint: Option<&str>) -> Result<(), ExportError> {
        self.documents
            .push((hint.map(str::to_owned), document.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_writes_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.svg");

        let mut sink = FileSink::new(&target);
        sink.export("<svg/>", Some("ignored.svg")).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "<svg/>");
        assert_eq!(sink.last_written(), Some(target.as_path()));
    }

    #[test]
    fn test_file_sink_directory_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();

        let mut sink = FileSink::new(dir.path());
        sink.export("<svg/>", None).unwrap();

        assert!(dir.path().join(DEFAULT_FILE_NAME).exists());
    }

    #[test]
    fn test_file_sink_hint_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();

        let mut sink = FileSink::new(dir.path());
        sink.export("<svg/>", Some("../../escape.svg")).unwrap();

        assert!(dir.path().join("escape.svg").exists());
    }

    #[test]
    fn test_file_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.svg");

        let mut sink = FileSink::new(&target);
        sink.export("first", None).unwrap();
        sink.export("second", None).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_file_sink_reports_failures() {
        let dir = tempfile::tempdir().unwrap();

        let occupied = dir.path().join("taken.svg");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "x").unwrap();
        let err = FileSink::new(dir.path())
            .export("<svg/>", Some("taken.svg"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Persist { ref path, .. } if *path == occupied));

        let not_a_dir = dir.path().join("plain.txt");
        fs::write(&not_a_dir, "x").unwrap();
        let err = FileSink::new(not_a_dir.join("out.svg"))
            .export("<svg/>", None)
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        sink.export("<svg/>", None).unwrap();
        assert_eq!(sink.into_inner(), b"<svg/>\n");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.export("a", Some("a.svg")).unwrap();
        sink.export("b", None).unwrap();

        assert_eq!(
            sink.documents(),
            [(Some("a.svg".to_string()), "a".to_string()), (None, "b".to_string())]
        );
    }
}
