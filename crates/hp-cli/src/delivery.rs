//! Handing finished documents to the user.
//!
//! The calendar builder only produces text; a [`Delivery`] decides where the
//! bytes end up.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Saves a named document somewhere the user can pick it up.
pub trait Delivery {
    fn deliver(&mut self, filename: &str, text: &str, mime_type: &str) -> Result<()>;

    /// Human-readable location a delivered file ends up at.
    fn destination(&self, filename: &str) -> String;
}

/// Writes documents as files into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl Delivery for DirectoryDelivery {
    /// Writes atomically: the text goes to a `.tmp` sibling which is then
    /// renamed over the target.
    fn deliver(&mut self, filename: &str, text: &str, mime_type: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(filename);
        let tmp_path = path.with_extension("tmp");

        fs::write(&tmp_path, text)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }

        tracing::debug!(path = %path.display(), mime_type, bytes = text.len(), "delivered file");
        Ok(())
    }

    fn destination(&self, filename: &str) -> String {
        self.path_for(filename).display().to_string()
    }
}

/// Streams documents to a writer, such as stdout.
pub struct WriterDelivery<W> {
    writer: W,
}

impl<W: Write> WriterDelivery<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Delivery for WriterDelivery<W> {
    fn deliver(&mut self, filename: &str, text: &str, mime_type: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("failed to write {filename}"))?;
        tracing::debug!(filename, mime_type, bytes = text.len(), "streamed document");
        Ok(())
    }

    fn destination(&self, _filename: &str) -> String {
        "stdout".to_string()
    }
}
