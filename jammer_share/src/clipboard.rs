use std::fs;
use std::path::{Path, PathBuf};

use jammer_traits::Clipboard;

/// Clipboard backed by a plain file; each copy replaces its contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        fs::write(&self.path, text).map_err(crate::error::ShareError::from)?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "summary copied");
        Ok(())
    }
}
