/// Sink for the order text.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// In-process clipboard; keeps the last copied text.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    last: Option<String>,
}

impl MemoryClipboard {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.last = Some(text.to_owned());
        Ok(())
    }
}
