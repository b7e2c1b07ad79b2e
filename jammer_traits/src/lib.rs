//! Seams between the quote engine and the outside world.
//!
//! Nothing here knows about prices. A front end hands a finished summary
//! string to a [`Clipboard`] and to a [`Messenger`]; either may fail without
//! touching the configuration that produced the text.

pub mod clipboard;

pub use clipboard::{Clipboard, MemoryClipboard};

/// A messaging channel that can turn a summary and a destination into a link
/// the user opens to place the order.
pub trait Messenger {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short lowercase channel name, e.g. `"telegram"`.
    fn name(&self) -> &'static str;

    /// Whether the link itself carries the text. When it does not, the user
    /// pastes the copied summary by hand.
    fn carries_text(&self) -> bool;

    fn share_link(&self, destination: &str, text: &str) -> Result<String, Self::Error>;
}
