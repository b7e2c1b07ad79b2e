//! Order delivery: share links for the supported messengers and a file
//! clipboard for headless use.

pub mod channels;
pub mod clipboard;
pub mod error;
pub mod phone;

use std::fmt;
use std::str::FromStr;

pub use channels::{Signal, Telegram, WhatsApp};
pub use clipboard::FileClipboard;
pub use error::{Result, ShareError};
pub use jammer_traits::{Clipboard, MemoryClipboard, Messenger};

/// Supported order channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Telegram,
    Signal,
    WhatsApp,
}

impl Channel {
    pub const ALL: [Self; 3] = [Self::Telegram, Self::Signal, Self::WhatsApp];
}

impl Messenger for Channel {
    type Error = ShareError;

    fn name(&self) -> &'static str {
        match self {
            Self::Telegram => Telegram.name(),
            Self::Signal => Signal.name(),
            Self::WhatsApp => WhatsApp.name(),
        }
    }

    fn carries_text(&self) -> bool {
        match self {
            Self::Telegram => Telegram.carries_text(),
            Self::Signal => Signal.carries_text(),
            Self::WhatsApp => WhatsApp.carries_text(),
        }
    }

    fn share_link(&self, destination: &str, text: &str) -> Result<String> {
        let link = match self {
            Self::Telegram => Telegram.share_link(destination, text),
            Self::Signal => Signal.share_link(destination, text),
            Self::WhatsApp => WhatsApp.share_link(destination, text),
        };
        match &link {
            Ok(_) => tracing::debug!(channel = self.name(), "share link built"),
            Err(e) => tracing::warn!(channel = self.name(), error = %e, "share link failed"),
        }
        link
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" | "tg" => Ok(Self::Telegram),
            "signal" => Ok(Self::Signal),
            "whatsapp" | "wa" => Ok(Self::WhatsApp),
            other => Err(format!("unknown channel '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_round_trip() {
        for ch in Channel::ALL {
            assert_eq!(ch.to_string().parse::<Channel>().unwrap(), ch);
        }
        assert_eq!("TG".parse::<Channel>().unwrap(), Channel::Telegram);
        assert!("viber".parse::<Channel>().is_err());
    }

    #[test]
    fn only_signal_drops_the_text() {
        assert!(Channel::Telegram.carries_text());
        assert!(Channel::WhatsApp.carries_text());
        assert!(!Channel::Signal.carries_text());
    }
}
