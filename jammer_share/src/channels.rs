//! Link builders for the three order channels.

use jammer_traits::Messenger;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::error::{Result, ShareError};
use crate::phone;

fn required<'a>(channel: &'static str, destination: &'a str) -> Result<&'a str> {
    let d = destination.trim();
    if d.is_empty() {
        return Err(ShareError::MissingDestination { channel });
    }
    Ok(d)
}

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, so a space is
/// `%20` and a plus is `%2B`, as messenger apps expect.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

fn with_text(mut url: Url, text: &str) -> String {
    // Keeps any query the destination already had.
    let pair = format!("text={}", encode_component(text));
    let query = match url.query() {
        Some(q) if !q.is_empty() => format!("{q}&{pair}"),
        _ => pair,
    };
    url.set_query(Some(&query));
    url.into()
}

/// Chat messenger addressed by username or by a full link.
///
/// `@user` and `user` become `https://t.me/user`; `http(s)://` and `tg://`
/// destinations are used as given. The summary rides along as `text`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Telegram;

impl Messenger for Telegram {
    type Error = ShareError;

    fn name(&self) -> &'static str {
        "telegram"
    }

    fn carries_text(&self) -> bool {
        true
    }

    fn share_link(&self, destination: &str, text: &str) -> Result<String> {
        let d = required(self.name(), destination)?;
        let is_link = ["http://", "https://", "tg://"]
            .iter()
            .any(|p| d.starts_with(p));
        let url = if is_link {
            Url::parse(d)?
        } else {
            let user = d.trim_start_matches('@');
            if user.is_empty() || user.contains(['/', '?', '#', ' ']) {
                return Err(ShareError::InvalidDestination {
                    channel: self.name(),
                    destination: d.to_owned(),
                });
            }
            Url::parse(&format!("https://t.me/{user}"))?
        };
        Ok(with_text(url, text))
    }
}

/// Secure messenger addressed by phone number. The link opens the contact
/// only; the text has to be pasted from the clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct Signal;

impl Messenger for Signal {
    type Error = ShareError;

    fn name(&self) -> &'static str {
        "signal"
    }

    fn carries_text(&self) -> bool {
        false
    }

    fn share_link(&self, destination: &str, _text: &str) -> Result<String> {
        let d = required(self.name(), destination)?;
        let number = phone::e164(d).ok_or_else(|| ShareError::InvalidDestination {
            channel: self.name(),
            destination: d.to_owned(),
        })?;
        let mut url = Url::parse("https://signal.me/")?;
        url.set_fragment(Some(&format!("p/{}", encode_component(&number))));
        Ok(url.into())
    }
}

/// Web messenger addressed by phone number (digits only).
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatsApp;

impl Messenger for WhatsApp {
    type Error = ShareError;

    fn name(&self) -> &'static str {
        "whatsapp"
    }

    fn carries_text(&self) -> bool {
        true
    }

    fn share_link(&self, destination: &str, text: &str) -> Result<String> {
        let d = required(self.name(), destination)?;
        let number = phone::digits(d);
        if number.is_empty() {
            return Err(ShareError::InvalidDestination {
                channel: self.name(),
                destination: d.to_owned(),
            });
        }
        let url = Url::parse(&format!("https://wa.me/{number}"))?;
        Ok(with_text(url, text))
    }
}
