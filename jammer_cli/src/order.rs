//! Order flow: copy the summary, then build the messenger link.
//!
//! Copy and link failures are reported as notices; they never change the
//! configuration or fail the command.

use std::path::Path;

use jammer_core::Session;
use jammer_share::{Channel, Clipboard, Messenger, ShareError};
use serde_json::{Value, json};

use crate::cli::recipient_env;

pub const COPIED: &str = "Текст скопійовано. Якщо месенджер не підставив — встав вручну (Paste).";
pub const COPY_FAILED: &str = "Не вдалося скопіювати";

/// Ordering with no module selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("nothing to order: no module selected")]
pub struct NothingToOrder;

#[derive(Debug, Clone)]
pub struct OrderOutcome {
    pub channel: Channel,
    pub summary: String,
    pub price: u64,
    pub copied: bool,
    pub link: Option<String>,
    pub notices: Vec<String>,
}

/// `recipient` is the resolved destination for `channel`; the summary is
/// copied into `clipboard` first when one is given.
pub fn place_order(
    session: &Session,
    channel: Channel,
    recipient: Option<&str>,
    clipboard: Option<&mut dyn Clipboard>,
) -> eyre::Result<OrderOutcome> {
    if session.selection().module_count() == 0 {
        return Err(NothingToOrder.into());
    }
    let summary = session.summary()?;
    let price = session.price()?;
    let mut notices = Vec::new();

    let copied = clipboard.is_some_and(|clipboard| match clipboard.copy(&summary) {
        Ok(()) => {
            notices.push(COPIED.to_string());
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "copy failed");
            notices.push(format!("{COPY_FAILED}: {e}"));
            false
        }
    });

    let link = match channel.share_link(recipient.unwrap_or_default(), &summary) {
        Ok(link) => Some(link),
        Err(ShareError::MissingDestination { .. }) => {
            notices.push(format!(
                "Не задано {channel}. Додай {} або --to.",
                recipient_env(channel)
            ));
            None
        }
        Err(e) => {
            notices.push(format!("Не вдалося сформувати посилання: {e}"));
            None
        }
    };
    if link.is_some() && !channel.carries_text() {
        notices.push(format!("{channel} не передає текст у посиланні; встав його вручну."));
    }
    tracing::info!(%channel, price, link = link.is_some(), "order prepared");

    Ok(OrderOutcome {
        channel,
        summary,
        price,
        copied,
        link,
        notices,
    })
}

pub fn order_text(outcome: &OrderOutcome) -> String {
    let mut out = outcome.summary.clone();
    if let Some(link) = &outcome.link {
        out.push_str(&format!("\n\n{}: {link}", outcome.channel));
    }
    out
}

/// `copied_to` is the file the clipboard wrote to, if any.
pub fn order_json(outcome: &OrderOutcome, copied_to: Option<&Path>) -> Value {
    json!({
        "channel": outcome.channel.name(),
        "carries_text": outcome.channel.carries_text(),
        "price": outcome.price,
        "summary": outcome.summary,
        "link": outcome.link,
        "copied_to": copied_to
            .filter(|_| outcome.copied)
            .map(|p| p.display().to_string()),
        "notices": outcome.notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jammer_core::{Catalog, Tier};
    use jammer_share::{FileClipboard, MemoryClipboard};
    use std::sync::Arc;

    fn session() -> Session {
        Session::new(Arc::new(Catalog::builtin().unwrap())).unwrap()
    }

    fn one_module() -> Session {
        let mut s = session();
        s.set_band_tier("400-500", Tier::W50).unwrap();
        s
    }

    #[test]
    fn empty_selection_is_refused() {
        let err = place_order(&session(), Channel::Telegram, Some("@shop"), None).unwrap_err();
        assert!(err.downcast_ref::<NothingToOrder>().is_some());
        assert_eq!(err.to_string(), "nothing to order: no module selected");
    }

    #[test]
    fn summary_lands_in_the_clipboard() {
        let s = one_module();
        let mut clipboard = MemoryClipboard::new();
        let out = place_order(&s, Channel::Telegram, Some("@shop"), Some(&mut clipboard)).unwrap();
        assert!(out.copied);
        assert_eq!(clipboard.contents(), Some(out.summary.as_str()));
        assert_eq!(out.notices, [COPIED]);
    }

    #[test]
    fn missing_recipient_names_the_variable() {
        let s = one_module();
        let out = place_order(&s, Channel::Telegram, None, None).unwrap();
        assert!(out.link.is_none());
        assert!(!out.copied);
        assert_eq!(out.notices, ["Не задано telegram. Додай JAMMER_TG_USERNAME або --to."]);
        assert_eq!(out.price, s.price().unwrap());
    }

    #[test]
    fn failed_copy_still_builds_link() {
        let dir = tempfile::tempdir().unwrap();
        let s = one_module();
        let before = s.selection().clone();

        let mut bad = FileClipboard::new(dir.path().join("missing").join("order.txt"));
        let out = place_order(&s, Channel::Telegram, Some("@shop"), Some(&mut bad)).unwrap();
        assert!(!out.copied);
        assert!(out.notices[0].starts_with(COPY_FAILED));
        assert!(order_json(&out, Some(bad.path()))["copied_to"].is_null());
        assert!(out.link.unwrap().starts_with("https://t.me/shop?text="));
        assert_eq!(s.selection(), &before);
    }

    #[test]
    fn signal_asks_to_paste() {
        let s = one_module();
        let out = place_order(&s, Channel::Signal, Some("+380501234567"), None).unwrap();
        assert_eq!(out.link.as_deref(), Some("https://signal.me/#p/%2B380501234567"));
        assert!(out.notices.iter().any(|n| n.contains("вручну")));
        assert!(order_text(&out).ends_with("signal: https://signal.me/#p/%2B380501234567"));
    }
}
