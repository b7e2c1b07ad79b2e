//! Outcome of a band tier mutation.

/// What an accepted `set_tier` call did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierChange {
    /// Requested tier equals the current one; nothing changed.
    Unchanged,
    /// A band went from no module to a module.
    Added,
    /// A band swapped one power tier for the other.
    Replaced,
    /// A band's module was removed.
    Removed,
}
