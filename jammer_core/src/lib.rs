#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Pricing and configuration engine for the modular jammer (front-end agnostic).
//!
//! Everything here is a pure function of a [`Catalog`] and a [`Selection`];
//! nothing is cached, so derived values can never go stale.
//!
//! ## Architecture
//!
//! - **Catalog**: typed price table, built from `jammer_config` (`catalog`, `conversions`)
//! - **Bands**: fixed grid of selectable rows over the catalog range (`band`)
//! - **Selection**: per-band tier plus case, battery and accessories; enforces
//!   the module ceiling (`selection`, `status`)
//! - **Coverage**: frequency segments for the coverage bar (`coverage`)
//! - **Pricing**: cost breakdown and final price (`pricing`)
//! - **Runtime**: battery runtime range (`runtime`)
//! - **Summary**: order text for copy/share (`summary`, `format`)
//! - **Session**: owns one selection and routes edits (`session`)
//!
//! ## Money
//!
//! Amounts are whole hryvnias in `u64`. Profit is the only fractional term and
//! the final sum is rounded once, half away from zero.

pub mod band;
pub mod catalog;
pub mod conversions;
pub mod coverage;
pub mod error;
pub mod format;
pub mod pricing;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod status;
pub mod summary;

pub use band::{Band, find_band, partition, partition_range};
pub use catalog::{Catalog, FrequencyRange, ModuleSpec};
pub use coverage::{Segment, pct, resolve_coverage};
pub use error::{CalcError, Result};
pub use pricing::{PriceBreakdown, compute_price, price_breakdown};
pub use runtime::{RuntimeEstimate, RuntimeHint, estimate_runtime, runtime_hint};
pub use selection::{Charger, MAX_MODULES, ModuleCounts, Selection, Tier};
pub use session::{Quote, SelectionEvent, Session};
pub use status::TierChange;
pub use summary::format_summary;
