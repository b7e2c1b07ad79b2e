//! A single user's configuration: the band grid, the live selection and the
//! catalog they are priced against.

use std::sync::Arc;

use crate::band::{Band, find_band, partition_range};
use crate::catalog::Catalog;
use crate::coverage::{Segment, pct, resolve_coverage};
use crate::error::{CalcError, Result};
use crate::pricing::{PriceBreakdown, price_breakdown};
use crate::runtime::{RuntimeHint, runtime_hint};
use crate::selection::{Charger, Selection, Tier};
use crate::status::TierChange;
use crate::summary::format_summary;

/// One edit coming from the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Band id (`"400-500"`) or start frequency (`"400"`), and the new tier.
    Band { band: String, tier: Tier },
    Case(String),
    Battery(String),
    Charger(Charger, bool),
    /// Raw quantity as typed; clamped on apply.
    MagneticFeet(f64),
}

/// Everything derived from the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub coverage: Vec<Segment>,
    pub breakdown: Option<PriceBreakdown>,
    pub price: u64,
    pub runtime: RuntimeHint,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    bands: Vec<Band>,
    selection: Selection,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        let bands = partition_range(&catalog.range)?;
        let selection = Selection::new(bands.len(), &catalog);
        tracing::debug!(bands = bands.len(), "session created");
        Ok(Self {
            catalog,
            bands,
            selection,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set a band's tier. Hitting the module ceiling returns
    /// `CalcError::CapacityExceeded` and leaves the selection as it was.
    pub fn set_band_tier(&mut self, band: &str, tier: Tier) -> Result<TierChange> {
        let idx = find_band(&self.bands, band).ok_or_else(|| CalcError::unknown("band", band))?;
        match self.selection.set_tier(idx, tier) {
            Ok(change) => {
                tracing::debug!(band = %self.bands[idx].id, %tier, ?change, "band tier set");
                Ok(change)
            }
            Err(e) => {
                tracing::warn!(band = %self.bands[idx].id, %tier, error = %e, "band tier rejected");
                Err(e)
            }
        }
    }

    pub fn set_case(&mut self, key: &str) -> Result<()> {
        self.selection.set_case(&self.catalog, key)?;
        tracing::debug!(case = key, "case set");
        Ok(())
    }

    pub fn set_battery(&mut self, key: &str) -> Result<()> {
        self.selection.set_battery(&self.catalog, key)?;
        tracing::debug!(battery = key, "battery set");
        Ok(())
    }

    pub fn set_charger(&mut self, which: Charger, on: bool) {
        self.selection.set_charger(which, on);
        tracing::debug!(?which, on, "charger set");
    }

    pub fn set_magnetic_feet(&mut self, raw: f64) -> u16 {
        let qty = self.selection.set_magnetic_feet(raw);
        if f64::from(qty) != raw {
            tracing::debug!(raw, qty, "magnetic feet quantity clamped");
        }
        qty
    }

    /// Route one front-end event to its mutation rule.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<()> {
        match event {
            SelectionEvent::Band { band, tier } => self.set_band_tier(&band, tier).map(|_| ()),
            SelectionEvent::Case(key) => self.set_case(&key),
            SelectionEvent::Battery(key) => self.set_battery(&key),
            SelectionEvent::Charger(which, on) => {
                self.set_charger(which, on);
                Ok(())
            }
            SelectionEvent::MagneticFeet(raw) => {
                self.set_magnetic_feet(raw);
                Ok(())
            }
        }
    }

    /// Back to a fresh configuration.
    pub fn reset(&mut self) {
        self.selection = Selection::new(self.bands.len(), &self.catalog);
        tracing::debug!("selection reset");
    }

    pub fn coverage(&self) -> Result<Vec<Segment>> {
        resolve_coverage(&self.bands, &self.selection, &self.catalog)
    }

    pub fn pct(&self, mhz: u32) -> f64 {
        pct(&self.catalog.range, mhz)
    }

    pub fn breakdown(&self) -> Result<Option<PriceBreakdown>> {
        price_breakdown(&self.bands, &self.selection, &self.catalog)
    }

    pub fn price(&self) -> Result<u64> {
        Ok(self.breakdown()?.map_or(0, |b| b.total))
    }

    pub fn runtime(&self) -> Result<RuntimeHint> {
        runtime_hint(&self.selection, &self.catalog)
    }

    pub fn summary(&self) -> Result<String> {
        let coverage = self.coverage()?;
        let price = self.price()?;
        let runtime = self.runtime()?;
        format_summary(
            &self.catalog,
            &self.bands,
            &self.selection,
            &coverage,
            price,
            &runtime,
        )
    }

    /// Recompute every derived value from the live selection.
    pub fn quote(&self) -> Result<Quote> {
        let coverage = self.coverage()?;
        let breakdown = self.breakdown()?;
        let price = breakdown.as_ref().map_or(0, |b| b.total);
        let runtime = self.runtime()?;
        let summary = format_summary(
            &self.catalog,
            &self.bands,
            &self.selection,
            &coverage,
            price,
            &runtime,
        )?;
        Ok(Quote {
            coverage,
            breakdown,
            price,
            runtime,
            summary,
        })
    }
}
