//! Final price of a configuration.
//!
//! All amounts are whole hryvnias. Only the final sum is rounded.

use crate::band::Band;
use crate::catalog::Catalog;
use crate::error::{CalcError, Result};
use crate::selection::{Charger, ModuleCounts, Selection};

/// Every term that goes into the final price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub counts: ModuleCounts,
    pub module_cost: u64,
    pub hi_band_surcharge: u64,
    pub case_cost: u64,
    pub battery_cost: u64,
    pub base_included_cost: u64,
    pub charger_cost: u64,
    pub magnetic_feet_cost: u64,
    /// Sum of the material terms above; profit is taken from this.
    pub cost: u64,
    pub labor: u64,
    pub profit: f64,
    /// `round(cost + labor + profit)`.
    pub total: u64,
}

fn overflow(term: &str) -> CalcError {
    CalcError::Config(format!("price overflow in {term}"))
}

fn add(sum: u64, term: u64, what: &str) -> Result<u64> {
    sum.checked_add(term).ok_or_else(|| overflow(what))
}

/// Full breakdown, or `None` when no module is selected.
///
/// An empty build is not priced at all, whatever the case, battery or
/// accessories say. Otherwise the case and battery keys must exist in the catalog.
pub fn price_breakdown(
    bands: &[Band],
    selection: &Selection,
    catalog: &Catalog,
) -> Result<Option<PriceBreakdown>> {
    selection.ensure_aligned(bands.len())?;
    let counts = selection.counts();
    if counts.total() == 0 {
        return Ok(None);
    }

    let mut module_cost = 0u64;
    let mut hi_band_modules = 0u64;
    for (idx, tier) in selection.selected() {
        if let Some(spec) = catalog.module(tier) {
            module_cost = add(module_cost, spec.price, "modules")?;
        }
        if bands
            .get(idx)
            .is_some_and(|b| catalog.hi_band.applies_to(b.start_mhz))
        {
            hi_band_modules += 1;
        }
    }
    let hi_band_surcharge = hi_band_modules
        .checked_mul(catalog.hi_band.surcharge)
        .ok_or_else(|| overflow("hi-band surcharge"))?;

    let case_cost = catalog.require_case(selection.case())?.price;
    let battery_cost = catalog.require_battery(selection.battery())?.price;

    let acc = &catalog.accessories;
    let mut charger_cost = 0u64;
    if selection.charger(Charger::Mains) {
        charger_cost = add(charger_cost, acc.charger_220.price, "chargers")?;
    }
    if selection.charger(Charger::Vehicle) {
        charger_cost = add(charger_cost, acc.charger_12_24.price, "chargers")?;
    }
    let magnetic_feet_cost = u64::from(selection.magnetic_feet())
        .checked_mul(acc.magnetic_feet.price)
        .ok_or_else(|| overflow("magnetic feet"))?;

    let cost = [
        hi_band_surcharge,
        case_cost,
        battery_cost,
        catalog.base_included_cost,
        charger_cost,
        magnetic_feet_cost,
    ]
    .into_iter()
    .try_fold(module_cost, |sum, term| add(sum, term, "cost"))?;
    let labor = catalog.labor.for_modules(counts.total());
    let profit = cost as f64 * catalog.profit_coef;
    // f64::round rounds half away from zero.
    let raw_total = (cost as f64 + labor as f64 + profit).round();
    if raw_total >= u64::MAX as f64 {
        return Err(overflow("total"));
    }
    let total = raw_total as u64;

    tracing::trace!(cost, labor, profit, total, "priced configuration");

    Ok(Some(PriceBreakdown {
        counts,
        module_cost,
        hi_band_surcharge,
        case_cost,
        battery_cost,
        base_included_cost: catalog.base_included_cost,
        charger_cost,
        magnetic_feet_cost,
        cost,
        labor,
        profit,
        total,
    }))
}

/// Final rounded price; 0 when no module is selected.
pub fn compute_price(bands: &[Band], selection: &Selection, catalog: &Catalog) -> Result<u64> {
    Ok(price_breakdown(bands, selection, catalog)?.map_or(0, |b| b.total))
}
