//! Fixed grid of selectable band rows derived from the catalog range.

use crate::catalog::FrequencyRange;
use crate::error::{CalcError, Result};
use crate::format::band_label;

/// One selectable row of the band grid. Built once per catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// `"<start>-<end>"`, stable key for selections.
    pub id: String,
    pub start_mhz: u32,
    pub end_mhz: u32,
    pub title: String,
}

impl Band {
    fn new(start_mhz: u32, end_mhz: u32) -> Self {
        Self {
            id: format!("{start_mhz}-{end_mhz}"),
            start_mhz,
            end_mhz,
            title: band_label(start_mhz, end_mhz),
        }
    }

    pub fn width_mhz(&self) -> u32 {
        self.end_mhz - self.start_mhz
    }
}

/// Slice `[min_mhz, max_mhz)` into contiguous rows of `step_mhz`.
///
/// The last row is narrower when the span is not a multiple of the step.
pub fn partition(min_mhz: u32, max_mhz: u32, step_mhz: u32) -> Result<Vec<Band>> {
    if step_mhz == 0 {
        return Err(CalcError::Config("band step must be > 0".into()));
    }
    if min_mhz >= max_mhz {
        return Err(CalcError::Config(format!(
            "band range is empty: {min_mhz}..{max_mhz} MHz"
        )));
    }

    let rows = u64::from(max_mhz - min_mhz).div_ceil(u64::from(step_mhz));
    if rows > jammer_config::MAX_BANDS {
        return Err(CalcError::Config(format!(
            "band range yields {rows} rows, at most {} allowed",
            jammer_config::MAX_BANDS
        )));
    }
    let mut bands = Vec::with_capacity(rows as usize);
    let mut start = min_mhz;
    loop {
        let end = start.saturating_add(step_mhz).min(max_mhz);
        bands.push(Band::new(start, end));
        if end >= max_mhz {
            break;
        }
        start = end;
    }
    Ok(bands)
}

/// Band rows for a catalog range.
pub fn partition_range(range: &FrequencyRange) -> Result<Vec<Band>> {
    partition(range.min_mhz, range.max_mhz, range.step_mhz)
}

/// Resolve a band by id (`"400-500"`) or by its start frequency (`"400"`).
pub fn find_band(bands: &[Band], query: &str) -> Option<usize> {
    let query = query.trim();
    if let Some(idx) = bands.iter().position(|b| b.id == query) {
        return Some(idx);
    }
    let start: u32 = query.parse().ok()?;
    bands.iter().position(|b| b.start_mhz == start)
}
