//! Frequency coverage derived from the band selection.
//!
//! A module covers `bandwidth_mhz` starting at its band's start, so a wide
//! module on a narrow grid spills into the next rows. Segments are neither
//! merged nor trimmed against each other; overlap is an expected outcome.

use crate::band::Band;
use crate::catalog::{Catalog, FrequencyRange};
use crate::error::Result;
use crate::selection::{Selection, Tier};

/// Narrowest drawn width on the coverage bar, in percent of the range.
pub const MIN_BAR_WIDTH_PCT: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub band_id: String,
    pub tier: Tier,
    pub start_mhz: u32,
    pub end_mhz: u32,
}

impl Segment {
    pub fn width_mhz(&self) -> u32 {
        self.end_mhz - self.start_mhz
    }
}

/// One segment per selected band, ordered by start frequency.
///
/// Fails with `CalcError::Validation` when the selection was made for a grid
/// of a different size.
pub fn resolve_coverage(
    bands: &[Band],
    selection: &Selection,
    catalog: &Catalog,
) -> Result<Vec<Segment>> {
    selection.ensure_aligned(bands.len())?;
    let mut segments: Vec<Segment> = bands
        .iter()
        .zip(selection.tiers())
        .filter_map(|(band, &tier)| {
            let spec = catalog.module(tier)?;
            let end = band
                .start_mhz
                .saturating_add(spec.bandwidth_mhz)
                .min(catalog.range.max_mhz);
            Some(Segment {
                band_id: band.id.clone(),
                tier,
                start_mhz: band.start_mhz,
                end_mhz: end,
            })
        })
        .collect();
    segments.sort_by_key(|s| s.start_mhz);
    Ok(segments)
}

/// Position of `mhz` on the range as a percentage, clamped to `[0, 100]`.
pub fn pct(range: &FrequencyRange, mhz: u32) -> f64 {
    let span = f64::from(range.span_mhz());
    if span <= 0.0 {
        return 0.0;
    }
    let p = (f64::from(mhz) - f64::from(range.min_mhz)) / span * 100.0;
    p.clamp(0.0, 100.0)
}

/// Left offset and drawn width (both percent) of a segment on the bar.
pub fn bar_extent(range: &FrequencyRange, segment: &Segment) -> (f64, f64) {
    let left = pct(range, segment.start_mhz);
    let right = pct(range, segment.end_mhz);
    (left, (right - left).max(MIN_BAR_WIDTH_PCT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::partition_range;

    fn setup() -> (Catalog, Vec<Band>, Selection) {
        let cat = Catalog::builtin().unwrap();
        let bands = partition_range(&cat.range).unwrap();
        let sel = Selection::new(bands.len(), &cat);
        (cat, bands, sel)
    }

    #[test]
    fn empty_selection_has_no_coverage() {
        let (cat, bands, sel) = setup();
        assert!(resolve_coverage(&bands, &sel, &cat).unwrap().is_empty());
    }

    #[test]
    fn wide_modules_overlap_next_rows() {
        let (cat, bands, mut sel) = setup();
        sel.set_tier(1, Tier::W50).unwrap(); // 500-600
        sel.set_tier(0, Tier::W100).unwrap(); // 400-500

        let segs = resolve_coverage(&bands, &sel, &cat).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].start_mhz, segs[0].end_mhz), (400, 570));
        assert_eq!(segs[0].tier, Tier::W100);
        assert_eq!(segs[0].band_id, "400-500");
        assert_eq!((segs[1].start_mhz, segs[1].end_mhz), (500, 600));
    }

    #[test]
    fn segments_are_clamped_to_range_end() {
        let (cat, bands, mut sel) = setup();
        let last = bands.len() - 1; // 5900-6000
        sel.set_tier(last, Tier::W100).unwrap();
        let segs = resolve_coverage(&bands, &sel, &cat).unwrap();
        assert_eq!(segs[0].end_mhz, 6000);
        assert_eq!(segs[0].width_mhz(), 100);
    }

    #[test]
    fn selection_for_another_grid_is_rejected() {
        let (cat, bands, _) = setup();
        let mut short = Selection::new(10, &cat);
        short.set_tier(0, Tier::W50).unwrap();
        let err = resolve_coverage(&bands, &short, &cat).unwrap_err();
        assert_eq!(
            err,
            crate::CalcError::Validation {
                kind: "selection",
                key: "10 rows for 56 bands".into()
            }
        );
    }

    #[test]
    fn pct_maps_and_clamps() {
        let range = FrequencyRange {
            min_mhz: 400,
            max_mhz: 6000,
            step_mhz: 100,
        };
        assert_eq!(pct(&range, 400), 0.0);
        assert_eq!(pct(&range, 6000), 100.0);
        assert_eq!(pct(&range, 3200), 50.0);
        assert_eq!(pct(&range, 100), 0.0);
        assert_eq!(pct(&range, 9000), 100.0);
    }

    #[test]
    fn bar_extent_has_minimum_width() {
        let range = FrequencyRange {
            min_mhz: 0,
            max_mhz: 100_000,
            step_mhz: 100,
        };
        let seg = Segment {
            band_id: "0-100".into(),
            tier: Tier::W50,
            start_mhz: 0,
            end_mhz: 100,
        };
        let (left, width) = bar_extent(&range, &seg);
        assert_eq!(left, 0.0);
        assert_eq!(width, MIN_BAR_WIDTH_PCT);
    }
}
