//! Per-session selection state and the rules that guard its mutation.
//!
//! Every band row carries an explicit [`Tier`]; `Tier::None` means the row was
//! left empty or deselected. The module ceiling is enforced when a module is
//! added, never by trimming afterwards.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::error::{CalcError, Result};
use crate::status::TierChange;

/// Maximum number of modules that fit one device.
pub const MAX_MODULES: usize = 10;
/// Upper bound for the magnetic feet quantity field.
pub const MAX_MAGNETIC_FEET: u16 = 999;

/// Power tier chosen for a band row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    #[default]
    None,
    W50,
    W100,
}

impl Tier {
    /// Tiers that correspond to an actual module.
    pub const MODULES: [Tier; 2] = [Tier::W50, Tier::W100];

    pub fn is_module(self) -> bool {
        self != Tier::None
    }

    /// Catalog key for the tier.
    pub fn key(self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::W50 => "50W",
            Tier::W100 => "100W",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tier {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "-" => Ok(Tier::None),
            "50w" | "50" => Ok(Tier::W50),
            "100w" | "100" => Ok(Tier::W100),
            _ => Err(CalcError::unknown("power tier", s.trim())),
        }
    }
}

/// Charger accessories; each is an independent on/off flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charger {
    /// 220 V mains charger.
    Mains,
    /// 12/24 V vehicle charger.
    Vehicle,
}

/// Module totals by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleCounts {
    pub w50: usize,
    pub w100: usize,
}

impl ModuleCounts {
    pub fn total(&self) -> usize {
        self.w50 + self.w100
    }

    pub fn of(&self, tier: Tier) -> usize {
        match tier {
            Tier::None => 0,
            Tier::W50 => self.w50,
            Tier::W100 => self.w100,
        }
    }
}

/// Clamp a free-text quantity: non-finite input counts as 0, fractions are
/// truncated, the result is kept within `[0, MAX_MAGNETIC_FEET]`.
pub fn clamp_quantity(raw: f64) -> u16 {
    if !raw.is_finite() {
        return 0;
    }
    raw.trunc().clamp(0.0, f64::from(MAX_MAGNETIC_FEET)) as u16
}

/// Choices for one configuration, aligned index-for-index with the band grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    tiers: Vec<Tier>,
    case: String,
    battery: String,
    charger_mains: bool,
    charger_vehicle: bool,
    magnetic_feet: u16,
}

impl Selection {
    /// Fresh selection: every band empty, catalog default case and battery,
    /// no accessories.
    pub fn new(band_count: usize, catalog: &Catalog) -> Self {
        Self {
            tiers: vec![Tier::None; band_count],
            case: catalog.default_case.clone(),
            battery: catalog.default_battery.clone(),
            charger_mains: false,
            charger_vehicle: false,
            magnetic_feet: 0,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tier of a band; out-of-range indices read as `Tier::None`.
    pub fn tier(&self, index: usize) -> Tier {
        self.tiers.get(index).copied().unwrap_or_default()
    }

    /// Indices and tiers of the bands that carry a module, in band order.
    pub fn selected(&self) -> impl Iterator<Item = (usize, Tier)> + '_ {
        self.tiers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_module())
            .map(|(i, t)| (i, *t))
    }

    pub fn module_count(&self) -> usize {
        self.selected().count()
    }

    pub fn counts(&self) -> ModuleCounts {
        let mut counts = ModuleCounts::default();
        for (_, tier) in self.selected() {
            match tier {
                Tier::W50 => counts.w50 += 1,
                Tier::W100 => counts.w100 += 1,
                Tier::None => {}
            }
        }
        counts
    }

    /// Whether one more module may be added.
    pub fn can_add_module(&self) -> bool {
        self.module_count() < MAX_MODULES
    }

    /// A selection built for another grid cannot be priced or drawn.
    pub(crate) fn ensure_aligned(&self, band_count: usize) -> Result<()> {
        if self.tiers.len() == band_count {
            return Ok(());
        }
        Err(CalcError::unknown(
            "selection",
            format!("{} rows for {band_count} bands", self.tiers.len()),
        ))
    }

    /// Set the tier of one band row, enforcing the module ceiling.
    ///
    /// Removals and tier swaps are always accepted. An addition while
    /// [`MAX_MODULES`] bands are already occupied fails with
    /// `CalcError::CapacityExceeded` and leaves the selection untouched.
    pub fn set_tier(&mut self, index: usize, tier: Tier) -> Result<TierChange> {
        let Some(current) = self.tiers.get(index).copied() else {
            return Err(CalcError::unknown("band", index.to_string()));
        };
        if current == tier {
            return Ok(TierChange::Unchanged);
        }

        let change = match (current.is_module(), tier.is_module()) {
            (_, false) => TierChange::Removed,
            (true, true) => TierChange::Replaced,
            (false, true) => {
                // Live count, taken right before the write.
                if !self.can_add_module() {
                    return Err(CalcError::CapacityExceeded { max: MAX_MODULES });
                }
                TierChange::Added
            }
        };
        self.tiers[index] = tier;
        Ok(change)
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    pub fn set_case(&mut self, catalog: &Catalog, key: &str) -> Result<()> {
        catalog.require_case(key)?;
        self.case = key.to_string();
        Ok(())
    }

    pub fn battery(&self) -> &str {
        &self.battery
    }

    pub fn set_battery(&mut self, catalog: &Catalog, key: &str) -> Result<()> {
        catalog.require_battery(key)?;
        self.battery = key.to_string();
        Ok(())
    }

    pub fn charger(&self, which: Charger) -> bool {
        match which {
            Charger::Mains => self.charger_mains,
            Charger::Vehicle => self.charger_vehicle,
        }
    }

    pub fn set_charger(&mut self, which: Charger, on: bool) {
        match which {
            Charger::Mains => self.charger_mains = on,
            Charger::Vehicle => self.charger_vehicle = on,
        }
    }

    pub fn magnetic_feet(&self) -> u16 {
        self.magnetic_feet
    }

    /// Store a clamped quantity and return what was stored.
    pub fn set_magnetic_feet(&mut self, raw: f64) -> u16 {
        self.magnetic_feet = clamp_quantity(raw);
        self.magnetic_feet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fresh(bands: usize) -> (Catalog, Selection) {
        let cat = Catalog::builtin().unwrap();
        let sel = Selection::new(bands, &cat);
        (cat, sel)
    }

    #[test]
    fn defaults_come_from_catalog() {
        let (_, sel) = fresh(56);
        assert_eq!(sel.tiers().len(), 56);
        assert!(sel.tiers().iter().all(|t| *t == Tier::None));
        assert_eq!(sel.case(), "auto");
        assert_eq!(sel.battery(), "none");
        assert!(!sel.charger(Charger::Mains));
        assert!(!sel.charger(Charger::Vehicle));
        assert_eq!(sel.magnetic_feet(), 0);
    }

    #[test]
    fn change_kinds() {
        let (_, mut sel) = fresh(4);
        assert_eq!(sel.set_tier(0, Tier::None).unwrap(), TierChange::Unchanged);
        assert_eq!(sel.set_tier(0, Tier::W50).unwrap(), TierChange::Added);
        assert_eq!(sel.set_tier(0, Tier::W50).unwrap(), TierChange::Unchanged);
        assert_eq!(sel.set_tier(0, Tier::W100).unwrap(), TierChange::Replaced);
        assert_eq!(sel.set_tier(0, Tier::None).unwrap(), TierChange::Removed);
    }

    #[test]
    fn eleventh_addition_is_rejected_without_side_effects() {
        let (_, mut sel) = fresh(20);
        for i in 0..MAX_MODULES {
            sel.set_tier(i, Tier::W50).unwrap();
        }
        assert!(!sel.can_add_module());
        let before = sel.clone();

        let err = sel.set_tier(15, Tier::W100).unwrap_err();
        assert_eq!(err, CalcError::CapacityExceeded { max: MAX_MODULES });
        assert_eq!(sel, before);

        // Swaps and removals still go through at the ceiling.
        assert_eq!(sel.set_tier(3, Tier::W100).unwrap(), TierChange::Replaced);
        assert_eq!(sel.set_tier(4, Tier::None).unwrap(), TierChange::Removed);
        assert_eq!(sel.set_tier(15, Tier::W100).unwrap(), TierChange::Added);
        assert_eq!(sel.module_count(), MAX_MODULES);
    }

    #[test]
    fn out_of_range_band_is_a_validation_error() {
        let (_, mut sel) = fresh(3);
        assert!(matches!(
            sel.set_tier(3, Tier::W50),
            Err(CalcError::Validation { kind: "band", .. })
        ));
        assert_eq!(sel.tier(99), Tier::None);
    }

    #[test]
    fn counts_by_tier() {
        let (_, mut sel) = fresh(6);
        sel.set_tier(0, Tier::W50).unwrap();
        sel.set_tier(2, Tier::W100).unwrap();
        sel.set_tier(5, Tier::W100).unwrap();
        let counts = sel.counts();
        assert_eq!(counts, ModuleCounts { w50: 1, w100: 2 });
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.of(Tier::W100), 2);
        let picked: Vec<_> = sel.selected().map(|(i, _)| i).collect();
        assert_eq!(picked, [0, 2, 5]);
    }

    #[test]
    fn case_and_battery_keys_are_checked() {
        let (cat, mut sel) = fresh(1);
        sel.set_case(&cat, "portable").unwrap();
        sel.set_battery(&cat, "4.5kW").unwrap();
        assert_eq!(sel.case(), "portable");
        assert_eq!(sel.battery(), "4.5kW");

        assert!(sel.set_case(&cat, "none").is_err());
        assert!(sel.set_battery(&cat, "9kW").is_err());
        assert_eq!(sel.case(), "portable");
        assert_eq!(sel.battery(), "4.5kW");
    }

    #[test]
    fn chargers_are_independent() {
        let (_, mut sel) = fresh(1);
        sel.set_charger(Charger::Vehicle, true);
        assert!(sel.charger(Charger::Vehicle));
        assert!(!sel.charger(Charger::Mains));
    }

    #[rstest]
    #[case(-5.0, 0)]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, 0)]
    #[case(f64::NEG_INFINITY, 0)]
    #[case(0.0, 0)]
    #[case(4.9, 4)]
    #[case(999.0, 999)]
    #[case(1500.0, 999)]
    fn quantity_is_clamped(#[case] raw: f64, #[case] expected: u16) {
        let (_, mut sel) = fresh(1);
        assert_eq!(sel.set_magnetic_feet(raw), expected);
        assert_eq!(sel.magnetic_feet(), expected);
    }

    #[rstest]
    #[case("none", Tier::None)]
    #[case("50W", Tier::W50)]
    #[case("50w", Tier::W50)]
    #[case("100", Tier::W100)]
    #[case(" 100W ", Tier::W100)]
    fn tier_parsing(#[case] text: &str, #[case] expected: Tier) {
        assert_eq!(text.parse::<Tier>().unwrap(), expected);
    }

    #[test]
    fn tier_parsing_rejects_unknown() {
        assert!("200W".parse::<Tier>().is_err());
        assert_eq!(Tier::W100.to_string(), "100W");
    }
}
