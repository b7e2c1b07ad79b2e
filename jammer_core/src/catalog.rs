//! Runtime price table used by every calculation.
//!
//! These are the typed structs the engine works with. They are separate from
//! the TOML-deserialized schema in `jammer_config`; see `conversions` for the
//! mapping. A `Catalog` is immutable once built and is shared behind an `Arc`.

use crate::error::{CalcError, Result};
use crate::selection::Tier;

/// Module count up to which the lower labor rate applies.
pub const LABOR_THRESHOLD: usize = 7;

/// Selectable frequency range and the width of one band row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyRange {
    pub min_mhz: u32,
    pub max_mhz: u32,
    pub step_mhz: u32,
}

impl FrequencyRange {
    pub fn span_mhz(&self) -> u32 {
        self.max_mhz.saturating_sub(self.min_mhz)
    }
}

/// Specs of one module power tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpec {
    pub label: String,
    /// Advertised coverage width; may exceed the band row width.
    pub bandwidth_mhz: u32,
    pub price: u64,
    pub current_min_a: f64,
    pub current_max_a: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryOption {
    pub key: String,
    pub label: String,
    pub price: u64,
    /// 0 for the "no battery" entry.
    pub energy_wh: f64,
}

impl BatteryOption {
    pub fn has_capacity(&self) -> bool {
        self.energy_wh > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOption {
    pub key: String,
    pub label: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessory {
    pub label: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessories {
    pub charger_220: Accessory,
    pub charger_12_24: Accessory,
    /// Priced per unit.
    pub magnetic_feet: Accessory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborTiers {
    pub up_to_7: u64,
    pub over_7: u64,
}

impl LaborTiers {
    /// Labor for a build with `modules` modules; 8 and more use the higher rate.
    pub fn for_modules(&self, modules: usize) -> u64 {
        if modules <= LABOR_THRESHOLD {
            self.up_to_7
        } else {
            self.over_7
        }
    }
}

/// Flat per-module surcharge for bands starting at or above `start_mhz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiBandRule {
    pub start_mhz: u32,
    pub surcharge: u64,
}

impl HiBandRule {
    pub fn applies_to(&self, band_start_mhz: u32) -> bool {
        band_start_mhz >= self.start_mhz
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub range: FrequencyRange,
    pub w50: ModuleSpec,
    pub w100: ModuleSpec,
    pub batteries: Vec<BatteryOption>,
    pub cases: Vec<CaseOption>,
    pub accessories: Accessories,
    pub labor: LaborTiers,
    pub profit_coef: f64,
    pub base_included_cost: u64,
    pub nominal_voltage: f64,
    pub hi_band: HiBandRule,
    pub default_case: String,
    pub default_battery: String,
}

impl Catalog {
    /// The shipped price table.
    pub fn builtin() -> Result<Self> {
        let file = jammer_config::builtin().map_err(|e| CalcError::Config(e.to_string()))?;
        Self::try_from(&file)
    }

    /// Parse and validate a TOML price table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file = jammer_config::load_toml(text).map_err(|e| CalcError::Config(e.to_string()))?;
        Self::try_from(&file)
    }

    /// Specs for a power tier; `None` for `Tier::None`.
    pub fn module(&self, tier: Tier) -> Option<&ModuleSpec> {
        match tier {
            Tier::None => None,
            Tier::W50 => Some(&self.w50),
            Tier::W100 => Some(&self.w100),
        }
    }

    pub fn battery(&self, key: &str) -> Option<&BatteryOption> {
        self.batteries.iter().find(|b| b.key == key)
    }

    pub fn case(&self, key: &str) -> Option<&CaseOption> {
        self.cases.iter().find(|c| c.key == key)
    }

    pub(crate) fn require_battery(&self, key: &str) -> Result<&BatteryOption> {
        self.battery(key).ok_or_else(|| CalcError::unknown("battery", key))
    }

    pub(crate) fn require_case(&self, key: &str) -> Result<&CaseOption> {
        self.case(key).ok_or_else(|| CalcError::unknown("case", key))
    }
}
