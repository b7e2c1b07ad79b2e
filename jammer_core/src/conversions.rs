//! `From`/`TryFrom` implementations bridging `jammer_config` types to `jammer_core` types.

use crate::catalog::{
    Accessories, Accessory, BatteryOption, CaseOption, Catalog, FrequencyRange, HiBandRule,
    LaborTiers, ModuleSpec,
};
use crate::error::CalcError;

// ── FrequencyRange ───────────────────────────────────────────────────────────

impl From<&jammer_config::RangeCfg> for FrequencyRange {
    fn from(c: &jammer_config::RangeCfg) -> Self {
        Self {
            min_mhz: c.min_mhz,
            max_mhz: c.max_mhz,
            step_mhz: c.step_mhz,
        }
    }
}

// ── ModuleSpec ───────────────────────────────────────────────────────────────

impl From<&jammer_config::ModuleCfg> for ModuleSpec {
    fn from(c: &jammer_config::ModuleCfg) -> Self {
        Self {
            label: c.label.clone(),
            bandwidth_mhz: c.bandwidth_mhz,
            price: c.price,
            current_min_a: c.current_min_a,
            current_max_a: c.current_max_a,
        }
    }
}

// ── Batteries / cases / accessories ──────────────────────────────────────────

impl From<&jammer_config::BatteryCfg> for BatteryOption {
    fn from(c: &jammer_config::BatteryCfg) -> Self {
        Self {
            key: c.key.clone(),
            label: c.label.clone(),
            price: c.price,
            energy_wh: c.energy_wh,
        }
    }
}

impl From<&jammer_config::CaseCfg> for CaseOption {
    fn from(c: &jammer_config::CaseCfg) -> Self {
        Self {
            key: c.key.clone(),
            label: c.label.clone(),
            price: c.price,
        }
    }
}

impl From<&jammer_config::OptionCfg> for Accessory {
    fn from(c: &jammer_config::OptionCfg) -> Self {
        Self {
            label: c.label.clone(),
            price: c.price,
        }
    }
}

impl From<&jammer_config::OptionsCfg> for Accessories {
    fn from(c: &jammer_config::OptionsCfg) -> Self {
        Self {
            charger_220: (&c.charger_220).into(),
            charger_12_24: (&c.charger_12_24).into(),
            magnetic_feet: (&c.magnetic_feet).into(),
        }
    }
}

// ── Labor / pricing rules ────────────────────────────────────────────────────

impl From<&jammer_config::WorkCfg> for LaborTiers {
    fn from(c: &jammer_config::WorkCfg) -> Self {
        Self {
            up_to_7: c.up_to_7,
            over_7: c.over_7,
        }
    }
}

impl From<&jammer_config::PricingCfg> for HiBandRule {
    fn from(c: &jammer_config::PricingCfg) -> Self {
        Self {
            start_mhz: c.hi_band_start_mhz,
            surcharge: c.hi_band_surcharge,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Validates before mapping; a catalog that fails validation never reaches the engine.
impl TryFrom<&jammer_config::CatalogFile> for Catalog {
    type Error = CalcError;

    fn try_from(c: &jammer_config::CatalogFile) -> Result<Self, Self::Error> {
        c.validate().map_err(|e| CalcError::Config(e.to_string()))?;
        Ok(Self {
            range: (&c.range).into(),
            w50: (&c.modules.w50).into(),
            w100: (&c.modules.w100).into(),
            batteries: c.batteries.iter().map(BatteryOption::from).collect(),
            cases: c.cases.iter().map(CaseOption::from).collect(),
            accessories: (&c.options).into(),
            labor: (&c.work).into(),
            profit_coef: c.pricing.profit_coef,
            base_included_cost: c.pricing.base_included_cost,
            nominal_voltage: c.pricing.nominal_voltage,
            hi_band: (&c.pricing).into(),
            default_case: c.defaults.case.clone(),
            default_battery: c.defaults.battery.clone(),
        })
    }
}

impl TryFrom<jammer_config::CatalogFile> for Catalog {
    type Error = CalcError;

    fn try_from(c: jammer_config::CatalogFile) -> Result<Self, Self::Error> {
        Self::try_from(&c)
    }
}
