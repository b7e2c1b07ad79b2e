#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Price-table schema for the jammer configurator.
//!
//! - `CatalogFile` and sub-structs are deserialized from TOML and validated.
//! - The shipped price table lives in `etc/catalog.toml` and is embedded as
//!   [`BUILTIN_CATALOG`] so the tools work without any file on disk.
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// The shipped price table, embedded at build time.
pub const BUILTIN_CATALOG: &str = include_str!("../../etc/catalog.toml");

/// Upper bound on band rows a range may produce.
pub const MAX_BANDS: u64 = 10_000;

/// Upper bound on any single amount in the table, in hryvnias.
pub const MAX_PRICE: u64 = 1_000_000_000;

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RangeCfg {
    pub min_mhz: u32,
    pub max_mhz: u32,
    /// Width of one selectable band row in the UI grid.
    pub step_mhz: u32,
}

/// One jammer module power tier.
///
/// Example:
/// [modules.50W]
/// label = "50 Вт"
/// bandwidth_mhz = 100
/// price = 10000
/// current_min_a = 4.0
/// current_max_a = 5.0
#[derive(Debug, Deserialize, Clone)]
pub struct ModuleCfg {
    pub label: String,
    pub bandwidth_mhz: u32,
    pub price: u64,
    /// Lowest current draw in amperes. Also accepts alias "Imin".
    #[serde(alias = "Imin")]
    pub current_min_a: f64,
    /// Highest current draw in amperes. Also accepts alias "Imax".
    #[serde(alias = "Imax")]
    pub current_max_a: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModulesCfg {
    #[serde(rename = "50W")]
    pub w50: ModuleCfg,
    #[serde(rename = "100W")]
    pub w100: ModuleCfg,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatteryCfg {
    pub key: String,
    pub label: String,
    pub price: u64,
    /// Usable energy; 0 marks the "no battery / bring your own" entry.
    pub energy_wh: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseCfg {
    pub key: String,
    pub label: String,
    pub price: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OptionCfg {
    pub label: String,
    pub price: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OptionsCfg {
    pub charger_220: OptionCfg,
    pub charger_12_24: OptionCfg,
    /// Priced per unit.
    pub magnetic_feet: OptionCfg,
}

/// Labor cost, chosen by module count.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WorkCfg {
    pub up_to_7: u64,
    pub over_7: u64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PricingCfg {
    /// Fraction of the cost subtotal added as profit.
    pub profit_coef: f64,
    /// Flat amount added to every build (remote control, battery cable).
    pub base_included_cost: u64,
    /// Only used for runtime estimates.
    pub nominal_voltage: f64,
    /// Bands starting at or above this frequency carry a per-module surcharge.
    #[serde(default = "default_hi_band_start_mhz")]
    pub hi_band_start_mhz: u32,
    #[serde(default = "default_hi_band_surcharge")]
    pub hi_band_surcharge: u64,
}

fn default_hi_band_start_mhz() -> u32 {
    2000
}

fn default_hi_band_surcharge() -> u64 {
    4000
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DefaultsCfg {
    pub case: String,
    pub battery: String,
}

impl Default for DefaultsCfg {
    fn default() -> Self {
        Self {
            case: "auto".to_string(),
            battery: "none".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogFile {
    pub range: RangeCfg,
    pub modules: ModulesCfg,
    pub work: WorkCfg,
    pub pricing: PricingCfg,
    pub batteries: Vec<BatteryCfg>,
    pub cases: Vec<CaseCfg>,
    pub options: OptionsCfg,
    /// Initial case and battery for a fresh configuration
    #[serde(default)]
    pub defaults: DefaultsCfg,
}

pub fn load_toml(s: &str) -> Result<CatalogFile, toml::de::Error> {
    toml::from_str::<CatalogFile>(s)
}

/// Parse the embedded price table. It is covered by tests, so a failure here
/// means the build itself is broken.
pub fn builtin() -> eyre::Result<CatalogFile> {
    load_toml(BUILTIN_CATALOG).map_err(|e| eyre::eyre!("built-in catalog: {e}"))
}

/// Read, parse and validate a catalog file.
pub fn load_catalog_file(path: &Path) -> eyre::Result<CatalogFile> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("open catalog {:?}: {}", path, e))?;
    let cat = load_toml(&text).map_err(|e| eyre::eyre!("parse catalog {:?}: {}", path, e))?;
    cat.validate()?;
    Ok(cat)
}

fn check_price(path: &str, price: u64) -> eyre::Result<()> {
    if price > MAX_PRICE {
        eyre::bail!("{path} must be <= {MAX_PRICE}");
    }
    Ok(())
}

fn check_module(name: &str, m: &ModuleCfg) -> eyre::Result<()> {
    check_price(&format!("modules.{name}.price"), m.price)?;
    if m.bandwidth_mhz == 0 {
        eyre::bail!("modules.{name}.bandwidth_mhz must be > 0");
    }
    if !(m.current_min_a.is_finite() && m.current_min_a > 0.0) {
        eyre::bail!("modules.{name}.current_min_a must be > 0");
    }
    if !m.current_max_a.is_finite() || m.current_max_a < m.current_min_a {
        eyre::bail!("modules.{name}.current_max_a must be >= current_min_a");
    }
    if m.label.trim().is_empty() {
        eyre::bail!("modules.{name}.label must not be empty");
    }
    Ok(())
}

fn check_unique<'a>(section: &str, keys: impl Iterator<Item = &'a str>) -> eyre::Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.is_empty() {
            eyre::bail!("{section}: key must not be empty");
        }
        if !seen.insert(key) {
            eyre::bail!("{section}: duplicate key '{key}'");
        }
    }
    Ok(())
}

impl CatalogFile {
    pub fn validate(&self) -> eyre::Result<()> {
        // Range
        if self.range.step_mhz == 0 {
            eyre::bail!("range.step_mhz must be > 0");
        }
        if self.range.min_mhz >= self.range.max_mhz {
            eyre::bail!("range.min_mhz must be < range.max_mhz");
        }
        let rows = u64::from(self.range.max_mhz - self.range.min_mhz)
            .div_ceil(u64::from(self.range.step_mhz));
        if rows > MAX_BANDS {
            eyre::bail!("range yields {rows} bands, at most {MAX_BANDS} allowed");
        }

        // Modules
        check_module("50W", &self.modules.w50)?;
        check_module("100W", &self.modules.w100)?;

        // Pricing
        if !(self.pricing.profit_coef.is_finite() && self.pricing.profit_coef >= 0.0) {
            eyre::bail!("pricing.profit_coef must be >= 0");
        }
        if !(self.pricing.nominal_voltage.is_finite() && self.pricing.nominal_voltage > 0.0) {
            eyre::bail!("pricing.nominal_voltage must be > 0");
        }
        check_price("pricing.base_included_cost", self.pricing.base_included_cost)?;
        check_price("pricing.hi_band_surcharge", self.pricing.hi_band_surcharge)?;
        check_price("work.up_to_7", self.work.up_to_7)?;
        check_price("work.over_7", self.work.over_7)?;
        check_price("options.charger_220.price", self.options.charger_220.price)?;
        check_price("options.charger_12_24.price", self.options.charger_12_24.price)?;
        check_price("options.magnetic_feet.price", self.options.magnetic_feet.price)?;

        // Batteries
        if self.batteries.is_empty() {
            eyre::bail!("batteries must list at least one entry");
        }
        check_unique("batteries", self.batteries.iter().map(|b| b.key.as_str()))?;
        for b in &self.batteries {
            if !(b.energy_wh.is_finite() && b.energy_wh >= 0.0) {
                eyre::bail!("batteries.{}.energy_wh must be >= 0", b.key);
            }
            check_price(&format!("batteries.{}.price", b.key), b.price)?;
        }
        if !self.batteries.iter().any(|b| b.energy_wh == 0.0) {
            eyre::bail!("batteries must include a zero-capacity entry (e.g. key = \"none\")");
        }

        // Cases
        if self.cases.is_empty() {
            eyre::bail!("cases must list at least one entry");
        }
        check_unique("cases", self.cases.iter().map(|c| c.key.as_str()))?;
        for c in &self.cases {
            check_price(&format!("cases.{}.price", c.key), c.price)?;
        }

        // Defaults
        if !self.cases.iter().any(|c| c.key == self.defaults.case) {
            eyre::bail!("defaults.case '{}' is not a known case", self.defaults.case);
        }
        match self
            .batteries
            .iter()
            .find(|b| b.key == self.defaults.battery)
        {
            None => eyre::bail!(
                "defaults.battery '{}' is not a known battery",
                self.defaults.battery
            ),
            Some(b) if b.energy_wh != 0.0 => {
                eyre::bail!("defaults.battery must be a zero-capacity entry")
            }
            Some(_) => {}
        }

        Ok(())
    }

    pub fn battery(&self, key: &str) -> Option<&BatteryCfg> {
        self.batteries.iter().find(|b| b.key == key)
    }

    pub fn case(&self, key: &str) -> Option<&CaseCfg> {
        self.cases.iter().find(|c| c.key == key)
    }
}
