//! Battery runtime estimate from summed module current draw.

use std::fmt;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::format::hours_to_hm;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeEstimate {
    /// Runtime at the lowest draw (longest).
    pub best_hours: f64,
    /// Runtime at the highest draw (shortest).
    pub worst_hours: f64,
    pub current_min_a: f64,
    pub current_max_a: f64,
    pub voltage: f64,
}

/// Estimate runtime for the selected modules and battery.
///
/// `None` when nothing is selected or the battery has no capacity.
pub fn estimate_runtime(
    selection: &Selection,
    catalog: &Catalog,
) -> Result<Option<RuntimeEstimate>> {
    if selection.module_count() == 0 {
        return Ok(None);
    }
    let battery = catalog.require_battery(selection.battery())?;
    if !battery.has_capacity() {
        return Ok(None);
    }

    let (mut current_min_a, mut current_max_a) = (0.0f64, 0.0f64);
    for (_, tier) in selection.selected() {
        if let Some(spec) = catalog.module(tier) {
            current_min_a += spec.current_min_a;
            current_max_a += spec.current_max_a;
        }
    }
    let voltage = catalog.nominal_voltage;
    Ok(Some(RuntimeEstimate {
        best_hours: battery.energy_wh / (voltage * current_min_a),
        worst_hours: battery.energy_wh / (voltage * current_max_a),
        current_min_a,
        current_max_a,
        voltage,
    }))
}

/// What to tell the user about runtime for the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeHint {
    NoModules,
    NoBattery,
    Estimate(RuntimeEstimate),
}

impl RuntimeHint {
    pub fn estimate(&self) -> Option<&RuntimeEstimate> {
        match self {
            RuntimeHint::Estimate(e) => Some(e),
            _ => None,
        }
    }
}

pub fn runtime_hint(selection: &Selection, catalog: &Catalog) -> Result<RuntimeHint> {
    Ok(match estimate_runtime(selection, catalog)? {
        Some(e) => RuntimeHint::Estimate(e),
        None if selection.module_count() == 0 => RuntimeHint::NoModules,
        None => RuntimeHint::NoBattery,
    })
}

impl RuntimeEstimate {
    /// `worst – best` range, shortest first.
    pub fn range_text(&self) -> String {
        format!(
            "{} – {}",
            hours_to_hm(self.worst_hours),
            hours_to_hm(self.best_hours)
        )
    }
}

impl fmt::Display for RuntimeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeHint::NoModules => f.write_str(
                "Спочатку обери хоча б 1 модуль — потім підберемо акум і порахуємо час роботи.",
            ),
            RuntimeHint::NoBattery => {
                f.write_str("Орієнтовний час роботи зʼявиться після вибору акума.")
            }
            RuntimeHint::Estimate(e) => write!(
                f,
                "Орієнтовний час роботи ({}В): {} (струм ~{}–{} А)",
                e.voltage,
                e.range_text(),
                e.current_min_a.round(),
                e.current_max_a.round()
            ),
        }
    }
}
