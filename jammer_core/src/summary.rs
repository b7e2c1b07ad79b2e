//! Order text for copying and sharing.
//!
//! The output only depends on the arguments, so the same configuration always
//! renders byte-identical text.

use crate::band::Band;
use crate::catalog::Catalog;
use crate::coverage::Segment;
use crate::error::Result;
use crate::format::{fmt_uah, mhz_span};
use crate::runtime::RuntimeHint;
use crate::selection::{Charger, Selection, Tier};

const HEADER: &str = "Заявка (конструктор РЕБ):";
const KIT_LINE: &str = "• Комплект: пульт керування + кабель до акумулятора (за замовчуванням)";
const NOTHING_CHOSEN: &str = "не обрано";

fn runtime_line(runtime: &RuntimeHint) -> String {
    match runtime {
        RuntimeHint::Estimate(e) => {
            format!("• Орієнтовний час роботи ({}В): {}", e.voltage, e.range_text())
        }
        RuntimeHint::NoModules => "• Орієнтовний час роботи: — (модулі не обрано)".to_string(),
        RuntimeHint::NoBattery => "• Орієнтовний час роботи: — (акумулятор не обрано)".to_string(),
    }
}

/// Render the order summary.
///
/// `coverage`, `price` and `runtime` are the values already derived for this
/// selection; they are printed as given.
pub fn format_summary(
    catalog: &Catalog,
    bands: &[Band],
    selection: &Selection,
    coverage: &[Segment],
    price: u64,
    runtime: &RuntimeHint,
) -> Result<String> {
    let case = catalog.require_case(selection.case())?;
    let battery = catalog.require_battery(selection.battery())?;
    let counts = selection.counts();

    let mut lines: Vec<String> = Vec::with_capacity(16 + coverage.len());
    lines.push(HEADER.to_string());
    lines.push(format!(
        "• Модулі: всього {} ({}: {} • {}: {})",
        counts.total(),
        catalog.w50.label,
        counts.of(Tier::W50),
        catalog.w100.label,
        counts.of(Tier::W100)
    ));

    for tier in Tier::MODULES {
        let Some(spec) = catalog.module(tier) else {
            continue;
        };
        let listed = if counts.of(tier) == 0 {
            NOTHING_CHOSEN.to_string()
        } else {
            let titles: Vec<&str> = selection
                .selected()
                .filter(|(_, t)| *t == tier)
                .filter_map(|(idx, _)| bands.get(idx).map(|b| b.title.as_str()))
                .collect();
            titles.join(", ")
        };
        lines.push(format!(
            "• Діапазони {} (≈{} МГц): {}",
            spec.label, spec.bandwidth_mhz, listed
        ));
    }

    if !coverage.is_empty() {
        lines.push("• Покриття (за вибором):".to_string());
        for seg in coverage {
            let label = catalog
                .module(seg.tier)
                .map_or("—", |spec| spec.label.as_str());
            lines.push(format!("  - {label}: {}", mhz_span(seg.start_mhz, seg.end_mhz)));
        }
    }

    lines.push(format!("• Корпус/монтаж: {}", case.label));
    lines.push(format!("• Акумулятор: {}", battery.label));
    lines.push(runtime_line(runtime));
    lines.push(KIT_LINE.to_string());

    let acc = &catalog.accessories;
    let mut options = Vec::new();
    if selection.charger(Charger::Mains) {
        options.push(format!("• {}", acc.charger_220.label));
    }
    if selection.charger(Charger::Vehicle) {
        options.push(format!("• {}", acc.charger_12_24.label));
    }
    if selection.magnetic_feet() > 0 {
        options.push(format!("• Магнітні ніжки: {} шт", selection.magnetic_feet()));
    }
    if options.is_empty() {
        lines.push("• Опції: немає".to_string());
    } else {
        lines.push(format!("• Опції: \n{}", options.join("\n")));
    }

    lines.push(format!("• Орієнтовна вартість: {}", fmt_uah(price)));
    Ok(lines.join("\n"))
}
