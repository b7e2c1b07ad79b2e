//! Session assembly from CLI flags and rendering of the pricing commands.

use std::sync::Arc;

use jammer_core::coverage::bar_extent;
use jammer_core::format::{fmt_uah, hours_to_hm, mhz_span, mhz_to_human};
use jammer_core::{CalcError, Catalog, Charger, PriceBreakdown, Quote, RuntimeHint, Session, Tier};
use serde_json::{Value, json};

use crate::cli::SelectionArgs;

/// Width of the text coverage bar, in characters.
pub const BAR_WIDTH: usize = 60;

/// Build a session from the selection flags.
///
/// A band that would exceed the module ceiling is skipped with a notice; any
/// other bad input is an error.
pub fn build_session(
    catalog: Arc<Catalog>,
    args: &SelectionArgs,
) -> eyre::Result<(Session, Vec<String>)> {
    let mut session = Session::new(catalog)?;
    let mut notices = Vec::new();

    if let Some(case) = &args.case {
        session.set_case(case)?;
    }
    if let Some(battery) = &args.battery {
        session.set_battery(battery)?;
    }
    for pick in &args.bands {
        match session.set_band_tier(&pick.band, pick.tier) {
            Ok(_) => {}
            Err(e @ CalcError::CapacityExceeded { .. }) => {
                notices.push(format!("{e}; skipped {}={}", pick.band, pick.tier));
            }
            Err(e) => return Err(e.into()),
        }
    }
    session.set_charger(Charger::Mains, args.charger_220);
    session.set_charger(Charger::Vehicle, args.charger_12_24);
    if let Some(raw) = args.magnetic_feet {
        let qty = session.set_magnetic_feet(raw);
        if f64::from(qty) != raw {
            notices.push(format!("magnetic feet quantity {raw} clamped to {qty}"));
        }
    }
    Ok((session, notices))
}

// ---------- bands / catalog ----------

pub fn bands_text(session: &Session) -> String {
    session
        .bands()
        .iter()
        .map(|b| format!("{:<11} {}", b.id, b.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn bands_json(session: &Session) -> Value {
    Value::Array(
        session
            .bands()
            .iter()
            .map(|b| {
                json!({
                    "id": b.id,
                    "start_mhz": b.start_mhz,
                    "end_mhz": b.end_mhz,
                    "title": b.title,
                })
            })
            .collect(),
    )
}

pub fn catalog_text(catalog: &Catalog) -> String {
    let r = &catalog.range;
    let mut out = vec![format!(
        "Діапазон: {} – {}, крок {} МГц",
        mhz_to_human(r.min_mhz),
        mhz_to_human(r.max_mhz),
        r.step_mhz
    )];
    out.push("Модулі:".to_string());
    for tier in Tier::MODULES {
        if let Some(m) = catalog.module(tier) {
            out.push(format!(
                "  {:<6} {} (≈{} МГц, {}–{} А): {}",
                tier.key(),
                m.label,
                m.bandwidth_mhz,
                m.current_min_a,
                m.current_max_a,
                fmt_uah(m.price)
            ));
        }
    }
    out.push("Корпуси:".to_string());
    for c in &catalog.cases {
        let mark = if c.key == catalog.default_case { " *" } else { "" };
        out.push(format!("  {:<8} {}: {}{mark}", c.key, c.label, fmt_uah(c.price)));
    }
    out.push("Акумулятори:".to_string());
    for b in &catalog.batteries {
        let mark = if b.key == catalog.default_battery { " *" } else { "" };
        out.push(format!("  {:<8} {}: {}{mark}", b.key, b.label, fmt_uah(b.price)));
    }
    let acc = &catalog.accessories;
    out.push("Опції:".to_string());
    for a in [&acc.charger_220, &acc.charger_12_24, &acc.magnetic_feet] {
        out.push(format!("  {}: {}", a.label, fmt_uah(a.price)));
    }
    out.join("\n")
}

pub fn catalog_json(catalog: &Catalog) -> Value {
    let acc = &catalog.accessories;
    json!({
        "range": {
            "min_mhz": catalog.range.min_mhz,
            "max_mhz": catalog.range.max_mhz,
            "step_mhz": catalog.range.step_mhz,
        },
        "modules": Tier::MODULES.iter().filter_map(|t| catalog.module(*t).map(|m| json!({
            "tier": t.key(),
            "label": m.label,
            "bandwidth_mhz": m.bandwidth_mhz,
            "price": m.price,
            "current_min_a": m.current_min_a,
            "current_max_a": m.current_max_a,
        }))).collect::<Vec<_>>(),
        "cases": catalog.cases.iter().map(|c| json!({
            "key": c.key, "label": c.label, "price": c.price,
        })).collect::<Vec<_>>(),
        "batteries": catalog.batteries.iter().map(|b| json!({
            "key": b.key, "label": b.label, "price": b.price, "energy_wh": b.energy_wh,
        })).collect::<Vec<_>>(),
        "options": {
            "charger_220": acc.charger_220.price,
            "charger_12_24": acc.charger_12_24.price,
            "magnetic_feet": acc.magnetic_feet.price,
        },
        "defaults": { "case": catalog.default_case, "battery": catalog.default_battery },
    })
}

// ---------- quote ----------

/// Text coverage bar: `-` empty, `=` 50 W, `#` 100 W.
pub fn coverage_bar(session: &Session, quote: &Quote) -> String {
    let range = &session.catalog().range;
    let mut cells = vec!['-'; BAR_WIDTH];
    for seg in &quote.coverage {
        let (left, width) = bar_extent(range, seg);
        let from = ((left / 100.0) * BAR_WIDTH as f64).floor() as usize;
        let to = (((left + width) / 100.0) * BAR_WIDTH as f64).ceil() as usize;
        let mark = if seg.tier == Tier::W100 { '#' } else { '=' };
        for cell in cells.iter_mut().take(to.min(BAR_WIDTH)).skip(from.min(BAR_WIDTH - 1)) {
            *cell = mark;
        }
    }
    format!(
        "{} [{}] {}",
        mhz_to_human(range.min_mhz),
        cells.into_iter().collect::<String>(),
        mhz_to_human(range.max_mhz)
    )
}

fn breakdown_lines(b: &PriceBreakdown) -> Vec<String> {
    let mut lines = vec![format!(
        "  модулі ({}): {}",
        b.counts.total(),
        fmt_uah(b.module_cost)
    )];
    if b.hi_band_surcharge > 0 {
        lines.push(format!("  надбавка за діапазон: {}", fmt_uah(b.hi_band_surcharge)));
    }
    lines.push(format!("  корпус: {}", fmt_uah(b.case_cost)));
    lines.push(format!("  акумулятор: {}", fmt_uah(b.battery_cost)));
    lines.push(format!("  комплект: {}", fmt_uah(b.base_included_cost)));
    if b.charger_cost > 0 {
        lines.push(format!("  зарядні пристрої: {}", fmt_uah(b.charger_cost)));
    }
    if b.magnetic_feet_cost > 0 {
        lines.push(format!("  магнітні ніжки: {}", fmt_uah(b.magnetic_feet_cost)));
    }
    lines.push(format!("  робота: {}", fmt_uah(b.labor)));
    lines
}

pub fn quote_text(session: &Session, quote: &Quote) -> String {
    let mut out = vec![format!("Вартість: {}", fmt_uah(quote.price))];
    if let Some(b) = &quote.breakdown {
        out.extend(breakdown_lines(b));
    }
    out.push(quote.runtime.to_string());
    out.push(coverage_bar(session, quote));
    for seg in &quote.coverage {
        let label = session
            .catalog()
            .module(seg.tier)
            .map_or("—", |m| m.label.as_str());
        out.push(format!("  {label}: {}", mhz_span(seg.start_mhz, seg.end_mhz)));
    }
    out.join("\n")
}

fn runtime_json(hint: &RuntimeHint) -> Value {
    match hint {
        RuntimeHint::NoModules => json!({ "state": "no_modules", "text": hint.to_string() }),
        RuntimeHint::NoBattery => json!({ "state": "no_battery", "text": hint.to_string() }),
        RuntimeHint::Estimate(e) => json!({
            "state": "estimate",
            "best_hours": e.best_hours,
            "worst_hours": e.worst_hours,
            "best": hours_to_hm(e.best_hours),
            "worst": hours_to_hm(e.worst_hours),
            "current_min_a": e.current_min_a,
            "current_max_a": e.current_max_a,
            "voltage": e.voltage,
            "text": hint.to_string(),
        }),
    }
}

pub fn quote_json(session: &Session, quote: &Quote, notices: &[String]) -> Value {
    let range = &session.catalog().range;
    let breakdown = quote.breakdown.as_ref().map(|b| {
        json!({
            "modules": b.counts.total(),
            "modules_50w": b.counts.w50,
            "modules_100w": b.counts.w100,
            "module_cost": b.module_cost,
            "hi_band_surcharge": b.hi_band_surcharge,
            "case_cost": b.case_cost,
            "battery_cost": b.battery_cost,
            "base_included_cost": b.base_included_cost,
            "charger_cost": b.charger_cost,
            "magnetic_feet_cost": b.magnetic_feet_cost,
            "cost": b.cost,
            "labor": b.labor,
            "profit": b.profit,
            "total": b.total,
        })
    });
    let coverage: Vec<Value> = quote
        .coverage
        .iter()
        .map(|s| {
            let (left, width) = bar_extent(range, s);
            json!({
                "band": s.band_id,
                "tier": s.tier.key(),
                "start_mhz": s.start_mhz,
                "end_mhz": s.end_mhz,
                "left_pct": left,
                "width_pct": width,
            })
        })
        .collect();
    json!({
        "price": quote.price,
        "price_text": fmt_uah(quote.price),
        "breakdown": breakdown,
        "runtime": runtime_json(&quote.runtime),
        "coverage": coverage,
        "notices": notices,
    })
}
