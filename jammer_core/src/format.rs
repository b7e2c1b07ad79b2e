//! Locale-fixed (uk-UA) text helpers shared by hints and the order summary.

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Render a whole-hryvnia amount with space-grouped thousands, e.g. `73 550 грн`.
pub fn fmt_uah(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 8);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out.push_str(" грн");
    out
}

/// Frequency for people: MHz below 1 GHz, otherwise GHz with up to two
/// decimals and a decimal comma (`1,1 ГГц`, `2,45 ГГц`, `3 ГГц`).
pub fn mhz_to_human(mhz: u32) -> String {
    if mhz < 1000 {
        return format!("{mhz} МГц");
    }
    // Hundredths of a GHz, rounded half up.
    let hundredths = (u64::from(mhz) + 5) / 10;
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    if frac == 0 {
        format!("{whole} ГГц")
    } else if frac % 10 == 0 {
        format!("{whole},{} ГГц", frac / 10)
    } else {
        format!("{whole},{frac:02} ГГц")
    }
}

/// Title of a band row, e.g. `900 МГц – 1 ГГц`.
pub fn band_label(start_mhz: u32, end_mhz: u32) -> String {
    format!("{} – {}", mhz_to_human(start_mhz), mhz_to_human(end_mhz))
}

/// Raw MHz span as used in coverage lists, e.g. `400–500 МГц`.
pub fn mhz_span(start_mhz: u32, end_mhz: u32) -> String {
    format!("{start_mhz}–{end_mhz} МГц")
}

/// Render a duration in hours as `H год MM хв`.
/// - Non-finite or non-positive input renders as `—`.
/// - Positive durations never render below one minute.
pub fn hours_to_hm(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "—".to_string();
    }
    let total_min = ((hours * MINUTES_PER_HOUR as f64).round() as u64).max(1);
    format!(
        "{} год {:02} хв",
        total_min / MINUTES_PER_HOUR,
        total_min % MINUTES_PER_HOUR
    )
}
