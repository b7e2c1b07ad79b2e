/// Digits only, everything else dropped.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// `+` followed by the digits, or `None` when there are no digits.
pub fn e164(raw: &str) -> Option<String> {
    let d = digits(raw);
    (!d.is_empty()).then(|| format!("+{d}"))
}
