//! Human-readable error descriptions and structured JSON error formatting.

use jammer_core::CalcError;
use jammer_share::ShareError;
use serde_json::json;

use crate::order::NothingToOrder;

pub const EXIT_GENERIC: i32 = 1;
pub const EXIT_CONFIG: i32 = 3;
pub const EXIT_VALIDATION: i32 = 4;
pub const EXIT_CAPACITY: i32 = 5;
pub const EXIT_NOTHING_TO_ORDER: i32 = 6;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ce) = err.downcast_ref::<CalcError>() {
        return match ce {
            CalcError::Config(msg) => format!(
                "What happened: The price catalog is invalid ({msg}).\nLikely causes: A missing section or an out-of-range value in the catalog TOML.\nHow to fix: Fix the file passed via --catalog, or omit --catalog to use the built-in one."
            ),
            CalcError::Validation { kind, key } => format!(
                "What happened: Unknown {kind} '{key}'.\nLikely causes: A typo, or a key that only exists in another catalog.\nHow to fix: Run `jammer catalog` or `jammer bands` to list valid values."
            ),
            CalcError::CapacityExceeded { max } => format!(
                "What happened: Module limit reached.\nLikely causes: More than {max} bands were given a module.\nHow to fix: Deselect a band (ID=none) before adding another."
            ),
        };
    }

    if err.downcast_ref::<NothingToOrder>().is_some() {
        return "What happened: Nothing to order.\nLikely causes: No band was given a module.\nHow to fix: Add at least one --band ID=TIER.".to_string();
    }

    if let Some(se) = err.downcast_ref::<ShareError>() {
        return format!(
            "What happened: Could not prepare the order ({se}).\nHow to fix: Check --to and --copy-to."
        );
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error kind; anything unrecognized returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ce) = err.downcast_ref::<CalcError>() {
        return match ce {
            CalcError::Config(_) => EXIT_CONFIG,
            CalcError::Validation { .. } => EXIT_VALIDATION,
            CalcError::CapacityExceeded { .. } => EXIT_CAPACITY,
        };
    }
    if err.downcast_ref::<NothingToOrder>().is_some() {
        return EXIT_NOTHING_TO_ORDER;
    }
    EXIT_GENERIC
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<CalcError>() {
        Some(CalcError::Config(_)) => "Config",
        Some(CalcError::Validation { .. }) => "Validation",
        Some(CalcError::CapacityExceeded { .. }) => "CapacityExceeded",
        None if err.downcast_ref::<NothingToOrder>().is_some() => "NothingToOrder",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let msg = humanize(err);
    let obj = match err.downcast_ref::<CalcError>() {
        Some(CalcError::Validation { kind, key }) => json!({
            "reason": reason_name(err),
            "details": { "kind": kind, "key": key },
            "message": msg,
        }),
        Some(CalcError::CapacityExceeded { max }) => json!({
            "reason": reason_name(err),
            "details": { "max": max },
            "message": msg,
        }),
        _ => json!({ "reason": reason_name(err), "message": msg }),
    };
    obj.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_get_stable_codes() {
        let cfg = eyre::Report::new(CalcError::Config("range.step_mhz must be > 0".into()));
        assert_eq!(exit_code_for_error(&cfg), EXIT_CONFIG);
        assert!(humanize(&cfg).contains("range.step_mhz must be > 0"));

        let val = eyre::Report::new(CalcError::Validation {
            kind: "battery",
            key: "9kW".into(),
        });
        assert_eq!(exit_code_for_error(&val), EXIT_VALIDATION);
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&val)).unwrap();
        assert_eq!(v["reason"], "Validation");
        assert_eq!(v["details"]["key"], "9kW");

        let empty = eyre::Report::new(NothingToOrder);
        assert_eq!(exit_code_for_error(&empty), EXIT_NOTHING_TO_ORDER);

        let other = eyre::eyre!("boom");
        assert_eq!(exit_code_for_error(&other), EXIT_GENERIC);
        assert!(humanize(&other).contains("Original: boom"));
    }
}
