use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn jammer() -> Command {
    let mut cmd = Command::cargo_bin("jammer").unwrap();
    cmd.env_remove("RUST_LOG");
    for var in ["JAMMER_TG_USERNAME", "JAMMER_SIGNAL_PHONE", "JAMMER_WA_PHONE"] {
        cmd.env_remove(var);
    }
    cmd
}

// Shipped catalog with one value broken by `patch`.
fn write_catalog(dir: &tempfile::TempDir, patch: Option<(&str, &str)>) -> PathBuf {
    let mut text = jammer_config::BUILTIN_CATALOG.to_string();
    if let Some((from, to)) = patch {
        text = text.replacen(from, to, 1);
    }
    let path = dir.path().join("catalog.toml");
    fs::write(&path, text).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["bands"], 0, "400-500     400 МГц – 500 МГц", "stdout")]
#[case(&["catalog"], 0, "LiFePO4 3 кВт: 25 000 грн", "stdout")]
#[case(&["quote", "--band", "400-500=50w", "--battery", "3kW"], 0, "Вартість: 73 550 грн", "stdout")]
#[case(&["quote"], 0, "Вартість: 0 грн", "stdout")]
#[case(&["summary", "--band", "400=50w", "--battery", "3kW"], 0, "• Орієнтовна вартість: 73 550 грн", "stdout")]
#[case(&["quote", "--battery", "9kW"], 4, "Unknown battery '9kW'", "stderr")]
#[case(&["quote", "--band", "7000-7100=50w"], 4, "Unknown band", "stderr")]
#[case(&["quote", "--band", "400-500=75w"], 2, "power tier", "stderr")]
#[case(&["order", "--channel", "telegram", "--to", "@shop"], 6, "Nothing to order", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let assert = jammer().args(args).assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn ceiling_overflow_is_a_notice_not_a_failure() {
    let mut cmd = jammer();
    cmd.arg("quote");
    for start in (400..=1500).step_by(100) {
        cmd.arg("--band").arg(format!("{start}=50w"));
    }
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("notice: module limit reached").count(2))
        .stdout(predicate::str::contains("модулі (10)"));
}

#[test]
fn custom_catalog_is_used() {
    let dir = tempdir().unwrap();
    let cat = write_catalog(&dir, Some(("price = 25000", "price = 26000")));
    jammer()
        .arg("--catalog")
        .arg(&cat)
        .args(["quote", "--band", "400-500=50w", "--battery", "3kW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Вартість: 74 600 грн"));
}

#[rstest]
#[case(Some(("step_mhz = 100", "step_mhz = 0")), "range.step_mhz must be > 0")]
#[case(Some(("[work]", "[labour]")), "parse catalog")]
fn broken_catalog_exits_with_config_code(
    #[case] patch: Option<(&str, &str)>,
    #[case] needle: &str,
) {
    let dir = tempdir().unwrap();
    let cat = write_catalog(&dir, patch);
    jammer()
        .arg("--catalog")
        .arg(&cat)
        .arg("bands")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(needle));
}

#[test]
fn missing_catalog_file_is_config_error() {
    let dir = tempdir().unwrap();
    jammer()
        .arg("--catalog")
        .arg(dir.path().join("nope.toml"))
        .arg("catalog")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("open catalog"));
}

#[test]
fn order_copies_summary_and_prints_link() {
    let dir = tempdir().unwrap();
    let copy = dir.path().join("order.txt");
    let assert = jammer()
        .args(["order", "--channel", "whatsapp", "--to", "+380 50 123 45 67"])
        .arg("--copy-to")
        .arg(&copy)
        .args(["--band", "400-500=50w", "--battery", "3kW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whatsapp: https://wa.me/380501234567?text="))
        .stderr(predicate::str::contains("Текст скопійовано"));
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let copied = fs::read_to_string(&copy).unwrap();
    assert!(copied.starts_with("Заявка (конструктор РЕБ):"));
    assert!(copied.ends_with("• Орієнтовна вартість: 73 550 грн"));
    assert!(out.starts_with(&copied));
}

#[test]
fn order_without_destination_still_succeeds() {
    jammer()
        .args(["order", "--channel", "telegram", "--band", "2400=100w"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Не задано telegram. Додай JAMMER_TG_USERNAME або --to.",
        ))
        .stdout(predicate::str::contains("Заявка"));

    jammer()
        .args(["order", "--channel", "signal", "--band", "2400=100w"])
        .assert()
        .success()
        .stderr(predicate::str::contains("JAMMER_SIGNAL_PHONE"));
}

#[test]
fn recipient_comes_from_environment() {
    jammer()
        .env("JAMMER_TG_USERNAME", "@jammer_shop")
        .args(["order", "--channel", "telegram", "--band", "400=50w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("telegram: https://t.me/jammer_shop?text="))
        .stderr(predicate::str::contains("Не задано").not());

    jammer()
        .env("JAMMER_SIGNAL_PHONE", "+380 50 123 45 67")
        .args(["order", "--channel", "signal", "--band", "400=50w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signal: https://signal.me/#p/%2B380501234567"));
}

#[test]
fn to_overrides_configured_recipient() {
    jammer()
        .env("JAMMER_TG_USERNAME", "@jammer_shop")
        .args(["order", "--channel", "telegram", "--to", "@other_shop"])
        .args(["--band", "400=50w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://t.me/other_shop?text="));
}

#[test]
fn whatsapp_falls_back_to_placeholder_number() {
    jammer()
        .args(["order", "--channel", "whatsapp", "--band", "400=50w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whatsapp: https://wa.me/380000000000?text="));
}

#[test]
fn order_link_escapes_spaces_as_percent_twenty() {
    let assert = jammer()
        .args(["order", "--channel", "whatsapp", "--to", "380501234567"])
        .args(["--band", "400=50w"])
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let link = out.lines().last().unwrap();
    assert!(link.contains("%20"), "{link}");
    assert!(!link.contains('+'), "{link}");
}

#[test]
fn log_file_receives_json_lines() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("jammer.log");
    jammer()
        .arg("--log-level")
        .arg("info")
        .arg("--log-file")
        .arg(&log)
        .arg("bands")
        .assert()
        .success();
    let text = fs::read_to_string(&log).unwrap_or_default();
    // The non-blocking writer may drop the tail at exit; whatever landed is JSON.
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(v.get("level").is_some());
    }
}
