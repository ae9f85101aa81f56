//! End-to-end tests for the `cleanup` and `check` commands against a
//! realistic token file.
//!
//! These tests validate:
//! 1. Missing dark tokens are generated and the file is rewritten in place.
//! 2. New palette entries are registered and reach WCAG AA on the background.
//! 3. `--output`, `--dry-run`, and `--report` route results correctly.
//! 4. `check` fails before cleanup and passes after.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::{TempDir, tempdir};
use tokenshade::TokenError;
use tokenshade::check::CheckArgs;
use tokenshade::cleanup::CleanupArgs;
use tokenshade::cli::{Cli, Commands, run};
use tokenshade_style::{AdjustMethod, Rgb, WcagLevel};

const FIXTURE: &str = include_str!("fixtures/tokens.json");
const BACKGROUND: Rgb = Rgb::new(0x16, 0x1b, 0x22);

fn workspace() -> (TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tokens.json");
    fs::write(&path, FIXTURE).expect("write fixture");
    (temp, path)
}

fn cleanup(filename: &Path) -> CleanupArgs {
    CleanupArgs {
        filename: filename.to_path_buf(),
        output: None,
        dry_run: false,
        level: WcagLevel::NormalAa,
        method: AdjustMethod::Lightness,
        background: "Background.Secondary".to_string(),
        include_functional: false,
        report: None,
    }
}

fn check(filename: &Path, include_functional: bool) -> CheckArgs {
    CheckArgs {
        filename: filename.to_path_buf(),
        include_functional,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json")
}

fn system_dark(doc: &Value) -> &Value {
    &doc["System-Dark"]["Olympus"]["Color"]["System"]["Dark"]
}

fn globals(doc: &Value) -> &Value {
    &doc["_Global"]["Olympus"]["Color"]["Global"]
}

#[test]
fn cleanup_fills_every_missing_system_token() {
    let (_temp, path) = workspace();
    run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect("cleanup");

    let doc = read_json(&path);
    let dark = system_dark(&doc);

    assert_eq!(dark["Success"]["value"], "{Olympus.Color.Global.Green4}");
    assert_eq!(
        dark["Success"]["description"],
        "A generated dark mode color for Success."
    );
    assert_eq!(
        dark["DangerSubtle"]["value"],
        "rgba( {Olympus.Color.Global.Red2} , 0.15)"
    );
    assert_eq!(dark["OnAccent"]["value"], "{Olympus.Color.Global.White}");
    assert_eq!(dark["Muted"]["description"], "Muted text");
    assert!(dark.get("Radius").is_none());

    for name in ["Green4", "Red2"] {
        let entry = &globals(&doc)[name];
        assert_eq!(entry["type"], "color");
        let rgb = Rgb::from_hex(entry["value"].as_str().expect("hex")).expect("parse");
        assert!(
            WcagLevel::NormalAa.meets(rgb, BACKGROUND),
            "{name} = {rgb} does not reach AA"
        );
    }
    assert_eq!(
        globals(&doc)["Red2"]["description"],
        "A generated dark mode Red color."
    );
}

#[test]
fn cleanup_preserves_key_order_and_two_space_indent() {
    let (_temp, path) = workspace();
    run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect("cleanup");

    let written = fs::read_to_string(&path).expect("read");
    assert!(written.starts_with("{\n  \"_Global\": {\n    \"Olympus\""));
    let keys: Vec<String> = read_json(&path)
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, ["_Global", "System-Light", "System-Dark", "Light", "Dark"]);

    // Existing dark entries stay first; generated ones follow in light order.
    let doc = read_json(&path);
    let dark_keys: Vec<&String> = system_dark(&doc).as_object().expect("dark").keys().collect();
    assert_eq!(dark_keys, ["Muted", "Success", "DangerSubtle", "OnAccent"]);
}

#[test]
fn second_run_is_a_no_op() {
    let (_temp, path) = workspace();
    run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect("first run");
    let first = fs::read_to_string(&path).expect("read");

    run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect("second run");
    assert_eq!(fs::read_to_string(&path).expect("read"), first);
}

#[test]
fn dry_run_leaves_file_untouched_but_writes_report() {
    let (temp, path) = workspace();
    let report = temp.path().join("reports/cleanup.json");
    let mut args = cleanup(&path);
    args.dry_run = true;
    args.report = Some(report.clone());

    run(Cli {
        command: Commands::Cleanup(args),
    })
    .expect("dry run");

    assert_eq!(fs::read_to_string(&path).expect("read"), FIXTURE);

    let report = read_json(&report);
    assert_eq!(report["background"], "#161B22");
    assert_eq!(report["stats"]["generated"], 3);
    assert_eq!(report["stats"]["present"], 1);
    assert_eq!(report["stats"]["skipped"], 1);
    assert_eq!(report["stats"]["new_globals"], 2);
}

#[test]
fn output_flag_writes_elsewhere() {
    let (temp, path) = workspace();
    let output = temp.path().join("out/tokens.dark.json");
    let mut args = cleanup(&path);
    args.output = Some(output.clone());

    run(Cli {
        command: Commands::Cleanup(args),
    })
    .expect("cleanup");

    assert_eq!(fs::read_to_string(&path).expect("read"), FIXTURE);
    let doc = read_json(&output);
    assert!(system_dark(&doc).get("Success").is_some());
}

#[test]
fn functional_tokens_are_filled_when_requested() {
    let (_temp, path) = workspace();
    let mut args = cleanup(&path);
    args.include_functional = true;

    run(Cli {
        command: Commands::Cleanup(args),
    })
    .expect("cleanup");

    let doc = read_json(&path);
    let link = &doc["Dark"]["Olympus"]["Dark"]["Text"]["Link"];
    let rgb = Rgb::from_hex(link["value"].as_str().expect("literal")).expect("hex");
    assert!(WcagLevel::NormalAa.meets(rgb, BACKGROUND));
    assert_eq!(link["description"], "A generated dark mode color for Text.Link.");
}

#[test]
fn check_fails_until_cleanup_runs() {
    let (_temp, path) = workspace();

    let error = run(Cli {
        command: Commands::Check(check(&path, false)),
    })
    .expect_err("incomplete");
    assert!(matches!(error, TokenError::Incomplete { count: 3 }));

    run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect("cleanup");

    run(Cli {
        command: Commands::Check(check(&path, false)),
    })
    .expect("complete after cleanup");

    let error = run(Cli {
        command: Commands::Check(check(&path, true)),
    })
    .expect_err("functional still incomplete");
    assert!(matches!(error, TokenError::Incomplete { count: 1 }));
}

#[test]
fn stricter_level_produces_lighter_color() {
    let (_temp, aa_path) = workspace();
    run(Cli {
        command: Commands::Cleanup(cleanup(&aa_path)),
    })
    .expect("aa");

    let (_temp2, aaa_path) = workspace();
    let mut args = cleanup(&aaa_path);
    args.level = WcagLevel::NormalAaa;
    run(Cli {
        command: Commands::Cleanup(args),
    })
    .expect("aaa");

    let aa = Rgb::from_hex(globals(&read_json(&aa_path))["Green4"]["value"].as_str().expect("aa"))
        .expect("hex");
    let aaa = Rgb::from_hex(globals(&read_json(&aaa_path))["Green4"]["value"].as_str().expect("aaa"))
        .expect("hex");
    assert!(WcagLevel::NormalAaa.meets(aaa, BACKGROUND));
    assert!(aaa.to_hsl().l > aa.to_hsl().l);
}

#[test]
fn malformed_json_is_reported() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write");
    let error = run(Cli {
        command: Commands::Cleanup(cleanup(&path)),
    })
    .expect_err("bad json");
    assert!(matches!(error, TokenError::Json(_)));
}
