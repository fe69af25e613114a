//! E2E tests for the cgtau commands

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cgtau(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cgtau"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn cgtau_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cgtau"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

/// Test the calc table for an individual with prior losses
#[test]
fn calc_individual_with_prior_losses() {
    let output = cgtau(&["calc", "-e", "individual", "-p", "$1,000", "-l", "5000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Individual / Trust, 50% discount"));
    assert!(stdout.contains("Gross capital gain / (loss)"));
    assert!(stdout.contains("$4,000.00"));
    assert!(stdout.contains("$2,000.00"));
}

/// Test calc JSON output for an SMSF
#[test]
fn calc_smsf_json() {
    let output = cgtau(&["calc", "--entity", "smsf", "--long-term-gains", "3000", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["entity"], "SMSF");
    assert_eq!(json["discount_rate_pct"], "33.33");
    assert_eq!(json["discount"], "999.90");
    assert_eq!(json["net_gains"], "2000.10");
    assert_eq!(json["losses_forward"], "0.00");
    assert_eq!(json["notices"].as_array().map(Vec::len), Some(0));
}

/// Test that a net loss is carried forward and negative input is ignored
#[test]
fn calc_net_loss_carried_forward() {
    let output = cgtau(&[
        "calc",
        "-e",
        "company",
        "-p",
        "5000",
        "-s",
        "-250",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["gross_gains"], "-5000.00");
    assert_eq!(json["net_gains"], "0.00");
    assert_eq!(json["losses_forward"], "5000.00");
}

/// Test that amounts too large to read are ignored rather than overflowing
#[test]
fn calc_oversized_amount_is_zero() {
    let output = cgtau(&[
        "calc",
        "-p",
        "79228162514264337593543950335",
        "-c",
        "1",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["entity"], "Individual / Trust");
    assert_eq!(json["gross_gains"], "-1.00");
    assert_eq!(json["losses_forward"], "1.00");
}

/// Test the CGT schedule note on large gains
#[test]
fn calc_large_gains_note() {
    let output = cgtau(&["calc", "-l", "25000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("CGT schedule is required"));
}

/// Test batch CSV input with CSV output
#[test]
fn batch_csv_to_csv() {
    let output = cgtau(&["batch", "-i", "tests/data/scenarios.csv", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "row,id,entity,gross_gains,discount,net_gains,losses_forward,cgt_schedule_required"
    );
    assert_eq!(lines[1], "1,offset,Individual / Trust,4000.00,2000.00,2000.00,0.00,false");
    assert_eq!(lines[2], "2,fund,SMSF,3000.00,999.90,2000.10,0.00,false");
    assert_eq!(lines[3], "3,corp,Company,10000.00,0.00,10000.00,0.00,false");
    assert_eq!(lines[4], "4,carry,Individual / Trust,-5000.00,0.00,0.00,5000.00,false");
    assert_eq!(lines[5], "5,large,Individual / Trust,16500.50,6250.25,10250.25,0.00,true");
}

/// Test batch JSON input (format from extension) with the default table
#[test]
fn batch_json_table() {
    let output = cgtau(&["batch", "-i", "tests/data/scenarios.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("offset"));
    assert!(stdout.contains("$2,000.00"));
    assert!(stdout.contains("SMSF"));
    assert!(stdout.contains("-$5,000.00"));
}

/// Test batch input from stdin
#[test]
fn batch_stdin_json() {
    let input = r#"{ "scenarios": [ { "entity": "company", "long_term_gains": 100 } ] }"#;
    let output = cgtau_with_stdin(&["batch", "-i", "-", "-f", "json", "--json"], input);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json[0]["net_gains"], "100.00");
    assert_eq!(json[0]["entity"], "Company");
}

/// Test that an unknown entity fails with the offending row
#[test]
fn batch_unknown_entity_fails() {
    let output = cgtau(&["batch", "-i", "tests/data/unknown_entity.csv"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("row 2"));
    assert!(stderr.contains("partnership"));
}

/// Test the interactive form recomputes on every line
#[test]
fn form_recomputes_each_change() {
    let input = "\
long_term_gains 3000
entity smsf
bogus 1
entity company
reset
";
    let output = cgtau_with_stdin(&["form"], input);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Long term capital gains: $3,000.00"));
    assert!(stdout.contains("$1,500.00"));
    assert!(stdout.contains("$999.90"));
    assert!(stdout.contains("Entity: Company"));
    assert!(stdout.contains("(no outputs)"));
    assert!(stderr.contains("unrecognised form command: bogus 1"));
}

/// Test the schema outputs
#[test]
fn schema_formats() {
    let output = cgtau(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "id,entity,prior_losses,current_year_losses,short_term_gains,long_term_gains"
    );

    let output = cgtau(&["schema", "csv-fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("entity"));
    assert!(stdout.contains("required"));
    assert!(stdout.contains("Unapplied capital losses from prior years"));

    let output = cgtau(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"scenarios\""));
}
