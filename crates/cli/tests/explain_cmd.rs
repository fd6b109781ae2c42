//! CLI tests for `fleetsim explain`, driven by the diagnostic code table.

use std::process::{Command, Output};

use assert_cmd::cargo;
use fleet_sim_diagnostics::{codes, explain};

fn explain_output(id: &str, format: &str) -> Output {
    Command::new(cargo::cargo_bin!("fleetsim"))
        .args(["explain", id, "--output", format])
        .output()
        .expect("run explain command")
}

#[test]
fn every_code_round_trips_through_json() {
    for &code in codes::ALL {
        let output = explain_output(code, "json");
        assert!(output.status.success(), "{code}");
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid json");
        assert_eq!(json["id"], code);
        assert_eq!(
            json["explanation"].as_str(),
            explain(code),
            "{code} explanation differs from the table"
        );
    }
}

#[test]
fn every_code_prints_its_explanation() {
    for &code in codes::ALL {
        let output = explain_output(code, "pretty");
        assert!(output.status.success(), "{code}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = explain(code).expect("every listed code is explained");
        assert!(stdout.contains(code), "{code}: {stdout}");
        assert!(stdout.contains(text), "{code}: {stdout}");
    }
}

#[test]
fn turn_codes_explain_their_rule() {
    let json: serde_json::Value =
        serde_json::from_slice(&explain_output(codes::TURN_REJECTED, "json").stdout)
            .expect("valid json");
    let text = json["explanation"].as_str().expect("explanation string");
    assert!(text.contains("90"), "{text}");
}

#[test]
fn unknown_code_has_null_explanation() {
    let output = explain_output("FSM9999", "json");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["id"], "FSM9999");
    assert!(json["explanation"].is_null());

    let pretty = explain_output("FSM9999", "pretty");
    let stdout = String::from_utf8_lossy(&pretty.stdout);
    assert!(stdout.contains("no explanation available"), "{stdout}");
}
