//! Shared test helpers for `fleet_sim_core` integration tests.

#![allow(unreachable_pub)]

use fleet_sim_core::{Diagnostic, Equipment, RecordingNotifier, Session, SimulationReport};

/// The two-forklift inventory used across scenarios.
pub fn fleet() -> Vec<Equipment> {
    vec![
        Equipment::new("Forklift A", "M-1234", "2023-01-15"),
        Equipment::new("Forklift B", "M-5678", "2022-05-20"),
    ]
}

/// A session with `model` selected.
#[allow(dead_code)]
pub fn session_for(model: &str) -> Session {
    let mut s = Session::new();
    s.select_equipment(model);
    s
}

/// Set `command` and simulate against [`fleet`].
#[allow(dead_code)]
pub fn run(
    session: &mut Session,
    notifier: &mut RecordingNotifier,
    command: &str,
) -> SimulationReport {
    session.set_command_text(command);
    session.simulate(&fleet(), notifier)
}

/// Collect diagnostic codes in order.
#[allow(dead_code)]
pub fn extract_codes(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.id.to_string()).collect()
}
