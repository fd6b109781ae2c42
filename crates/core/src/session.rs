//! Session state and simulation orchestration.

use chrono::{DateTime, Utc};
use fleet_sim_inventory::Equipment;
use serde::Serialize;

use crate::equipment::resolve_equipment;
use crate::error::SimulationError;
use crate::grammar::diag::{Diagnostic, codes};
use crate::interpret::interpret;
use crate::ledger::{Ledger, SimulationRun};
use crate::notify::Notifier;

/// Message sent on the success channel after a run is recorded.
pub const SUCCESS_MESSAGE: &str = "Sent operate commands to forklift.";

/// Outcome of one [`Session::simulate`] call.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// `true` if a run was appended to the ledger.
    pub ok: bool,
    /// The aggregate failure, if rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SimulationError>,
    /// The message that was sent to the notifier.
    pub message: String,
    /// Id of the recorded run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<u64>,
    /// Everything the pipeline reported, including informational notes.
    pub diagnostics: Vec<Diagnostic>,
}

impl SimulationReport {
    fn rejected(error: SimulationError, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            ok: false,
            error: Some(error),
            message: error.user_message(),
            run_id: None,
            diagnostics,
        }
    }
}

/// Selection, command text, and run history for one operator.
///
/// Only [`simulate`](Self::simulate) appends to the ledger.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: String,
    command: String,
    ledger: Ledger,
}

impl Session {
    /// Start with no selection, empty command text, and an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select equipment by model number. Any string is accepted.
    pub fn select_equipment(&mut self, model_number: impl Into<String>) {
        self.selected = model_number.into();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// The selected model number, or `None` when nothing is selected.
    pub fn selected_model(&self) -> Option<&str> {
        (!self.selected.is_empty()).then_some(self.selected.as_str())
    }

    /// Replace the command text. Not validated until simulation.
    pub fn set_command_text(&mut self, text: impl Into<String>) {
        self.command = text.into();
    }

    /// Current command text.
    pub fn command_text(&self) -> &str {
        &self.command
    }

    /// Recorded runs, newest first.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run the current command against the selected equipment.
    pub fn simulate(
        &mut self,
        inventory: &[Equipment],
        notifier: &mut dyn Notifier,
    ) -> SimulationReport {
        self.simulate_at(inventory, notifier, Utc::now())
    }

    /// Like [`simulate`](Self::simulate) with an explicit run timestamp.
    pub fn simulate_at(
        &mut self,
        inventory: &[Equipment],
        notifier: &mut dyn Notifier,
        timestamp: DateTime<Utc>,
    ) -> SimulationReport {
        let report = self.run(inventory, timestamp);
        if report.ok {
            notifier.notify_success(&report.message);
        } else {
            notifier.notify_error(&report.message);
        }
        report
    }

    fn run(&mut self, inventory: &[Equipment], timestamp: DateTime<Utc>) -> SimulationReport {
        let Some(model) = self.selected_model() else {
            let err = SimulationError::SelectionMissing;
            let diag = Diagnostic::error(err.code(), err.to_string(), None);
            return SimulationReport::rejected(err, vec![diag]);
        };

        let interpretation = interpret(&self.command);
        let mut diagnostics = interpretation.diagnostics;
        let actions = match interpretation.error {
            Some(err) => return SimulationReport::rejected(err, diagnostics),
            None => interpretation.actions,
        };

        let equipment = resolve_equipment(model, inventory);
        if equipment.is_none() {
            diagnostics.push(Diagnostic::info(
                codes::EQUIPMENT_NOT_FOUND,
                format!("model {model} is not in the inventory snapshot"),
                None,
            ));
        }

        let id = self.ledger.next_id();
        let Some(run) = SimulationRun::new(id, timestamp, equipment, self.command.clone(), actions)
        else {
            return SimulationReport::rejected(SimulationError::Format, diagnostics);
        };
        self.ledger.append(run);

        SimulationReport {
            ok: true,
            error: None,
            message: SUCCESS_MESSAGE.to_string(),
            run_id: Some(id),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationKind, RecordingNotifier};

    fn fleet() -> Vec<Equipment> {
        vec![Equipment::new("Forklift A", "M-1234", "2023-01-15")]
    }

    #[test]
    fn starts_empty() {
        let s = Session::new();
        assert_eq!(s.selected_model(), None);
        assert_eq!(s.command_text(), "");
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn success_appends_and_notifies_once() {
        let mut s = Session::new();
        let mut n = RecordingNotifier::new();
        s.select_equipment("M-1234");
        s.set_command_text("F10");
        let r = s.simulate(&fleet(), &mut n);
        assert!(r.ok);
        assert_eq!(r.run_id, Some(1));
        assert_eq!(n.notifications.len(), 1);
        assert_eq!(n.notifications[0].kind, NotificationKind::Success);
        assert_eq!(n.notifications[0].message, SUCCESS_MESSAGE);
        let run = s.ledger().latest().unwrap();
        assert_eq!(run.equipment.as_ref().unwrap().name, "Forklift A");
        assert_eq!(run.command, "F10");
    }

    #[test]
    fn missing_selection_short_circuits() {
        let mut s = Session::new();
        let mut n = RecordingNotifier::new();
        s.set_command_text("not even a command");
        let r = s.simulate(&fleet(), &mut n);
        assert_eq!(r.error, Some(SimulationError::SelectionMissing));
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].id, codes::SELECTION_MISSING);
        assert_eq!(n.last().unwrap().message, "Please select a forklift before simulating.");
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn cleared_selection_is_missing() {
        let mut s = Session::new();
        s.select_equipment("M-1234");
        s.clear_selection();
        s.set_command_text("F10");
        let r = s.simulate(&fleet(), &mut RecordingNotifier::new());
        assert_eq!(r.error, Some(SimulationError::SelectionMissing));
    }

    #[test]
    fn unknown_equipment_still_records() {
        let mut s = Session::new();
        s.select_equipment("M-0000");
        s.set_command_text("B5");
        let r = s.simulate(&fleet(), &mut RecordingNotifier::new());
        assert!(r.ok);
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].id, codes::EQUIPMENT_NOT_FOUND);
        assert!(!r.diagnostics[0].is_error());
        assert!(s.ledger().latest().unwrap().equipment.is_none());
    }

    #[test]
    fn explicit_timestamp_is_recorded() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut s = Session::new();
        s.select_equipment("M-1234");
        s.set_command_text("L90");
        s.simulate_at(&fleet(), &mut RecordingNotifier::new(), ts);
        assert_eq!(s.ledger().latest().unwrap().timestamp, ts);
    }
}
