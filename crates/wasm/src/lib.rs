//! WASM bindings for fleet-sim.
//!
//! Exposes a stateful `FleetSession` plus stand-alone `interpret` and
//! `explain` functions to JavaScript via `wasm-bindgen`. Results are returned
//! as native JS objects using `serde-wasm-bindgen`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use fleet_sim_core::{Diagnostic, Notification, RecordingNotifier, Session};
use fleet_sim_inventory::{InventoryError, load_inventory_from_str};

// ── Session ─────────────────────────────────────────────────────────────

/// Result of [`FleetSession::simulate`] as seen from JavaScript.
#[derive(Debug, Serialize)]
struct SimulateOutcome {
    ok: bool,
    message: String,
    diagnostics: Vec<Diagnostic>,
    notifications: Vec<Notification>,
}

/// One operator's selection, command text, and simulation history.
#[wasm_bindgen]
#[derive(Default)]
pub struct FleetSession {
    inner: Session,
}

#[wasm_bindgen]
impl FleetSession {
    /// Create an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> FleetSession {
        FleetSession::default()
    }

    /// Select equipment by model number. An empty string clears the selection.
    #[wasm_bindgen(js_name = "selectEquipment")]
    pub fn select_equipment(&mut self, model_number: &str) {
        self.inner.select_equipment(model_number);
    }

    /// Replace the command text.
    #[wasm_bindgen(js_name = "setCommandText")]
    pub fn set_command_text(&mut self, text: &str) {
        self.inner.set_command_text(text);
    }

    /// Simulate the current command against an inventory JSON array.
    ///
    /// Returns `{ ok, message, diagnostics, notifications }`. Throws only if
    /// the inventory itself cannot be read.
    pub fn simulate(&mut self, inventory_json: &str) -> Result<JsValue, JsError> {
        let outcome = self
            .simulate_json(inventory_json)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    /// The ledger as an array of runs, newest first.
    pub fn ledger(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.ledger())
    }
}

impl FleetSession {
    fn simulate_json(&mut self, inventory_json: &str) -> Result<SimulateOutcome, InventoryError> {
        let inventory = load_inventory_from_str(inventory_json)?;
        let mut notifier = RecordingNotifier::new();
        let report = self.inner.simulate(&inventory, &mut notifier);
        Ok(SimulateOutcome {
            ok: report.ok,
            message: report.message,
            diagnostics: report.diagnostics,
            notifications: notifier.take(),
        })
    }
}

// ── Stand-alone API ─────────────────────────────────────────────────────

/// Interpret a command without a session.
///
/// Returns `{ ok, actions, error?, diagnostics }`.
#[wasm_bindgen]
pub fn interpret(command: &str) -> Result<JsValue, JsError> {
    to_js(&fleet_sim_core::interpret(command))
}

/// Explain a diagnostic code (e.g., "FSM2003").
///
/// Returns the explanation string, or `null` if unknown.
#[wasm_bindgen]
pub fn explain(id: &str) -> Option<String> {
    fleet_sim_diagnostics::explain(id).map(|s| s.to_string())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
