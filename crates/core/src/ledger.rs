//! Append-only, newest-first history of completed simulation runs.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use fleet_sim_inventory::Equipment;
use serde::Serialize;

use crate::compile::Action;

/// One successful simulation.
///
/// Runs can only be built by the session, and only with at least one action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    /// Sequence number within the session, starting at 1.
    pub id: u64,
    /// When the run was recorded.
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the selected equipment, if it was in the inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,
    /// The command text as entered.
    pub command: String,
    /// Compiled actions in source order.
    pub actions: Vec<Action>,
}

impl SimulationRun {
    /// Returns `None` for an empty action list.
    pub(crate) fn new(
        id: u64,
        timestamp: DateTime<Utc>,
        equipment: Option<Equipment>,
        command: String,
        actions: Vec<Action>,
    ) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        Some(Self {
            id,
            timestamp,
            equipment,
            command,
            actions,
        })
    }

    /// Header line for display, e.g. `Forklift: Forklift A (M-1234)`.
    pub fn equipment_label(&self) -> String {
        match &self.equipment {
            Some(e) => format!("Forklift: {e}"),
            None => "Forklift: (unknown)".to_string(),
        }
    }
}

/// Session history of simulation runs, newest first.
///
/// Entries are never mutated or removed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    runs: VecDeque<SimulationRun>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, run: SimulationRun) {
        self.runs.push_front(run);
    }

    /// Id the next appended run will carry.
    pub(crate) fn next_id(&self) -> u64 {
        self.runs.len() as u64 + 1
    }

    /// Number of recorded runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no run has been recorded.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The most recent run.
    pub fn latest(&self) -> Option<&SimulationRun> {
        self.runs.front()
    }

    /// Run at `index`, where 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&SimulationRun> {
        self.runs.get(index)
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SimulationRun> + ExactSizeIterator {
        self.runs.iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a SimulationRun;
    type IntoIter = std::collections::vec_deque::Iter<'a, SimulationRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
