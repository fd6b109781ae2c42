//! Equipment resolution against a borrowed inventory snapshot.

use fleet_sim_inventory::Equipment;

/// Return a copy of the first record whose model number equals `model_number`.
///
/// `None` is a normal outcome: the snapshot may be stale or empty. The
/// returned record is cloned so no borrow of the inventory outlives the call.
pub fn resolve_equipment(model_number: &str, inventory: &[Equipment]) -> Option<Equipment> {
    inventory
        .iter()
        .find(|e| e.model_number == model_number)
        .cloned()
}
