pub use fleet_sim_diagnostics::*;
