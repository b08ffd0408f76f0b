//! Command implementations for the taxui CLI

pub mod inspect;
pub mod simulate;
pub mod years;

pub use inspect::{run_inspect, InspectArgs};
pub use simulate::{run_simulate, SimulateArgs};
pub use years::{run_years, YearsArgs};
