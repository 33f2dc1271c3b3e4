//! Key performance indicators derived from metric results

pub mod vsp;

pub use vsp::vehicle_specific_power;
