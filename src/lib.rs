//! DeskPilot library
//!
//! Exposes the CLI wiring and the synthetic demo runtime for integration
//! testing.

pub mod cli;
pub mod runtime;

pub use runtime::{DemoOracle, HubObserver, LoggingActuator};
