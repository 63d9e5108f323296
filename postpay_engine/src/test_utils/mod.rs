//! Helpers for testing code that drives the reconciliation engine. Enable the `test_utils` feature to use them
//! from dependent crates.
mod fake_gateway;

pub use fake_gateway::FakeGateway;
