//! # Integration Tests
//!
//! End-to-end flows through `RegistryHandler` against real ledger adapters.

pub mod registry_flows;
