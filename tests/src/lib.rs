//! # Lot Registry Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Wire envelope → registry → ledger
//!     └── registry_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lot-tests
//!
//! # By category
//! cargo test -p lot-tests integration::
//! ```

pub mod integration;
