//! # Ports Layer
//!
//! Defines the port traits for the asset registry.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the hosting platform)
//! - `outbound.rs` - Driven ports (store and codec the registry depends on)

pub mod inbound;
pub mod outbound;
