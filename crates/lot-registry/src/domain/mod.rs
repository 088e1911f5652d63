//! # Domain Layer
//!
//! Pure domain logic for the asset registry. Nothing here touches a store.
//!
//! ## Modules
//!
//! - `entities` - `Lot` and `LotProduct` records
//! - `value_objects` - Registry configuration
//! - `errors` - Domain and adapter error types

pub mod entities;
pub mod errors;
pub mod value_objects;
