//! # cleanspot-gateways
//!
//! Outward adapters for the external collaborators of the verification
//! pipeline: the vision-capable judge, the image store and the pin-code
//! source.

pub mod file_store;
pub mod judge;
pub mod pin;
