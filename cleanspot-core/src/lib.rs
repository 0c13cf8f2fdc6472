//! # cleanspot-core
//!
//! Business logic of the verification-and-reward pipeline: repository
//! traits, gateway traits for external collaborators and the use cases
//! operating on top of them. Persistence and transport live in sibling
//! crates.

pub mod gateways;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use cleanspot_entities::{
        event::*, id::*, marker::*, photo::*, pin::*, point::*, reward::*, time::*, user::*,
        verdict::*,
    };
}
