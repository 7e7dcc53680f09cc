//! The supplier's product catalogue as an actor-managed collection.

pub mod entity;
pub mod error;

pub use error::*;
