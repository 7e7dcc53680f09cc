//! The order lifecycle: transition table, entity hooks and errors.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
