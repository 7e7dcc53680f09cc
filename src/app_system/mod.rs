//! System orchestration: configuration, startup, fixtures, checkout, and shutdown.

pub mod checkout;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod market_system;
pub mod telemetry;

pub use checkout::*;
pub use config::*;
pub use error::*;
pub use market_system::*;
pub use telemetry::*;
