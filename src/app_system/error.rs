use thiserror::Error;

use super::checkout::CheckoutError;
use super::config::ConfigError;
use crate::domain::{MoneyError, UnknownStatus};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Top-level failure for startup and the demo run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Filter(#[from] UnknownStatus),
    #[error("Bad fixture price: {0}")]
    Fixture(#[from] MoneyError),
    #[error("Actor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
