use serde::Serialize;

use super::money::Money;

/// A product in a supplier's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub unit: String,
    pub stock: u32,
    pub category: String,
    pub sold: u32,
    pub rating: f32,
}

/// Payload for adding a product; produced by a validated `NewProductForm`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: Money,
    pub unit: String,
    pub stock: u32,
    pub category: String,
}

impl Product {
    /// Share of all units ever held that have been sold, in percent.
    pub fn sell_through(&self) -> f32 {
        let held = self.stock + self.sold;
        if held == 0 {
            0.0
        } else {
            self.sold as f32 / held as f32 * 100.0
        }
    }
}
