use serde::Serialize;

use super::listing::SupplierListing;
use super::money::Money;
use super::order::LineItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub listing_id: u32,
    pub supplier_name: String,
    pub product: String,
    pub unit_price: Money,
    pub unit: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(self.product.clone(), self.quantity, self.unit.clone(), self.unit_price)
    }
}

/// Sum of `unit_price × quantity` over the given lines.
pub fn compute_total(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// The vendor's basket. Item ids are local to this cart and never reused.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the listing's headline product as a new line.
    pub fn add(&mut self, listing: &SupplierListing) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(CartItem {
            id,
            listing_id: listing.id,
            supplier_name: listing.name.clone(),
            product: listing.product.clone(),
            unit_price: listing.price,
            unit: listing.unit.clone(),
            quantity: 1,
        });
        id
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Sets a line's quantity; zero removes the line. Returns false for an unknown id.
    pub fn update_quantity(&mut self, id: u64, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        compute_total(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Distinct supplier names in the order they were first added.
    pub fn suppliers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in &self.items {
            if !names.contains(&item.supplier_name.as_str()) {
                names.push(&item.supplier_name);
            }
        }
        names
    }
}
