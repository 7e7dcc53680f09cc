use serde::Serialize;

use super::money::Money;

/// A supplier as shown on the vendor's marketplace search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierListing {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub rating: f32,
    pub delivery_time: String,
    pub specialties: Vec<String>,
    pub product: String,
    pub price: Money,
    pub unit: String,
    pub verified: bool,
    pub distance: String,
}

impl SupplierListing {
    fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.product.to_lowercase().contains(query)
            || self.specialties.iter().any(|s| s.to_lowercase().contains(query))
    }

    fn matches_category(&self, category: &str) -> bool {
        category == "all" || self.specialties.iter().any(|s| s.to_lowercase().contains(category))
    }
}

/// Vendor-side supplier search. `query` matches name, product or any
/// specialty; `category` is `"all"` or a specialty fragment. Both ignore case.
pub fn search_listings<'a>(listings: &'a [SupplierListing], query: &str, category: &str) -> Vec<&'a SupplierListing> {
    let query = query.trim().to_lowercase();
    let category = category.trim().to_lowercase();
    listings
        .iter()
        .filter(|listing| listing.matches_query(&query) && listing.matches_category(&category))
        .collect()
}
