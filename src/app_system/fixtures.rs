//! Demonstration data the marketplace starts with.
//!
//! The vendor dashboard's sample orders reuse the supplier dashboard's ids
//! (`ORD001`..`ORD003`) for different counterparties, so only the supplier
//! set is seeded; one book cannot hold both under unique ids.

use crate::domain::{
    LineItem, Money, MoneyError, Order, OrderId, OrderStatus, Product, StatusEntry, SupplierListing,
};

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    counterparty: &str,
    phone: &str,
    address: &str,
    items: Vec<LineItem>,
    amount: Money,
    placed_on: &str,
    estimated_delivery: Option<&str>,
    history: &[(OrderStatus, &str, &str)],
) -> Order {
    let status_history: Vec<StatusEntry> = history
        .iter()
        .map(|&(status, timestamp, description)| StatusEntry::new(status, timestamp, description))
        .collect();
    Order {
        id: OrderId::new(id),
        counterparty_name: counterparty.to_string(),
        counterparty_phone: Some(phone.to_string()),
        delivery_address: Some(address.to_string()),
        items,
        amount,
        status: status_history.last().map_or(OrderStatus::Pending, |entry| entry.status),
        placed_on: placed_on.to_string(),
        estimated_delivery: estimated_delivery.map(str::to_string),
        status_history,
    }
}

/// Incoming orders on the supplier dashboard.
pub fn supplier_orders() -> Vec<Order> {
    use OrderStatus::*;
    vec![
        order(
            "ORD001",
            "Raj's Chaat Corner",
            "+91 9876543210",
            "CP, Delhi",
            vec![
                LineItem::new("Tomatoes", 5, "kg", Money::rupees(150)),
                LineItem::new("Onions", 3, "kg", Money::rupees(150)),
            ],
            Money::rupees(1200),
            "2024-01-27",
            None,
            &[(Pending, "2024-01-27 08:15", "Order placed")],
        ),
        order(
            "ORD002",
            "Mumbai Street Foods",
            "+91 8765432109",
            "Dadar, Mumbai",
            vec![
                LineItem::new("Garam Masala", 500, "g", Money::paise(40)),
                LineItem::new("Red Chili", 1, "kg", Money::rupees(650)),
            ],
            Money::rupees(850),
            "2024-01-27",
            None,
            &[
                (Pending, "2024-01-27 07:40", "Order placed"),
                (Confirmed, "2024-01-27 09:05", "Order accepted by supplier"),
            ],
        ),
        order(
            "ORD003",
            "Delhi Snacks Hub",
            "+91 7654321098",
            "Karol Bagh, Delhi",
            vec![LineItem::new("Wheat Flour", 10, "kg", Money::rupees(45))],
            Money::rupees(450),
            "2024-01-26",
            None,
            &[
                (Pending, "2024-01-26 10:00", "Order placed"),
                (Confirmed, "2024-01-26 10:20", "Order accepted by supplier"),
                (Delivered, "2024-01-26 17:30", "Marked as delivered by supplier"),
            ],
        ),
    ]
}

/// Orders shown on the public tracking page.
pub fn tracking_orders() -> Vec<Order> {
    use OrderStatus::*;
    vec![
        order(
            "MM12345ABC",
            "Rajesh Kumar",
            "+91 9876543210",
            "123 Main Street, Delhi - 110001",
            vec![
                LineItem::new("Fresh Tomatoes", 5, "kg", Money::rupees(40)),
                LineItem::new("Onions", 2, "kg", Money::rupees(30)),
            ],
            Money::rupees(260),
            "2024-01-15",
            Some("2024-01-17"),
            &[
                (Confirmed, "2024-01-15 10:30", "Order confirmed by vendor"),
                (Processing, "2024-01-15 14:20", "Items being prepared"),
                (Shipped, "2024-01-16 09:15", "Out for delivery"),
            ],
        ),
        order(
            "MM67890XYZ",
            "Priya Sharma",
            "+91 8765432109",
            "456 Garden Road, Mumbai - 400001",
            vec![LineItem::new("Basmati Rice", 10, "kg", Money::rupees(120))],
            Money::rupees(1200),
            "2024-01-14",
            Some("2024-01-16"),
            &[
                (Confirmed, "2024-01-14 11:00", "Order confirmed"),
                (Processing, "2024-01-14 15:30", "Items packed"),
                (Shipped, "2024-01-15 08:00", "Dispatched from warehouse"),
                (Delivered, "2024-01-16 16:45", "Successfully delivered"),
            ],
        ),
    ]
}

fn product(id: &str, name: &str, rupees: i64, stock: u32, category: &str, sold: u32, rating: f32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::rupees(rupees),
        unit: "kg".to_string(),
        stock,
        category: category.to_string(),
        sold,
        rating,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product("1", "Fresh Tomatoes", 150, 500, "Vegetables", 120, 4.8),
        product("2", "Garam Masala", 200, 50, "Spices", 25, 4.9),
        product("3", "Wheat Flour", 45, 1000, "Grains", 300, 4.6),
    ]
}

/// Supplier cards on the vendor's search page. Prices arrive as display text.
pub fn listings() -> Result<Vec<SupplierListing>, MoneyError> {
    let raw = [
        (1, "Fresh Farm Suppliers", "Connaught Place, Delhi", 4.8, "2-4 hours",
            &["Vegetables", "Fruits", "Herbs"][..], "₹150/kg", "Fresh Tomatoes", "1.2 km"),
        (2, "Spice Master Co.", "Chandni Chowk, Delhi", 4.9, "1-2 hours",
            &["Spices", "Masalas", "Dry Fruits"][..], "₹200/kg", "Garam Masala", "0.8 km"),
    ];

    raw.into_iter()
        .map(|(id, name, location, rating, delivery_time, specialties, price, product, distance)| -> Result<SupplierListing, MoneyError> {
            Ok(SupplierListing {
                id,
                name: name.to_string(),
                location: location.to_string(),
                rating,
                delivery_time: delivery_time.to_string(),
                specialties: specialties.iter().map(|s| s.to_string()).collect(),
                product: product.to_string(),
                price: Money::from_display_lossy(price)?,
                unit: price.rsplit('/').next().unwrap_or("kg").to_string(),
                verified: true,
                distance: distance.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::Entity;

    #[test]
    fn every_fixture_order_is_self_consistent() {
        for mut order in supplier_orders().into_iter().chain(tracking_orders()) {
            assert!(order.on_create().is_ok(), "{} refused", order.id);
        }
    }

    #[test]
    fn stored_amounts_match_line_totals() {
        for order in supplier_orders().into_iter().chain(tracking_orders()) {
            let lines: Money = order.items.iter().map(LineItem::line_total).sum();
            assert_eq!(lines, order.amount, "{}", order.id);
        }
    }

    #[test]
    fn listing_prices_are_parsed_from_display_text() {
        let listings = listings().unwrap();
        assert_eq!(listings[0].price, Money::rupees(150));
        assert_eq!(listings[0].unit, "kg");
        assert_eq!(listings[1].price, Money::rupees(200));
    }
}
