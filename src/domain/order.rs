use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::money::Money;

/// Order identifier. Equality and hashing ignore ASCII case, so `"mm12345abc"`
/// and `"MM12345ABC"` name the same order; the original spelling is kept for display.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for OrderId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for OrderId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_uppercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Canonical lifecycle status shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Accepted but not yet delivered.
    pub fn is_in_progress(self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Processing | OrderStatus::Shipped)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Whose vocabulary a status is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Supplier,
    Vendor,
    Tracking,
}

impl Viewer {
    pub fn label(self, status: OrderStatus) -> &'static str {
        match (self, status) {
            (_, OrderStatus::Delivered) => "delivered",
            (_, OrderStatus::Cancelled) => "cancelled",
            (Viewer::Supplier | Viewer::Vendor, OrderStatus::Pending) => "pending",
            (Viewer::Supplier, _) => "confirmed",
            (Viewer::Vendor, _) => "in-transit",
            (Viewer::Tracking, OrderStatus::Pending) => "placed",
            (Viewer::Tracking, other) => other.as_str(),
        }
    }
}

/// Status constraint for `filter`. The text form `"all"` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
    /// Every status a viewer sees under this label, e.g. the supplier's
    /// "confirmed" tab also holds processing and shipped orders.
    Label(Viewer, &'static str),
}

impl StatusFilter {
    /// Parses a filter tab as `viewer` names it. Accepts `"all"` or any label
    /// the viewer can see.
    pub fn for_viewer(viewer: Viewer, text: &str) -> Result<Self, UnknownStatus> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        OrderStatus::ALL
            .into_iter()
            .map(|status| viewer.label(status))
            .find(|label| label.eq_ignore_ascii_case(text))
            .map(|label| StatusFilter::Label(viewer, label))
            .ok_or_else(|| UnknownStatus(text.to_string()))
    }

    pub fn accepts(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
            StatusFilter::Label(viewer, label) => viewer.label(status) == label,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// `"5kg Tomatoes"`
    pub fn describe(&self) -> String {
        format!("{}{} {}", self.quantity, self.unit, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub timestamp: String,
    pub description: String,
}

impl StatusEntry {
    pub fn new(status: OrderStatus, timestamp: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status,
            timestamp: timestamp.into(),
            description: description.into(),
        }
    }
}

/// A transaction between a vendor and a supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub counterparty_name: String,
    pub counterparty_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<LineItem>,
    /// Stored total. Authoritative; never recomputed from `items`.
    pub amount: Money,
    pub status: OrderStatus,
    pub placed_on: String,
    pub estimated_delivery: Option<String>,
    pub status_history: Vec<StatusEntry>,
}

impl Order {
    /// `"5kg Tomatoes, 3kg Onions"`
    pub fn item_summary(&self) -> String {
        self.items.iter().map(LineItem::describe).collect::<Vec<_>>().join(", ")
    }

    pub fn latest_entry(&self) -> Option<&StatusEntry> {
        self.status_history.last()
    }

    /// Case-insensitive substring match on id, counterparty name and item description.
    /// An empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.id.as_str().to_lowercase().contains(&needle)
            || self.counterparty_name.to_lowercase().contains(&needle)
            || self.item_summary().to_lowercase().contains(&needle)
    }

    pub fn matches(&self, search: &str, status: StatusFilter) -> bool {
        status.accepts(self.status) && self.matches_text(search)
    }
}

/// Parameters for placing a new order; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub counterparty_name: String,
    pub counterparty_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<LineItem>,
    pub amount: Money,
    pub placed_on: String,
    pub estimated_delivery: Option<String>,
}

/// Dashboard stat-card tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderCounts {
    pub pending: usize,
    /// Accepted and still moving: confirmed, processing or shipped.
    pub confirmed: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub total: usize,
}

impl OrderCounts {
    pub fn tally<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut counts, order| {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Delivered => counts.delivered += 1,
                OrderStatus::Cancelled => counts.cancelled += 1,
                status if status.is_in_progress() => counts.confirmed += 1,
                _ => {}
            }
            counts.total += 1;
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample(id: &str, counterparty: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            counterparty_name: counterparty.to_string(),
            counterparty_phone: None,
            delivery_address: None,
            items: vec![
                LineItem::new("Tomatoes", 5, "kg", Money::rupees(150)),
                LineItem::new("Onions", 3, "kg", Money::rupees(150)),
            ],
            amount: Money::rupees(1200),
            status,
            placed_on: "2024-01-27".to_string(),
            estimated_delivery: None,
            status_history: vec![StatusEntry::new(status, "2024-01-27 09:00", "seeded")],
        }
    }

    #[test]
    fn order_ids_compare_without_case() {
        assert_eq!(OrderId::new("mm12345abc"), OrderId::new("MM12345ABC"));
        let set: HashSet<OrderId> = [OrderId::new("ORD001"), OrderId::new("ord001")].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(OrderId::new("mm12345abc").to_string(), "mm12345abc");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Confirmed".parse::<OrderStatus>(), Ok(OrderStatus::Confirmed));
        assert!("in-transit".parse::<OrderStatus>().is_err());
        assert_eq!("ALL".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "delivered".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(OrderStatus::Delivered))
        );
    }

    #[test]
    fn viewers_use_their_own_vocabulary() {
        assert_eq!(Viewer::Supplier.label(OrderStatus::Shipped), "confirmed");
        assert_eq!(Viewer::Vendor.label(OrderStatus::Processing), "in-transit");
        assert_eq!(Viewer::Vendor.label(OrderStatus::Pending), "pending");
        assert_eq!(Viewer::Tracking.label(OrderStatus::Pending), "placed");
        assert_eq!(Viewer::Tracking.label(OrderStatus::Shipped), "shipped");
        assert_eq!(Viewer::Tracking.label(OrderStatus::Cancelled), "cancelled");
    }

    #[test]
    fn text_match_covers_id_counterparty_and_items() {
        let order = sample("ORD001", "Raj's Chaat Corner", OrderStatus::Pending);
        assert_eq!(order.item_summary(), "5kg Tomatoes, 3kg Onions");
        assert!(order.matches_text("ord0"));
        assert!(order.matches_text("CHAAT"));
        assert!(order.matches_text("onions"));
        assert!(order.matches_text(""));
        assert!(!order.matches_text("masala"));
    }

    #[test]
    fn status_filter_intersects_text_match() {
        let order = sample("ORD001", "Raj's Chaat Corner", OrderStatus::Pending);
        assert!(order.matches("raj", StatusFilter::All));
        assert!(order.matches("raj", StatusFilter::Only(OrderStatus::Pending)));
        assert!(!order.matches("raj", StatusFilter::Only(OrderStatus::Delivered)));
    }

    #[test]
    fn supplier_label_filter_spans_in_progress_states() {
        let filter = StatusFilter::for_viewer(Viewer::Supplier, "Confirmed").unwrap();
        assert_eq!(filter, StatusFilter::Label(Viewer::Supplier, "confirmed"));
        assert!(filter.accepts(OrderStatus::Confirmed));
        assert!(filter.accepts(OrderStatus::Processing));
        assert!(filter.accepts(OrderStatus::Shipped));
        assert!(!filter.accepts(OrderStatus::Pending));

        assert_eq!(StatusFilter::for_viewer(Viewer::Vendor, "all"), Ok(StatusFilter::All));
        assert!(StatusFilter::for_viewer(Viewer::Vendor, "in-transit").unwrap().accepts(OrderStatus::Shipped));
        assert!(StatusFilter::for_viewer(Viewer::Supplier, "shipped").is_err());
    }

    #[test]
    fn counts_group_in_progress_states() {
        let orders = [
            sample("A", "x", OrderStatus::Pending),
            sample("B", "x", OrderStatus::Confirmed),
            sample("C", "x", OrderStatus::Shipped),
            sample("D", "x", OrderStatus::Delivered),
            sample("E", "x", OrderStatus::Cancelled),
        ];
        let counts = OrderCounts::tally(&orders);
        assert_eq!(
            counts,
            OrderCounts { pending: 1, confirmed: 2, delivered: 1, cancelled: 1, total: 5 }
        );
    }
}
