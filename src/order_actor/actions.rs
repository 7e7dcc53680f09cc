use crate::domain::{Order, OrderStatus};

/// Status transitions an order accepts.
///
/// `Accept`, `Reject` and `MarkDelivered` are the supplier's buttons;
/// `StartProcessing`, `Ship` and `ConfirmDelivery` drive the tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Accept,
    Reject,
    MarkDelivered,
    StartProcessing,
    Ship,
    ConfirmDelivery,
}

impl OrderAction {
    /// The target status, or `None` when the action is illegal from `from`.
    pub fn target(self, from: OrderStatus) -> Option<OrderStatus> {
        use OrderStatus::*;
        match (self, from) {
            (OrderAction::Accept, Pending) => Some(Confirmed),
            (OrderAction::Reject, Pending) => Some(Cancelled),
            (OrderAction::MarkDelivered, Confirmed) => Some(Delivered),
            (OrderAction::StartProcessing, Confirmed) => Some(Processing),
            (OrderAction::Ship, Processing) => Some(Shipped),
            (OrderAction::ConfirmDelivery, Shipped) => Some(Delivered),
            _ => None,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Reject => "reject",
            OrderAction::MarkDelivered => "mark delivered",
            OrderAction::StartProcessing => "start processing",
            OrderAction::Ship => "ship",
            OrderAction::ConfirmDelivery => "confirm delivery of",
        }
    }

    /// Text recorded in the status history.
    pub fn history_note(self) -> &'static str {
        match self {
            OrderAction::Accept => "Order accepted by supplier",
            OrderAction::Reject => "Order rejected by supplier",
            OrderAction::MarkDelivered => "Marked as delivered by supplier",
            OrderAction::StartProcessing => "Items being prepared",
            OrderAction::Ship => "Out for delivery",
            OrderAction::ConfirmDelivery => "Successfully delivered",
        }
    }
}

/// Outcome of a successful action: the order as it now stands and the step taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub order: Order,
    pub from: OrderStatus,
    pub to: OrderStatus,
}
