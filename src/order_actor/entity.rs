use chrono::Local;

use super::actions::{OrderAction, Transition};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{NewOrder, Order, OrderId, OrderStatus, StatusEntry};

/// Format of every timestamp the book writes into a status history.
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn now() -> String {
    Local::now().format(HISTORY_TIMESTAMP_FORMAT).to_string()
}

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = NewOrder;
    type Patch = (); // Orders change only through actions
    type Action = OrderAction;
    type ActionResult = Transition;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// A placed order starts `Pending` with a single "Order placed" entry.
    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, OrderError> {
        Ok(Self {
            id,
            counterparty_name: params.counterparty_name,
            counterparty_phone: params.counterparty_phone,
            delivery_address: params.delivery_address,
            items: params.items,
            amount: params.amount,
            status: OrderStatus::Pending,
            placed_on: params.placed_on,
            estimated_delivery: params.estimated_delivery,
            status_history: vec![StatusEntry::new(OrderStatus::Pending, now(), "Order placed")],
        })
    }

    /// Refuses orders whose history does not end in the current status.
    fn on_create(&mut self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::ValidationError(format!("order {} has no items", self.id)));
        }
        match self.latest_entry() {
            Some(entry) if entry.status == self.status => Ok(()),
            Some(entry) => Err(OrderError::ValidationError(format!(
                "order {} is {} but its history ends at {}",
                self.id, self.status, entry.status
            ))),
            None => Err(OrderError::ValidationError(format!(
                "order {} has no status history",
                self.id
            ))),
        }
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    /// Applies a transition and appends the matching history entry.
    fn handle_action(&mut self, action: OrderAction) -> Result<Transition, OrderError> {
        let from = self.status;
        let to = action.target(from).ok_or_else(|| OrderError::InvalidTransition {
            id: self.id.to_string(),
            from,
            action: action.verb(),
        })?;

        self.status = to;
        self.status_history.push(StatusEntry::new(to, now(), action.history_note()));

        Ok(Transition {
            order: self.clone(),
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, Money};

    fn placed() -> Order {
        let params = NewOrder {
            counterparty_name: "Fresh Farm Suppliers".to_string(),
            counterparty_phone: None,
            delivery_address: Some("123 Main Street, Delhi".to_string()),
            items: vec![LineItem::new("Fresh Tomatoes", 2, "kg", Money::rupees(150))],
            amount: Money::rupees(300),
            placed_on: "2024-01-27".to_string(),
            estimated_delivery: None,
        };
        Order::from_create_params(OrderId::new("MMTEST0001"), params).unwrap()
    }

    #[test]
    fn placed_order_starts_pending_with_history() {
        let mut order = placed();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.status_history.len(), 1);
        assert!(order.on_create().is_ok());
    }

    #[test]
    fn every_transition_appends_history() {
        let mut order = placed();
        for action in [OrderAction::Accept, OrderAction::StartProcessing, OrderAction::Ship, OrderAction::ConfirmDelivery] {
            order.handle_action(action).unwrap();
            assert_eq!(order.latest_entry().map(|e| e.status), Some(order.status));
        }
        let statuses: Vec<_> = order.status_history.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered
            ]
        );
    }

    #[test]
    fn illegal_action_leaves_order_untouched() {
        let mut order = placed();
        let before = order.clone();
        let err = order.handle_action(OrderAction::MarkDelivered).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                id: "MMTEST0001".to_string(),
                from: OrderStatus::Pending,
                action: "mark delivered"
            }
        );
        assert_eq!(order, before);
    }

    #[test]
    fn inconsistent_history_is_refused() {
        let mut order = placed();
        order.status = OrderStatus::Shipped;
        assert!(matches!(order.on_create(), Err(OrderError::ValidationError(_))));
        order.status_history.clear();
        assert!(matches!(order.on_create(), Err(OrderError::ValidationError(_))));
    }
}
