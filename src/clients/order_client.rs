use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{NewOrder, Order, OrderCounts, OrderId, StatusFilter};
use crate::notify::{Notification, SharedNotifier};
use crate::order_actor::{OrderAction, OrderError, Transition};

/// Handle on the order book.
///
/// Every transition, successful or refused, is reported through the injected
/// notifier. Queries never notify.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    notifier: SharedNotifier,
}

impl_client_methods!(OrderClient, Order, OrderId, OrderError, order);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, notifier: SharedNotifier) -> Self {
        Self { inner, notifier }
    }

    pub async fn accept_order(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::Accept).await
    }

    pub async fn reject_order(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::Reject).await
    }

    pub async fn mark_delivered(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::MarkDelivered).await
    }

    pub async fn start_processing(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::StartProcessing).await
    }

    pub async fn ship_order(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::Ship).await
    }

    pub async fn confirm_delivery(&self, id: &str) -> Result<Transition, OrderError> {
        self.transition(id, OrderAction::ConfirmDelivery).await
    }

    #[instrument(skip(self, action), fields(action = action.verb()))]
    async fn transition(&self, id: &str, action: OrderAction) -> Result<Transition, OrderError> {
        debug!("Sending request");
        let result = self.inner.perform_action(OrderId::from(id), action).await;
        match &result {
            Ok(t) => info!(
                order_id = %t.order.id,
                from = %t.from,
                to = %t.to,
                closed = t.to.is_terminal(),
                "Order transitioned"
            ),
            Err(e) => warn!(order_id = id, error = %e, "Order transition refused"),
        }
        self.notifier.notify(transition_notice(id, action, &result));
        result
    }

    /// Read-only snapshot feed for views, refreshed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Order>> {
        self.inner.subscribe()
    }

    /// Case-insensitive exact lookup. A missing id is `Ok(None)`.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError> {
        self.get_order(OrderId::from(id)).await
    }

    /// Orders whose id, counterparty or items contain `search` (ignoring case)
    /// and whose status passes `status`, in insertion order.
    #[instrument(skip(self))]
    pub async fn filter(&self, search: &str, status: StatusFilter) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let search = search.to_string();
        self.inner.query(move |order| order.matches(&search, status)).await
    }

    #[instrument(skip(self))]
    pub async fn counts(&self) -> Result<OrderCounts, OrderError> {
        let orders = self.list_orders().await?;
        Ok(OrderCounts::tally(&orders))
    }

    /// Stores a new `Pending` order under a generated id.
    #[instrument(skip(self, order), fields(counterparty = %order.counterparty_name))]
    pub async fn place_order(&self, order: NewOrder) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = match self.inner.create(order.clone()).await {
            Err(OrderError::AlreadyExists(taken)) => {
                warn!(order_id = %taken, "Generated id collided, drawing another");
                self.inner.create(order).await?
            }
            other => other?,
        };
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Inserts a fully formed order, keeping its id and history.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn seed(&self, order: Order) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.seed(order).await
    }
}

fn transition_notice(id: &str, action: OrderAction, result: &Result<Transition, OrderError>) -> Notification {
    match result {
        Ok(t) => {
            let id = &t.order.id;
            let from = &t.order.counterparty_name;
            match action {
                OrderAction::Accept => {
                    Notification::info("Order Accepted", format!("Order {} from {} has been accepted.", id, from))
                }
                OrderAction::Reject => {
                    Notification::error("Order Rejected", format!("Order {} from {} has been rejected.", id, from))
                }
                OrderAction::MarkDelivered => {
                    Notification::info("Order Delivered", format!("Order {} has been marked as delivered.", id))
                }
                OrderAction::StartProcessing => {
                    Notification::info("Order Processing", format!("Order {} is being prepared.", id))
                }
                OrderAction::Ship => Notification::info("Order Shipped", format!("Order {} is out for delivery.", id)),
                OrderAction::ConfirmDelivery => {
                    Notification::info("Order Delivered", format!("Order {} has been delivered.", id))
                }
            }
        }
        Err(OrderError::NotFound(_)) => Notification::error("Order Not Found", format!("Order {} does not exist.", id)),
        Err(e @ OrderError::InvalidTransition { .. }) => Notification::error("Action Not Allowed", e.to_string()),
        Err(e) => Notification::error("Order Update Failed", e.to_string()),
    }
}
