//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers like
//! [`expect_create`] or [`expect_action`] to inspect what the client sent and
//! answer on the actor's behalf.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::domain::{LineItem, Money, Order, OrderId, OrderStatus, StatusEntry};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// No actor runs behind the client. The test drains `receiver` itself and
/// replies through each request's `respond_to`, which makes success, failure
/// and ordering fully deterministic.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a Create request.
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message must be a Get request.
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a Query; the predicate is returned so the test can
/// evaluate it against its own fixtures.
pub async fn expect_query<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(crate::actor_framework::Predicate<T>, Response<Vec<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { predicate, respond_to }) => Some((predicate, respond_to)),
        _ => None,
    }
}

/// Next message must be an Action request.
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// A two-line vendor order whose history agrees with `status`.
pub fn sample_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        counterparty_name: "Raj's Chaat Corner".to_string(),
        counterparty_phone: Some("+91 98765 43210".to_string()),
        delivery_address: None,
        items: vec![
            LineItem::new("Tomatoes", 5, "kg", Money::rupees(150)),
            LineItem::new("Onions", 3, "kg", Money::rupees(150)),
        ],
        amount: Money::rupees(1200),
        status,
        placed_on: "2024-01-27".to_string(),
        estimated_delivery: None,
        status_history: vec![StatusEntry::new(status, "2024-01-27 09:00", "Order placed")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let user = UserCreate {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                phone: "9876543210".to_string(),
                business_name: "Test Stall".to_string(),
                location: "Pune".to_string(),
                role: Role::Vendor,
            };
            client.create(user).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        responder.send(Ok("user_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("user_1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_query_hands_back_predicate() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let query_task = tokio::spawn(async move {
            client.query(|order: &Order| order.status == OrderStatus::Pending).await
        });

        let (predicate, responder) = expect_query(&mut receiver).await.expect("Expected Query request");
        let pending = sample_order("ORD001", OrderStatus::Pending);
        assert!(predicate(&pending));
        assert!(!predicate(&sample_order("ORD003", OrderStatus::Delivered)));
        responder.send(Ok(vec![pending.clone()])).unwrap();

        assert_eq!(query_task.await.unwrap().unwrap(), vec![pending]);
    }
}
