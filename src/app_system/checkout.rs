use chrono::Local;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::clients::OrderClient;
use crate::domain::{Cart, Money, NewOrder, OrderId, SupplierListing};
use crate::forms::{CheckoutForm, FieldErrors};
use crate::notify::{Notification, SharedNotifier};
use crate::order_actor::OrderError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid checkout details: {0}")]
    InvalidForm(FieldErrors),
    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: OrderId,
    pub amount: Money,
}

/// Turns the vendor's cart into a placed order after a simulated payment.
#[derive(Clone)]
pub struct CheckoutService {
    orders: OrderClient,
    notifier: SharedNotifier,
    payment_delay: Duration,
    redirect_delay: Duration,
}

impl CheckoutService {
    pub fn new(orders: OrderClient, notifier: SharedNotifier, payment_delay: Duration, redirect_delay: Duration) -> Self {
        Self { orders, notifier, payment_delay, redirect_delay }
    }

    /// Adds one unit of the listing to `cart` and announces it.
    pub fn add_to_cart(&self, cart: &mut Cart, listing: &SupplierListing) -> u64 {
        let id = cart.add(listing);
        self.notifier.notify(Notification::info(
            "Added to Cart",
            format!("{} from {} added to cart.", listing.product, listing.name),
        ));
        id
    }

    /// Removes a cart line. Nothing is announced for an unknown id.
    pub fn remove_from_cart(&self, cart: &mut Cart, id: u64) -> bool {
        let removed = cart.remove(id);
        if removed {
            self.notifier.notify(Notification::info("Removed from Cart", "Item removed from cart."));
        }
        removed
    }

    /// Places the whole cart as one `Pending` order. The cart is emptied only
    /// once the order is stored; any failure leaves it as it was.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn checkout(&self, cart: &mut Cart, form: &CheckoutForm) -> Result<Receipt, CheckoutError> {
        if cart.is_empty() {
            warn!("Checkout with an empty cart");
            self.notifier.notify(Notification::error("Cart is Empty", "Add items to your cart before checking out."));
            return Err(CheckoutError::EmptyCart);
        }
        if let Err(errors) = form.validate() {
            warn!(%errors, "Checkout form rejected");
            if let Some(first) = errors.first() {
                self.notifier.notify(Notification::error(CheckoutForm::headline(first), first.message.clone()));
            }
            return Err(CheckoutError::InvalidForm(errors));
        }

        tokio::time::sleep(self.payment_delay).await;

        let amount = cart.total();
        let order = NewOrder {
            counterparty_name: cart.suppliers().join(", "),
            counterparty_phone: Some(form.phone.trim().to_string()),
            delivery_address: Some(format!(
                "{}, {} - {}",
                form.address.trim(),
                form.city.trim(),
                form.pincode.trim()
            )),
            items: cart.items().iter().map(|item| item.to_line_item()).collect(),
            amount,
            placed_on: Local::now().format("%Y-%m-%d").to_string(),
            estimated_delivery: None,
        };
        let order_id = self.orders.place_order(order).await?;
        cart.clear();

        info!(order_id = %order_id, %amount, "Checkout complete");
        self.notifier.notify(Notification::info(
            "Order Placed Successfully!",
            format!("Your order {} has been placed", order_id),
        ));

        tokio::time::sleep(self.redirect_delay).await;
        Ok(Receipt { order_id, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::{Order, OrderStatus};
    use crate::notify::ChannelNotifier;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn start() -> (CheckoutService, OrderClient, UnboundedReceiver<Notification>) {
        let mut counter = 0u32;
        let (actor, inner) = ResourceActor::<Order>::new(10, move || {
            counter += 1;
            OrderId::new(format!("MMTEST{:04}", counter))
        });
        tokio::spawn(actor.run());
        let (notifier, notices) = ChannelNotifier::new();
        let notifier: SharedNotifier = Arc::new(notifier);
        let orders = OrderClient::new(inner, notifier.clone());
        let service = CheckoutService::new(orders.clone(), notifier, Duration::ZERO, Duration::ZERO);
        (service, orders, notices)
    }

    fn tomatoes() -> SupplierListing {
        SupplierListing {
            id: 1,
            name: "Fresh Farm Suppliers".into(),
            location: "Connaught Place, Delhi".into(),
            rating: 4.8,
            delivery_time: "2-4 hours".into(),
            specialties: vec!["Vegetables".into()],
            product: "Fresh Tomatoes".into(),
            price: Money::rupees(150),
            unit: "kg".into(),
            verified: true,
            distance: "1.2 km".into(),
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Raj Malhotra".into(),
            email: "raj@chaat.in".into(),
            phone: "9876543210".into(),
            address: "12 Janpath".into(),
            city: "Delhi".into(),
            pincode: "110001".into(),
            card_number: "4111111111111111".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
            card_name: "RAJ MALHOTRA".into(),
        }
    }

    #[tokio::test]
    async fn checkout_places_pending_order_and_clears_cart() {
        let (service, orders, mut notices) = start();
        let mut cart = Cart::new();
        let line = cart.add(&tomatoes());
        cart.update_quantity(line, 2);

        let receipt = service.checkout(&mut cart, &form()).await.unwrap();
        assert_eq!(receipt.amount, Money::rupees(300));
        assert!(cart.is_empty());

        let placed = orders.find_by_id(receipt.order_id.as_str()).await.unwrap().unwrap();
        assert_eq!(placed.status, OrderStatus::Pending);
        assert_eq!(placed.counterparty_name, "Fresh Farm Suppliers");
        assert_eq!(placed.item_summary(), "2kg Fresh Tomatoes");
        assert_eq!(placed.delivery_address.as_deref(), Some("12 Janpath, Delhi - 110001"));

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Order Placed Successfully!");
        assert_eq!(notice.description, format!("Your order {} has been placed", receipt.order_id));
    }

    #[tokio::test]
    async fn invalid_form_leaves_book_and_cart_alone() {
        let (service, orders, mut notices) = start();
        let mut cart = Cart::new();
        cart.add(&tomatoes());
        let mut bad = form();
        bad.city = " ".into();

        let err = service.checkout(&mut cart, &bad).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidForm(_)));
        assert_eq!(cart.len(), 1);
        assert!(orders.list_orders().await.unwrap().is_empty());

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Missing Information");
        assert_eq!(notice.description, "Please fill in city");
    }

    #[tokio::test]
    async fn cart_edits_are_announced() {
        let (service, _orders, mut notices) = start();
        let mut cart = Cart::new();

        let line = service.add_to_cart(&mut cart, &tomatoes());
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Added to Cart");
        assert_eq!(notice.description, "Fresh Tomatoes from Fresh Farm Suppliers added to cart.");

        assert!(!service.remove_from_cart(&mut cart, line + 1));
        assert!(service.remove_from_cart(&mut cart, line));
        assert_eq!(notices.recv().await.unwrap().title, "Removed from Cart");
        assert!(cart.is_empty());
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_cart_is_refused() {
        let (service, _orders, _notices) = start();
        let mut cart = Cart::new();
        assert_eq!(service.checkout(&mut cart, &form()).await, Err(CheckoutError::EmptyCart));
    }
}
