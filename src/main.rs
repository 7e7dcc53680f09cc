mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod forms;
mod notify;
mod order_actor;
mod product_actor;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;
use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, AppError, MarketConfig, MarketSystem};
use crate::domain::{search_listings, Cart, OrderStatus, Role, StatusFilter, Viewer};
use crate::forms::{CheckoutForm, NewProductForm, ProfileForm, SignInForm};
use crate::notify::TracingNotifier;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = MarketConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting Mandi Mitra marketplace");
    let system = MarketSystem::start(&config, Arc::new(TracingNotifier)).await?;

    // A read-only view follows the book through snapshots.
    let view = system.order_client.subscribe();

    // Supplier signs in and works through the incoming orders.
    let span = tracing::info_span!("supplier_dashboard");
    async {
        let form = SignInForm { email: "orders@freshfarm.in".into(), password: config.demo_password.clone() };
        let supplier = system.user_client.sign_in(form, Role::Supplier).await?;
        info!(user = %supplier.name, "Supplier signed in");

        let profile = ProfileForm {
            name: "Fresh Farm Suppliers".into(),
            email: supplier.email.clone(),
            phone: "9876543210".into(),
            business_name: "Fresh Farm Suppliers".into(),
            location: "Azadpur Mandi, Delhi".into(),
            avatar: None,
        };
        let supplier = system.user_client.update_profile(&supplier.id, profile).await?;
        info!(business = %supplier.business_name, "Supplier profile completed");

        system.order_client.accept_order("ORD001").await?;
        system.order_client.mark_delivered("ORD001").await?;
        if let Err(e) = system.order_client.reject_order("ORD001").await {
            info!(error = %e, "Delivered orders cannot be rejected");
        }

        let counts = system.order_client.counts().await?;
        info!(
            pending = counts.pending,
            confirmed = counts.confirmed,
            delivered = counts.delivered,
            total = counts.total,
            "Dashboard counts"
        );

        let in_progress = StatusFilter::for_viewer(Viewer::Supplier, "confirmed")?;
        let confirmed_tab = system.order_client.filter("", in_progress).await?;
        info!(shown = confirmed_tab.len(), card = counts.confirmed, "Confirmed tab");

        for order in system.order_client.filter("", StatusFilter::All).await? {
            info!(
                order_id = %order.id,
                status = Viewer::Supplier.label(order.status),
                amount = %order.amount,
                items = %order.item_summary(),
                "Order"
            );
        }

        let onions = NewProductForm {
            name: "Onions".into(),
            price: "30".into(),
            stock: "200".into(),
            category: "Vegetables".into(),
            ..Default::default()
        };
        let product = system.product_client.add_product(&onions).await?;
        info!(product_id = %product.id, price = %product.price, "Catalogue extended");
        for product in system.product_client.list_products().await? {
            info!(
                product = %product.name,
                stock = product.stock,
                sell_through = %format!("{:.1}%", product.sell_through()),
                "Catalogue"
            );
        }
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    {
        let snapshot = view.borrow();
        let delivered = snapshot.iter().filter(|o| o.status == OrderStatus::Delivered).count();
        info!(orders = snapshot.len(), delivered, "View refreshed");
    }

    // The courier side walks an accepted order through to the door.
    system.order_client.start_processing("ORD002").await?;
    system.order_client.ship_order("ORD002").await?;
    system.order_client.confirm_delivery("MM12345ABC").await?;

    // Anyone can track an order by id, in any letter case.
    match system.order_client.find_by_id("mm12345abc").await? {
        Some(order) => info!(
            order_id = %order.id,
            status = Viewer::Tracking.label(order.status),
            steps = order.status_history.len(),
            "Tracking lookup"
        ),
        None => error!("Tracking order missing"),
    }

    // Vendor fills a cart from the supplier search and checks out.
    let span = tracing::info_span!("vendor_checkout");
    let receipt = async {
        let mut cart = Cart::new();
        let mut lines = Vec::new();
        for listing in search_listings(&system.listings, "", "all") {
            lines.push(system.checkout.add_to_cart(&mut cart, listing));
        }
        if let Some(&last) = lines.last() {
            system.checkout.remove_from_cart(&mut cart, last);
        }
        if let Some(&first) = lines.first() {
            cart.update_quantity(first, 5);
        }
        info!(lines = cart.len(), total = %cart.total(), "Cart ready");

        let form = CheckoutForm {
            full_name: "Raj Malhotra".into(),
            email: "raj@chaat.in".into(),
            phone: "9876543210".into(),
            address: "12 Janpath".into(),
            city: "Delhi".into(),
            pincode: "110001".into(),
            card_number: "4111 1111 1111 1111".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
            card_name: "RAJ MALHOTRA".into(),
        };
        system.checkout.checkout(&mut cart, &form).await
    }
    .instrument(span)
    .await?;

    if let Some(order) = system.order_client.find_by_id(receipt.order_id.as_str()).await? {
        let snapshot = serde_json::to_string(&order)?;
        info!(status = Viewer::Vendor.label(order.status), %snapshot, "Placed order");
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
