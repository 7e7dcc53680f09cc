use tracing::{error, info};
use uuid::Uuid;

use super::checkout::CheckoutService;
use super::config::MarketConfig;
use super::error::AppError;
use super::fixtures;
use crate::actor_framework::ResourceActor;
use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::domain::{Order, OrderId, Product, SupplierListing, User};
use crate::notify::SharedNotifier;

const ID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `MM` followed by eight characters drawn from `0-9A-Z`.
fn next_order_id() -> OrderId {
    let mut bits = Uuid::new_v4().as_u128();
    let token: String = (0..8)
        .map(|_| {
            let ch = ID_ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            ch
        })
        .collect();
    OrderId::new(format!("MM{}", token))
}

/// Starts every store, wires the clients to the shared notifier and seeds
/// the demonstration data.
pub struct MarketSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub checkout: CheckoutService,
    pub listings: Vec<SupplierListing>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    pub async fn start(config: &MarketConfig, notifier: SharedNotifier) -> Result<Self, AppError> {
        config.validate()?;
        let buffer = config.channel_buffer;

        let mut user_counter = 0u64;
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer, move || {
            user_counter += 1;
            format!("user_{}", user_counter)
        });
        let user_client = UserClient::new(user_resource_client, notifier.clone(), config.account_settings());
        let user_handle = tokio::spawn(user_actor.run());

        // Fixture products take ids 1..=3; new ones continue after them.
        let mut product_counter = fixtures::products().len() as u64;
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(buffer, move || {
            product_counter += 1;
            product_counter.to_string()
        });
        let product_client = ProductClient::new(product_resource_client, notifier.clone());
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, next_order_id);
        let order_client = OrderClient::new(order_resource_client, notifier.clone());
        let order_handle = tokio::spawn(order_actor.run());

        let checkout = CheckoutService::new(
            order_client.clone(),
            notifier,
            config.payment_delay,
            config.redirect_delay,
        );

        let mut system = Self {
            order_client,
            user_client,
            product_client,
            checkout,
            listings: Vec::new(),
            handles: vec![user_handle, product_handle, order_handle],
        };

        if config.seed_fixtures {
            system.seed().await?;
        }
        info!("Market system started");
        Ok(system)
    }

    async fn seed(&mut self) -> Result<(), AppError> {
        for order in fixtures::supplier_orders().into_iter().chain(fixtures::tracking_orders()) {
            self.order_client.seed(order).await?;
        }
        for product in fixtures::products() {
            self.product_client.seed(product).await?;
        }
        self.listings = fixtures::listings()?;
        info!(listings = self.listings.len(), "Fixtures seeded");
        Ok(())
    }

    /// Drops every client this system holds and waits for the actors to stop.
    /// Clones handed out earlier keep their actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        drop(self.checkout);
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
