use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::Product;
use crate::forms::NewProductForm;
use crate::notify::{Notification, SharedNotifier};
use crate::product_actor::ProductError;

/// Client for the supplier's product catalogue.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    notifier: SharedNotifier,
}

impl_client_methods!(ProductClient, Product, String, ProductError, product);

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, notifier: SharedNotifier) -> Self {
        Self { inner, notifier }
    }

    /// Validates the add-product form and lists the product. A rejected form
    /// leaves the catalogue untouched.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn add_product(&self, form: &NewProductForm) -> Result<Product, ProductError> {
        let params = match form.parse() {
            Ok(params) => params,
            Err(errors) => {
                warn!(%errors, "Product form rejected");
                let message = errors.first().map(|e| e.message.clone()).unwrap_or_default();
                self.notifier.notify(Notification::error("Validation Error", message));
                return Err(ProductError::ValidationError(errors));
            }
        };

        debug!("Sending request");
        let id = self.inner.create(params).await?;
        let product = self
            .inner
            .get(id.clone())
            .await?
            .ok_or_else(|| ProductError::NotFound(id))?;

        info!(product_id = %product.id, "Product added");
        self.notifier.notify(Notification::info(
            "Product Added",
            format!("{} has been added successfully.", product.name),
        ));
        Ok(product)
    }

    /// Inserts a catalogue entry that already carries its id and sales figures.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn seed(&self, product: Product) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.seed(product).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::Money;
    use crate::notify::ChannelNotifier;
    use std::sync::Arc;

    fn start() -> (ProductClient, tokio::sync::mpsc::UnboundedReceiver<Notification>) {
        let mut counter = 0u32;
        let (actor, inner) = ResourceActor::<Product>::new(10, move || {
            counter += 1;
            counter.to_string()
        });
        tokio::spawn(actor.run());
        let (notifier, notices) = ChannelNotifier::new();
        (ProductClient::new(inner, Arc::new(notifier)), notices)
    }

    #[tokio::test]
    async fn added_product_is_listed_and_announced() {
        let (client, mut notices) = start();
        let form = NewProductForm {
            name: "Onions".into(),
            price: "30".into(),
            stock: "200".into(),
            category: "Vegetables".into(),
            ..Default::default()
        };

        let product = client.add_product(&form).await.unwrap();
        assert_eq!(product.price, Money::rupees(30));
        assert_eq!(client.list_products().await.unwrap(), vec![product.clone()]);
        assert_eq!(client.get_product(product.id.clone()).await.unwrap(), Some(product));

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Product Added");
        assert_eq!(notice.description, "Onions has been added successfully.");
    }

    #[tokio::test]
    async fn incomplete_form_changes_nothing() {
        let (client, mut notices) = start();
        let result = client.add_product(&NewProductForm::default()).await;

        assert!(matches!(result, Err(ProductError::ValidationError(_))));
        assert!(client.list_products().await.unwrap().is_empty());
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.description, "Please fill in all product details");
        assert!(notice.is_error);
    }
}
