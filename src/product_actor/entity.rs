use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate};
use super::error::ProductError;

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    /// A newly listed product has sold nothing and carries no rating yet.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            unit: params.unit,
            stock: params.stock,
            category: params.category,
            sold: 0,
            rating: 0.0,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), ProductError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ProductError> {
        Ok(())
    }
}
