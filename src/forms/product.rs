use super::{is_blank, FieldErrors};
use crate::domain::{Money, ProductCreate};

/// The supplier's "add product" row. Price and stock arrive as typed text.
#[derive(Debug, Clone)]
pub struct NewProductForm {
    pub name: String,
    pub price: String,
    pub unit: String,
    pub stock: String,
    pub category: String,
}

impl Default for NewProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            unit: "kg".to_string(),
            stock: String::new(),
            category: String::new(),
        }
    }
}

const ALL_DETAILS: &str = "Please fill in all product details";

impl NewProductForm {
    /// Validates and converts in one step so the numbers are parsed once.
    /// Price is whole rupees per unit.
    pub fn parse(&self) -> Result<ProductCreate, FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("name", &self.name),
            ("price", &self.price),
            ("stock", &self.stock),
            ("category", &self.category),
        ] {
            errors.require(field, value, ALL_DETAILS);
        }

        let price = match self.price.trim().parse::<u32>() {
            Ok(rupees) => Some(Money::rupees(i64::from(rupees))),
            Err(_) => {
                if !is_blank(&self.price) {
                    errors.invalid("price", "Price must be a whole number of rupees");
                }
                None
            }
        };
        let stock = match self.stock.trim().parse::<u32>() {
            Ok(stock) => Some(stock),
            Err(_) => {
                if !is_blank(&self.stock) {
                    errors.invalid("stock", "Stock must be a whole number");
                }
                None
            }
        };

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(ProductCreate {
                name: self.name.trim().to_string(),
                price,
                unit: self.unit.trim().to_string(),
                stock,
                category: self.category.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}
