use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// A product in the cart together with the quantity being bought.
///
/// Serialized flat, with `amount` alongside the product fields:
/// `{"id":1,"title":"…","price":179.9,"image":"…","amount":2}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    pub fn new(product: Product, amount: u32) -> Self {
        LineItem { product, amount }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}
