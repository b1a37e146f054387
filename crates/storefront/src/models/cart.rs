//! Cart request and response shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use elegant_core::{Cart, CartLine, LineKey, ProductId};

/// Identifies a cart line in add and remove requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl CartLineRequest {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.trim(), self.color.trim())
    }
}

/// Quantity change for a cart line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuantityRequest {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl CartQuantityRequest {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.trim(), self.color.trim())
    }
}

/// JSON shape of one cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: ProductId,
    pub name: String,
    pub name_ar: String,
    pub size: String,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl From<&CartLine> for CartItemResponse {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.key.product_id,
            name: line.name.en.clone(),
            name_ar: line.name.ar.clone(),
            size: line.key.size.clone(),
            color: line.key.color.clone(),
            price: line.unit_price,
            image: line.image.clone(),
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// JSON shape of a cart with its totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CartResponse {
    /// Build the response for `cart` with the flat shipping charge.
    #[must_use]
    pub fn new(cart: &Cart, shipping: Decimal) -> Self {
        let totals = cart.totals(shipping);
        Self {
            items: cart.lines().iter().map(CartItemResponse::from).collect(),
            item_count: cart.item_count(),
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use elegant_core::Localized;

    use super::*;

    #[test]
    fn test_cart_response_totals() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(CartLine {
                key: LineKey::new(ProductId::new(1), "M", "Black"),
                name: Localized::new("Classic Abaya".to_owned(), "عباية كلاسيكية".to_owned()),
                unit_price: Decimal::new(299, 0),
                image: None,
                quantity: 1,
            });
        }

        let response = CartResponse::new(&cart, Decimal::new(25, 0));
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.item_count, 3);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["subtotal"], serde_json::json!(897.0));
        assert_eq!(json["total"], serde_json::json!(922.0));
        assert_eq!(json["items"][0]["lineTotal"], serde_json::json!(897.0));
    }

    #[test]
    fn test_line_request_key_trims() {
        let req: CartLineRequest =
            serde_json::from_str(r#"{"productId":4,"size":" M ","color":"Black"}"#).unwrap();
        assert_eq!(req.key(), LineKey::new(ProductId::new(4), "M", "Black"));
    }
}
