//! Domain models for the storefront.
//!
//! Row types live next to their repositories in [`crate::db`]; the types here
//! are validated domain objects plus their JSON request and response shapes.

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartItemResponse, CartLineRequest, CartQuantityRequest, CartResponse};
pub use category::{Category, CategoryInput, CategoryResponse, MissingCategoryFields, NewCategory};
pub use order::{
    CheckoutInputError, CheckoutRequest, NewOrder, Order, OrderLine, OrderResponse, ShippingDetails,
};
pub use product::{
    NewProduct, PRICE_LIMIT, Product, ProductInput, ProductInputError, ProductResponse,
};
pub use session::CurrentUser;
pub use user::{User, UserResponse};
