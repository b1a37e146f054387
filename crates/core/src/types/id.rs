//! Row identifiers.
//!
//! Every table keys on a `SERIAL` column. Each table gets its own wrapper so a
//! category id can't be passed where a product id is expected.

/// Declares an `i32`-backed identifier type.
///
/// The generated type serializes as a bare number, parses from a trimmed
/// decimal string (path segments, form fields), and binds to Postgres as
/// `INTEGER` when the crate's `postgres` feature is on.
///
/// ```rust
/// # use elegant_core::define_id;
/// define_id!(WishlistId);
///
/// let id: WishlistId = "17".parse().unwrap();
/// assert_eq!(id.as_i32(), 17);
/// assert_eq!(id.to_string(), "17");
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// `shop.user.id`
    UserId
);
define_id!(
    /// `shop.category.id`
    CategoryId
);
define_id!(
    /// `shop.product.id`
    ProductId
);
define_id!(
    /// `shop.cart_item.id`
    CartItemId
);
define_id!(
    /// `shop.order.id`
    OrderId
);
define_id!(
    /// `shop.order_line.id`
    OrderLineId
);
