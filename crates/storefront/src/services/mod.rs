//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration, login, profile and role changes
//! - `catalog` - Product and category reads, category cache, page filters
//! - `cart` - Add/update/remove against the persisted cart
//! - `checkout` - Order placement with flat shipping

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
