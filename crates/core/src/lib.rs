//! Elegant Core - Shared domain types for the storefront.
//!
//! This crate provides the types used by every Elegant component:
//! - `storefront` - Bilingual storefront, JSON API and admin API
//! - `cli` - Command-line tools for migrations, seeding and admin users
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Cart arithmetic and locale selection live here so they can
//! be tested without a running database.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`locale`] - Supported locales and bilingual field selection
//! - [`cart`] - In-memory cart model with merge-on-add and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod locale;
pub mod types;

pub use cart::{Cart, CartLine, CartTotals, LineKey, QuantityChange};
pub use locale::{Locale, LocaleError, Localized, TextDirection};
pub use types::*;
