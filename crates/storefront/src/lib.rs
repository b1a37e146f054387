//! Elegant storefront library.
//!
//! The bilingual storefront, its JSON API and the admin API. The binary in
//! `main.rs` and the `elegant-cli` tool both build on this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
