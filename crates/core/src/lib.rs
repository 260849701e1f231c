//! Orchard Core - catalog, cart, pricing and session logic.
//!
//! This crate holds everything in the demo shop that has behavior worth
//! testing, independent of how pages are rendered:
//!
//! - [`catalog`] - the static, read-only product catalog
//! - [`cart`] - cart line management over the storage port
//! - [`pricing`] - the totals calculation (discounts, shipping, COD)
//! - [`session`] - logged-in user, subscribers, stashed search term
//! - [`storage`] - the key-value persistence port
//!
//! # Architecture
//!
//! Durable state is four string records behind the [`storage::Storage`]
//! trait. Stores re-derive their state from storage on every read and
//! write back immediately after every mutation; execution is assumed
//! single-threaded per logical shopper. Every failure mode degrades to a
//! safe default (empty cart, logged out, no-op) - no core operation
//! raises an error to its caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod types;

pub use cart::{CartLine, CartStore};
pub use catalog::{Catalog, Category, Product};
pub use pricing::{PaymentMethod, ShippingMethod, Totals};
pub use session::{SessionStore, User};
pub use storage::{MemoryStorage, Storage};
pub use types::*;
