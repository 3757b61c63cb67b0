//! Storefront Cart
//!
//! Shopping cart state for a food delivery storefront: line identity and
//! merging, quantity changes, price aggregation, the delivery fee rule, and
//! persistence of the cart to a durable key-value store.

pub mod catalog;
pub mod config;
pub mod drawer;
pub mod events;
pub mod lines;
pub mod manager;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod storage;
