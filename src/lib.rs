//! Stockroom
//!
//! Stockroom is an in-memory inventory manager: a product store with
//! validated create, edit and delete, free-text search, category filtering
//! and summary statistics, plus a terminal front end.

pub mod cli;
pub mod clock;
pub mod fixtures;
pub mod form;
pub mod prelude;
pub mod products;
pub mod query;
pub mod render;
pub mod session;
pub mod stats;
pub mod store;
pub mod validation;
