//! Fixtures
//!
//! Seed products loaded into the store at startup.

use std::{fs, path::Path};

use thiserror::Error;

use crate::{products::ProductId, store::StoreError, validation::ValidationErrors};

pub mod products;

pub use products::{ProductFixture, ProductsFixture};

/// Products bundled with the binary.
pub const SEED_PRODUCTS_YAML: &str = include_str!("../../fixtures/products/seed.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid entry date
    #[error("Invalid entry date for product {id}: {date}")]
    InvalidDate {
        /// Product id
        id: ProductId,
        /// Raw date value
        date: String,
        /// Parse failure
        #[source]
        source: jiff::Error,
    },

    /// A seeded product fails validation
    #[error("Invalid product {id}: {errors}")]
    InvalidProduct {
        /// Product id
        id: ProductId,
        /// Failed fields
        errors: ValidationErrors,
    },

    /// Store rejected a seeded product
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse the bundled seed products.
///
/// # Errors
///
/// Returns an error if the bundled YAML is malformed.
pub fn seed() -> Result<ProductsFixture, FixtureError> {
    ProductsFixture::from_yaml(SEED_PRODUCTS_YAML)
}

/// Load a products fixture from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: impl AsRef<Path>) -> Result<ProductsFixture, FixtureError> {
    let contents = fs::read_to_string(path)?;

    ProductsFixture::from_yaml(&contents)
}
