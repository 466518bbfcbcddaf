//! Product Fixtures

use std::str::FromStr;

use jiff::civil::Date;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    clock::Clock,
    fixtures::FixtureError,
    form::ProductForm,
    products::{Product, ProductId},
    store::ProductStore,
    validation::validate,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Currency code shared by every price (e.g., "USD")
    pub currency: String,

    /// Products, in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u64,

    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Description
    pub description: String,

    /// Unit price (e.g., "2499.99")
    pub price: String,

    /// Units on hand
    pub stock: i64,

    /// Supplier
    pub supplier: String,

    /// Category
    pub category: String,

    /// Entry date (e.g., "2024-01-15")
    pub entry_date: String,
}

impl ProductFixture {
    /// The raw form this fixture would have been entered through.
    pub fn form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            sku: self.sku.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            stock: self.stock.to_string(),
            supplier: self.supplier.clone(),
            category: self.category.clone(),
        }
    }
}

impl ProductsFixture {
    /// Parse a products fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// The fixture currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency code is not recognized.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        parse_currency(&self.currency)
    }

    /// Build a store from the fixture.
    ///
    /// Each product passes through the same validation as user input, checked
    /// against the products seeded before it.
    ///
    /// # Errors
    ///
    /// Returns an error if a product fails validation, has a malformed entry
    /// date, or reuses an id.
    pub fn into_store(self, clock: impl Clock + 'static) -> Result<ProductStore, FixtureError> {
        let mut store = ProductStore::new(clock);

        for fixture in self.products {
            let id = ProductId::new(fixture.id);

            let data = validate(&fixture.form(), &store, None)
                .map_err(|errors| FixtureError::InvalidProduct { id, errors })?;

            let entry_date =
                Date::from_str(&fixture.entry_date).map_err(|source| FixtureError::InvalidDate {
                    id,
                    date: fixture.entry_date.clone(),
                    source,
                })?;

            store.insert(Product::new(id, data, entry_date))?;
        }

        Ok(store)
    }
}

/// Parse a currency code (e.g., "GBP").
///
/// # Errors
///
/// Returns an error if the code is not one of GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
