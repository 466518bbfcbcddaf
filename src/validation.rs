//! Validation
//!
//! Turns raw [`ProductForm`] input into [`ProductData`], checking every field
//! against its rule and the store for SKU conflicts. All violations are
//! collected, not just the first one.

use std::str::FromStr;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    form::{Field, ProductForm},
    products::{ProductData, ProductId},
    store::ProductStore,
};

/// A single field's validation failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty after trimming.
    #[error("Required")]
    Required,

    /// Another product already uses this SKU.
    #[error("SKU exists")]
    SkuExists,

    /// Price is not a positive number, or too large for the stock held.
    #[error("Invalid price")]
    InvalidPrice,

    /// Stock is not a non-negative integer.
    #[error("Invalid stock")]
    InvalidStock,
}

/// Field-level errors for a rejected form, in form field order.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: SmallVec<[(Field, FieldError); 7]>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, error: FieldError) {
        self.errors.push((field, error));
    }

    /// The error for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(failed, _)| *failed == field)
            .map(|(_, error)| *error)
    }

    /// Whether a field failed.
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Failed fields and their errors.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().copied()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a form against the store.
///
/// `editing` is the product being edited, which is excluded from the SKU
/// uniqueness check so an unchanged SKU can be re-submitted.
///
/// # Errors
///
/// Returns [`ValidationErrors`] holding every failed field.
pub fn validate(
    form: &ProductForm,
    store: &ProductStore,
    editing: Option<ProductId>,
) -> Result<ProductData, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = required(form, Field::Name, &mut errors);
    let sku = required(form, Field::Sku, &mut errors);

    if !sku.is_empty() && store.find_by_sku(sku, editing).is_some() {
        errors.push(Field::Sku, FieldError::SkuExists);
    }

    let description = required(form, Field::Description, &mut errors);

    let price = parse_price(&form.price);
    let stock = parse_stock(&form.stock);

    // price * stock must stay representable for the stats
    let value_fits = match (price, stock) {
        (Some(price), Some(stock)) => price.checked_mul(Decimal::from(stock)).is_some(),
        _ => true,
    };

    if price.is_none() || !value_fits {
        errors.push(Field::Price, FieldError::InvalidPrice);
    }

    if stock.is_none() {
        errors.push(Field::Stock, FieldError::InvalidStock);
    }

    let supplier = required(form, Field::Supplier, &mut errors);
    let category = required(form, Field::Category, &mut errors);

    match (price, stock) {
        (Some(price), Some(stock)) if errors.is_empty() => Ok(ProductData {
            name: name.to_string(),
            sku: sku.to_string(),
            description: description.to_string(),
            price,
            stock,
            supplier: supplier.to_string(),
            category: category.to_string(),
        }),
        _ => Err(errors),
    }
}

fn required<'f>(form: &'f ProductForm, field: Field, errors: &mut ValidationErrors) -> &'f str {
    let value = form.get(field).trim();

    if value.is_empty() {
        errors.push(field, FieldError::Required);
    }

    value
}

/// Parse a strictly positive decimal price.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|price| price.is_sign_positive() && !price.is_zero())
}

/// Parse a non-negative integer stock count.
pub fn parse_stock(raw: &str) -> Option<u32> {
    let stock = raw.trim().parse::<i64>().ok()?;

    u32::try_from(stock).ok()
}
