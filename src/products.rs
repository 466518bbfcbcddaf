//! Products

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::stats::LOW_STOCK_THRESHOLD;

/// Product identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Validated product fields, everything except the store-managed `id` and `entry_date`.
///
/// Produced by [`crate::validation::validate`], so every value satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Free-text description
    pub description: String,

    /// Unit price, always positive
    pub price: Decimal,

    /// Units on hand
    pub stock: u32,

    /// Supplier name
    pub supplier: String,

    /// Category label
    pub category: String,
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Free-text description
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Units on hand
    pub stock: u32,

    /// Supplier name
    pub supplier: String,

    /// Category label
    pub category: String,

    /// Date of creation or last update
    pub entry_date: Date,
}

impl Product {
    /// Build a product from validated data.
    pub fn new(id: ProductId, data: ProductData, entry_date: Date) -> Self {
        let ProductData {
            name,
            sku,
            description,
            price,
            stock,
            supplier,
            category,
        } = data;

        Self {
            id,
            name,
            sku,
            description,
            price,
            stock,
            supplier,
            category,
            entry_date,
        }
    }

    /// Replace every field except the id.
    pub(crate) fn replace(&mut self, data: ProductData, entry_date: Date) {
        *self = Self::new(self.id, data, entry_date);
    }

    /// The user-editable fields of this product.
    pub fn data(&self) -> ProductData {
        ProductData {
            name: self.name.clone(),
            sku: self.sku.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            supplier: self.supplier.clone(),
            category: self.category.clone(),
        }
    }

    /// `price * stock`, capped at [`Decimal::MAX`].
    pub fn value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.stock))
    }

    /// Whether stock is at or below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Case-insensitive SKU comparison.
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.to_lowercase() == sku.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;

    use super::*;

    fn laptop(stock: u32) -> Product {
        Product::new(
            ProductId::new(1),
            ProductData {
                name: "MacBook Pro 14\"".to_string(),
                sku: "MBP-14-001".to_string(),
                description: "Laptop".to_string(),
                price: Decimal::new(249_999, 2),
                stock,
                supplier: "Apple Inc.".to_string(),
                category: "Laptops".to_string(),
            },
            date(2024, 1, 15),
        )
    }

    #[test]
    fn value_is_price_times_stock() {
        assert_eq!(laptop(2).value(), Decimal::new(499_998, 2));
        assert_eq!(laptop(0).value(), Decimal::ZERO);
    }

    #[test]
    fn value_saturates_on_overflow() {
        let mut product = laptop(2);
        product.price = Decimal::MAX;

        assert_eq!(product.value(), Decimal::MAX);
    }

    #[test]
    fn low_stock_includes_threshold() {
        assert!(laptop(10).is_low_stock());
        assert!(laptop(0).is_low_stock());
        assert!(!laptop(11).is_low_stock());
    }

    #[test]
    fn sku_matches_ignores_case() {
        let product = laptop(1);

        assert!(product.sku_matches("mbp-14-001"));
        assert!(!product.sku_matches("MBP-14-002"));
    }

    #[test]
    fn replace_keeps_id() {
        let mut product = laptop(1);
        let mut data = product.data();
        data.name = "Renamed".to_string();

        product.replace(data, date(2024, 6, 1));

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Renamed");
        assert_eq!(product.entry_date, date(2024, 6, 1));
    }
}
