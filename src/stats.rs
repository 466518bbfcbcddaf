//! Inventory Stats

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

use crate::store::ProductStore;

/// Products with stock at or below this many units count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Summary figures over the whole store, independent of any search or filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryStats {
    /// Number of products
    pub count: usize,

    /// Sum of `price * stock`, capped at [`Decimal::MAX`]
    pub total_value: Decimal,

    /// Number of products at or below [`LOW_STOCK_THRESHOLD`]
    pub low_stock_count: usize,
}

impl InventoryStats {
    /// Aggregate the store.
    pub fn compute(store: &ProductStore) -> Self {
        store.iter().fold(Self::default(), |mut stats, product| {
            stats.count += 1;
            stats.total_value = stats.total_value.saturating_add(product.value());

            if product.is_low_stock() {
                stats.low_stock_count += 1;
            }

            stats
        })
    }

    /// Total value as money in the given currency.
    pub fn total_value_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_decimal(self.total_value, currency)
    }

    /// Total value in whole thousands, e.g. `$82K`.
    pub fn total_value_thousands(&self, currency: &'static Currency) -> String {
        let thousands = (self.total_value / Decimal::ONE_THOUSAND)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        format!("{}{thousands}K", currency.symbol)
    }

    /// One-line summary, e.g. `4 products • $82,499.43 total`.
    pub fn headline(&self, currency: &'static Currency) -> String {
        format!(
            "{} products • {} total",
            self.count,
            self.total_value_money(currency)
        )
    }
}
