//! Product Store

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    products::{Product, ProductData, ProductId},
};

/// Errors raised when adding products.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Two seeded products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// The id counter cannot move past the given id.
    #[error("no product ids left after {0}")]
    IdsExhausted(ProductId),
}

/// No product has the given id.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("product {0} not found")]
pub struct ProductNotFound(pub ProductId);

/// Ordered, in-memory product collection.
///
/// New products append to the end, updates keep their position, and ids come
/// from a counter that only moves forward, so a deleted id is never handed out again.
#[derive(Debug)]
pub struct ProductStore {
    products: Vec<Product>,
    next_id: u64,
    clock: Box<dyn Clock>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    /// Create a store holding the given products, in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if two products share an id.
    pub fn from_products(
        clock: impl Clock + 'static,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new(clock);

        for product in products {
            store.insert(product)?;
        }

        Ok(store)
    }

    /// Append an already identified product, keeping the id counter ahead of it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the id is already present, or
    /// [`StoreError::IdsExhausted`] if no id would be left after it.
    pub fn insert(&mut self, product: Product) -> Result<(), StoreError> {
        if self.find(product.id).is_some() {
            return Err(StoreError::DuplicateId(product.id));
        }

        let after = product
            .id
            .get()
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(product.id))?;

        self.next_id = self.next_id.max(after);
        self.products.push(product);

        Ok(())
    }

    /// Create a product with a fresh id and today's date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] once the id counter has run out.
    pub fn create(&mut self, data: ProductData) -> Result<Product, StoreError> {
        let id = ProductId::new(self.next_id);

        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(id))?;

        let product = Product::new(id, data, self.clock.today());
        self.products.push(product.clone());

        Ok(product)
    }

    /// Replace all fields of a product except its id, refreshing the entry date.
    ///
    /// # Errors
    ///
    /// Returns [`ProductNotFound`] if no product has the id.
    pub fn update(
        &mut self,
        id: ProductId,
        data: ProductData,
    ) -> Result<Product, ProductNotFound> {
        let today = self.clock.today();

        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(ProductNotFound(id))?;

        product.replace(data, today);

        Ok(product.clone())
    }

    /// Remove a product, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ProductNotFound`] if no product has the id.
    pub fn delete(&mut self, id: ProductId) -> Result<Product, ProductNotFound> {
        let index = self
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or(ProductNotFound(id))?;

        Ok(self.products.remove(index))
    }

    /// Find a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Find a product by SKU (case-insensitive), skipping `excluding`.
    pub fn find_by_sku(&self, sku: &str, excluding: Option<ProductId>) -> Option<&Product> {
        self.products
            .iter()
            .filter(|product| Some(product.id) != excluding)
            .find(|product| product.sku_matches(sku))
    }

    /// All products in store order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate products in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Distinct categories, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<'a> IntoIterator for &'a ProductStore {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::clock::{FixedClock, MockClock};

    use super::*;

    fn data(sku: &str, stock: u32) -> ProductData {
        ProductData {
            name: format!("Product {sku}"),
            sku: sku.to_string(),
            description: "Description".to_string(),
            price: Decimal::new(1999, 2),
            stock,
            supplier: "Supplier".to_string(),
            category: "Laptops".to_string(),
        }
    }

    fn store() -> ProductStore {
        ProductStore::new(FixedClock(date(2024, 5, 1)))
    }

    fn seeded_with(id: u64) -> TestResult<ProductStore> {
        let seeded = Product::new(ProductId::new(id), data("S", 1), date(2024, 1, 1));

        Ok(ProductStore::from_products(
            FixedClock(date(2024, 1, 2)),
            [seeded],
        )?)
    }

    #[test]
    fn create_then_find_returns_input_with_id_and_date() -> TestResult {
        let mut store = store();

        let id = store.create(data("X1", 5))?.id;

        let found = store.find(id);

        assert_eq!(found.map(Product::data), Some(data("X1", 5)));
        assert_eq!(found.map(|p| p.entry_date), Some(date(2024, 5, 1)));

        Ok(())
    }

    #[test]
    fn create_appends_with_increasing_ids() -> TestResult {
        let mut store = store();

        let a = store.create(data("A", 1))?.id;
        let b = store.create(data("B", 1))?.id;

        assert!(b > a, "ids should increase");
        assert_eq!(
            store.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![a, b]
        );

        Ok(())
    }

    #[test]
    fn create_uses_clock_date() -> TestResult {
        let mut clock = MockClock::new();
        clock.expect_today().times(1).return_const(date(2030, 12, 31));

        let mut store = ProductStore::new(clock);

        assert_eq!(store.create(data("A", 1))?.entry_date, date(2030, 12, 31));

        Ok(())
    }

    #[test]
    fn ids_are_not_reused_after_delete() -> TestResult {
        let mut store = store();

        let a = store.create(data("A", 1))?.id;
        store.delete(a)?;
        let b = store.create(data("B", 1))?.id;

        assert_ne!(a, b);

        Ok(())
    }

    #[test]
    fn update_replaces_fields_and_keeps_position() -> TestResult {
        let mut clock = MockClock::new();
        let mut seq = mockall::Sequence::new();
        clock
            .expect_today()
            .times(2)
            .in_sequence(&mut seq)
            .return_const(date(2024, 1, 1));
        clock
            .expect_today()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(date(2024, 2, 1));

        let mut store = ProductStore::new(clock);
        let a = store.create(data("A", 1))?.id;
        let b = store.create(data("B", 1))?.id;

        let updated = store.update(a, data("A2", 40))?;

        assert_eq!(updated.id, a);
        assert_eq!(updated.data(), data("A2", 40));
        assert_eq!(updated.entry_date, date(2024, 2, 1));
        assert_eq!(
            store.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![a, b]
        );

        Ok(())
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store();

        let result = store.update(ProductId::new(42), data("A", 1));

        assert_eq!(result.err(), Some(ProductNotFound(ProductId::new(42))));
    }

    #[test]
    fn delete_removes_and_preserves_order() -> TestResult {
        let mut store = store();
        let a = store.create(data("A", 1))?.id;
        let b = store.create(data("B", 1))?.id;
        let c = store.create(data("C", 1))?.id;

        let removed = store.delete(b)?;

        assert_eq!(removed.sku, "B");
        assert!(store.find(b).is_none());
        assert_eq!(
            store.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![a, c]
        );

        Ok(())
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let mut store = store();

        assert_eq!(
            store.delete(ProductId::new(7)),
            Err(ProductNotFound(ProductId::new(7)))
        );
    }

    #[test]
    fn find_by_sku_ignores_case_and_excluded_id() -> TestResult {
        let mut store = store();
        let a = store.create(data("X1", 1))?.id;

        assert_eq!(store.find_by_sku("x1", None).map(|p| p.id), Some(a));
        assert!(store.find_by_sku("x1", Some(a)).is_none());

        Ok(())
    }

    #[test]
    fn from_products_continues_ids_after_largest() -> TestResult {
        let mut store = seeded_with(10)?;

        assert_eq!(store.create(data("N", 1))?.id, ProductId::new(11));

        Ok(())
    }

    #[test]
    fn from_products_rejects_duplicate_ids() {
        let first = Product::new(ProductId::new(1), data("A", 1), date(2024, 1, 1));
        let second = Product::new(ProductId::new(1), data("B", 1), date(2024, 1, 1));

        let result = ProductStore::from_products(FixedClock(date(2024, 1, 2)), [first, second]);

        assert_eq!(
            result.err(),
            Some(StoreError::DuplicateId(ProductId::new(1)))
        );
    }

    #[test]
    fn largest_id_cannot_be_seeded() {
        let last = Product::new(ProductId::new(u64::MAX), data("S", 1), date(2024, 1, 1));

        let result = ProductStore::from_products(FixedClock(date(2024, 1, 2)), [last]);

        assert_eq!(
            result.err(),
            Some(StoreError::IdsExhausted(ProductId::new(u64::MAX)))
        );
    }

    #[test]
    fn create_stops_when_ids_run_out() -> TestResult {
        let mut store = seeded_with(u64::MAX - 1)?;

        let result = store.create(data("N", 1));

        assert_eq!(
            result.err(),
            Some(StoreError::IdsExhausted(ProductId::new(u64::MAX)))
        );
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find_by_sku("s", None).map(|p| p.id),
            Some(ProductId::new(u64::MAX - 1))
        );

        Ok(())
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() -> TestResult {
        let mut store = store();
        let mut phone = data("P1", 1);
        phone.category = "Smartphones".to_string();

        store.create(data("L1", 1))?;
        store.create(phone.clone())?;
        phone.sku = "P2".to_string();
        store.create(phone)?;
        store.create(data("L2", 1))?;

        assert_eq!(store.categories(), vec!["Laptops", "Smartphones"]);

        Ok(())
    }
}
