//! Query Engine

use crate::{products::Product, store::ProductStore};

/// A product field covered by free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Product id
    Id,
    /// Product name
    Name,
    /// Stock keeping unit
    Sku,
    /// Description
    Description,
    /// Unit price
    Price,
    /// Units on hand
    Stock,
    /// Supplier
    Supplier,
    /// Category
    Category,
    /// Entry date
    EntryDate,
}

impl SearchField {
    /// Every searchable field.
    pub const ALL: [SearchField; 9] = [
        SearchField::Id,
        SearchField::Name,
        SearchField::Sku,
        SearchField::Description,
        SearchField::Price,
        SearchField::Stock,
        SearchField::Supplier,
        SearchField::Category,
        SearchField::EntryDate,
    ];

    /// The field's text as seen by search.
    pub fn text(self, product: &Product) -> String {
        match self {
            SearchField::Id => product.id.to_string(),
            SearchField::Name => product.name.clone(),
            SearchField::Sku => product.sku.clone(),
            SearchField::Description => product.description.clone(),
            SearchField::Price => product.price.to_string(),
            SearchField::Stock => product.stock.to_string(),
            SearchField::Supplier => product.supplier.clone(),
            SearchField::Category => product.category.clone(),
            SearchField::EntryDate => product.entry_date.to_string(),
        }
    }
}

/// Search term and category filter producing the visible products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    search: String,
    category: Option<String>,
}

impl ProductQuery {
    /// Query matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ProductQuery::set_search`].
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    /// Builder-style [`ProductQuery::set_category`].
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    /// Replace the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Replace the category filter; an empty category clears it.
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();

        self.category = (!category.is_empty()).then_some(category);
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current category filter.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Whether any field contains the search term, ignoring case.
    pub fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();

        SearchField::ALL
            .iter()
            .any(|field| field.text(product).to_lowercase().contains(&term))
    }

    /// Whether the product is in the filtered category.
    pub fn matches_category(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
    }

    /// Whether the product passes both the search and the category filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product)
    }

    /// Matching products, in store order.
    pub fn filter<'s>(&self, store: &'s ProductStore) -> Vec<&'s Product> {
        store.iter().filter(|product| self.matches(product)).collect()
    }
}
