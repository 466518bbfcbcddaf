//! Session
//!
//! The state behind one inventory screen: the store, the active search and
//! category filter, and whether the product form is creating or editing.
//! Every presentation intent maps to one method here, and the view and stats
//! are recomputed from scratch whenever they are asked for.

use rusty_money::iso::{Currency, USD};
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    fixtures::{FixtureError, ProductsFixture},
    form::{FormMode, ProductForm},
    products::{Product, ProductId},
    query::ProductQuery,
    stats::InventoryStats,
    store::{ProductNotFound, ProductStore, StoreError},
    validation::{ValidationErrors, validate},
};

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new product was added.
    Created(Product),

    /// An existing product was replaced.
    Updated(Product),

    /// The product being edited no longer exists; nothing changed.
    Stale(ProductId),

    /// The store could not take a new product; nothing changed.
    Rejected(StoreError),
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The product was removed.
    Deleted(Product),

    /// Confirmation was refused; nothing changed.
    Declined,

    /// No product has the id; nothing changed.
    NotFound(ProductId),
}

/// Inventory session state.
#[derive(Debug)]
pub struct Session {
    store: ProductStore,
    query: ProductQuery,
    mode: FormMode,
    currency: &'static Currency,
}

impl Session {
    /// Create a session over a store, priced in `currency`.
    pub fn new(store: ProductStore, currency: &'static Currency) -> Self {
        Self {
            store,
            query: ProductQuery::new(),
            mode: FormMode::Creating,
            currency,
        }
    }

    /// Create a session seeded from a fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture currency is unknown or a product is invalid.
    pub fn from_fixture(
        fixture: ProductsFixture,
        clock: impl Clock + 'static,
    ) -> Result<Self, FixtureError> {
        let currency = fixture.currency()?;
        let store = fixture.into_store(clock)?;

        info!(products = store.len(), "seeded inventory");

        Ok(Self::new(store, currency))
    }

    /// Create a session with an empty store, priced in US dollars.
    pub fn empty(clock: impl Clock + 'static) -> Self {
        Self::new(ProductStore::new(clock), USD)
    }

    /// Open the form for a new product.
    pub fn open_create(&mut self) -> ProductForm {
        self.mode = FormMode::Creating;

        ProductForm::default()
    }

    /// Open the form prefilled with an existing product.
    ///
    /// Returns `None`, leaving the mode unchanged, when the id is unknown.
    pub fn open_edit(&mut self, id: ProductId) -> Option<ProductForm> {
        let form = self.store.find(id).map(ProductForm::from)?;

        self.mode = FormMode::Editing(id);

        Some(form)
    }

    /// Close the form, discarding any editing context.
    pub fn close_form(&mut self) {
        self.mode = FormMode::Creating;
    }

    /// Validate and apply a form submission.
    ///
    /// On success the form closes. On failure the form stays open in its
    /// current mode and the store is untouched.
    ///
    /// # Errors
    ///
    /// Returns the field errors when validation fails.
    pub fn submit(&mut self, form: &ProductForm) -> Result<SubmitOutcome, ValidationErrors> {
        let editing = self.mode.editing();
        let data = validate(form, &self.store, editing)?;

        let outcome = match editing {
            None => match self.store.create(data) {
                Ok(product) => {
                    info!(id = %product.id, sku = %product.sku, "created product");

                    SubmitOutcome::Created(product)
                }
                Err(error) => {
                    warn!(%error, "create rejected");

                    SubmitOutcome::Rejected(error)
                }
            },
            Some(id) => match self.store.update(id, data) {
                Ok(product) => {
                    info!(id = %product.id, sku = %product.sku, "updated product");

                    SubmitOutcome::Updated(product)
                }
                Err(ProductNotFound(id)) => {
                    warn!(%id, "edited product no longer exists");

                    SubmitOutcome::Stale(id)
                }
            },
        };

        self.close_form();

        Ok(outcome)
    }

    /// Delete a product once `confirm` agrees.
    pub fn delete(
        &mut self,
        id: ProductId,
        confirm: impl FnOnce(&Product) -> bool,
    ) -> DeleteOutcome {
        let Some(product) = self.store.find(id) else {
            warn!(%id, "delete requested for unknown product");

            return DeleteOutcome::NotFound(id);
        };

        if !confirm(product) {
            debug!(%id, "delete declined");

            return DeleteOutcome::Declined;
        }

        match self.store.delete(id) {
            Ok(product) => {
                info!(id = %product.id, sku = %product.sku, "deleted product");

                DeleteOutcome::Deleted(product)
            }
            Err(error) => {
                warn!(%id, %error, "delete failed");

                DeleteOutcome::NotFound(id)
            }
        }
    }

    /// Set the free-text search term.
    pub fn search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);

        debug!(search = self.query.search(), "search changed");
    }

    /// Set the category filter; an empty category shows every category.
    pub fn filter_by_category(&mut self, category: impl Into<String>) {
        self.query.set_category(category);

        debug!(category = ?self.query.category(), "category filter changed");
    }

    /// Products visible under the current search and filter.
    pub fn view(&self) -> Vec<&Product> {
        self.query.filter(&self.store)
    }

    /// Stats over the whole store.
    pub fn stats(&self) -> InventoryStats {
        InventoryStats::compute(&self.store)
    }

    /// The product store.
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// The current query.
    pub fn query(&self) -> &ProductQuery {
        &self.query
    }

    /// The current form mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Inventory currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
