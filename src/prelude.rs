//! Stockroom prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    clock::{Clock, FixedClock, SystemClock},
    fixtures::{FixtureError, ProductsFixture},
    form::{Field, FormMode, ProductForm},
    products::{Product, ProductData, ProductId},
    query::{ProductQuery, SearchField},
    render::{RenderError, Renderer},
    session::{DeleteOutcome, Session, SubmitOutcome},
    stats::{InventoryStats, LOW_STOCK_THRESHOLD},
    store::{ProductNotFound, ProductStore, StoreError},
    validation::{FieldError, ValidationErrors, validate},
};
