//! Product Form

use std::fmt;

use crate::products::{Product, ProductId};

/// An editable product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
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
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Sku,
        Field::Description,
        Field::Price,
        Field::Stock,
        Field::Supplier,
        Field::Category,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Sku => "SKU",
            Field::Description => "Description",
            Field::Price => "Price",
            Field::Stock => "Stock",
            Field::Supplier => "Supplier",
            Field::Category => "Category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form input, one string per field, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Description
    pub description: String,

    /// Unit price
    pub price: String,

    /// Units on hand
    pub stock: String,

    /// Supplier
    pub supplier: String,

    /// Category
    pub category: String,
}

impl ProductForm {
    /// Raw value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Sku => &self.sku,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Stock => &self.stock,
            Field::Supplier => &self.supplier,
            Field::Category => &self.category,
        }
    }

    /// Set the raw value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Sku => &mut self.sku,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
            Field::Stock => &mut self.stock,
            Field::Supplier => &mut self.supplier,
            Field::Category => &mut self.category,
        };

        *slot = value.into();
    }

    /// Builder-style [`ProductForm::set`].
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            supplier: product.supplier.clone(),
            category: product.category.clone(),
        }
    }
}

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// No editing context
    #[default]
    Creating,

    /// Bound to an existing product
    Editing(ProductId),
}

impl FormMode {
    /// The product being edited, if any.
    pub fn editing(self) -> Option<ProductId> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    /// Form title.
    pub fn title(self) -> &'static str {
        match self {
            FormMode::Creating => "New Product",
            FormMode::Editing(_) => "Edit Product",
        }
    }

    /// Submit button label.
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Creating => "Save",
            FormMode::Editing(_) => "Update",
        }
    }
}
