//! Render
//!
//! Terminal presentation of the product view, the stats panel and form errors.

use std::{fmt::Write as _, io};

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    products::Product, query::ProductQuery, stats::InventoryStats,
    validation::ValidationErrors,
};

/// Message shown when no product matches the current query.
pub const EMPTY_STATE: &str = "No products found";

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Writes inventory screens to a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    currency: &'static Currency,
    color: bool,
}

impl Renderer {
    /// Create a renderer for prices in `currency`, with ANSI colours enabled.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            color: true,
        }
    }

    /// Enable or disable ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Format a price in the renderer's currency.
    pub fn price(&self, product: &Product) -> String {
        Money::from_decimal(product.price, self.currency).to_string()
    }

    /// Write the product table, or the empty state when nothing is visible.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_products(
        &self,
        out: &mut impl io::Write,
        products: &[&Product],
    ) -> Result<(), RenderError> {
        if products.is_empty() {
            writeln!(out, "\n  {EMPTY_STATE}\n")?;

            return Ok(());
        }

        let mut builder = Builder::default();
        let mut stock_colors: SmallVec<[(usize, Color); 16]> = SmallVec::new();

        builder.push_record([
            "#",
            "Product",
            "Description",
            "Price",
            "Stock",
            "Category",
            "Entry Date",
        ]);

        for (idx, product) in products.iter().enumerate() {
            builder.push_record([
                product.id.to_string(),
                format!("{}\n{}", product.name, product.sku),
                product.description.clone(),
                self.price(product),
                product.stock.to_string(),
                product.category.clone(),
                product.entry_date.to_string(),
            ]);

            // header is row 0
            stock_colors.push((idx + 1, stock_color(product)));
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Columns::new(3..5), Alignment::right());

        if self.color {
            table.modify(Rows::first(), Color::BOLD);

            for (row, color) in stock_colors {
                table.modify((row, 4), color);
            }

            writeln!(out, "\n{}", colorize_borders(&table.to_string()))?;
        } else {
            writeln!(out, "\n{table}")?;
        }

        Ok(())
    }

    /// Write the stats panel.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_stats(
        &self,
        out: &mut impl io::Write,
        stats: &InventoryStats,
    ) -> Result<(), RenderError> {
        writeln!(out, " {}", stats.headline(self.currency))?;
        writeln!(
            out,
            " Total products: {}   Total value: {}   Low stock: {}",
            stats.count,
            stats.total_value_thousands(self.currency),
            stats.low_stock_count
        )?;

        Ok(())
    }

    /// Write a one-line description of the active search and filter.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_query(
        &self,
        out: &mut impl io::Write,
        query: &ProductQuery,
    ) -> Result<(), RenderError> {
        let mut line = String::new();

        if !query.search().is_empty() {
            _ = write!(line, " search: \"{}\"", query.search());
        }

        if let Some(category) = query.category() {
            _ = write!(line, " category: {category}");
        }

        if !line.is_empty() {
            writeln!(out, "{line}")?;
        }

        Ok(())
    }

    /// Write each failed field with its message, in form order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_errors(
        &self,
        out: &mut impl io::Write,
        errors: &ValidationErrors,
    ) -> Result<(), RenderError> {
        for (field, error) in errors.iter() {
            if self.color {
                writeln!(out, "  \x1b[31m{field}: {error}\x1b[0m")?;
            } else {
                writeln!(out, "  {field}: {error}")?;
            }
        }

        Ok(())
    }

    /// Write the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_categories(
        &self,
        out: &mut impl io::Write,
        categories: &[&str],
    ) -> Result<(), RenderError> {
        if categories.is_empty() {
            writeln!(out, "  (none)")?;
        }

        for category in categories {
            writeln!(out, "  {category}")?;
        }

        Ok(())
    }
}

fn stock_color(product: &Product) -> Color {
    if product.is_low_stock() {
        Color::new("\x1b[31m", "\x1b[0m")
    } else {
        Color::new("\x1b[32m", "\x1b[0m")
    }
}

/// Dim every run of box-drawing characters.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            out.push_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            out.push_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        out.push_str("\x1b[0m");
    }

    out
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        clock::FixedClock,
        form::{Field, ProductForm},
        products::ProductData,
        store::ProductStore,
        validation::validate,
    };

    use super::*;

    fn store() -> TestResult<ProductStore> {
        let mut store = ProductStore::new(FixedClock(date(2024, 1, 15)));

        for (sku, stock) in [("LOW-1", 3), ("OK-1", 40)] {
            store.create(ProductData {
                name: format!("Product {sku}"),
                sku: sku.to_string(),
                description: "Description".to_string(),
                price: Decimal::new(1250, 2),
                stock,
                supplier: "Supplier".to_string(),
                category: "Tablets".to_string(),
            })?;
        }

        Ok(store)
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>) -> TestResult<String> {
        let mut out = Vec::new();
        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn products_table_lists_each_product() -> TestResult {
        let store = store()?;
        let products: Vec<&Product> = store.iter().collect();
        let renderer = Renderer::new(USD).with_color(false);

        let output = render(|out| renderer.write_products(out, &products))?;

        assert!(output.contains("Product LOW-1"), "{output}");
        assert!(output.contains("OK-1"), "{output}");
        assert!(output.contains("2024-01-15"), "{output}");
        assert!(!output.contains('\x1b'), "plain output has no escapes");

        Ok(())
    }

    #[test]
    fn colored_table_highlights_stock() -> TestResult {
        let store = store()?;
        let products: Vec<&Product> = store.iter().collect();

        let output = render(|out| Renderer::new(USD).write_products(out, &products))?;

        assert!(output.contains("\x1b[31m"), "low stock in red");
        assert!(output.contains("\x1b[32m"), "healthy stock in green");

        Ok(())
    }

    #[test]
    fn empty_view_shows_empty_state() -> TestResult {
        let output = render(|out| Renderer::new(USD).write_products(out, &[]))?;

        assert!(output.contains(EMPTY_STATE));

        Ok(())
    }

    #[test]
    fn stats_panel_shows_counts() -> TestResult {
        let stats = InventoryStats::compute(&store()?);

        let output =
            render(|out| Renderer::new(USD).with_color(false).write_stats(out, &stats))?;

        assert!(output.contains("Total products: 2"), "{output}");
        assert!(output.contains("Low stock: 1"), "{output}");
        assert!(output.contains("Total value: $1K"), "{output}");

        Ok(())
    }

    #[test]
    fn errors_are_listed_in_form_order() -> TestResult {
        let store = store()?;
        let form = ProductForm::default().with(Field::Sku, "low-1");
        let errors = validate(&form, &store, None).err().unwrap_or_default();

        let output =
            render(|out| Renderer::new(USD).with_color(false).write_errors(out, &errors))?;

        let name = output.find("Name: Required");
        let sku = output.find("SKU: SKU exists");

        assert!(name.is_some() && sku.is_some(), "{output}");
        assert!(name < sku, "name is reported before sku");

        Ok(())
    }

    #[test]
    fn query_line_is_empty_without_filters() -> TestResult {
        let output = render(|out| Renderer::new(USD).write_query(out, &ProductQuery::new()))?;

        assert!(output.is_empty());

        let query = ProductQuery::new().with_search("pro").with_category("Tablets");
        let output = render(|out| Renderer::new(USD).write_query(out, &query))?;

        assert!(output.contains("search: \"pro\""), "{output}");
        assert!(output.contains("category: Tablets"), "{output}");

        Ok(())
    }
}
