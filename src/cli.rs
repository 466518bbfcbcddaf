//! Interactive command loop
//!
//! Reads one command per line, relays it to the [`Session`] and redraws the
//! product table and stats after every command that can change them.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::{
    form::{Field, ProductForm},
    products::{Product, ProductId},
    render::{RenderError, Renderer},
    session::{DeleteOutcome, Session, SubmitOutcome},
};

/// Answer that abandons the product form at any field prompt.
pub const CANCEL: &str = "cancel";

const HELP: &str = "\
Commands:
  list                 show the visible products and stats
  new                  add a product
  edit <id>            edit a product
  delete <id>          delete a product
  search [term...]     search every field; no term clears the search
  category [name...]   show one category; no name shows all
  categories           list the categories in use
  stats                show the stats
  help                 show this help
  quit                 leave

While filling the form, an empty answer keeps the shown value and
'cancel' abandons the form.";

/// Errors from the command loop.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the visible products and stats
    #[command(alias = "ls")]
    List,

    /// Add a product
    New,

    /// Edit a product
    Edit {
        /// Product id
        id: u64,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: u64,
    },

    /// Search every field
    Search {
        /// Search term
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },

    /// Show a single category
    Category {
        /// Category name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },

    /// List the categories in use
    Categories,

    /// Show the stats
    Stats,

    /// Show help
    Help,

    /// Leave
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Line-oriented front end over a [`Session`].
#[derive(Debug)]
pub struct Repl<R, W> {
    session: Session,
    renderer: Renderer,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Create a command loop reading from `input` and writing to `output`.
    pub fn new(session: Session, renderer: Renderer, input: R, output: W) -> Self {
        Self {
            session,
            renderer,
            input,
            output,
        }
    }

    /// Draw the screen, then process commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), CliError> {
        self.draw()?;

        while let Some(line) = self.prompt("> ")? {
            let words: Vec<&str> = line.split_whitespace().collect();

            if words.is_empty() {
                continue;
            }

            let flow = match CommandLine::try_parse_from(words) {
                Ok(command_line) => self.dispatch(command_line.command, argument(&line))?,
                Err(error) => {
                    writeln!(self.output, "{}", error.render())?;
                    writeln!(self.output, "Type 'help' for the list of commands.")?;

                    Flow::Continue
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Redraw => self.draw()?,
                Flow::Quit => break,
            }
        }

        Ok(())
    }

    /// The session, for inspection after the loop ends.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the loop, returning the session and output.
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// `argument` is the raw text after the command word, with inner spacing intact.
    fn dispatch(&mut self, command: Command, argument: &str) -> Result<Flow, CliError> {
        match command {
            Command::List => Ok(Flow::Redraw),
            Command::New => {
                let form = self.session.open_create();

                self.edit_form(form)
            }
            Command::Edit { id } => {
                let id = ProductId::new(id);

                match self.session.open_edit(id) {
                    Some(form) => self.edit_form(form),
                    None => {
                        writeln!(self.output, "Product {id} not found")?;

                        Ok(Flow::Continue)
                    }
                }
            }
            Command::Delete { id } => self.delete(ProductId::new(id)),
            Command::Search { term } => {
                self.session.search(if term.is_empty() { "" } else { argument });

                Ok(Flow::Redraw)
            }
            Command::Category { name } => {
                self.session
                    .filter_by_category(if name.is_empty() { "" } else { argument });

                Ok(Flow::Redraw)
            }
            Command::Categories => {
                let categories = self.session.store().categories();

                self.renderer
                    .write_categories(&mut self.output, &categories)?;

                Ok(Flow::Continue)
            }
            Command::Stats => {
                self.renderer
                    .write_stats(&mut self.output, &self.session.stats())?;

                Ok(Flow::Continue)
            }
            Command::Help => {
                writeln!(self.output, "{HELP}")?;

                Ok(Flow::Continue)
            }
            Command::Quit => Ok(Flow::Quit),
        }
    }

    fn edit_form(&mut self, mut form: ProductForm) -> Result<Flow, CliError> {
        let mode = self.session.mode();
        let mut fields: Vec<Field> = Field::ALL.to_vec();

        writeln!(self.output, "\n== {} ==", mode.title())?;

        loop {
            if !self.fill(&mut form, &fields)? {
                self.session.close_form();
                writeln!(self.output, "Cancelled")?;

                return Ok(Flow::Continue);
            }

            match self.session.submit(&form) {
                Ok(outcome) => {
                    self.report_submit(&outcome)?;

                    return Ok(Flow::Redraw);
                }
                Err(errors) => {
                    self.renderer.write_errors(&mut self.output, &errors)?;

                    fields = errors.iter().map(|(field, _)| field).collect();
                }
            }
        }
    }

    /// Prompt for each field; `false` when the form was cancelled or input ended.
    fn fill(&mut self, form: &mut ProductForm, fields: &[Field]) -> Result<bool, CliError> {
        for &field in fields {
            let current = form.get(field);
            let label = if current.is_empty() {
                format!("{field}: ")
            } else {
                format!("{field} [{current}]: ")
            };

            let Some(answer) = self.prompt(&label)? else {
                return Ok(false);
            };

            if answer.trim() == CANCEL {
                return Ok(false);
            }

            if !answer.trim().is_empty() {
                form.set(field, answer);
            }
        }

        Ok(true)
    }

    fn report_submit(&mut self, outcome: &SubmitOutcome) -> Result<(), CliError> {
        match outcome {
            SubmitOutcome::Created(product) => {
                writeln!(self.output, "Saved product {} ({})", product.id, product.sku)?;
            }
            SubmitOutcome::Updated(product) => {
                writeln!(self.output, "Updated product {} ({})", product.id, product.sku)?;
            }
            SubmitOutcome::Stale(id) => {
                writeln!(self.output, "Product {id} no longer exists")?;
            }
            SubmitOutcome::Rejected(error) => {
                writeln!(self.output, "Product not saved: {error}")?;
            }
        }

        Ok(())
    }

    fn delete(&mut self, id: ProductId) -> Result<Flow, CliError> {
        let Self {
            session,
            input,
            output,
            ..
        } = self;

        let mut confirm_result = Ok(());

        let outcome = session.delete(id, |product| {
            match confirm_delete(input, output, product) {
                Ok(confirmed) => confirmed,
                Err(error) => {
                    confirm_result = Err(error);

                    false
                }
            }
        });

        confirm_result?;

        match outcome {
            DeleteOutcome::Deleted(product) => {
                writeln!(self.output, "Deleted product {} ({})", product.id, product.sku)?;

                Ok(Flow::Redraw)
            }
            DeleteOutcome::Declined => Ok(Flow::Continue),
            DeleteOutcome::NotFound(id) => {
                writeln!(self.output, "Product {id} not found")?;

                Ok(Flow::Continue)
            }
        }
    }

    fn draw(&mut self) -> Result<(), CliError> {
        let view = self.session.view();

        self.renderer
            .write_query(&mut self.output, self.session.query())?;
        self.renderer.write_products(&mut self.output, &view)?;
        self.renderer
            .write_stats(&mut self.output, &self.session.stats())?;

        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, CliError> {
        read_answer(&mut self.input, &mut self.output, text)
    }
}

fn argument(line: &str) -> &str {
    line.trim()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim())
}

fn confirm_delete(
    input: &mut impl BufRead,
    output: &mut impl Write,
    product: &Product,
) -> Result<bool, CliError> {
    let question = format!("Delete product {} ({})? [y/N] ", product.name, product.sku);

    let answer = read_answer(input, output, &question)?.unwrap_or_default();

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn read_answer(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> Result<Option<String>, CliError> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
