use crate::interact;

use matfill::{
    form::{Field, MemoryForm, SearchControl},
    Config, Controller, Event, Outcome,
};

use clap::Subcommand;
use eyre::{Context, Result};
use log::{info, trace};

type Client = reqwest::blocking::Client;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Fill in the book form by ISBN
    #[clap(arg_required_else_help = true)]
    Isbn {
        /// The ISBN to search for
        isbn: String,

        /// Print the metadata returned by the lookup instead of the filled in form
        #[clap(long)]
        raw: bool,
    },
    /// Fill in the paper form by doi
    #[clap(arg_required_else_help = true)]
    Doi {
        /// The doi to search for
        doi: String,

        /// Print the metadata returned by the lookup instead of the filled in form
        #[clap(long)]
        raw: bool,
    },
    /// Fill in the form interactively, choosing the material type and searching as often as
    /// needed
    Session,
}

impl Commands {
    pub fn execute(self, config: &Config) -> Result<String> {
        match self {
            Commands::Isbn { isbn, raw: true } => matfill::book_by_isbn(config, &isbn)
                .map(|book| format!("{book:#?}"))
                .wrap_err_with(|| format!("Cannot find a book for the ISBN '{isbn}'")),
            Commands::Isbn { isbn, raw: false } => fill(
                config,
                "book",
                Field::BookIsbn,
                &isbn,
                SearchControl::BookIsbn,
            ),
            Commands::Doi { doi, raw: true } => matfill::article_by_doi(config, &doi)
                .map(|article| format!("{article:#?}"))
                .wrap_err_with(|| format!("Cannot find an article for the doi '{doi}'")),
            Commands::Doi { doi, raw: false } => fill(
                config,
                "paper",
                Field::PaperDoi,
                &doi,
                SearchControl::PaperDoi,
            ),
            Commands::Session => {
                trace!("Starting an interactive session");
                interact::run_session(config)
            }
        }
    }
}

pub fn new_controller(config: &Config) -> Controller<Client, MemoryForm> {
    let form = MemoryForm::new(config.panels.iter().cloned());
    Controller::new(Client::new(), form, config)
}

fn fill(
    config: &Config,
    material_type: &str,
    field: Field,
    value: &str,
    control: SearchControl,
) -> Result<String> {
    let mut controller = new_controller(config);
    controller.input(Field::TypeSelector, material_type)?;
    controller.input(field, value)?;

    let outcome = controller
        .dispatch(Event::Clicked(control))
        .wrap_err_with(|| format!("Lookup of '{value}' failed"))?;
    info!("Lookup of '{value}' finished: {outcome:?}");

    let mut message = controller.form().to_string();
    if outcome == Some(Outcome::NotFound) {
        message.push_str("Nothing was found - the form was left for manual entry");
    }
    Ok(message)
}
