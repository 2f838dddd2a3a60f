#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # matfill
//!
//! matfill fills in a study material form from two lookup endpoints: book metadata by ISBN and
//! article metadata by DOI. A [`Controller`] reacts to user [`Event`]s on a [`form::Form`],
//! toggles the sub-form panel of the chosen material type, sends one request per search action
//! and maps the response onto the form fields (or onto the validation state of the ISBN field
//! when the lookup fails).
//!
//! ```no_run
//! use matfill::{form::{Field, MemoryForm, SearchControl}, Config, Controller, Event};
//!
//! # fn main() -> Result<(), matfill::Error> {
//! let config = Config::default();
//! let form = MemoryForm::new(config.panels.clone());
//! let mut controller = Controller::new(reqwest::blocking::Client::new(), form, &config);
//!
//! controller.input(Field::TypeSelector, "book")?;
//! controller.input(Field::BookIsbn, "9780735619678")?;
//! controller.dispatch(Event::Clicked(SearchControl::BookIsbn))?;
//!
//! println!("{}", controller.form());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod controller;
mod error;
pub mod event;
pub mod form;
pub mod populate;

pub use config::Config;
pub use controller::{Controller, Outcome};
pub use error::{Error, ErrorKind};
pub use event::{Event, Key};

use api::{doi::ArticleMetadata, isbn::IsbnResponse};
use log::trace;

type Client = reqwest::blocking::Client;

/// Looks up the book for `isbn` with the endpoints of `config`.
///
/// # Errors
///
/// See [`api::Client::get_json`].
#[inline]
pub fn book_by_isbn(config: &Config, isbn: &str) -> Result<IsbnResponse, Error> {
    trace!("Search book by ISBN of '{isbn}'");
    api::isbn::search(&Client::new(), &config.endpoint(), isbn.trim())
}

/// Looks up the article for `doi` with the endpoints of `config`.
///
/// # Errors
///
/// See [`api::Client::get_json`].
#[inline]
pub fn article_by_doi(config: &Config, doi: &str) -> Result<ArticleMetadata, Error> {
    trace!("Search article by doi of '{doi}'");
    api::doi::search(
        &Client::new(),
        &config.endpoint(),
        config.doi_response,
        doi.trim(),
    )
}
