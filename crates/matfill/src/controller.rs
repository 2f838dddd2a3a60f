//! The lookup-and-populate controller.
//!
//! A [`Controller`] owns a [`Client`] and a [`Form`] and performs exactly one request per user
//! action. Every lookup is issued under a [`Ticket`]; issuing another lookup of the same kind
//! makes the earlier ticket stale, and a response that arrives under a stale ticket is dropped
//! without touching the form. The label of its search control is still reset when no newer
//! lookup was started from that control.

use std::collections::HashMap;

use log::{info, trace, warn};

use crate::{
    api::{self, doi::ArticleMetadata, isbn::IsbnResponse, Client},
    config::{Config, DoiShape, Endpoint},
    form::{Field, Form, SearchControl, SEARCHING_LABEL, SEARCH_LABEL},
    populate::{clear_book, map_article_response, map_book_response, reject_isbn},
    Error, ErrorKind,
};

/// The two kinds of lookup, each with its own ticket sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKind {
    Isbn,
    Doi,
}

/// Proof that a lookup was issued, needed to apply its response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    kind: LookupKind,
    seq: u64,
    control: SearchControl,
}

impl Ticket {
    /// The kind of lookup the ticket was issued for.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        self.kind
    }
}

/// What a finished lookup did to the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The fields were filled from the response.
    Populated,
    /// The ISBN was rejected and marked invalid.
    Rejected,
    /// Nothing was found, for an ISBN the dependent fields were cleared.
    NotFound,
    /// A newer lookup of the same kind was issued, the response was discarded.
    Stale,
    /// The identifier was empty so no request was sent.
    Skipped,
}

#[derive(Default)]
struct Tickets {
    isbn: u64,
    doi: u64,
    /// Latest ticket issued from each search control.
    controls: HashMap<SearchControl, Ticket>,
}

impl Tickets {
    fn current(&mut self, kind: LookupKind) -> &mut u64 {
        match kind {
            LookupKind::Isbn => &mut self.isbn,
            LookupKind::Doi => &mut self.doi,
        }
    }

    fn issue(&mut self, kind: LookupKind, control: SearchControl) -> Ticket {
        let seq = self.current(kind);
        *seq += 1;
        let ticket = Ticket {
            kind,
            seq: *seq,
            control,
        };
        self.controls.insert(control, ticket);
        ticket
    }

    fn is_latest_for_control(&self, ticket: Ticket) -> bool {
        self.controls.get(&ticket.control) == Some(&ticket)
    }
}

/// Binds a [`Form`] to the ISBN and DOI lookup endpoints.
pub struct Controller<C, F> {
    client: C,
    form: F,
    endpoint: Endpoint,
    doi_shape: DoiShape,
    invalid_isbn_message: String,
    tickets: Tickets,
}

impl<C: Client, F: Form> Controller<C, F> {
    /// Creates a [`Controller`] driving `form` with requests sent through `client`.
    pub fn new(client: C, form: F, config: &Config) -> Self {
        Self {
            client,
            form,
            endpoint: config.endpoint(),
            doi_shape: config.doi_response,
            invalid_isbn_message: config.invalid_isbn_message.clone(),
            tickets: Tickets::default(),
        }
    }

    /// The form being driven.
    pub const fn form(&self) -> &F {
        &self.form
    }

    /// Mutable access to the form, e.g. to type into a field before dispatching an event.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Gives back the form.
    #[allow(clippy::missing_const_for_fn)] // drop is not const
    pub fn into_form(self) -> F {
        self.form
    }

    /// The client requests are sent through.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Hides every panel, then shows `#{type}-add` for the current material type, if any.
    pub fn change_material_type(&mut self) {
        let material_type = self.form.value(Field::TypeSelector);
        trace!("Material type changed to '{material_type}'");

        self.form.hide_panels();
        if material_type.is_empty() {
            return;
        }

        let panel = format!("{material_type}-add");
        if !self.form.show_panel(&panel) {
            trace!("No panel '{panel}' for material type '{material_type}'");
        }
    }

    /// Mirrors the cover url field into the preview image.
    pub fn sync_image_preview(&mut self) {
        let src = self.form.value(Field::BookImage);
        self.form.set_image_source(&src);
    }

    /// Issues a ticket for a lookup of `kind` started from `control`, any earlier ticket of the
    /// same kind becomes stale.
    pub fn begin(&mut self, kind: LookupKind, control: SearchControl) -> Ticket {
        let ticket = self.tickets.issue(kind, control);
        self.form.set_label(control, SEARCHING_LABEL);
        ticket
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        if *self.tickets.current(ticket.kind) == ticket.seq {
            self.form.set_label(ticket.control, SEARCH_LABEL);
            true
        } else {
            warn!("Discarding stale {:?} response #{}", ticket.kind, ticket.seq);
            if self.tickets.is_latest_for_control(ticket) {
                self.form.set_label(ticket.control, SEARCH_LABEL);
            }
            false
        }
    }

    /// Applies the result of an ISBN lookup.
    ///
    /// # Errors
    ///
    /// A response that could not be read ([`ErrorKind::Deserialize`]) is returned as is and the
    /// fields are left untouched.
    pub fn finish_isbn(
        &mut self,
        ticket: Ticket,
        result: Result<IsbnResponse, Error>,
    ) -> Result<Outcome, Error> {
        if !self.accept(ticket) {
            return Ok(Outcome::Stale);
        }

        match result {
            Ok(response) => {
                info!("Filling book '{}'", response.meta.title);
                map_book_response(&response).write_to(&mut self.form);
                let material_type = self.form.value(Field::TypeSelector);
                self.form.set_value(Field::MaterialType, &material_type);
                Ok(Outcome::Populated)
            }
            Err(err) => match err.kind() {
                ErrorKind::Invalid => {
                    warn!("{err}");
                    reject_isbn(&mut self.form, &self.invalid_isbn_message);
                    Ok(Outcome::Rejected)
                }
                ErrorKind::NoValue | ErrorKind::IO => {
                    warn!("No book found: {err}");
                    clear_book(&mut self.form);
                    Ok(Outcome::NotFound)
                }
                ErrorKind::Deserialize => Err(err),
            },
        }
    }

    /// Applies the result of a DOI lookup. A DOI that is not found leaves the form as it is.
    ///
    /// # Errors
    ///
    /// Transport and deserialize errors are returned as is and the fields are left untouched.
    pub fn finish_doi(
        &mut self,
        ticket: Ticket,
        result: Result<ArticleMetadata, Error>,
    ) -> Result<Outcome, Error> {
        if !self.accept(ticket) {
            return Ok(Outcome::Stale);
        }

        match result {
            Ok(article) => {
                info!("Filling article '{}'", article.doi);
                map_article_response(&article).write_to(&mut self.form);
                Ok(Outcome::Populated)
            }
            Err(err) if matches!(err.kind(), ErrorKind::NoValue | ErrorKind::Invalid) => {
                warn!("No article found: {err}");
                Ok(Outcome::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    /// Looks up the book for the trimmed value of the ISBN field and applies the response.
    ///
    /// # Errors
    ///
    /// See [`Self::finish_isbn`].
    pub fn search_isbn(&mut self, control: SearchControl) -> Result<Outcome, Error> {
        let value = self.form.value(Field::BookIsbn);
        let isbn = value.trim();
        if isbn.is_empty() {
            trace!("ISBN field is empty, nothing to search");
            return Ok(Outcome::Skipped);
        }

        let ticket = self.begin(LookupKind::Isbn, control);
        let result = api::isbn::search(&self.client, &self.endpoint, isbn);
        self.finish_isbn(ticket, result)
    }

    /// Looks up the article for the trimmed value of the DOI field and applies the response.
    ///
    /// # Errors
    ///
    /// See [`Self::finish_doi`].
    pub fn search_doi(&mut self, control: SearchControl) -> Result<Outcome, Error> {
        let value = self.form.value(Field::PaperDoi);
        let doi = value.trim();
        if doi.is_empty() {
            trace!("DOI field is empty, nothing to search");
            return Ok(Outcome::Skipped);
        }

        let ticket = self.begin(LookupKind::Doi, control);
        let result = api::doi::search(&self.client, &self.endpoint, self.doi_shape, doi);
        self.finish_doi(ticket, result)
    }
}
