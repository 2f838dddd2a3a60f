//! User events and how a [`Controller`] reacts to them.

use log::trace;

use crate::{
    api::Client,
    controller::{Controller, Outcome},
    form::{Field, Form, SearchControl},
    Error,
};

/// A key pressed while a field has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(u32),
}

impl Key {
    /// Key code of the Enter key.
    pub const ENTER_CODE: u32 = 13;

    /// Maps a key code onto a [`Key`].
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        if code == Self::ENTER_CODE {
            Self::Enter
        } else {
            Self::Other(code)
        }
    }
}

/// Something the user did on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The value of a field was changed.
    Changed(Field),
    /// A key was pressed in a field.
    KeyPressed(Field, Key),
    /// A search control was clicked.
    Clicked(SearchControl),
}

impl<C: Client, F: Form> Controller<C, F> {
    /// Reacts to `event`, returning the outcome when it started a lookup.
    ///
    /// - changing the type selector toggles the panels;
    /// - changing the cover url updates the preview;
    /// - Enter in the ISBN or DOI field, or clicking a search control, runs a lookup.
    ///
    /// # Errors
    ///
    /// Errors of the lookup, see [`Controller::finish_isbn`] and [`Controller::finish_doi`].
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Outcome>, Error> {
        trace!("Dispatching {event:?}");
        match event {
            Event::Changed(Field::TypeSelector) => self.change_material_type(),
            Event::Changed(Field::BookImage) => self.sync_image_preview(),
            Event::KeyPressed(Field::BookIsbn, Key::Enter) => {
                return self.search_isbn(SearchControl::BookIsbn).map(Some)
            }
            Event::KeyPressed(Field::PaperDoi, Key::Enter) => {
                return self.search_doi(SearchControl::PaperDoi).map(Some)
            }
            Event::Clicked(control @ (SearchControl::BookIsbn | SearchControl::PaperIsbn)) => {
                return self.search_isbn(control).map(Some)
            }
            Event::Clicked(SearchControl::PaperDoi) => {
                return self.search_doi(SearchControl::PaperDoi).map(Some)
            }
            Event::Changed(_) | Event::KeyPressed(..) => {}
        }
        Ok(None)
    }

    /// Replaces the value of `field` as a user would and dispatches the change.
    ///
    /// # Errors
    ///
    /// See [`Self::dispatch`].
    pub fn input(&mut self, field: Field, value: &str) -> Result<Option<Outcome>, Error> {
        self.form_mut().set_value(field, value);
        self.dispatch(Event::Changed(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        api::ScriptedClient,
        config::Config,
        form::{MemoryForm, SEARCH_LABEL},
        ErrorKind,
    };

    const ISBN_JSON: &str = include_str!("../tests/data/isbn_response.json");
    const DOI_JSON: &str = include_str!("../tests/data/doi_response.json");

    fn controller(responses: Vec<Result<String, Error>>) -> Controller<ScriptedClient, MemoryForm> {
        let config = Config::default();
        let form = MemoryForm::new(config.panels.clone());
        Controller::new(ScriptedClient::new(responses), form, &config)
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::Enter, Key::from_code(13));
        assert_eq!(Key::Other(65), Key::from_code(65));
    }

    #[test]
    fn enter_in_isbn_field_searches() {
        let mut c = controller(vec![Ok(ISBN_JSON.to_owned())]);
        c.input(Field::BookIsbn, "9780735619678").unwrap();

        let outcome = c
            .dispatch(Event::KeyPressed(Field::BookIsbn, Key::from_code(13)))
            .unwrap();

        assert_eq!(Some(Outcome::Populated), outcome);
        assert_eq!("Code Complete", c.form().value(Field::BookTitle));
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut c = controller(vec![]);
        c.input(Field::BookIsbn, "9780735619678").unwrap();

        let outcome = c
            .dispatch(Event::KeyPressed(Field::BookIsbn, Key::from_code(9)))
            .unwrap();

        assert_eq!(None, outcome);
        assert!(c.client().requests().is_empty());
    }

    #[test]
    fn paper_isbn_control_searches_book_isbn() {
        let mut c = controller(vec![Ok(ISBN_JSON.to_owned())]);
        c.input(Field::BookIsbn, "0735619670").unwrap();

        let outcome = c
            .dispatch(Event::Clicked(SearchControl::PaperIsbn))
            .unwrap();

        assert_eq!(Some(Outcome::Populated), outcome);
        assert_eq!(
            vec!["http://localhost:8000/api/isbn/search?isbn=0735619670".to_owned()],
            c.client().requests()
        );
        assert_eq!(SEARCH_LABEL, c.form().label(SearchControl::PaperIsbn));
    }

    #[test]
    fn editing_image_updates_preview_only() {
        let mut c = controller(vec![]);
        c.input(Field::BookTitle, "title").unwrap();

        c.input(Field::BookImage, "http://img/1.png").unwrap();

        assert_eq!("http://img/1.png", c.form().image_source());
        assert_eq!("title", c.form().value(Field::BookTitle));
    }

    #[test]
    fn changing_type_toggles_panels() {
        let mut c = controller(vec![]);

        c.input(Field::TypeSelector, "book").unwrap();
        assert_eq!(vec!["book-add"], c.form().visible_panels());

        c.input(Field::TypeSelector, "").unwrap();
        assert!(c.form().visible_panels().is_empty());
    }

    #[test]
    fn paper_scenario_through_events() {
        let mut c = controller(vec![Ok(DOI_JSON.to_owned())]);

        c.input(Field::TypeSelector, "paper").unwrap();
        c.input(Field::PaperDoi, "10.1/xyz").unwrap();
        let outcome = c.dispatch(Event::Clicked(SearchControl::PaperDoi)).unwrap();

        assert_eq!(Some(Outcome::Populated), outcome);
        let form = c.into_form();
        assert_eq!("10.1/xyz", form.value(Field::PaperDoi));
        assert_eq!("T", form.value(Field::PaperTitle));
        assert_eq!("J Smith", form.value(Field::PaperAuthor));
        assert_eq!("2020", form.value(Field::PaperYear));
        assert_eq!("http://x", form.value(Field::PaperUrl));
    }

    #[test]
    fn lookup_errors_propagate() {
        let mut c = controller(vec![Err(Error::new(ErrorKind::IO, "offline"))]);
        c.input(Field::PaperDoi, "10.1/xyz").unwrap();

        let err = c
            .dispatch(Event::KeyPressed(Field::PaperDoi, Key::Enter))
            .unwrap_err();
        assert_eq!(ErrorKind::IO, err.kind());
    }
}
