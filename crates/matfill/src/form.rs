//! The form being filled in, reached only through the [`Form`] trait so any view (a browser
//! document, a terminal, a test) can be driven by the same controller.

use std::{collections::HashMap, fmt};

/// Label of a search control while no lookup is in flight.
pub const SEARCH_LABEL: &str = "Search";
/// Label of a search control while its lookup is in flight.
pub const SEARCHING_LABEL: &str = "Searching...";

/// The input fields of the material form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// The material type selector.
    TypeSelector,
    /// Hidden field carrying the material type with the submitted form.
    MaterialType,
    BookIsbn,
    BookTitle,
    BookAuthor,
    BookYear,
    BookEdition,
    /// Cover image url of the book.
    BookImage,
    PaperDoi,
    PaperTitle,
    PaperAuthor,
    PaperYear,
    PaperUrl,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 13] = [
        Self::TypeSelector,
        Self::MaterialType,
        Self::BookIsbn,
        Self::BookTitle,
        Self::BookAuthor,
        Self::BookYear,
        Self::BookEdition,
        Self::BookImage,
        Self::PaperDoi,
        Self::PaperTitle,
        Self::PaperAuthor,
        Self::PaperYear,
        Self::PaperUrl,
    ];

    /// The element id of the field in the page.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::TypeSelector => "type-add",
            Self::MaterialType => "material-type",
            Self::BookIsbn => "book-add-isbn",
            Self::BookTitle => "book-add-title",
            Self::BookAuthor => "book-add-author",
            Self::BookYear => "book-add-year",
            Self::BookEdition => "book-add-edition",
            Self::BookImage => "book-add-image",
            Self::PaperDoi => "paper-add-doi",
            Self::PaperTitle => "paper-add-title",
            Self::PaperAuthor => "paper-add-author",
            Self::PaperYear => "paper-add-year",
            Self::PaperUrl => "paper-add-url",
        }
    }
}

/// The controls that start a lookup when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchControl {
    /// ISBN search on the book panel.
    BookIsbn,
    /// ISBN search on the paper panel, it searches with the book ISBN field.
    PaperIsbn,
    /// DOI search on the paper panel.
    PaperDoi,
}

impl SearchControl {
    /// The element id of the control in the page.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BookIsbn => "book-add-isbn-search",
            Self::PaperIsbn => "paper-add-isbn-search",
            Self::PaperDoi => "paper-add-doi-search",
        }
    }
}

/// Visual validation state of a field. Being a single value, a field can never be marked valid
/// and invalid at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validation {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

/// Handles on the elements of a material form.
pub trait Form {
    /// Current value of `field`, empty when it has none.
    fn value(&self, field: Field) -> String;

    /// Replaces the value of `field`.
    fn set_value(&mut self, field: Field, value: &str);

    /// Sets the source of the cover preview image.
    fn set_image_source(&mut self, src: &str);

    /// Hides every sub-form panel.
    fn hide_panels(&mut self);

    /// Shows the panel with the element id `id`, returns `false` when there is no such panel.
    fn show_panel(&mut self, id: &str) -> bool;

    /// Sets the visual validation state of `field`.
    fn set_validation(&mut self, field: Field, state: Validation);

    /// Writes `message` to the feedback region of `field`, `None` empties it.
    fn set_feedback(&mut self, field: Field, message: Option<&str>);

    /// Sets the text of a search control.
    fn set_label(&mut self, control: SearchControl, label: &str);
}

/// A [`Form`] held entirely in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryForm {
    values: HashMap<Field, String>,
    image_source: String,
    panels: Vec<(String, bool)>,
    validation: HashMap<Field, Validation>,
    feedback: HashMap<Field, String>,
    labels: HashMap<SearchControl, String>,
}

impl MemoryForm {
    /// Creates an empty form with the given panels, all hidden.
    pub fn new<I, S>(panels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            panels: panels.into_iter().map(|p| (p.into(), false)).collect(),
            ..Self::default()
        }
    }

    /// Ids of the visible panels.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Source of the cover preview image.
    #[must_use]
    pub fn image_source(&self) -> &str {
        &self.image_source
    }

    /// Validation state of `field`.
    #[must_use]
    pub fn validation(&self, field: Field) -> Validation {
        self.validation.get(&field).copied().unwrap_or_default()
    }

    /// Feedback message of `field`.
    #[must_use]
    pub fn feedback(&self, field: Field) -> Option<&str> {
        self.feedback.get(&field).map(String::as_str)
    }

    /// Text of a search control.
    #[must_use]
    pub fn label(&self, control: SearchControl) -> &str {
        self.labels.get(&control).map_or(SEARCH_LABEL, String::as_str)
    }
}

impl Form for MemoryForm {
    fn value(&self, field: Field) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: Field, value: &str) {
        self.values.insert(field, value.to_owned());
    }

    fn set_image_source(&mut self, src: &str) {
        src.clone_into(&mut self.image_source);
    }

    fn hide_panels(&mut self) {
        for (_, visible) in &mut self.panels {
            *visible = false;
        }
    }

    fn show_panel(&mut self, id: &str) -> bool {
        match self.panels.iter_mut().find(|(panel, _)| panel == id) {
            Some((_, visible)) => {
                *visible = true;
                true
            }
            None => false,
        }
    }

    fn set_validation(&mut self, field: Field, state: Validation) {
        self.validation.insert(field, state);
    }

    fn set_feedback(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => self.feedback.insert(field, message.to_owned()),
            None => self.feedback.remove(&field),
        };
    }

    fn set_label(&mut self, control: SearchControl, label: &str) {
        self.labels.insert(control, label.to_owned());
    }
}

impl fmt::Display for MemoryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "panels: {}", self.visible_panels().join(", "))?;
        for field in Field::ALL {
            let value = self.value(field);
            if value.is_empty() {
                continue;
            }
            write!(f, "{:>18}: {value}", field.id())?;
            match self.validation(field) {
                Validation::Neutral => {}
                Validation::Valid => f.write_str(" (valid)")?,
                Validation::Invalid => f.write_str(" (invalid)")?,
            }
            writeln!(f)?;
        }
        if !self.image_source.is_empty() {
            writeln!(f, "{:>18}: {}", "book-add-show-image", self.image_source)?;
        }
        for field in Field::ALL {
            if let Some(message) = self.feedback(field) {
                writeln!(f, "{:>18}! {message}", field.id())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_panel_only_shows_known_panels() {
        let mut form = MemoryForm::new(["book-add", "paper-add"]);

        assert!(form.show_panel("paper-add"));
        assert!(!form.show_panel("video-add"));
        assert_eq!(vec!["paper-add"], form.visible_panels());

        form.hide_panels();
        assert!(form.visible_panels().is_empty());
    }

    #[test]
    fn feedback_can_be_cleared() {
        let mut form = MemoryForm::default();

        form.set_feedback(Field::BookIsbn, Some("bad"));
        assert_eq!(Some("bad"), form.feedback(Field::BookIsbn));

        form.set_feedback(Field::BookIsbn, None);
        assert_eq!(None, form.feedback(Field::BookIsbn));
    }

    #[test]
    fn untouched_state_defaults() {
        let form = MemoryForm::default();

        assert_eq!("", form.value(Field::BookTitle));
        assert_eq!(Validation::Neutral, form.validation(Field::BookIsbn));
        assert_eq!(SEARCH_LABEL, form.label(SearchControl::PaperDoi));
    }

    #[test]
    fn display_lists_filled_fields() {
        let mut form = MemoryForm::new(["book-add"]);
        form.show_panel("book-add");
        form.set_value(Field::BookTitle, "Code Complete");
        form.set_validation(Field::BookIsbn, Validation::Invalid);
        form.set_value(Field::BookIsbn, "123");

        let out = form.to_string();
        assert!(out.starts_with("panels: book-add\n"));
        assert!(out.contains("book-add-title: Code Complete\n"));
        assert!(out.contains("book-add-isbn: 123 (invalid)\n"));
        assert!(!out.contains("paper-add-doi"));
    }
}
