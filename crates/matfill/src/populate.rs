//! Pure mapping from lookup responses to form values.
//!
//! Nothing here touches a form until [`BookFields::write_to`] or [`ArticleFields::write_to`] is
//! called, so the mappings can be checked on their own.

use log::warn;

use crate::{
    api::{
        doi::{ArticleMetadata, Author},
        isbn::IsbnResponse,
    },
    form::{Field, Form, Validation},
};

/// Values written to the book panel after a successful ISBN lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFields {
    pub isbn: String,
    pub title: String,
    /// Authors joined with `", "`.
    pub author: String,
    pub year: String,
    /// Cover url, also used as the preview source.
    pub image: String,
}

/// Values written to the paper panel after a successful DOI lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub doi: String,
    pub title: String,
    /// Composed author names joined with `", "`.
    pub author: String,
    /// Year from the first date part group, empty when there is none.
    pub year: String,
    pub url: String,
}

/// Flattens a list of names or title parts into one display string.
#[must_use]
pub fn join_display<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"given family"`, or whichever part is present. An author without either has no name.
#[must_use]
pub fn compose_author(author: &Author) -> Option<String> {
    let given = author.given.as_deref().filter(|s| !s.is_empty());
    let family = author.family.as_deref().filter(|s| !s.is_empty());

    match (given, family) {
        (Some(given), Some(family)) => Some(format!("{given} {family}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_owned()),
        (None, None) => None,
    }
}

/// Maps an ISBN lookup response onto the book panel values.
#[must_use]
pub fn map_book_response(response: &IsbnResponse) -> BookFields {
    let book = &response.meta;
    BookFields {
        isbn: book.isbn.clone(),
        title: book.title.clone(),
        author: join_display(&book.authors),
        year: book.year.clone(),
        image: response.cover_url().unwrap_or_default().to_owned(),
    }
}

/// Maps a DOI lookup response onto the paper panel values.
#[must_use]
pub fn map_article_response(article: &ArticleMetadata) -> ArticleFields {
    let authors = article
        .author
        .iter()
        .filter_map(compose_author)
        .collect::<Vec<_>>();

    let year = article.publication_year().map_or_else(
        || {
            warn!("No issue year in the date parts of '{}'", article.doi);
            String::new()
        },
        |year| year.to_string(),
    );

    ArticleFields {
        doi: article.doi.clone(),
        title: join_display(&article.title),
        author: join_display(&authors),
        year,
        url: article.url.clone().unwrap_or_default(),
    }
}

impl BookFields {
    /// Writes the values into the book panel and marks the ISBN as valid.
    pub fn write_to<F: Form>(&self, form: &mut F) {
        form.set_value(Field::BookIsbn, &self.isbn);
        form.set_value(Field::BookTitle, &self.title);
        form.set_value(Field::BookAuthor, &self.author);
        form.set_value(Field::BookYear, &self.year);
        form.set_value(Field::BookImage, &self.image);
        form.set_image_source(&self.image);
        form.set_validation(Field::BookIsbn, Validation::Valid);
        form.set_feedback(Field::BookIsbn, None);
    }
}

impl ArticleFields {
    /// Writes the values into the paper panel.
    pub fn write_to<F: Form>(&self, form: &mut F) {
        form.set_value(Field::PaperDoi, &self.doi);
        form.set_value(Field::PaperTitle, &self.title);
        form.set_value(Field::PaperAuthor, &self.author);
        form.set_value(Field::PaperYear, &self.year);
        form.set_value(Field::PaperUrl, &self.url);
    }
}

/// Empties every value that depends on the ISBN and marks it valid, the service simply had no
/// book for it.
pub fn clear_book<F: Form>(form: &mut F) {
    for field in [
        Field::BookTitle,
        Field::BookAuthor,
        Field::BookYear,
        Field::BookEdition,
        Field::BookImage,
    ] {
        form.set_value(field, "");
    }
    form.set_image_source("");
    form.set_validation(Field::BookIsbn, Validation::Valid);
    form.set_feedback(Field::BookIsbn, None);
}

/// Marks the ISBN as rejected and shows `message` next to it, other fields are left as they are.
pub fn reject_isbn<F: Form>(form: &mut F, message: &str) {
    form.set_validation(Field::BookIsbn, Validation::Invalid);
    form.set_feedback(Field::BookIsbn, Some(message));
}
