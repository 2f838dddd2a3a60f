use log::{info, trace};
use serde::Deserialize;

use crate::{config::Endpoint, Error};

use super::Client;

/// Success body of the ISBN search endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct IsbnResponse {
    /// The book found for the ISBN.
    pub meta: BookMetadata,
    /// Free text description, not used by the form.
    #[serde(default)]
    pub desc: Option<String>,
    /// Cover links, `null` when the service has none.
    #[serde(default)]
    pub cover: Option<Cover>,
}

/// Book metadata as returned by the ISBN lookup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BookMetadata {
    /// ISBN-13 of the book.
    #[serde(rename = "ISBN-13")]
    pub isbn: String,
    /// Title of the book.
    #[serde(rename = "Title")]
    pub title: String,
    /// Authors in the order the service lists them.
    #[serde(rename = "Authors", default)]
    pub authors: Vec<String>,
    /// Publisher, not shown on the form.
    #[serde(rename = "Publisher", default)]
    pub publisher: Option<String>,
    /// Language code, not shown on the form.
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    /// Publication year, kept as the service formats it.
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Cover image url chosen by the backend.
    #[serde(default)]
    pub img: Option<String>,
    /// Cover thumbnail url.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Cover links of a book.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Cover {
    /// Small thumbnail url.
    #[serde(rename = "smallThumbnail", default)]
    pub small_thumbnail: Option<String>,
    /// Thumbnail url.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl IsbnResponse {
    /// The cover image url of the book: `img`, then `thumbnail`, then the cover thumbnail.
    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.meta
            .img
            .as_deref()
            .or(self.meta.thumbnail.as_deref())
            .or_else(|| self.cover.as_ref().and_then(|c| c.thumbnail.as_deref()))
    }
}

/// Looks up the book for `isbn` at the ISBN search endpoint.
///
/// # Errors
///
/// See [`Client::get_json`].
pub fn search<C: Client>(client: &C, endpoint: &Endpoint, isbn: &str) -> Result<IsbnResponse, Error> {
    let url = endpoint.isbn_search_url();
    info!("Searching for ISBN '{isbn}' at '{url}'");

    let response = client.get_json(&url, &[("isbn", isbn)])?;

    trace!("Request was successful");
    Ok(response)
}
