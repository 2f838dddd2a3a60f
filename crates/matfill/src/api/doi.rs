use log::{info, trace};
use serde::Deserialize;

use crate::{
    config::{DoiShape, Endpoint},
    Error,
};

use super::Client;

/// Article metadata as returned by the DOI lookup (a subset of the Crossref work record).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ArticleMetadata {
    /// The DOI of the article.
    #[serde(rename = "DOI")]
    pub doi: String,
    /// Title parts, usually a single element.
    #[serde(default)]
    pub title: Vec<String>,
    /// Authors in the order the service lists them.
    #[serde(default)]
    pub author: Vec<Author>,
    /// Issue date of the article.
    #[serde(default)]
    pub issued: Option<Issued>,
    /// Canonical url of the article.
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

/// An author of an article, either name part may be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Given name(s).
    #[serde(default)]
    pub given: Option<String>,
    /// Family name.
    #[serde(default)]
    pub family: Option<String>,
}

/// Date of an article as `[[year, month, day]]` date parts.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Issued {
    /// Date part groups, Crossref uses `null` for unknown parts.
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl ArticleMetadata {
    /// The year of the first date part group, if the structure holds one.
    #[must_use]
    pub fn publication_year(&self) -> Option<i32> {
        self.issued
            .as_ref()
            .and_then(|issued| issued.date_parts.first())
            .and_then(|parts| parts.first())
            .copied()
            .flatten()
    }
}

#[derive(Deserialize)]
struct Nested {
    info: ArticleMetadata,
}

/// Looks up the article for `doi` at the DOI search endpoint, reading the body with `shape`.
///
/// # Errors
///
/// See [`Client::get_json`], a body in the other [`DoiShape`] is a deserialize error.
pub fn search<C: Client>(
    client: &C,
    endpoint: &Endpoint,
    shape: DoiShape,
    doi: &str,
) -> Result<ArticleMetadata, Error> {
    let url = endpoint.doi_search_url();
    info!("Searching for doi '{doi}' at '{url}'");

    let query = [("doi", doi)];
    let article = match shape {
        DoiShape::Nested => client.get_json::<Nested>(&url, &query)?.info,
        DoiShape::TopLevel => client.get_json(&url, &query)?,
    };

    trace!("Request was successful");
    Ok(article)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{assert_url, impl_text_producer, MockClient},
        config::{Area, DoiShape, Endpoint},
        ErrorKind,
    };

    use super::{ArticleMetadata, Author};

    const ARTICLE_JSON: &str = include_str!("../../tests/data/doi_article.json");
    const NESTED_JSON: &str = include_str!("../../tests/data/doi_response.json");

    impl_text_producer! {
        TopLevelProducer => Ok(ARTICLE_JSON.to_owned()),
        NestedProducer => Ok(NESTED_JSON.to_owned()),
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("http://localhost:8000", Area::Teacher)
    }

    #[test]
    fn article_can_be_derived_from_json() {
        let article: ArticleMetadata = serde_json::from_str(ARTICLE_JSON).unwrap();

        assert_eq!("10.1145/3360575", article.doi);
        assert_eq!(4, article.author.len());
        assert_eq!(
            Author {
                given: None,
                family: Some("Kang".to_owned())
            },
            article.author[2]
        );
        assert_eq!(Some(2019), article.publication_year());
    }

    #[test]
    fn nested_shape_reads_info() {
        let article = super::search(
            &MockClient::<NestedProducer>::default(),
            &endpoint(),
            DoiShape::Nested,
            "10.1/xyz",
        )
        .unwrap();

        assert_eq!("10.1/xyz", article.doi);
        assert_url!("http://localhost:8000/teacher/api/doi/search?doi=10.1/xyz");
    }

    #[test]
    fn top_level_shape_reads_body() {
        let article = super::search(
            &MockClient::<TopLevelProducer>::default(),
            &endpoint(),
            DoiShape::TopLevel,
            "10.1145/3360575",
        )
        .unwrap();

        assert_eq!(Some("http://dx.doi.org/10.1145/3360575"), article.url.as_deref());
    }

    #[test]
    fn wrong_shape_is_deserialize_error() {
        let err = super::search(
            &MockClient::<TopLevelProducer>::default(),
            &endpoint(),
            DoiShape::Nested,
            "10.1145/3360575",
        )
        .unwrap_err();

        assert_eq!(ErrorKind::Deserialize, err.kind());
    }

    #[test]
    fn publication_year_without_date_parts() {
        let mut article: ArticleMetadata =
            serde_json::from_str(r#"{ "DOI": "d", "issued": { "date-parts": [[null]] } }"#)
                .unwrap();
        assert_eq!(None, article.publication_year());

        article.issued = None;
        assert_eq!(None, article.publication_year());

        article = serde_json::from_str(r#"{ "DOI": "d", "issued": { "date-parts": [] } }"#)
            .unwrap();
        assert_eq!(None, article.publication_year());
    }
}
