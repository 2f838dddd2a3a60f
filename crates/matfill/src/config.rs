//! Runtime configuration for the lookup endpoints and the form being driven.
//!
//! A [`Config`] is usually read from a TOML file, every key is optional:
//!
//! ```toml
//! base-url = "https://materials.example.org"
//! area = "teacher"
//! doi-response = "top-level"
//! panels = ["book-add", "paper-add", "other-add"]
//! ```

use std::{path::Path, str::FromStr};

use log::trace;
use serde::Deserialize;

use crate::{Error, ErrorKind};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The fixed feedback written next to the ISBN field when the lookup service rejects it.
pub const DEFAULT_INVALID_ISBN_MESSAGE: &str = "This ISBN is not valid, it failed the checksum validation.";

/// The deployment area the lookup endpoints are served from.
///
/// Both areas share the same query contract and only differ in the path prefix.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Area {
    /// Endpoints under `/api`.
    #[default]
    Public,
    /// Endpoints under `/teacher/api`, the elevated-privilege area.
    Teacher,
}

impl Area {
    /// The path prefix of the lookup endpoints in this area.
    #[must_use]
    pub const fn api_prefix(self) -> &'static str {
        match self {
            Self::Public => "/api",
            Self::Teacher => "/teacher/api",
        }
    }
}

impl FromStr for Area {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "teacher" => Ok(Self::Teacher),
            other => Err(Error::new(
                ErrorKind::Deserialize,
                format!("Unknown area '{other}', expected 'public' or 'teacher'"),
            )),
        }
    }
}

/// Where the DOI endpoint puts the article in its success body.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DoiShape {
    /// `{ "info": { ..article.. } }`
    #[default]
    Nested,
    /// The article object is the whole body.
    TopLevel,
}

/// Resolved URLs of the two lookup endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    area: Area,
}

impl Endpoint {
    /// Creates an [`Endpoint`], any trailing `/` on the base url is ignored.
    #[must_use]
    pub fn new(base_url: &str, area: Area) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            area,
        }
    }

    /// `<base>/<area>/isbn/search`
    #[must_use]
    pub fn isbn_search_url(&self) -> String {
        format!("{}{}/isbn/search", self.base_url, self.area.api_prefix())
    }

    /// `<base>/<area>/doi/search`
    #[must_use]
    pub fn doi_search_url(&self) -> String {
        format!("{}{}/doi/search", self.base_url, self.area.api_prefix())
    }
}

/// Configuration of a [`Controller`](crate::controller::Controller).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Scheme and host the lookup endpoints are served from.
    pub base_url: String,
    /// Deployment area, see [`Area`].
    pub area: Area,
    /// Shape of the DOI success body, see [`DoiShape`].
    pub doi_response: DoiShape,
    /// Ids of the sub-form panels toggled by the material type selector.
    pub panels: Vec<String>,
    /// Feedback shown when the ISBN lookup rejects the identifier.
    pub invalid_isbn_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            area: Area::default(),
            doi_response: DoiShape::default(),
            panels: vec![
                "book-add".to_owned(),
                "paper-add".to_owned(),
                "other-add".to_owned(),
            ],
            invalid_isbn_message: DEFAULT_INVALID_ISBN_MESSAGE.to_owned(),
        }
    }
}

impl Config {
    /// Parses a [`Config`] from TOML text, missing keys take their default value.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the text is not valid TOML or a value has the wrong type.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }

    /// Reads and parses a [`Config`] from a TOML file.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the file cannot be read or its content cannot be parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        trace!("Reading config from '{}'", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::IO,
                format!("Cannot read config file '{}': {e}", path.display()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// The lookup endpoints described by this config.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.base_url, self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::{fixture::FileWriteStr, NamedTempFile};

    #[test]
    fn empty_toml_is_default_config() {
        assert_eq!(Config::default(), Config::from_toml_str("").unwrap());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            area = "teacher"
            doi-response = "top-level"
            "#,
        )
        .unwrap();

        assert_eq!(Area::Teacher, config.area);
        assert_eq!(DoiShape::TopLevel, config.doi_response);
        assert_eq!(DEFAULT_BASE_URL, config.base_url);
        assert_eq!(3, config.panels.len());
    }

    #[test]
    fn unknown_area_is_deserialize_error() {
        let err = Config::from_toml_str(r#"area = "admin""#).unwrap_err();
        assert_eq!(ErrorKind::Deserialize, err.kind());
    }

    #[test]
    fn endpoint_urls_follow_area() {
        let public = Endpoint::new("http://host:8000/", Area::Public);
        assert_eq!("http://host:8000/api/isbn/search", public.isbn_search_url());
        assert_eq!("http://host:8000/api/doi/search", public.doi_search_url());

        let teacher = Endpoint::new("http://host:8000", Area::Teacher);
        assert_eq!(
            "http://host:8000/teacher/api/isbn/search",
            teacher.isbn_search_url()
        );
    }

    #[test]
    fn area_from_str() {
        assert_eq!(Area::Teacher, "teacher".parse::<Area>().unwrap());
        assert!("Teacher".parse::<Area>().is_err());
    }

    #[test]
    fn config_from_temp_file() {
        let file = NamedTempFile::new("matfill.toml").unwrap();
        file.write_str("base-url = \"https://books.example.org\"\n")
            .unwrap();

        let config = Config::from_path(file.path()).unwrap();
        file.close().unwrap();

        assert_eq!(
            "https://books.example.org/api/doi/search",
            config.endpoint().doi_search_url()
        );
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = Config::from_path("does/not/exist.toml").unwrap_err();
        assert_eq!(ErrorKind::IO, err.kind());
    }
}
