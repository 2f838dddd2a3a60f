//! The two read-only lookup endpoints and the [`Client`] seam used to reach them.

use log::trace;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub mod doi;
pub mod isbn;

use crate::{Error, ErrorKind};

/// Performs a single GET request and decodes the JSON body.
///
/// Implementations must map the HTTP status onto the [`ErrorKind`] the form logic relies on, see
/// [`check_status`].
pub trait Client {
    /// Sends a GET to `url` with the `query` pairs and deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::IO`] when no response was received.
    /// - [`ErrorKind::Invalid`] when the service answered 400.
    /// - [`ErrorKind::NoValue`] for any other non-2xx status.
    /// - [`ErrorKind::Deserialize`] when the body does not have the shape of `T`.
    fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .get(url)
            .query(query)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        trace!("'{url}' responded with {}", resp.status());
        check_status(resp.status(), url)?;

        resp.json()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

/// Classifies a response status: 2xx passes, 400 means the identifier was rejected, everything
/// else means nothing was found.
///
/// # Errors
///
/// An [`Err`] is returned for every status that is not a success.
pub fn check_status(status: StatusCode, url: &str) -> Result<(), Error> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::BAD_REQUEST {
        Err(Error::new(
            ErrorKind::Invalid,
            format!("'{url}' rejected the identifier"),
        ))
    } else {
        Err(Error::new(
            ErrorKind::NoValue,
            format!("'{url}' responded with {status}"),
        ))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, ScriptedClient,
    URL_SINK,
};
