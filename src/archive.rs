//! Fetches archived URLs from a CDX server.

use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;

use crate::error::{Result, WbkError};

/// One row of a CDX JSON response. With `fl=original` the server returns a
/// single column, the originally captured URL.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(transparent)]
struct CdxRow(Vec<String>);

#[derive(Debug)]
pub struct CdxClient<'a> {
    client: &'a Client,
}

impl<'a> CdxClient<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Requests `url` once and returns the first column of every row.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be sent or its body cannot be read, if the
    /// server answers with anything other than `200 OK`, or if the body is not
    /// a JSON array of string arrays.
    pub fn fetch_urls(&self, url: &str) -> Result<Vec<String>> {
        log::debug!("requesting {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WbkError::UnexpectedStatus(status.as_u16()));
        }

        // `bytes` consumes the response, releasing the connection.
        let body = response.bytes()?;
        let urls = decode_original_urls(&body)?;
        log::debug!("received {} URLs", urls.len());
        Ok(urls)
    }
}

fn decode_original_urls(body: &[u8]) -> Result<Vec<String>> {
    let rows: Vec<CdxRow> = serde_json::from_slice(body)?;
    Ok(extract_original_urls(rows))
}

fn extract_original_urls(rows: Vec<CdxRow>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|CdxRow(fields)| fields.into_iter().next())
        .collect()
}
