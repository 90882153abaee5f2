//! HTTP record source backed by a blocking `reqwest` client.

use crate::config::CoreConfig;
use crate::fetch::{FetchError, FetchResult, RecordSource};
use crate::model::record::ListRecord;
use reqwest::blocking::Client;

/// Reads the record collection with one `GET` per call.
pub struct HttpRecordSource {
    url: String,
    client: Client,
}

impl HttpRecordSource {
    /// Builds a source from the configured endpoint and timeouts.
    ///
    /// # Errors
    /// Returns [`FetchError::Network`] when the HTTP client cannot be built.
    pub fn new(config: &CoreConfig) -> FetchResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        Ok(Self {
            url: config.records_url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordSource for HttpRecordSource {
    fn fetch_records(&self) -> FetchResult<Vec<ListRecord>> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}
