//! `reqwest` implementation of [`Backend`].

use super::{Backend, BackendError};
use crate::chart::{BirthData, Chart, ChartEngine, Reading};
use crate::transits::{TransitQuery, TransitReport};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const READINGS_PATH: &str = "/api/readings";
const TRANSITS_PATH: &str = "/api/transits";

pub struct HttpBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ReadingRequest<'a> {
    chart: &'a Chart,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        // One client for connection pooling across requests
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport {
                endpoint: base_url.to_string(),
                source: e,
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("Backend: POST {}", url);
        let request = self.client.post(&url).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let resp = request.send().await.map_err(|e| self.transport_error(path, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Http {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.transport_error(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    fn transport_error(&self, path: &str, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout {
                endpoint: path.to_string(),
                after: self.timeout,
            }
        } else {
            BackendError::Transport {
                endpoint: path.to_string(),
                source: e,
            }
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_chart(
        &self,
        engine: ChartEngine,
        birth: &BirthData,
    ) -> Result<Chart, BackendError> {
        self.post(engine.path(), birth).await
    }

    async fn create_reading(&self, chart: &Chart) -> Result<Reading, BackendError> {
        self.post(READINGS_PATH, &ReadingRequest { chart }).await
    }

    async fn transits(&self, query: &TransitQuery) -> Result<TransitReport, BackendError> {
        let pairs = query.to_query_pairs().map_err(|e| BackendError::Encode {
            endpoint: TRANSITS_PATH.to_string(),
            message: e.to_string(),
        })?;
        let url = self.url(TRANSITS_PATH);
        log::debug!("Backend: GET {} ({} natal points)", url, query.natal.len());
        let request = self.client.get(&url).query(&pairs);
        self.send(TRANSITS_PATH, request).await
    }
}

/// Link to the stored reading document
pub fn reading_json_url(base_url: &str, reading_id: &str) -> String {
    format!(
        "{}/static/readings/{}.json",
        base_url.trim_end_matches('/'),
        reading_id
    )
}

/// Link that downloads the reading as PDF
pub fn pdf_export_url(base_url: &str, reading_id: &str) -> String {
    format!(
        "{}/api/export/pdf?reading_id={}",
        base_url.trim_end_matches('/'),
        reading_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_strip_trailing_slash() {
        assert_eq!(
            reading_json_url("http://h:8000/", "abc_r"),
            "http://h:8000/static/readings/abc_r.json"
        );
        assert_eq!(
            pdf_export_url("http://h:8000", "abc_r"),
            "http://h:8000/api/export/pdf?reading_id=abc_r"
        );
    }
}
