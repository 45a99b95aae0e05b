pub mod http;

pub use http::{pdf_export_url, reading_json_url, HttpBackend};

use crate::chart::{BirthData, Chart, ChartEngine, Reading};
use crate::transits::{TransitQuery, TransitReport};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by backend calls
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("could not encode request for {endpoint}: {message}")]
    Encode { endpoint: String, message: String },
    #[error("{endpoint} did not answer within {after:?}")]
    Timeout { endpoint: String, after: Duration },
}

/// Chart, reading and transit services consumed by this layer
#[async_trait]
pub trait Backend: Send + Sync {
    /// Compute a natal chart with the given engine
    async fn create_chart(
        &self,
        engine: ChartEngine,
        birth: &BirthData,
    ) -> Result<Chart, BackendError>;

    /// Assemble a reading for a chart
    async fn create_reading(&self, chart: &Chart) -> Result<Reading, BackendError>;

    /// Transit hits against natal longitudes over a window of days
    async fn transits(&self, query: &TransitQuery) -> Result<TransitReport, BackendError>;
}
