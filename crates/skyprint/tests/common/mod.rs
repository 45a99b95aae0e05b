#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use skyprint::backend::{Backend, BackendError};
use skyprint::chart::{BirthData, Chart, ChartEngine, Reading, TimePrecision};
use skyprint::transits::{TransitEvent, TransitQuery, TransitReport};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Semaphore;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn event(transit: &str, aspect: &str, natal: &str, orb: f64, day: &str) -> TransitEvent {
    TransitEvent {
        transit: transit.to_string(),
        aspect: aspect.to_string(),
        natal: natal.to_string(),
        orb,
        date: date(day),
    }
}

pub fn birth() -> BirthData {
    BirthData::new(
        "Ada",
        date("1990-05-17"),
        None,
        TimePrecision::Unknown,
        "London",
        51.5,
        -0.12,
        "Europe/London",
    )
}

pub fn sample_chart(id: &str) -> Chart {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "method": "whole_sign_demo",
        "tz": "Europe/London",
        "planets": { "Sun": { "sign": 0, "lon": 10.0 }, "Moon": { "sign": 6, "lon": 200.0 } },
        "houses": { "H1": 15.0 },
        "aspects": [],
        "meta": { "name": "Ada", "place": "London", "time_precision": "unknown" }
    }))
    .unwrap()
}

pub fn sample_reading(id: &str) -> Reading {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "chart_id": "c1",
        "signature": ["BigThree"],
        "sections": [
            { "key": "sun.sign.Aries", "title": "Sun in Aries", "short": "Bold.", "long": "Longer text.", "actions": ["Start something"] },
            { "key": "moon.sign.Libra", "title": "Moon in Libra", "short": "Balanced.", "long": "More." }
        ]
    }))
    .unwrap()
}

pub fn http_error(endpoint: &str, status: u16) -> BackendError {
    BackendError::Http {
        endpoint: endpoint.to_string(),
        status,
        body: "boom".to_string(),
    }
}

/// Scripted backend that records the order of calls
pub struct FakeBackend {
    pub swiss: Mutex<Option<Result<Chart, BackendError>>>,
    pub demo: Mutex<Option<Result<Chart, BackendError>>>,
    pub reading: Mutex<Option<Result<Reading, BackendError>>>,
    pub transits: Mutex<Option<Result<TransitReport, BackendError>>>,
    pub calls: Mutex<Vec<String>>,
    pub last_query: Mutex<Option<TransitQuery>>,
    pub posted_chart: Mutex<Option<Chart>>,
    /// When set, the swiss call waits for a permit before answering
    pub swiss_gate: Option<Semaphore>,
    /// When set, the reading call sleeps this long
    pub reading_delay: Option<Duration>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            swiss: Mutex::new(Some(Ok(sample_chart("sw_1")))),
            demo: Mutex::new(Some(Ok(sample_chart("demo_1")))),
            reading: Mutex::new(Some(Ok(sample_reading("sw_1_r")))),
            transits: Mutex::new(Some(Ok(TransitReport::default()))),
            calls: Mutex::new(Vec::new()),
            last_query: Mutex::new(None),
            posted_chart: Mutex::new(None),
            swiss_gate: None,
            reading_delay: None,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

fn take<T>(slot: &Mutex<Option<Result<T, BackendError>>>, endpoint: &str) -> Result<T, BackendError>
where
    T: Clone,
{
    let mut guard = slot.lock().unwrap();
    match guard.as_ref() {
        Some(Ok(v)) => Ok(v.clone()),
        _ => match guard.take() {
            Some(Err(e)) => Err(e),
            _ => Err(http_error(endpoint, 500)),
        },
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn create_chart(
        &self,
        engine: ChartEngine,
        _birth: &BirthData,
    ) -> Result<Chart, BackendError> {
        self.record(engine.path());
        match engine {
            ChartEngine::Swiss => {
                if let Some(gate) = &self.swiss_gate {
                    let _permit = gate.acquire().await.unwrap();
                }
                take(&self.swiss, engine.path())
            }
            ChartEngine::Demo => take(&self.demo, engine.path()),
        }
    }

    async fn create_reading(&self, chart: &Chart) -> Result<Reading, BackendError> {
        self.record("/api/readings");
        *self.posted_chart.lock().unwrap() = Some(chart.clone());
        if let Some(delay) = self.reading_delay {
            tokio::time::sleep(delay).await;
        }
        take(&self.reading, "/api/readings")
    }

    async fn transits(&self, query: &TransitQuery) -> Result<TransitReport, BackendError> {
        self.record("/api/transits");
        *self.last_query.lock().unwrap() = Some(query.clone());
        take(&self.transits, "/api/transits")
    }
}
