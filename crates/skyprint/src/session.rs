//! End-to-end compute flow: chart (with engine fallback), reading, wheel,
//! transits, and the alert opt-in.

use crate::alerts::{AlertTask, Clock, LocalClock, Notifier, OptInError, Permission};
use crate::backend::{pdf_export_url, reading_json_url, Backend, BackendError};
use crate::chart::{BirthData, ChartEngine, EngineResult, Reading};
use crate::rendering::{WheelRenderer, WheelScene};
use crate::transits::{NearExactDetector, TransitQuery, TransitsPanel, DEFAULT_NEAR_EXACT_ORB};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

pub const ENGINE_NOTICE: &str = "Heads up: Using fast demo engine for now. When Swiss Ephemeris files are added on the server, you'll see astrologer-grade precision automatically.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Try again.";
pub const CALCULATING_MESSAGE: &str = "Calculating…";

/// Errors that abort a compute action
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("a chart computation is already in progress")]
    Busy,
    #[error("invalid birth data: {0}")]
    InvalidInput(String),
    #[error("both chart engines failed (primary: {primary}; fallback: {fallback})")]
    Chart {
        primary: BackendError,
        fallback: BackendError,
    },
    #[error("reading request failed: {0}")]
    Reading(#[source] BackendError),
}

impl ComputeError {
    /// Text for the inline failure card
    pub fn user_message(&self) -> String {
        match self {
            ComputeError::Busy => CALCULATING_MESSAGE.to_string(),
            ComputeError::InvalidInput(msg) => msg.clone(),
            ComputeError::Chart { .. } | ComputeError::Reading(_) => FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Tunables for a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Base URL that overview links are resolved against
    pub base_url: String,
    pub transit_window_days: u32,
    /// Upper bound for each backend request
    pub request_timeout: Duration,
    pub alert_interval: Duration,
    pub near_exact_orb: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            transit_window_days: 7,
            request_timeout: Duration::from_secs(30),
            alert_interval: Duration::from_secs(60 * 60),
            near_exact_orb: DEFAULT_NEAR_EXACT_ORB,
        }
    }
}

/// Chart and reading identifiers with their document links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub chart_id: String,
    pub reading_id: String,
    pub reading_json_url: String,
    pub pdf_url: String,
}

/// Everything one successful compute action renders
#[derive(Debug)]
pub struct ComputeOutcome {
    pub chart: EngineResult,
    pub reading: Reading,
    pub overview: Overview,
    pub wheel: WheelScene,
    pub transits: TransitsPanel,
}

impl ComputeOutcome {
    /// Disclosure banner text, present only for a fallback-engine chart
    pub fn engine_notice(&self) -> Option<&'static str> {
        self.chart.is_fallback().then_some(ENGINE_NOTICE)
    }
}

/// Cleared on drop so a failed action never leaves the session locked.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Application state behind the entry form
pub struct Session {
    backend: Arc<dyn Backend>,
    settings: SessionSettings,
    renderer: WheelRenderer,
    clock: Arc<dyn Clock>,
    in_flight: AtomicBool,
    panel_tx: watch::Sender<TransitsPanel>,
    alerts: Mutex<Option<AlertTask>>,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>, settings: SessionSettings) -> Self {
        let (panel_tx, _) = watch::channel(TransitsPanel::default());
        Self {
            backend,
            settings,
            renderer: WheelRenderer::new(),
            clock: Arc::new(LocalClock),
            in_flight: AtomicBool::new(false),
            panel_tx,
            alerts: Mutex::new(None),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_renderer(mut self, renderer: WheelRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_computing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The transits panel as last rendered
    pub fn current_transits(&self) -> TransitsPanel {
        self.panel_tx.borrow().clone()
    }

    pub fn subscribe_transits(&self) -> watch::Receiver<TransitsPanel> {
        self.panel_tx.subscribe()
    }

    /// Run one compute action.
    ///
    /// The chart (primary, then fallback engine) resolves before the reading is
    /// requested, and both before the wheel is rendered. A transits failure
    /// only changes the transits panel. Overlapping calls are rejected with
    /// [`ComputeError::Busy`].
    pub async fn compute(&self, birth: BirthData) -> Result<ComputeOutcome, ComputeError> {
        birth.validate().map_err(ComputeError::InvalidInput)?;
        let _guard = InFlight::acquire(&self.in_flight).ok_or(ComputeError::Busy)?;

        log::info!("Session: computing chart for {} ({})", birth.name, birth.date);
        let chart = self.fetch_chart(&birth).await?;

        let reading = self
            .bounded(
                "/api/readings",
                self.backend.create_reading(chart.chart()),
            )
            .await
            .map_err(|e| {
                log::error!("Session: reading failed for chart {}: {}", chart.chart().id, e);
                ComputeError::Reading(e)
            })?;

        let wheel = self
            .renderer
            .render(&chart.chart().planets, &chart.chart().houses);

        let overview = Overview {
            chart_id: chart.chart().id.clone(),
            reading_id: reading.id.clone(),
            reading_json_url: reading_json_url(&self.settings.base_url, &reading.id),
            pdf_url: pdf_export_url(&self.settings.base_url, &reading.id),
        };

        let transits = self.fetch_transits(&chart, &birth.tz).await;
        self.panel_tx.send_replace(transits.clone());

        Ok(ComputeOutcome {
            chart,
            reading,
            overview,
            wheel,
            transits,
        })
    }

    async fn fetch_chart(&self, birth: &BirthData) -> Result<EngineResult, ComputeError> {
        let primary = self
            .bounded(
                ChartEngine::Swiss.path(),
                self.backend.create_chart(ChartEngine::Swiss, birth),
            )
            .await;
        let primary_error = match primary {
            Ok(chart) => return Ok(EngineResult::Primary(chart)),
            Err(e) => e,
        };

        log::warn!("Session: primary chart engine failed, falling back: {}", primary_error);
        match self
            .bounded(
                ChartEngine::Demo.path(),
                self.backend.create_chart(ChartEngine::Demo, birth),
            )
            .await
        {
            Ok(chart) => Ok(EngineResult::Fallback {
                chart,
                primary_error,
            }),
            Err(fallback) => {
                log::error!(
                    "Session: both chart engines failed (primary: {}; fallback: {})",
                    primary_error,
                    fallback
                );
                Err(ComputeError::Chart {
                    primary: primary_error,
                    fallback,
                })
            }
        }
    }

    async fn fetch_transits(&self, chart: &EngineResult, tz: &str) -> TransitsPanel {
        let query = TransitQuery {
            date: self.clock.today(),
            days: self.settings.transit_window_days,
            tz: if tz.is_empty() { "UTC".to_string() } else { tz.to_string() },
            natal: chart.chart().planets.longitudes(),
        };
        match self
            .bounded("/api/transits", self.backend.transits(&query))
            .await
        {
            Ok(report) => TransitsPanel::from_report(&report),
            Err(e) => {
                log::warn!("Session: transits unavailable: {}", e);
                TransitsPanel::Unavailable
            }
        }
    }

    async fn bounded<T, F>(&self, endpoint: &str, fut: F) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        let after = self.settings.request_timeout;
        match tokio::time::timeout(after, fut).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout {
                endpoint: endpoint.to_string(),
                after,
            }),
        }
    }

    /// Opt into near-exact alerts. Starts the periodic scan once; calling
    /// again while it runs is a no-op.
    pub async fn enable_alerts(&self, notifier: Arc<dyn Notifier>) -> Result<(), OptInError> {
        if self.alerts_running() {
            return Ok(());
        }

        match notifier.request_permission().await {
            Permission::Granted => {}
            Permission::Denied => {
                log::info!("Session: notification permission denied");
                return Err(OptInError::Denied);
            }
            Permission::Unsupported => {
                log::info!("Session: notifications unsupported");
                return Err(OptInError::Unsupported);
            }
        }

        let mut slot = self.alerts.lock().unwrap_or_else(|e| e.into_inner());
        if slot.as_ref().is_some_and(AlertTask::is_running) {
            return Ok(());
        }
        log::info!(
            "Session: alert scan every {:?} (orb < {}°)",
            self.settings.alert_interval,
            self.settings.near_exact_orb
        );
        *slot = Some(AlertTask::spawn(
            self.panel_tx.subscribe(),
            notifier,
            self.clock.clone(),
            NearExactDetector::new(self.settings.near_exact_orb),
            self.settings.alert_interval,
        ));
        Ok(())
    }

    pub fn alerts_running(&self) -> bool {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(AlertTask::is_running)
    }

    /// Stop the alert scan, if any.
    pub fn disable_alerts(&self) {
        let task = self.alerts.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(task) = task {
            task.cancel();
            log::info!("Session: alert scan stopped");
        }
    }
}
