use super::types::Chart;
use crate::backend::BackendError;

/// Chart engines exposed by the backend, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEngine {
    /// Swiss Ephemeris, astrologer-grade
    Swiss,
    /// Fast deterministic demo engine
    Demo,
}

impl ChartEngine {
    pub fn path(&self) -> &'static str {
        match self {
            ChartEngine::Swiss => "/api/charts/swiss",
            ChartEngine::Demo => "/api/charts",
        }
    }
}

impl std::fmt::Display for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartEngine::Swiss => write!(f, "swiss"),
            ChartEngine::Demo => write!(f, "demo"),
        }
    }
}

/// Chart together with which engine produced it
#[derive(Debug)]
pub enum EngineResult {
    Primary(Chart),
    Fallback { chart: Chart, primary_error: BackendError },
}

impl EngineResult {
    pub fn chart(&self) -> &Chart {
        match self {
            EngineResult::Primary(chart) => chart,
            EngineResult::Fallback { chart, .. } => chart,
        }
    }

    pub fn into_chart(self) -> Chart {
        match self {
            EngineResult::Primary(chart) => chart,
            EngineResult::Fallback { chart, .. } => chart,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, EngineResult::Fallback { .. })
    }

    pub fn engine(&self) -> ChartEngine {
        match self {
            EngineResult::Primary(_) => ChartEngine::Swiss,
            EngineResult::Fallback { .. } => ChartEngine::Demo,
        }
    }
}
