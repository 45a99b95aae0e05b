//! Presentation core for natal charts: wheel geometry and scene building,
//! transit grouping, near-exact alerts, and the compute flow against the
//! chart/reading/transit backend.

pub mod alerts;
pub mod backend;
pub mod chart;
pub mod geometry;
pub mod rendering;
pub mod session;
pub mod transits;

pub use alerts::{AlertTask, Clock, FixedClock, LocalClock, Notifier, OptInError, Permission};
pub use backend::{Backend, BackendError, HttpBackend};
pub use chart::{BirthData, Chart, ChartEngine, EngineResult, HouseCusps, Planets, Reading};
pub use geometry::{angle_to_point, house_spoke_angles, Point};
pub use rendering::{render_wheel, to_svg, WheelRenderer, WheelScene};
pub use session::{ComputeError, ComputeOutcome, Overview, Session, SessionSettings};
pub use transits::{
    group_by_date, sorted_dates, NearExactDetector, TransitEvent, TransitsByDate, TransitsPanel,
};
