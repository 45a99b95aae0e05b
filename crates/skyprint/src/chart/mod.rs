pub mod engine;
pub mod reading;
pub mod types;

pub use engine::{ChartEngine, EngineResult};
pub use reading::{Reading, Section};
pub use types::{
    BirthData, Chart, ChartAspect, ChartMeta, HouseCusps, PlanetPosition, Planets, TimePrecision,
};
