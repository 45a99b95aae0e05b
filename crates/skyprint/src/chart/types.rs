use chrono::{NaiveDate, NaiveTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// How much to trust the birth time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    #[default]
    Exact,
    Unknown,
}

impl std::str::FromStr for TimePrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(TimePrecision::Exact),
            "unknown" => Ok(TimePrecision::Unknown),
            other => Err(format!("time precision must be 'exact' or 'unknown', got '{}'", other)),
        }
    }
}

/// Birth data posted to the chart endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Local clock time, serialized as HH:MM or null
    #[serde(with = "hour_minute")]
    pub time: Option<NaiveTime>,
    pub time_precision: TimePrecision,
    pub place: String,
    pub lat: f64,
    pub lng: f64,
    pub tz: String,
}

impl BirthData {
    /// Build birth data, filling the same defaults the entry form uses for blank fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
        time_precision: TimePrecision,
        place: &str,
        lat: f64,
        lng: f64,
        tz: &str,
    ) -> Self {
        Self {
            name: non_empty_or(name, "You"),
            date,
            time,
            time_precision,
            place: non_empty_or(place, "Unknown"),
            lat,
            lng,
            tz: non_empty_or(tz, "UTC"),
        }
    }

    /// Reject coordinates the backend cannot use.
    pub fn validate(&self) -> Result<(), String> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude must be a number in [-90, 90], got {}", self.lat));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!("longitude must be a number in [-180, 180], got {}", self.lng));
        }
        Ok(())
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Position of one body in a computed chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Ecliptic longitude in degrees (0-360)
    pub lon: f64,
    /// Zodiac sign index (0 = Aries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<u8>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlanetPosition {
    pub fn at(lon: f64) -> Self {
        Self {
            lon,
            sign: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Body name -> position, kept in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planets(Vec<(String, PlanetPosition)>);

impl Planets {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a body, keeping its first-seen slot.
    pub fn insert(&mut self, name: impl Into<String>, position: PlanetPosition) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = position,
            None => self.0.push((name, position)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlanetPosition> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanetPosition)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Natal longitudes keyed by body, as sent to the transits endpoint.
    pub fn longitudes(&self) -> BTreeMap<String, f64> {
        self.0.iter().map(|(k, v)| (k.clone(), v.lon)).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, PlanetPosition)> for Planets {
    fn from_iter<I: IntoIterator<Item = (S, PlanetPosition)>>(iter: I) -> Self {
        let mut planets = Planets::new();
        for (k, v) in iter {
            planets.insert(k, v);
        }
        planets
    }
}

impl Serialize for Planets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Planets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlanetsVisitor;

        impl<'de> Visitor<'de> for PlanetsVisitor {
            type Value = Planets;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of body name to position")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Planets, A::Error> {
                let mut planets = Planets::new();
                while let Some((k, v)) = access.next_entry::<String, PlanetPosition>()? {
                    planets.insert(k, v);
                }
                Ok(planets)
            }
        }

        deserializer.deserialize_map(PlanetsVisitor)
    }
}

/// House id ("H1".."H12") -> cusp longitude
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseCusps(pub BTreeMap<String, Option<f64>>);

impl HouseCusps {
    pub fn with_ascendant(asc: f64) -> Self {
        let mut cusps = BTreeMap::new();
        cusps.insert("H1".to_string(), Some(asc));
        Self(cusps)
    }

    /// H1 cusp, or 0.0 when it is missing, null or NaN.
    pub fn ascendant(&self) -> f64 {
        self.0
            .get("H1")
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0)
    }
}

/// Aspect between two natal bodies as reported by the chart engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAspect {
    pub a: String,
    pub b: String,
    #[serde(rename = "type")]
    pub aspect_type: String,
    pub orb: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub time_precision: Option<TimePrecision>,
}

/// Computed natal chart. Fields the layer does not read are carried in `extra`
/// so the chart can be posted back to the reading endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub planets: Planets,
    #[serde(default)]
    pub houses: HouseCusps,
    #[serde(default)]
    pub aspects: Vec<ChartAspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChartMeta>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
