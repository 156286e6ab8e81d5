use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::{error::RecordError, source};

pub type ID = String;

/// Travel time in seconds.
pub type Seconds = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: ID,
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: ID,
    pub headsign: String,
    pub name: String,
    pub date: String,
    pub line_id: ID,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub id: ID,
    pub train_id: ID,
    pub station_id: ID,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl Stop {
    /// Seconds from leaving this stop to arriving at `next`.
    pub fn time_to(&self, next: &Stop) -> Seconds {
        (next.arrival - self.departure).num_seconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub train_id: ID,
    pub weight: Seconds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub station: Arc<Station>,
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(station: Arc<Station>) -> Self {
        Self {
            station,
            edges: Vec::default(),
        }
    }
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses the timestamp shapes found in schedule exports. Offsets are folded into UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_utc());
    }
    if let Ok(timestamp) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(timestamp.naive_utc());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "1"
    )
}

impl From<source::Train> for Train {
    fn from(val: source::Train) -> Self {
        Self {
            id: val.id,
            headsign: val.headsign,
            name: val.name,
            date: val.date,
            line_id: val.line_id,
        }
    }
}

impl TryFrom<source::Stop> for Stop {
    type Error = RecordError;

    fn try_from(val: source::Stop) -> Result<Self, Self::Error> {
        let timestamp = |field: &'static str, value: &str| {
            parse_timestamp(value).ok_or_else(|| RecordError::InvalidTimestamp {
                record_id: val.id.to_owned(),
                field,
                value: value.to_owned(),
            })
        };

        let departure = timestamp("departure", &val.departure)?;
        let arrival = timestamp("arrival", &val.arrival)?;

        Ok(Self {
            id: val.id,
            train_id: val.train_id,
            station_id: val.station_id,
            departure,
            arrival,
        })
    }
}

impl TryFrom<source::Station> for Station {
    type Error = RecordError;

    fn try_from(val: source::Station) -> Result<Self, Self::Error> {
        let coordinate = |field: &'static str, value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .ok_or_else(|| RecordError::InvalidCoordinate {
                    station_id: val.id.to_owned(),
                    field,
                    value: value.to_owned(),
                })
        };

        let lat = coordinate("lat", &val.lat)?;
        let lon = coordinate("lon", &val.lon)?;

        Ok(Self {
            available: parse_flag(&val.available),
            id: val.id,
            name: val.name,
            display_name: val.display_name,
            lat,
            lon,
        })
    }
}
