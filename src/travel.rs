//! Flat per-stop travel records, the shape a graph database import expects.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use tracing::info;

use crate::{
    data::*,
    error::{ExportError, GraphError},
    graph::train_runs,
};

/// One stop of one train and the station it runs to next.
///
/// The final stop of a train has no `to` and a zero weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Travel {
    pub from: Station,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Station>,
    pub weight: Seconds,
    pub train_id: ID,
}

pub fn travels(
    trains: &[Train],
    stops: &[Stop],
    stations: &[Station],
) -> Result<Vec<Travel>, GraphError> {
    let by_id = stations
        .iter()
        .map(|station| (station.id.as_str(), station))
        .collect::<HashMap<_, _>>();

    let lookup = |stop: &Stop| {
        by_id
            .get(stop.station_id.as_str())
            .map(|&station| station.clone())
            .ok_or_else(|| GraphError::UnknownStation {
                station_id: stop.station_id.to_owned(),
                stop_id: stop.id.to_owned(),
            })
    };

    let mut result = Vec::with_capacity(stops.len());
    for (train_id, train_stops) in train_runs(trains, stops) {
        for (i, &stop) in train_stops.iter().enumerate() {
            let (to, weight) = match train_stops.get(i + 1) {
                Some(&next) => (Some(lookup(next)?), stop.time_to(next)),
                None => (None, 0),
            };

            result.push(Travel {
                from: lookup(stop)?,
                to,
                weight,
                train_id: train_id.to_owned(),
            });
        }
    }

    Ok(result)
}

pub fn write_travels(path: impl AsRef<Path>, travels: &[Travel]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer_pretty(&mut writer, travels)?;
    writer.flush().map_err(io_error)?;

    info!(count = travels.len(), ?path, "Travels written");
    Ok(())
}
