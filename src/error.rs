use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record in {path:?}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid {field} timestamp {value:?} on record {record_id:?}")]
    InvalidTimestamp {
        record_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid {field} coordinate {value:?} on Station {station_id:?}")]
    InvalidCoordinate {
        station_id: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No such Station {station_id:?} referenced by Stop {stop_id:?}")]
    UnknownStation { station_id: String, stop_id: String },

    #[error("Station {station_id:?} is defined more than once")]
    DuplicateStation { station_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("No Station named {name:?}")]
    EndpointNotFound { name: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode travels: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::UnknownStation {
            station_id: "87".into(),
            stop_id: "s1".into(),
        };
        assert_eq!(
            err.to_string(),
            "No such Station \"87\" referenced by Stop \"s1\""
        );

        let err = SearchError::EndpointNotFound {
            name: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "No Station named \"Nowhere\"");

        let err = RecordError::InvalidCoordinate {
            station_id: "1".into(),
            field: "lat",
            value: "north".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid lat coordinate \"north\" on Station \"1\""
        );

        let err = LoadError::Record {
            path: PathBuf::from("timetable/stops.csv"),
            source: RecordError::InvalidTimestamp {
                record_id: "s9".into(),
                field: "departure",
                value: "soon".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid record in \"timetable/stops.csv\": \
             Invalid departure timestamp \"soon\" on record \"s9\""
        );
    }
}
