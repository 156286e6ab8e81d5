use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::{
    data::*,
    error::{LoadError, RecordError},
    source,
};

pub const TRAINS_FILE: &str = "trains.csv";
pub const STOPS_FILE: &str = "stops.csv";
pub const STATIONS_FILE: &str = "stations.csv";

#[derive(Debug, Default)]
pub struct Timetable {
    pub trains: Vec<Train>,
    pub stations: Vec<Station>,
    pub stops: Vec<Stop>,
}

fn convert_rows<R, T>(path: &Path, rows: Vec<R>) -> Result<Vec<T>, LoadError>
where
    T: TryFrom<R, Error = RecordError>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::Record {
            path: path.to_path_buf(),
            source,
        })
}

fn deserialize_into<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?
        .deserialize()
        .map(|parse_result| parse_result.map_err(csv_error))
        .collect()
}

impl Timetable {
    /// Reads `trains.csv`, `stops.csv` and `stations.csv` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();

        info!("Processing trains");
        let trains = deserialize_into::<source::Train>(&dir.join(TRAINS_FILE))?
            .into_iter()
            .map(Train::from)
            .collect::<Vec<_>>();

        info!("Processing stops");
        let stops_path = dir.join(STOPS_FILE);
        let stops: Vec<Stop> =
            convert_rows(&stops_path, deserialize_into::<source::Stop>(&stops_path)?)?;

        info!("Processing stations");
        let stations_path = dir.join(STATIONS_FILE);
        let stations: Vec<Station> = convert_rows(
            &stations_path,
            deserialize_into::<source::Station>(&stations_path)?,
        )?;

        info!(
            trains = trains.len(),
            stops = stops.len(),
            stations = stations.len(),
            "Loaded timetable"
        );

        Ok(Self {
            trains,
            stations,
            stops,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join(TRAINS_FILE),
            "t1,Luxembourg,TER 88701,2019-06-03,2019-06-01 00:00:00,2019-06-01 00:00:00,l1\n",
        )
        .unwrap();
        fs::write(
            dir.join(STOPS_FILE),
            "s1,t1,a,2019-06-03 08:00:00,2019-06-03 07:58:00,x,x\n\
             s2,t1,b,2019-06-03 08:12:00,2019-06-03 08:10:00,x,x\n",
        )
        .unwrap();
        fs::write(
            dir.join(STATIONS_FILE),
            "a,Nancy-Ville,Nancy,6.17,48.69,t,x,x\n\
             b,Metz-Ville,Metz,6.18,49.11,t,x,x\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_headerless_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let timetable = Timetable::load(dir.path()).unwrap();

        assert_eq!(timetable.trains.len(), 1);
        assert_eq!(timetable.trains[0].line_id, "l1");
        assert_eq!(timetable.stops.len(), 2);
        assert_eq!(timetable.stops[0].time_to(&timetable.stops[1]), 600);
        assert_eq!(timetable.stations[1].name, "Metz-Ville");
        assert_eq!(timetable.stations[1].lat, 49.11);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let err = Timetable::load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { ref path, .. } if path.ends_with(TRAINS_FILE)));
    }

    #[test]
    fn bad_timestamp_names_the_stop() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(
            dir.path().join(STOPS_FILE),
            "s9,t1,a,soon,2019-06-03 07:58:00,x,x\n",
        )
        .unwrap();

        let err = Timetable::load(dir.path()).unwrap_err();
        match err {
            LoadError::Record {
                path,
                source:
                    RecordError::InvalidTimestamp {
                        record_id, field, ..
                    },
            } => {
                assert!(path.ends_with(STOPS_FILE));
                assert_eq!(record_id, "s9");
                assert_eq!(field, "departure");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
