use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::search::CostModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Cost {
    /// Great-circle kilometres between stations
    Distance,
    /// Scheduled travel time between stations
    Time,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest routes between railway stations", long_about = None)]
pub struct Args {
    /// Directory holding trains.csv, stops.csv and stations.csv
    #[arg(long, env = "RAILPATH_DATA_DIR", default_value = "timetable")]
    pub data_dir: PathBuf,

    /// Departure station name
    #[arg(long)]
    pub from: String,

    /// Destination station name
    #[arg(long)]
    pub to: String,

    #[arg(long, value_enum, default_value_t = Cost::Distance)]
    pub cost: Cost,

    /// Average train speed in km/h, used to estimate remaining time with `--cost time`
    #[arg(long, default_value_t = 120.0, value_parser = parse_speed)]
    pub average_speed: f64,

    /// Also write per-stop travel records as JSON to this path
    #[arg(long)]
    pub travels_out: Option<PathBuf>,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_speed(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(speed) if speed.is_finite() && speed > 0.0 => Ok(speed),
        _ => Err(format!("{value:?} is not a positive speed")),
    }
}

impl Args {
    pub fn cost_model(&self) -> CostModel {
        match self.cost {
            Cost::Distance => CostModel::Distance,
            Cost::Time => CostModel::TravelTime {
                average_speed_kmh: self.average_speed,
            },
        }
    }
}
