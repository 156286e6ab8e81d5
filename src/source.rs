//! Rows of the three schedule CSV files.
//!
//! The files carry no header line, so field order here is the column order.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Train {
    pub id: String,
    pub headsign: String,
    pub name: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
    pub line_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Stop {
    pub id: String,
    pub train_id: String,
    pub station_id: String,
    pub departure: String,
    pub arrival: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub lon: String,
    pub lat: String,
    pub available: String,
    pub created_at: String,
    pub updated_at: String,
}
