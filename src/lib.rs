//! Shortest routes between railway stations.
//!
//! Scheduled stops are linked into a directed graph of stations, one edge per
//! consecutive pair of stops of a train, and searched with A*.

pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod graph;
pub mod search;
pub mod source;
pub mod timetable;
pub mod travel;
