//! Great-circle distance between stations.

use crate::data::{Node, Station};

/// Statute miles per nautical mile, applied to minutes of arc.
const MILES_PER_ARC_MINUTE: f64 = 1.1515;
const KM_PER_MILE: f64 = 1.609344;

/// Distance in kilometres between two points in decimal degrees, by the
/// spherical law of cosines.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon1 - lon2).to_radians();

    let cosine = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    let arc = cosine.clamp(-1.0, 1.0).acos().to_degrees();

    arc * 60.0 * MILES_PER_ARC_MINUTE * KM_PER_MILE
}

pub fn station_distance_km(a: &Station, b: &Station) -> f64 {
    distance_km(a.lat, a.lon, b.lat, b.lon)
}

/// Search heuristic between two nodes, in kilometres.
pub fn heuristic(a: &Node, b: &Node) -> f64 {
    station_distance_km(&a.station, &b.station)
}
