use geo::{EuclideanDistance, Point};

use crate::core::error::{EngineError, EngineResult};
use crate::models::{Listing, TransitStop};

/// Approximate kilometers per degree
///
/// Flat-earth conversion, only reasonable over a single city's extent.
pub const DEGREES_TO_KM: f64 = 111.0;

/// Planar distance in degrees between two (lat, lon) pairs
#[inline]
pub fn degree_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Point::new(lon1, lat1).euclidean_distance(&Point::new(lon2, lat2))
}

/// Distance in kilometers from a listing to its nearest transit stop
///
/// # Errors
/// `NoStopsAvailable` when `stops` is empty.
pub fn nearest_stop_distance_km(listing: &Listing, stops: &[TransitStop]) -> EngineResult<f64> {
    stops
        .iter()
        .map(|stop| degree_distance(listing.latitude, listing.longitude, stop.latitude, stop.longitude))
        .min_by(f64::total_cmp)
        .map(|degrees| degrees * DEGREES_TO_KM)
        .ok_or(EngineError::NoStopsAvailable)
}

/// Check a proximity against a user-supplied ceiling (inclusive)
#[inline]
pub fn is_within_proximity(proximity_km: f64, max_proximity_km: f64) -> bool {
    proximity_km <= max_proximity_km
}
