//! Place-name resolution and straight-line geometry.
//!
//! The planner only ever talks to [`GeoService`]; [`CityTable`] is the gazetteer it ships with.

pub mod city_table;

pub use city_table::CityTable;

use crate::model::Coordinates;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Where unknown place names end up: the geographic centre of the contiguous US.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(39.8283, -98.5795);

/// Outcome of a name lookup. A fallback is not an error, only worth a warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    Known(Coordinates),
    Fallback(Coordinates),
}

impl Resolved {
    pub fn coords(&self) -> Coordinates {
        match self {
            Resolved::Known(c) | Resolved::Fallback(c) => *c,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

pub trait GeoService {
    /// Never fails; unknown names resolve to a [`Resolved::Fallback`].
    fn resolve(&self, name: &str) -> Resolved;

    /// Great-circle distance in miles.
    fn distance(&self, a: Coordinates, b: Coordinates) -> f64 {
        haversine_miles(a, b)
    }

    fn interpolate(&self, a: Coordinates, b: Coordinates, fraction: f64) -> Coordinates {
        interpolate(a, b, fraction)
    }
}

impl<G: GeoService + ?Sized> GeoService for &G {
    fn resolve(&self, name: &str) -> Resolved {
        (**self).resolve(name)
    }

    fn distance(&self, a: Coordinates, b: Coordinates) -> f64 {
        (**self).distance(a, b)
    }

    fn interpolate(&self, a: Coordinates, b: Coordinates, fraction: f64) -> Coordinates {
        (**self).interpolate(a, b, fraction)
    }
}

pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Component-wise linear interpolation; `fraction` is clamped to `[0, 1]`.
pub fn interpolate(a: Coordinates, b: Coordinates, fraction: f64) -> Coordinates {
    let t = fraction.clamp(0.0, 1.0);
    Coordinates::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}
