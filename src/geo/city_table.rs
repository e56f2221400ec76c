use std::{collections::HashMap, path::Path};

use anyhow::Context as _;

use crate::model::{CityInfo, Coordinates};

use super::{GeoService, Resolved, DEFAULT_COORDINATES};

const BUILTIN_CITIES: &[(&str, f64, f64)] = &[
    ("New York, NY", 40.7128, -74.006),
    ("Los Angeles, CA", 34.0522, -118.2437),
    ("Chicago, IL", 41.8781, -87.6298),
    ("Houston, TX", 29.7604, -95.3698),
    ("Phoenix, AZ", 33.4484, -112.074),
    ("Philadelphia, PA", 39.9526, -75.1652),
    ("San Antonio, TX", 29.4241, -98.4936),
    ("San Diego, CA", 32.7157, -117.1611),
    ("Dallas, TX", 32.7767, -96.797),
    ("San Jose, CA", 37.3382, -121.8863),
    ("Austin, TX", 30.2672, -97.7431),
    ("Jacksonville, FL", 30.3322, -81.6557),
    ("Fort Worth, TX", 32.7555, -97.3308),
    ("Columbus, OH", 39.9612, -82.9988),
    ("Charlotte, NC", 35.2271, -80.8431),
    ("San Francisco, CA", 37.7749, -122.4194),
    ("Indianapolis, IN", 39.7684, -86.1581),
    ("Seattle, WA", 47.6062, -122.3321),
    ("Denver, CO", 39.7392, -104.9903),
    ("Washington, DC", 38.9072, -77.0369),
    ("Boston, MA", 42.3601, -71.0589),
    ("Nashville, TN", 36.1627, -86.7816),
    ("Detroit, MI", 42.3314, -83.0458),
    ("Portland, OR", 45.5152, -122.6784),
    ("Las Vegas, NV", 36.1699, -115.1398),
    ("Miami, FL", 25.7617, -80.1918),
    ("Atlanta, GA", 33.749, -84.388),
];

/// In-memory gazetteer keyed by exact place name.
#[derive(Debug, Clone)]
pub struct CityTable {
    cities: HashMap<String, Coordinates>,
}

impl Default for CityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CityTable {
    pub fn empty() -> Self {
        Self {
            cities: HashMap::new(),
        }
    }

    /// Major US cities.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (name, lat, lng) in BUILTIN_CITIES {
            table.insert(*name, Coordinates::new(*lat, *lng));
        }
        table
    }

    /// Built-in cities plus the rows of a `name,latitude,longitude` CSV file. File rows win.
    pub fn load_csv(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rows = CityInfo::load(path)
            .with_context(|| format!("unable to load cities from {}", path.display()))?;
        let mut table = Self::builtin();
        table.extend(rows);
        Ok(table)
    }

    pub fn insert(&mut self, name: impl Into<String>, coords: Coordinates) {
        self.cities.insert(name.into(), coords);
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Extend<CityInfo> for CityTable {
    fn extend<T: IntoIterator<Item = CityInfo>>(&mut self, iter: T) {
        for city in iter {
            let coords = city.coords();
            self.insert(city.name, coords);
        }
    }
}

impl GeoService for CityTable {
    fn resolve(&self, name: &str) -> Resolved {
        match self.cities.get(name) {
            Some(coords) => Resolved::Known(*coords),
            None => Resolved::Fallback(DEFAULT_COORDINATES),
        }
    }
}
