use std::path::Path;

use serde::Deserialize;

use super::{read_csv, Coordinates};

/// One row of a gazetteer file: `name,latitude,longitude`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityInfo {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Vec<CityInfo>> {
        read_csv(path)
    }

    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[test]
fn test_load_city_info() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name,latitude,longitude").unwrap();
    writeln!(file, "\"Reno, NV\",39.5296,-119.8138").unwrap();
    writeln!(file, "\"Boise, ID\",43.615,-116.2023").unwrap();

    let cities = CityInfo::load(file.path()).unwrap();
    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].name, "Reno, NV");
    assert_eq!(cities[1].coords(), Coordinates::new(43.615, -116.2023));
}

#[test]
fn test_load_city_info_rejects_bad_rows() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name,latitude,longitude").unwrap();
    writeln!(file, "Nowhere,north,west").unwrap();

    assert!(CityInfo::load(file.path()).is_err());
}
