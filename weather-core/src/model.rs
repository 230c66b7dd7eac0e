use serde::{Deserialize, Serialize};

/// Normalized snapshot of current conditions for one place at one observation time.
///
/// Built in one piece from a single successful provider response. The same
/// shape is stored in the search history, so the serialized field names are
/// part of the persisted format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: i64,
    /// Percent, 0..=100
    pub humidity: u8,
    /// ISO 3166-1 alpha-2
    pub country: String,
    pub city: String,
    pub description: String,
    pub weather_icon: String,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl WeatherRecord {
    /// History identity: two entries are the same when city, country and
    /// observation time all match.
    pub fn same_entry(&self, other: &WeatherRecord) -> bool {
        self.city == other.city
            && self.country == other.country
            && self.timestamp == other.timestamp
    }
}

/// Result of a geocoding lookup. Only used to drive the weather fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub country: String,
}

/// Country entry from the bundled reference data (`value` is the code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAndValue {
    pub label: String,
    pub value: String,
}

/// Decorative placeholder condition shown before any search has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomCondition {
    pub icon: String,
    pub description: String,
}

#[cfg(test)]
pub(crate) fn sample_record(city: &str, country: &str, timestamp: i64) -> WeatherRecord {
    WeatherRecord {
        temp: 18.4,
        feels_like: 17.9,
        temp_min: 16.0,
        temp_max: 20.1,
        pressure: 1013,
        humidity: 64,
        country: country.to_string(),
        city: city.to_string(),
        description: "scattered clouds".to_string(),
        weather_icon: "03d".to_string(),
        timestamp,
    }
}
