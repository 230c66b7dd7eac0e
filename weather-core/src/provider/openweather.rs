use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    client::ApiClient,
    error::WeatherError,
    model::{Coordinates, WeatherRecord},
};

use super::WeatherProvider;

pub const GEOCODING_PATH: &str = "geo/1.0/direct";
pub const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

/// OpenWeatherMap geocoding + current weather.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: ApiClient,
}

impl OpenWeatherProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// `"<city>,,<country>"`; the empty middle slot is the state code, which is
/// never sent. A missing country leaves the last slot empty.
pub fn location_query(city: &str, country_code: Option<&str>) -> String {
    format!("{city},,{}", country_code.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct OwGeocodeEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

impl TryFrom<OwCurrentResponse> for WeatherRecord {
    type Error = WeatherError;

    fn try_from(res: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = res
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::unknown("OpenWeather response contained no conditions"))?;

        Ok(WeatherRecord {
            temp: res.main.temp,
            feels_like: res.main.feels_like,
            temp_min: res.main.temp_min,
            temp_max: res.main.temp_max,
            pressure: res.main.pressure,
            humidity: res.main.humidity,
            country: res.sys.country,
            city: res.name,
            description: condition.description,
            weather_icon: condition.icon,
            timestamp: res.dt,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn resolve_coordinates(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<Coordinates, WeatherError> {
        let q = location_query(city, country_code);
        let entries: Vec<OwGeocodeEntry> = self
            .client
            .get(GEOCODING_PATH, &[("q", q.as_str()), ("limit", "1")])
            .await?;

        let first = entries
            .into_iter()
            .next()
            .ok_or_else(WeatherError::invalid_location)?;

        Ok(Coordinates {
            lat: first.lat,
            lon: first.lon,
            name: first.name,
            country: first.country,
        })
    }

    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherRecord, WeatherError> {
        let lat = lat.to_string();
        let lon = lon.to_string();

        let res: OwCurrentResponse = self
            .client
            .get(CURRENT_WEATHER_PATH, &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        res.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_query_with_and_without_country() {
        assert_eq!(location_query("Paris", Some("FR")), "Paris,,FR");
        assert_eq!(location_query("Paris", None), "Paris,,");
    }

    #[test]
    fn current_response_maps_to_flat_record() {
        let body = r#"{
            "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04n"}],
            "main": {"temp": 7.3, "feels_like": 5.1, "temp_min": 6.0, "temp_max": 8.2,
                     "pressure": 1021, "humidity": 81},
            "sys": {"country": "GB"},
            "dt": 1700000000,
            "name": "London"
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let record = WeatherRecord::try_from(parsed).unwrap();

        assert_eq!(record.city, "London");
        assert_eq!(record.country, "GB");
        assert_eq!(record.description, "broken clouds");
        assert_eq!(record.weather_icon, "04n");
        assert_eq!(record.pressure, 1021);
        assert_eq!(record.humidity, 81);
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.temp_max, 8.2);
    }

    #[test]
    fn empty_conditions_is_unknown_error() {
        let body = r#"{
            "weather": [],
            "main": {"temp": 1, "feels_like": 1, "temp_min": 1, "temp_max": 1,
                     "pressure": 1000, "humidity": 50},
            "sys": {"country": "NO"},
            "dt": 1,
            "name": "Oslo"
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let err = WeatherRecord::try_from(parsed).unwrap_err();

        assert!(matches!(err, WeatherError::Unknown { .. }));
    }
}
