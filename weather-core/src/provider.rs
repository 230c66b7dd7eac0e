use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    client::ApiClient,
    config::Settings,
    error::WeatherError,
    model::{Coordinates, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// The two lookups a search needs, in the order it needs them.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocode free text. An empty result is [`WeatherError::InvalidLocation`].
    async fn resolve_coordinates(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<Coordinates, WeatherError>;

    /// Current conditions at a point.
    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherRecord, WeatherError>;
}

/// Construct the provider from resolved settings. Fails when the credential
/// or endpoint is missing.
pub fn provider_from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let config = settings.resolve()?;
    let client = ApiClient::new(config)?;

    Ok(Arc::new(OpenWeatherProvider::new(client)))
}
