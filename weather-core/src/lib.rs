//! Core library for the `weather` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The provider client and the two lookups a search needs
//! - Local persistent storage for the search history
//! - Shared state containers and the search orchestrator
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod notify;
pub mod provider;
pub mod reference;
pub mod search;
pub mod state;
pub mod store;

pub use client::ApiClient;
pub use config::{ClientConfig, RunMode, Settings};
pub use error::{InitError, WeatherError};
pub use model::{Coordinates, LabelAndValue, RandomCondition, WeatherRecord};
pub use notify::{Notifier, RecordingNotifier};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_settings};
pub use reference::ReferenceData;
pub use search::{FormError, SearchForm, SearchOutcome, WeatherSearch};
pub use state::{CurrentWeather, CurrentWeatherState, SearchHistoryState};
pub use store::{FileStorage, KeyValueStorage, LocalStore, Stored};
