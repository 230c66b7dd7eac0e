//! Wiring: builds the core's collaborators from settings and CLI flags.

use anyhow::Result;
use std::{path::PathBuf, sync::Arc};

use weather_core::{
    CurrentWeatherState, FileStorage, LocalStore, Notifier, ReferenceData, SearchHistoryState,
    Settings, WeatherSearch, provider_from_settings,
};

/// Prints notifications to stderr as they arrive.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        tracing::debug!(%message, "notification");
        eprintln!("! {message}");
    }
}

pub struct AppContext {
    pub notifier: Arc<dyn Notifier>,
    pub reference: Arc<ReferenceData>,
    pub history: Arc<SearchHistoryState>,
}

impl AppContext {
    /// Everything except the provider; enough for history and reference commands.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

        let storage = match data_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::default_location()?,
        };
        tracing::debug!(dir = %storage.dir().display(), "using data directory");

        let store = LocalStore::new(Arc::new(storage), notifier.clone());
        let history = Arc::new(SearchHistoryState::new(store));
        let reference = Arc::new(ReferenceData::bundled()?);

        Ok(Self {
            notifier,
            reference,
            history,
        })
    }

    /// Resolve settings and build the orchestrator. Fails fast when the API
    /// key or endpoint is missing.
    pub fn weather_search(&self) -> Result<WeatherSearch> {
        let settings = Settings::load_with_env()?;
        let provider = provider_from_settings(&settings)?;

        Ok(WeatherSearch::builder()
            .provider(provider)
            .current_weather(Arc::new(CurrentWeatherState::new()))
            .history(self.history.clone())
            .reference(self.reference.clone())
            .notifier(self.notifier.clone())
            .build()?)
    }
}
