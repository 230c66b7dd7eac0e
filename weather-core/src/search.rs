//! Search orchestration: geocode, fetch, publish, remember.
//!
//! A search goes Idle -> Searching -> Idle. On success the record becomes the
//! current weather and is prepended to the history. On failure the error is
//! routed by kind: network and unknown failures become transient
//! notifications, an invalid location becomes a form error.
//!
//! Overlapping searches are not sequenced. Whichever finishes last owns the
//! current-weather slot, and the first one to finish clears the loading flag.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    error::{InitError, WeatherError},
    model::WeatherRecord,
    notify::Notifier,
    provider::WeatherProvider,
    reference::ReferenceData,
    state::{CurrentWeatherState, SearchHistoryState},
};

/// Error shown inline next to the search input until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub message: String,
}

/// Search input as the user typed it. `country` is a human-readable label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub city: String,
    pub country: String,
    pub error: Option<FormError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty city; nothing happened.
    Skipped,
    Found,
    /// Failure was already reported (notification or form error).
    Failed,
}

#[derive(Debug)]
pub struct WeatherSearch {
    provider: Arc<dyn WeatherProvider>,
    current: Arc<CurrentWeatherState>,
    history: Arc<SearchHistoryState>,
    reference: Arc<ReferenceData>,
    notifier: Arc<dyn Notifier>,
    form: Mutex<SearchForm>,
}

impl WeatherSearch {
    pub fn builder() -> WeatherSearchBuilder {
        WeatherSearchBuilder::default()
    }

    pub fn current(&self) -> &Arc<CurrentWeatherState> {
        &self.current
    }

    pub fn history(&self) -> &Arc<SearchHistoryState> {
        &self.history
    }

    pub fn reference(&self) -> &Arc<ReferenceData> {
        &self.reference
    }

    pub fn form(&self) -> SearchForm {
        self.form.lock().clone()
    }

    pub fn error(&self) -> Option<FormError> {
        self.form.lock().error.clone()
    }

    pub fn set_city(&self, city: impl Into<String>) {
        self.form.lock().city = city.into();
    }

    pub fn set_country(&self, country_label: impl Into<String>) {
        self.form.lock().country = country_label.into();
    }

    /// Search with whatever is currently in the form.
    pub async fn submit(&self) -> SearchOutcome {
        let SearchForm { city, country, .. } = self.form();
        self.search(&city, &country).await
    }

    /// Look up `city`, optionally narrowed by a country label. An unknown
    /// label is not an error; the lookup just runs without a country.
    pub async fn search(&self, city: &str, country_label: &str) -> SearchOutcome {
        if city.is_empty() {
            return SearchOutcome::Skipped;
        }

        self.begin();
        let country_code = self.reference.country_code_from_label(country_label);
        self.run(city, country_code).await
    }

    /// Repeat a history entry's lookup using its stored country code. The
    /// fresh result is added on top; the old entry stays.
    pub async fn search_again(&self, entry: &WeatherRecord) -> SearchOutcome {
        if entry.city.is_empty() {
            return SearchOutcome::Skipped;
        }

        self.begin();
        let country_code = Some(entry.country.as_str()).filter(|c| !c.is_empty());
        self.run(&entry.city, country_code).await
    }

    /// Reset the form and the displayed weather.
    pub fn clear(&self) {
        *self.form.lock() = SearchForm::default();
        self.current.set_current_weather_data(None);
    }

    pub fn remove_entry(&self, entry: &WeatherRecord) {
        self.history.remove_weather_result(entry);
    }

    pub fn clear_history(&self) {
        self.history.clear_search_history();
    }

    fn begin(&self) {
        self.current.set_is_loading(true);
        self.form.lock().error = None;
    }

    async fn run(&self, city: &str, country_code: Option<&str>) -> SearchOutcome {
        let outcome = match self.lookup(city, country_code).await {
            Ok(record) => {
                tracing::info!(city = %record.city, country = %record.country, "weather found");
                self.current.set_current_weather_data(Some(record.clone()));
                self.history.add_weather_result(record);
                SearchOutcome::Found
            }
            Err(err) => {
                tracing::debug!(city, error = %err, "search failed");
                self.report(err);
                SearchOutcome::Failed
            }
        };

        self.current.set_is_loading(false);
        outcome
    }

    async fn lookup(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<WeatherRecord, WeatherError> {
        let coords = self.provider.resolve_coordinates(city, country_code).await?;
        self.provider.fetch_weather(coords.lat, coords.lon).await
    }

    fn report(&self, err: WeatherError) {
        match err {
            WeatherError::Network { status, message } => {
                self.notifier.error(&format!("Network error: {status} {message}"));
            }
            WeatherError::InvalidLocation { message } => {
                self.form.lock().error = Some(FormError { message });
            }
            WeatherError::Unknown { message } => {
                self.notifier.error(&format!("An unknown error occurred: {message}"));
            }
        }
    }
}

/// Collects the collaborators of a [`WeatherSearch`]. Every one is required.
#[derive(Debug, Default)]
pub struct WeatherSearchBuilder {
    provider: Option<Arc<dyn WeatherProvider>>,
    current: Option<Arc<CurrentWeatherState>>,
    history: Option<Arc<SearchHistoryState>>,
    reference: Option<Arc<ReferenceData>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl WeatherSearchBuilder {
    pub fn provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn current_weather(mut self, state: Arc<CurrentWeatherState>) -> Self {
        self.current = Some(state);
        self
    }

    pub fn history(mut self, state: Arc<SearchHistoryState>) -> Self {
        self.history = Some(state);
        self
    }

    pub fn reference(mut self, data: Arc<ReferenceData>) -> Self {
        self.reference = Some(data);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<WeatherSearch, InitError> {
        Ok(WeatherSearch {
            provider: self.provider.ok_or(InitError::Missing("a weather provider"))?,
            current: self.current.ok_or(InitError::Missing("a CurrentWeatherState"))?,
            history: self.history.ok_or(InitError::Missing("a SearchHistoryState"))?,
            reference: self.reference.ok_or(InitError::Missing("ReferenceData"))?,
            notifier: self.notifier.ok_or(InitError::Missing("a notifier"))?,
            form: Mutex::new(SearchForm::default()),
        })
    }
}
