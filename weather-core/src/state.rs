//! Shared state read and written by the orchestrator and by display code.
//!
//! Each container is independent and meant to be shared behind an `Arc`.
//! Locks are never held across an `.await`.

use parking_lot::RwLock;

use crate::{model::WeatherRecord, store::LocalStore};

pub const SEARCH_HISTORY_KEY: &str = "search-history";
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentWeather {
    pub current_weather: Option<WeatherRecord>,
    pub is_loading: bool,
}

/// Current weather plus the loading flag. Starts as `(None, false)`.
#[derive(Debug, Default)]
pub struct CurrentWeatherState {
    inner: RwLock<CurrentWeather>,
}

impl CurrentWeatherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CurrentWeather {
        self.inner.read().clone()
    }

    pub fn current_weather(&self) -> Option<WeatherRecord> {
        self.inner.read().current_weather.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading
    }

    /// Replace the displayed weather. Always clears the loading flag.
    pub fn set_current_weather_data(&self, data: Option<WeatherRecord>) {
        let mut inner = self.inner.write();
        inner.current_weather = data;
        inner.is_loading = false;
    }

    pub fn set_is_loading(&self, loading: bool) {
        self.inner.write().is_loading = loading;
    }
}

/// Recent searches, newest first, at most [`MAX_HISTORY`] entries.
/// Every mutation writes the full list back to the store.
#[derive(Debug)]
pub struct SearchHistoryState {
    store: LocalStore,
    entries: RwLock<Vec<WeatherRecord>>,
}

impl SearchHistoryState {
    /// Hydrate from the store. A missing or unreadable value starts empty.
    pub fn new(store: LocalStore) -> Self {
        let mut entries: Vec<WeatherRecord> =
            store.get(SEARCH_HISTORY_KEY).into_option().unwrap_or_default();
        entries.truncate(MAX_HISTORY);

        tracing::debug!(count = entries.len(), "search history loaded");
        Self {
            store,
            entries: RwLock::new(entries),
        }
    }

    pub fn entries(&self) -> Vec<WeatherRecord> {
        self.entries.read().clone()
    }

    pub fn get(&self, index: usize) -> Option<WeatherRecord> {
        self.entries.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Prepend `result`, evicting the oldest entries past the cap.
    pub fn add_weather_result(&self, result: WeatherRecord) {
        self.update(|entries| {
            entries.insert(0, result);
            entries.truncate(MAX_HISTORY);
        });
    }

    /// Drop every entry that is [`WeatherRecord::same_entry`] as `result`.
    pub fn remove_weather_result(&self, result: &WeatherRecord) {
        self.update(|entries| entries.retain(|e| !e.same_entry(result)));
    }

    pub fn clear_search_history(&self) {
        self.update(Vec::clear);
    }

    fn update<F: FnOnce(&mut Vec<WeatherRecord>)>(&self, mutate: F) {
        let mut entries = self.entries.write();
        mutate(&mut *entries);
        self.store.set(SEARCH_HISTORY_KEY, entries.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::sample_record,
        notify::RecordingNotifier,
        store::{KeyValueStorage, MemoryStorage},
    };
    use std::sync::Arc;

    fn history_with(storage: Arc<MemoryStorage>) -> SearchHistoryState {
        let notifier = Arc::new(RecordingNotifier::new());
        SearchHistoryState::new(LocalStore::new(storage, notifier))
    }

    fn stored(storage: &MemoryStorage) -> Vec<WeatherRecord> {
        let raw = storage.get_item(SEARCH_HISTORY_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn setting_weather_clears_loading() {
        let state = CurrentWeatherState::new();
        assert_eq!(state.snapshot(), CurrentWeather::default());

        state.set_is_loading(true);
        assert!(state.is_loading());

        state.set_current_weather_data(Some(sample_record("Oslo", "NO", 1)));
        assert!(!state.is_loading());
        assert_eq!(state.current_weather().unwrap().city, "Oslo");

        state.set_is_loading(true);
        state.set_current_weather_data(None);
        assert_eq!(state.snapshot(), CurrentWeather::default());
    }

    #[test]
    fn add_prepends_and_persists_exact_list() {
        let storage = Arc::new(MemoryStorage::new());
        let paris = sample_record("Paris", "FR", 100);
        let initial = serde_json::to_string(&vec![paris.clone()]).unwrap();
        storage.insert_raw(SEARCH_HISTORY_KEY, &initial);

        let history = history_with(storage.clone());
        let tokyo = sample_record("Tokyo", "JP", 200);
        history.add_weather_result(tokyo.clone());

        let expected = vec![tokyo, paris];
        assert_eq!(history.entries(), expected);
        assert_eq!(stored(&storage), expected);
    }

    #[test]
    fn cap_evicts_oldest_entries() {
        let storage = Arc::new(MemoryStorage::new());
        let initial: Vec<_> = (0..20).rev().map(|t| sample_record("City", "XX", t)).collect();
        storage.insert_raw(SEARCH_HISTORY_KEY, &serde_json::to_string(&initial).unwrap());

        let history = history_with(storage.clone());
        assert_eq!(history.len(), 20);

        for t in 100..121 {
            history.add_weather_result(sample_record("New", "NN", t));
        }

        let entries = history.entries();
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].timestamp, 120);
        assert!(entries.iter().all(|e| e.city == "New"));
        assert_eq!(stored(&storage).len(), MAX_HISTORY);
    }

    #[test]
    fn single_insert_into_full_history_evicts_tail() {
        let storage = Arc::new(MemoryStorage::new());
        let initial: Vec<_> = (1..=20).rev().map(|t| sample_record("Old", "XX", t)).collect();
        storage.insert_raw(SEARCH_HISTORY_KEY, &serde_json::to_string(&initial).unwrap());

        let history = history_with(storage);
        history.add_weather_result(sample_record("Fresh", "FR", 999));

        let entries = history.entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].city, "Fresh");
        assert_eq!(entries[19].timestamp, 2);
        assert!(!entries.iter().any(|e| e.timestamp == 1));
    }

    #[test]
    fn remove_only_drops_structurally_equal_entries() {
        let history = history_with(Arc::new(MemoryStorage::new()));
        let a = sample_record("Paris", "FR", 100);
        let b = sample_record("Paris", "FR", 200);
        history.add_weather_result(a.clone());
        history.add_weather_result(b.clone());

        history.remove_weather_result(&a);

        assert_eq!(history.entries(), vec![b]);
    }

    #[test]
    fn clear_empties_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let history = history_with(storage.clone());
        history.add_weather_result(sample_record("Rome", "IT", 5));

        history.clear_search_history();

        assert!(history.is_empty());
        assert!(stored(&storage).is_empty());
    }

    #[test]
    fn corrupt_stored_history_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(SEARCH_HISTORY_KEY, "[{broken");

        let history = history_with(storage);

        assert!(history.is_empty());
    }
}
