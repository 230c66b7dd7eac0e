//! Authenticated GET requests against the weather provider.

use reqwest::{Client, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::{config::ClientConfig, error::WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Query parameters appended to every request.
const DEFAULT_PARAMS: &[(&str, &str)] = &[("units", "metric"), ("lang", "en")];

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { config, http })
    }

    /// Full request URL: base + `path`, credential, defaults, then `params`
    /// in the order given. Values are percent-encoded.
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, WeatherError> {
        let mut url = self
            .config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| WeatherError::unknown(format!("Invalid request path '{path}': {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("appid", &self.config.api_key);
            for (key, value) in DEFAULT_PARAMS {
                query.append_pair(key, value);
            }
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// GET `path` and decode the JSON body. Any non-2xx status becomes
    /// [`WeatherError::Network`] carrying the status code and its canonical
    /// reason phrase.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = self.url(path, params)?;
        tracing::debug!(path, "provider request");

        let res = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or_default().to_string();
            tracing::debug!(path, status = status.as_u16(), "provider request failed");
            return Err(WeatherError::Network {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base, "SECRET").unwrap()).unwrap()
    }

    #[test]
    fn url_includes_credential_defaults_and_params() {
        let url = client("https://api.example.com")
            .url("geo/1.0/direct", &[("q", "Paris,,FR"), ("limit", "1")])
            .unwrap();

        assert_eq!(
            url.as_str(),
            concat!(
                "https://api.example.com/geo/1.0/direct",
                "?appid=SECRET&units=metric&lang=en&q=Paris%2C%2CFR&limit=1"
            )
        );
    }

    #[test]
    fn url_keeps_proxy_prefix() {
        let url = client("http://127.0.0.1:5173/api/").url("data/2.5/weather", &[]).unwrap();

        assert_eq!(url.path(), "/api/data/2.5/weather");
    }

    #[test]
    fn url_encodes_spaces_and_unicode() {
        let url = client("https://api.example.com/")
            .url("geo/1.0/direct", &[("q", "São Paulo,,")])
            .unwrap();

        assert!(url.as_str().ends_with("&q=S%C3%A3o+Paulo%2C%2C"));
    }
}
