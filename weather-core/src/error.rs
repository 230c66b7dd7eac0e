use thiserror::Error;

/// Failures a lookup can end in. Matched exhaustively by the search orchestrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// Provider answered with a non-2xx status. `message` is the canonical
    /// reason phrase for `status`, not the text the server sent.
    #[error("{status} {message}")]
    Network { status: u16, message: String },

    /// Geocoding found no place for the given input.
    #[error("{message}")]
    InvalidLocation { message: String },

    /// Anything else: transport errors, unexpected response shapes.
    #[error("{message}")]
    Unknown { message: String },
}

impl WeatherError {
    pub const INVALID_LOCATION: &'static str = "Invalid location entered";

    pub fn invalid_location() -> Self {
        Self::InvalidLocation {
            message: Self::INVALID_LOCATION.to_string(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::unknown(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::unknown(err.to_string())
    }
}

/// Raised by [`crate::search::WeatherSearchBuilder::build`] when a collaborator was not supplied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("WeatherSearch requires {0}; supply it on the builder before calling build()")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_display_carries_status_and_text() {
        let err = WeatherError::Network {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn invalid_location_uses_fixed_message() {
        assert_eq!(WeatherError::invalid_location().to_string(), "Invalid location entered");
    }

    #[test]
    fn json_errors_become_unknown() {
        let err: WeatherError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, WeatherError::Unknown { .. }));
    }
}
