use weather_core::{
    ReferenceData, WeatherRecord,
    display::{epoch_to_local_string, format_temperature, icon_url, to_title_case},
    state::MAX_HISTORY,
};

pub fn current_weather(record: &WeatherRecord, reference: &ReferenceData) -> String {
    let country = match reference.label_from_country_code(&record.country) {
        "" => record.country.clone(),
        label => format!("{label} ({})", record.country),
    };

    format!(
        "{city}, {country}\n\
         {temp}  {description}\n\
         Feels like {feels} · Min {min} · Max {max}\n\
         Humidity {humidity}% · Pressure {pressure} hPa\n\
         Observed {observed}\n\
         Icon {icon}\n\
         Powered by OpenWeatherMap",
        city = record.city,
        temp = format_temperature(record.temp),
        description = to_title_case(&record.description),
        feels = format_temperature(record.feels_like),
        min = format_temperature(record.temp_min),
        max = format_temperature(record.temp_max),
        humidity = record.humidity,
        pressure = record.pressure,
        observed = epoch_to_local_string(record.timestamp),
        icon = icon_url(&record.weather_icon),
    )
}

/// Shown while no weather is displayed.
pub fn welcome(reference: &ReferenceData) -> String {
    let condition = reference.random_condition();
    let mut out = String::from("Welcome! Search for a location to see the weather.");

    if !condition.description.is_empty() {
        out.push_str(&format!(
            "\nSomewhere there are {} ({})",
            condition.description,
            icon_url(&condition.icon)
        ));
    }
    out
}

pub fn history(entries: &[WeatherRecord]) -> String {
    if entries.is_empty() {
        return "No search history yet".to_string();
    }

    let mut out = format!("Search history (showing your last {MAX_HISTORY} searches)");
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "\n#{n} {city}, {country} - {temp}  {when}",
            n = index + 1,
            city = entry.city,
            country = entry.country,
            temp = format_temperature(entry.temp),
            when = epoch_to_local_string(entry.timestamp),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::LabelAndValue;

    fn record() -> WeatherRecord {
        WeatherRecord {
            temp: 21.4,
            feels_like: 20.6,
            temp_min: 19.8,
            temp_max: 23.0,
            pressure: 1016,
            humidity: 48,
            country: "FR".into(),
            city: "Paris".into(),
            description: "clear sky".into(),
            weather_icon: "01d".into(),
            timestamp: 1_700_000_000,
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![LabelAndValue {
                label: "France".into(),
                value: "FR".into(),
            }],
            vec![],
        )
    }

    #[test]
    fn current_weather_shows_label_and_rounded_values() {
        let out = current_weather(&record(), &reference());

        assert!(out.starts_with("Paris, France (FR)\n21°C  Clear Sky"));
        assert!(out.contains("Feels like 21°C · Min 20°C · Max 23°C"));
        assert!(out.contains("Humidity 48% · Pressure 1016 hPa"));
        assert!(out.contains("01d@4x.png"));
    }

    #[test]
    fn current_weather_falls_back_to_code() {
        let mut r = record();
        r.country = "ZZ".into();

        assert!(current_weather(&r, &reference()).starts_with("Paris, ZZ\n"));
    }

    #[test]
    fn welcome_without_conditions_has_no_placeholder() {
        assert_eq!(welcome(&reference()), "Welcome! Search for a location to see the weather.");
    }

    #[test]
    fn history_is_numbered_from_one() {
        let out = history(&[record(), record()]);

        assert!(out.contains("\n#1 Paris, FR - 21°C"));
        assert!(out.contains("\n#2 Paris, FR - 21°C"));
        assert_eq!(history(&[]), "No search history yet");
    }
}
