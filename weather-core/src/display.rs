//! Formatting helpers shared by front ends.

use chrono::{DateTime, Local};

pub const DEGREE_CELSIUS: &str = "°C";

/// `"hELLo wORLD"` -> `"Hello World"`. Only spaces separate words.
pub fn to_title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unix seconds rendered in the local time zone. Out-of-range input renders
/// as the raw number.
pub fn epoch_to_local_string(epoch: i64) -> String {
    match DateTime::from_timestamp(epoch, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => epoch.to_string(),
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@4x.png")
}

/// Whole degrees, e.g. `"18°C"`.
pub fn format_temperature(celsius: f64) -> String {
    // -0.4 rounds to "-0" otherwise
    let rounded = celsius.round() + 0.0;
    format!("{rounded:.0}{DEGREE_CELSIUS}")
}
