use std::fmt;

use forecast_core::{Location, LocationErrors, WeatherSummary, model::condition_label};

pub const LOADING: &str = "Loading forecast...";
pub const EMPTY_LOCATIONS: &str = "Your Locations list is empty.";
pub const EMPTY_FORECAST_LOCATIONS: &str =
    "Your Locations list is empty.\nPlease head to the Locations section and add some.";

/// One selectable row. Carries the location itself so a pick maps straight
/// back to the domain value.
#[derive(Debug, Clone)]
pub struct LocationRow {
    pub location: Location,
    pub active: bool,
}

impl fmt::Display for LocationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { "* " } else { "" };
        write!(f, "{marker}{}", location_line(&self.location))
    }
}

pub fn location_line(location: &Location) -> String {
    format!(
        "Name: {}, Latitude: {}, Longitude: {}",
        location.name(),
        location.lat(),
        location.lon()
    )
}

/// Non-empty per-field messages, labelled by field.
pub fn field_errors(errors: &LocationErrors) -> Vec<String> {
    [
        ("Name", errors.name_message()),
        ("Latitude", errors.lat_message()),
        ("Longitude", errors.lon_message()),
    ]
    .into_iter()
    .filter(|(_, msg)| !msg.is_empty())
    .map(|(field, msg)| format!("  {field}: {msg}"))
    .collect()
}

pub fn summary_card(summary: &WeatherSummary, image_url: Option<&str>) -> String {
    let mut out = format!(
        "Weather for: {}\n\
         The weather today: {}\n\
         Temperature: Between {}°C to {}°C\n\
         Wind conditions: {}",
        summary.date.format("%a %b %d %Y"),
        condition_label(&summary.weather),
        summary.min_temp,
        summary.max_temp,
        summary.wind,
    );

    if let Some(url) = image_url {
        out.push_str(&format!("\nForecast image: {url}"));
    }
    out
}
