use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ForecastError;

/// Wire format of the 7Timer `civillight` JSON product.
#[derive(Debug, Clone, Deserialize)]
pub struct CivilLightResponse {
    pub dataseries: Vec<CivilLightDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CivilLightDay {
    pub date: u32,
    pub weather: String,
    pub temp2m: Temp2m,
    pub wind10m_max: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Temp2m {
    pub max: f64,
    pub min: f64,
}

/// Maximum wind for the day. The service encodes calm conditions as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wind {
    Calm,
    Level(i64),
}

impl Wind {
    pub fn from_code(code: i64) -> Self {
        if code == 1 { Wind::Calm } else { Wind::Level(code) }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wind::Calm => f.write_str("No wind"),
            Wind::Level(code) => write!(f, "{code}"),
        }
    }
}

/// Display-ready summary of the first forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub weather: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind: Wind,
    pub date: NaiveDate,
}

impl TryFrom<CivilLightResponse> for WeatherSummary {
    type Error = ForecastError;

    fn try_from(response: CivilLightResponse) -> Result<Self, Self::Error> {
        let day = response
            .dataseries
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::Malformed("dataseries is empty".to_string()))?;

        Ok(WeatherSummary {
            date: parse_yyyymmdd(day.date)?,
            weather: day.weather,
            min_temp: day.temp2m.min,
            max_temp: day.temp2m.max,
            wind: Wind::from_code(day.wind10m_max),
        })
    }
}

/// Turn the service's `YYYYMMDD` integer into a calendar date.
pub fn parse_yyyymmdd(date: u32) -> Result<NaiveDate, ForecastError> {
    let digits = date.to_string();
    if digits.len() != 8 {
        return Err(ForecastError::Malformed(format!("date {digits} is not YYYYMMDD")));
    }

    let iso = format!("{}-{}-{}", &digits[..4], &digits[4..6], &digits[6..]);
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .map_err(|e| ForecastError::Malformed(format!("date {digits}: {e}")))
}

/// Human label for a civil-light weather code. Unknown codes come back as-is.
pub fn condition_label(code: &str) -> &str {
    match code {
        "clear" => "Clear",
        "pcloudy" => "Partly cloudy",
        "mcloudy" => "Mostly cloudy",
        "cloudy" => "Cloudy",
        "humid" => "Foggy",
        "lightrain" => "Light rain",
        "oshower" => "Occasional showers",
        "ishower" => "Isolated showers",
        "lightsnow" => "Light snow",
        "rain" => "Rain",
        "snow" => "Snow",
        "rainsnow" => "Mixed rain and snow",
        "ts" => "Thunderstorm possible",
        "tsrain" => "Thunderstorm",
        other => other,
    }
}
