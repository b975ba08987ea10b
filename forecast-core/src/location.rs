use serde::Serialize;
use thiserror::Error;

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A named point accepted into a [`LocationList`](crate::LocationList).
///
/// Only the list store constructs these, so every `Location` in circulation
/// has a non-empty name and in-range coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    name: String,
    lat: f64,
    lon: f64,
}

impl Location {
    pub(crate) fn new(name: String, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Raw, unvalidated form input for a new location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInput {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationInput {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), lat, lon }
    }

    /// Build input from the three text fields of the add form.
    ///
    /// The name is trimmed; coordinates that do not parse become NaN.
    pub fn from_raw(name: &str, lat: &str, lon: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            lat: parse_coordinate(lat),
            lon: parse_coordinate(lon),
        }
    }

    /// Run the three field checks. None of them short-circuits the others.
    pub fn validate(&self) -> LocationErrors {
        LocationErrors {
            name: validate_name(&self.name).err(),
            lat: validate_lat(self.lat).err(),
            lon: validate_lon(self.lon).err(),
        }
    }
}

/// Parse a coordinate typed by the user. Anything that is not a number is NaN.
pub fn parse_coordinate(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name is already in use")]
    DuplicateName,

    #[error("Must enter a number")]
    NotANumber,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::EmptyName => "Name cannot be empty",
            FieldError::DuplicateName => "Name is already in use",
            FieldError::NotANumber => "Must enter a number",
            FieldError::LatitudeOutOfRange => "Latitude must be between -90 and 90",
            FieldError::LongitudeOutOfRange => "Longitude must be between -180 and 180",
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::EmptyName);
    }
    Ok(())
}

pub fn validate_lat(lat: f64) -> Result<(), FieldError> {
    if lat.is_nan() {
        return Err(FieldError::NotANumber);
    }
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(FieldError::LatitudeOutOfRange);
    }
    Ok(())
}

pub fn validate_lon(lon: f64) -> Result<(), FieldError> {
    if lon.is_nan() {
        return Err(FieldError::NotANumber);
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(FieldError::LongitudeOutOfRange);
    }
    Ok(())
}

/// List-aware check; callers only run it once [`validate_name`] has passed.
pub fn check_duplicate_name(existing: &[Location], name: &str) -> Result<(), FieldError> {
    if existing.iter().any(|loc| loc.name == name) {
        return Err(FieldError::DuplicateName);
    }
    Ok(())
}

/// Per-field outcome of an add attempt. `None` means the field passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationErrors {
    pub name: Option<FieldError>,
    pub lat: Option<FieldError>,
    pub lon: Option<FieldError>,
}

impl LocationErrors {
    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.lat.is_none() && self.lon.is_none()
    }

    pub fn name_message(&self) -> &'static str {
        self.name.map_or("", |e| e.message())
    }

    pub fn lat_message(&self) -> &'static str {
        self.lat.map_or("", |e| e.message())
    }

    pub fn lon_message(&self) -> &'static str {
        self.lon.map_or("", |e| e.message())
    }
}
