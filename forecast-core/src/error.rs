//! Errors raised while retrieving a forecast.
//!
//! Every variant maps to one of two user-facing messages via
//! [`ForecastError::user_message`]. The detail carried by the variant is for
//! logs only.

use thiserror::Error;

pub const NO_SELECTION_MESSAGE: &str = "must select a location from the list";

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Weather forecast service is not available right now, please try again later.";

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("must select a location from the list")]
    NoSelection,

    #[error("Forecast request failed with status {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Failed to reach forecast service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed forecast response: {0}")]
    Malformed(String),
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::NoSelection => NO_SELECTION_MESSAGE,
            ForecastError::Status { .. }
            | ForecastError::Transport(_)
            | ForecastError::Malformed(_) => SERVICE_UNAVAILABLE_MESSAGE,
        }
    }
}
