//! Forecast retrieval for the selected location.
//!
//! A fetch is split into [`ForecastRetriever::begin_fetch`], which hands out a
//! [`FetchTicket`], and [`ForecastRetriever::complete`], which applies the
//! outcome. Each ticket carries a token; only the most recent token may
//! change state, so a slow response for an older request is dropped.

use crate::{
    error::ForecastError,
    location::Location,
    model::{CivilLightResponse, WeatherSummary},
    service::ForecastSource,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RetrieverState {
    #[default]
    Idle,
    Loading,
    Success(WeatherSummary),
    /// Holds the user-facing message.
    Failure(String),
}

/// Handle for one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    token: u64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default)]
pub struct ForecastRetriever {
    selected: Option<Location>,
    state: RetrieverState,
    image_url: Option<String>,
    last_error: Option<ForecastError>,
    latest_token: u64,
}

impl ForecastRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the location future fetches are for. Never fetches by itself.
    ///
    /// Clears any error. Picking a different location also discards the
    /// current summary and abandons a request still in flight.
    pub fn select(&mut self, location: Location) {
        let changed = self.selected.as_ref() != Some(&location);
        self.last_error = None;

        let discard = match &self.state {
            RetrieverState::Idle => false,
            RetrieverState::Failure(_) => true,
            RetrieverState::Loading | RetrieverState::Success(_) => changed,
        };
        if discard {
            // Anything still in flight belongs to the old selection.
            self.latest_token += 1;
            self.state = RetrieverState::Idle;
        }
        if changed {
            self.image_url = None;
        }

        tracing::debug!(name = location.name(), "location selected");
        self.selected = Some(location);
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &RetrieverState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RetrieverState::Loading)
    }

    pub fn summary(&self) -> Option<&WeatherSummary> {
        match &self.state {
            RetrieverState::Success(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            RetrieverState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Image URL built for the most recent request.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Underlying cause of the latest failure, for diagnostics.
    pub fn last_error(&self) -> Option<&ForecastError> {
        self.last_error.as_ref()
    }

    /// Enter `Loading` for the selected location and return its ticket.
    ///
    /// With nothing selected this fails straight away and returns `None`;
    /// the caller must not issue a request.
    pub fn begin_fetch(&mut self, source: &dyn ForecastSource) -> Option<FetchTicket> {
        let Some(location) = &self.selected else {
            self.fail(ForecastError::NoSelection);
            return None;
        };

        self.latest_token += 1;
        let ticket = FetchTicket { token: self.latest_token, lat: location.lat(), lon: location.lon() };

        self.image_url = Some(source.image_url(ticket.lat, ticket.lon));
        self.last_error = None;
        self.state = RetrieverState::Loading;

        tracing::info!(name = location.name(), lat = ticket.lat, lon = ticket.lon, "fetching forecast");
        Some(ticket)
    }

    /// Apply the outcome of the request behind `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<CivilLightResponse, ForecastError>,
    ) -> bool {
        if ticket.token != self.latest_token {
            tracing::debug!(token = ticket.token, latest = self.latest_token, "dropping stale forecast");
            return false;
        }

        match result.and_then(WeatherSummary::try_from) {
            Ok(summary) => {
                tracing::info!(date = %summary.date, weather = %summary.weather, "forecast received");
                self.last_error = None;
                self.state = RetrieverState::Success(summary);
            }
            Err(err) => self.fail(err),
        }
        true
    }

    /// Run one full request against `source` for the selected location.
    pub async fn fetch(&mut self, source: &dyn ForecastSource) -> &RetrieverState {
        let Some(ticket) = self.begin_fetch(source) else {
            return &self.state;
        };

        let result = source.civil_light(ticket.lat, ticket.lon).await;
        self.complete(ticket, result);
        &self.state
    }

    fn fail(&mut self, err: ForecastError) {
        match &err {
            ForecastError::NoSelection => tracing::debug!("fetch requested without a selection"),
            other => tracing::warn!(error = %other, "forecast request failed"),
        }
        self.state = RetrieverState::Failure(err.user_message().to_string());
        self.last_error = Some(err);
    }
}
