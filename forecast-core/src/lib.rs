//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The saved-location model, its validators and the copy-on-write list store
//! - A client for the 7Timer civil-light forecast service
//! - The retriever that turns a selected location into a daily summary
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but front-ends only need [`App`].

pub mod app;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod retriever;
pub mod service;
pub mod store;

pub use app::App;
pub use config::{Config, ServiceConfig};
pub use error::ForecastError;
pub use location::{FieldError, Location, LocationErrors, LocationInput};
pub use model::{WeatherSummary, Wind};
pub use retriever::{FetchTicket, ForecastRetriever, RetrieverState};
pub use service::{ForecastSource, SevenTimerClient};
pub use store::LocationList;
