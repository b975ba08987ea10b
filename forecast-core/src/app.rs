use crate::{
    config::Config,
    error::ForecastError,
    location::{LocationErrors, LocationInput},
    retriever::{ForecastRetriever, RetrieverState},
    service::{ForecastSource, SevenTimerClient},
    store::LocationList,
};

/// Application state owned by the front-end.
///
/// The location list is only ever replaced with the value returned by
/// [`LocationList::add`] or [`LocationList::remove`].
#[derive(Debug)]
pub struct App {
    locations: LocationList,
    retriever: ForecastRetriever,
    source: Box<dyn ForecastSource>,
}

impl App {
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self { locations: LocationList::new(), retriever: ForecastRetriever::new(), source }
    }

    /// Build an app talking to the 7Timer hosts named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, ForecastError> {
        let client = SevenTimerClient::new(&config.service)?;
        Ok(Self::new(Box::new(client)))
    }

    pub fn locations(&self) -> &LocationList {
        &self.locations
    }

    pub fn retriever(&self) -> &ForecastRetriever {
        &self.retriever
    }

    pub fn add_location(&mut self, input: LocationInput) -> LocationErrors {
        let (next, errors) = self.locations.add(input);
        self.locations = next;
        errors
    }

    pub fn remove_location(&mut self, name: &str) {
        self.locations = self.locations.remove(name);
    }

    /// Select the saved location called `name`. Returns `false` if there is none.
    pub fn select(&mut self, name: &str) -> bool {
        match self.locations.get(name) {
            Some(location) => {
                self.retriever.select(location.clone());
                true
            }
            None => false,
        }
    }

    pub async fn fetch(&mut self) -> &RetrieverState {
        self.retriever.fetch(self.source.as_ref()).await
    }
}
