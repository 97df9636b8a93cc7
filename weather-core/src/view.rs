//! View state and the search orchestration that drives it.
//!
//! `ViewState` is a plain value the renderer derives output from. Every search
//! gets a [`Search`] ticket; resolutions carrying an older ticket than the last
//! one issued are dropped, so a slow response can't overwrite a newer one.

use tracing::{debug, info};

use crate::{
    model::{CityQuery, CurrentWeather, ErrorKind, ForecastEntry},
    provider::WeatherProvider,
};

/// Ticket for one search: both fetches of a search share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub generation: u64,
    pub query: CityQuery,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Text currently in the input field.
    pub input: String,
    pub current: Option<CurrentWeather>,
    pub forecast: Vec<ForecastEntry>,
    pub error: Option<String>,
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Latest ticket generation handed out; 0 before any search.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a search for `query`: clears the banner and issues a fresh ticket.
    pub fn begin_search(&mut self, query: CityQuery) -> Search {
        self.error = None;
        self.generation += 1;
        Search {
            generation: self.generation,
            query,
        }
    }

    /// Form submission. Blank input sets the banner and yields no search.
    /// Otherwise the input field is cleared right away, before any fetch resolves.
    pub fn submit(&mut self) -> Option<Search> {
        match CityQuery::parse(&self.input) {
            Ok(query) => {
                let search = self.begin_search(query);
                self.input.clear();
                Some(search)
            }
            Err(kind) => {
                self.error = Some(kind.to_string());
                None
            }
        }
    }

    /// Apply the current-weather outcome. `current` and `error` end up mutually exclusive.
    pub fn resolve_current(&mut self, generation: u64, result: Result<CurrentWeather, ErrorKind>) {
        if self.is_stale(generation) {
            debug!(generation, latest = self.generation, "dropping stale current weather");
            return;
        }

        match result {
            Ok(weather) => {
                self.current = Some(weather);
                self.error = None;
            }
            Err(kind) => {
                self.current = None;
                self.error = Some(kind.to_string());
            }
        }
    }

    /// Apply the forecast outcome. Never touches the banner.
    pub fn resolve_forecast(&mut self, generation: u64, entries: Vec<ForecastEntry>) {
        if self.is_stale(generation) {
            debug!(generation, latest = self.generation, "dropping stale forecast");
            return;
        }
        self.forecast = entries;
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation < self.generation
    }
}

/// Owns a provider and a [`ViewState`] and runs searches against it.
#[derive(Debug)]
pub struct WeatherApp<P> {
    provider: P,
    state: ViewState,
    default_city: String,
    mounted: bool,
}

impl<P: WeatherProvider> WeatherApp<P> {
    pub fn new(provider: P, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            state: ViewState::new(),
            default_city: default_city.into(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    /// First display: search the default city. Only the first call does anything.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        match CityQuery::parse(&self.default_city) {
            Ok(query) => {
                info!(city = %query, "loading default city");
                let search = self.state.begin_search(query);
                self.run(search).await;
            }
            Err(kind) => self.state.error = Some(kind.to_string()),
        }
    }

    /// Submit whatever is in the input field.
    pub async fn submit(&mut self) {
        if let Some(search) = self.state.submit() {
            info!(city = %search.query, "searching");
            self.run(search).await;
        }
    }

    /// Both fetches go out together and resolve independently.
    async fn run(&mut self, search: Search) {
        let Search { generation, query } = search;
        let (current, forecast) = tokio::join!(
            self.provider.fetch_current(&query),
            self.provider.fetch_forecast(&query),
        );

        self.state.resolve_current(generation, current);
        self.state.resolve_forecast(generation, forecast);
    }
}
