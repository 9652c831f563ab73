//! The weather lookup widget: city input, fetch orchestration and the view
//! derived from them.
//!
//! The widget is driven by a single event loop. Each handler mutates state
//! synchronously; the provider call is the only suspension point. Hosts that
//! need to keep handling input while a request is outstanding can use
//! [`WeatherWidget::begin_fetch`] and [`WeatherWidget::settle`] directly
//! instead of [`WeatherWidget::fetch_weather`].

use tracing::{debug, error};

use crate::{FetchError, WeatherProvider, WeatherSnapshot};

/// Result of one provider call, as handed back to [`WeatherWidget::settle`].
pub type FetchOutcome = Result<Option<WeatherSnapshot>, FetchError>;

/// A form submission. Handlers call [`SubmitEvent::prevent_default`] to
/// suppress the host's default action (page reload, process exit, ...).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    city: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// What the widget shows. Exactly one branch applies at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Weather(&'a WeatherSnapshot),
    Prompt,
}

#[derive(Debug)]
pub struct WeatherWidget<P> {
    provider: P,
    city: String,
    weather: Option<WeatherSnapshot>,
    loading: bool,
    mounted: bool,
    /// Sequence number of the most recently issued request; 0 before the first.
    issued: u64,
}

impl<P: WeatherProvider> WeatherWidget<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            city: String::new(),
            weather: None,
            loading: false,
            mounted: false,
            issued: 0,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Runs once, on first activation: looks up whatever the city holds
    /// (empty on a fresh widget). Later calls do nothing.
    pub async fn on_mount(&mut self) {
        if let Some(ticket) = self.begin_mount() {
            let outcome = self.provider.current(ticket.city()).await;
            self.settle(&ticket, outcome);
        }
    }

    /// Synchronous half of [`Self::on_mount`]. `None` once the widget has
    /// already been mounted.
    pub fn begin_mount(&mut self) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;

        let city = self.city.clone();
        Some(self.begin_fetch(&city))
    }

    /// Replace the city with the raw field value. No trimming, no debouncing.
    pub fn on_city_input_change(&mut self, value: impl Into<String>) {
        self.city = value.into();
    }

    pub async fn on_submit(&mut self, event: &mut SubmitEvent) {
        let ticket = self.begin_submit(event);
        let outcome = self.provider.current(ticket.city()).await;
        self.settle(&ticket, outcome);
    }

    /// Synchronous half of [`Self::on_submit`]: suppress the default action
    /// and start a request for the current city.
    pub fn begin_submit(&mut self, event: &mut SubmitEvent) -> FetchTicket {
        event.prevent_default();

        let city = self.city.clone();
        self.begin_fetch(&city)
    }

    /// One complete lookup: mark loading, call the provider, apply the outcome.
    ///
    /// Never fails. Every provider outcome, errors included, goes through
    /// [`Self::settle`], which is what clears `loading`.
    pub async fn fetch_weather(&mut self, city: &str) {
        let ticket = self.begin_fetch(city);
        let outcome = self.provider.current(ticket.city()).await;
        self.settle(&ticket, outcome);
    }

    /// Start a request for `city` and mark the widget as loading.
    ///
    /// Any ticket issued before this one becomes stale.
    pub fn begin_fetch(&mut self, city: &str) -> FetchTicket {
        self.issued += 1;
        self.loading = true;

        debug!(seq = self.issued, city, "weather fetch started");

        FetchTicket { seq: self.issued, city: city.to_string() }
    }

    /// Apply the outcome of `ticket`'s request.
    ///
    /// Outcomes of superseded tickets are dropped and leave state untouched
    /// (`false` is returned). For the latest ticket the snapshot is replaced
    /// wholesale and `loading` goes back to false.
    pub fn settle(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> bool {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                city = %ticket.city,
                "discarding stale weather response"
            );
            return false;
        }

        self.weather = match outcome {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(city = %ticket.city, error = %err, "Error fetching weather data");
                None
            }
        };
        self.loading = false;

        true
    }

    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }

        match &self.weather {
            Some(snapshot) => View::Weather(snapshot),
            None => View::Prompt,
        }
    }
}
