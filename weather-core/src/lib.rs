//! Core library for the `weather` lookup widget.
//!
//! This crate defines:
//! - The widget state machine (city input, fetch orchestration, view)
//! - The WeatherAPI.com client behind the [`WeatherProvider`] seam
//! - Shared domain models and the plain-text renderer
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be hosted by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod suggestions;
pub mod widget;

pub use config::Config;
pub use error::FetchError;
pub use model::{Condition, Current, Location, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use render::render;
pub use suggestions::CITY_SUGGESTIONS;
pub use widget::{FetchOutcome, FetchTicket, SubmitEvent, View, WeatherWidget};
