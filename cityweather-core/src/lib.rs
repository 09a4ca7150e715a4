//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its WeatherAPI.com implementation
//! - Shared domain models and the wire payloads they are built from
//! - The location cell / input pair and the weather viewer state machine
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod payload;
pub mod provider;
pub mod viewer;

pub use config::{Config, FORECAST_DAYS, ProviderSettings};
pub use error::{DataKind, FetchError};
pub use location::{LocationCell, LocationInput};
pub use model::{
    Condition, CurrentConditions, ForecastDay, ForecastSet, LocationQuery, WeatherReport,
};
pub use payload::{CurrentPayload, ForecastPayload};
pub use provider::{WeatherProvider, provider_from_config};
pub use viewer::{ViewState, WeatherViewer, fetch_report};
