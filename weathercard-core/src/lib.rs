//! Core library for the `weathercard` terminal app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weatherapi.com fetch client
//! - Condition text to icon classification
//! - The controller that owns UI state across lookups
//! - A pure renderer from UI state to a text frame

pub mod condition;
pub mod config;
pub mod controller;
pub mod model;
pub mod provider;
pub mod render;

pub use condition::{IconCategory, classify};
pub use config::Config;
pub use controller::{Controller, FETCH_FAILED_MESSAGE, Phase, Resolution, Ticket, UiState};
pub use model::WeatherResult;
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use render::render;
