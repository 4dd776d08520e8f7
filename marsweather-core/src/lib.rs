//! Client library for the MAAS Mars weather API.
//!
//! This crate defines:
//! - The HTTP client for the latest, archive page and date-range queries
//! - Typed weather reports decoded from the service's JSON
//! - Transport configuration stored on disk
//!
//! It is used by `marsweather-cli`, but can also be embedded in other programs.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod source;

pub use config::Config;
pub use endpoint::{DEFAULT_BASE_URL, Endpoint};
pub use error::{Error, Result};
pub use model::{ArchivePage, LatestReport, Report};
pub use source::{MarsWeatherSource, maas::MaasClient};
