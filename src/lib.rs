//! Live pressure retrieval for a simulated aircraft.
//!
//! Periodically pulls the most recent METAR near the aircraft's
//! position from the aviationweather.gov dataserver, decodes the
//! XML-shaped text response, and publishes the result to a shared
//! weather state consumed by rendering and physics.
//!
//! The externally visible entry point is
//! [`scheduler::WeatherScheduler::request_update`]; everything below it
//! runs on a detached worker thread and reports back only through the
//! weather sink and the log.

pub mod config;
pub mod decode;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod sink;
