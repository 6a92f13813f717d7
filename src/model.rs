//! Core data types for the weather fetch service.
//!
//! This module defines the shared domain model imported by all other
//! modules. It contains no logic, no I/O, and no external dependencies
//! — only types and constants.

use std::fmt;

// ---------------------------------------------------------------------------
// Unit and limit constants
// ---------------------------------------------------------------------------

/// Standard atmosphere sea-level pressure, in hectopascals.
pub const HPA_STANDARD: f64 = 1013.25;

/// Standard atmosphere sea-level pressure, in inches of mercury.
pub const INCH_STANDARD: f64 = 29.92126;

/// Conversion factor from inches of mercury to hectopascals.
pub const HPA_PER_INCH: f64 = HPA_STANDARD / INCH_STANDARD;

/// Statute miles per nautical mile, as the dataserver request expects
/// its radius in statute miles while callers pass nautical miles.
pub const SM_PER_NM: f64 = 1.0 / 1.151;

/// Hard ceiling for the search radius, in nautical miles. A fetch that
/// finds nothing below this widens to exactly this value, once.
pub const MAX_SEARCH_RADIUS_NM: f64 = 100.0;

/// Requests at or above this latitude are refused. The host simulation
/// reports transient latitudes of 80 degrees and above while starting
/// up, and the dataserver has no stations there anyway.
pub const MAX_USABLE_LATITUDE_DEG: f64 = 80.0;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A position on earth, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Whether this position is inside the latitude band the service
    /// accepts requests for.
    pub fn latitude_usable(&self) -> bool {
        self.latitude < MAX_USABLE_LATITUDE_DEG
    }
}

/// One search: a center position plus a radius in nautical miles.
///
/// The radius never exceeds [`MAX_SEARCH_RADIUS_NM`] after escalation;
/// escalation only ever raises it to the ceiling, never beyond, and
/// never more than once per fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub center: Location,
    pub radius_nm: f64,
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// A decoded weather observation.
///
/// Only the pressure is required — an observation exists exactly when
/// the pressure could be decoded. Every other field is best-effort and
/// individually optional; consumers must not substitute zero for an
/// absent station position.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Station pressure (altimeter setting), in hectopascals.
    pub pressure_hpa: f64,
    /// Reporting station identifier, e.g. "KL18".
    pub station_id: Option<String>,
    /// The raw METAR text as reported.
    pub raw_text: Option<String>,
    /// Reporting station latitude, degrees.
    pub latitude: Option<f64>,
    /// Reporting station longitude, degrees.
    pub longitude: Option<f64>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while fetching or decoding an observation.
///
/// A well-formed empty result is not an error — it is the `Ok(false)`
/// outcome of a decode, and the only outcome that triggers the
/// radius-widening retry.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Underlying network or TLS failure, including a revocation-check
    /// failure that persisted through its single bounded retry.
    Transport(String),
    /// Non-OK HTTP status from the weather service.
    Http(u16),
    /// The response body carried an explicit error payload.
    Service(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::Http(status) => write!(f, "HTTP error: {}", status),
            FetchError::Service(msg) => write!(f, "Service error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
