//! Network retrieval of METAR observations from aviationweather.gov.
//!
//! One fetch is one blocking cycle on a dedicated worker thread:
//! build the URL, GET it (with a single bounded retry when the TLS
//! revocation check itself fails), verify the status, hand the body to
//! the decoder, and widen the search radius once if nothing was found.
//! Every outcome is resolved here; nothing propagates to the caller
//! beyond a `bool`.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::config::FetchConfig;
use crate::decode;
use crate::logging::{self, DataSource};
use crate::model::{FetchError, Location, MAX_SEARCH_RADIUS_NM, SM_PER_NM, SearchRequest};
use crate::sink::WeatherSink;

/// Dataserver endpoint. The query asks for the most recent METAR
/// within a radial distance, limited to a 2-hour lookback and to
/// exactly the five fields the decoder understands.
const AWC_METAR_URL: &str =
    "https://www.aviationweather.gov/adds/dataserver_current/httpparam";

/// Error-text fragments indicating the transport failed while querying
/// the certificate revocation list. Localized Windows builds translate
/// the word "revocation", so the two observed raw error codes are
/// matched as well.
const REVOCATION_SIGNATURES: [&str; 3] = ["revocation", "80092012", "80092013"];

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// One HTTP exchange, reduced to what the fetch cycle needs.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// The network seam. The production implementation is [`HttpTransport`];
/// tests substitute a scripted one.
pub trait Transport: Send + Sync {
    /// Performs one GET. `check_revocation = false` selects the relaxed
    /// TLS path used by the single revocation retry.
    fn get(&self, url: &str, check_revocation: bool) -> Result<HttpReply, FetchError>;
}

/// reqwest-backed transport with the configured timeout and user agent.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    /// rustls exposes no revocation-only switch, so the retry path
    /// skips certificate verification instead.
    no_revoke: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let builder = || {
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
        };
        let client = builder()
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let no_revoke = builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpTransport { client, no_revoke })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, check_revocation: bool) -> Result<HttpReply, FetchError> {
        let client = if check_revocation {
            &self.client
        } else {
            &self.no_revoke
        };
        let response = client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

// ---------------------------------------------------------------------------
// Request construction
// ---------------------------------------------------------------------------

/// Is the given transport error text possibly caused by problems
/// querying the revocation list?
pub fn is_revocation_error(message: &str) -> bool {
    REVOCATION_SIGNATURES.iter().any(|sig| message.contains(sig))
}

/// Builds the full request URL for one search. Radius goes out in
/// statute miles without decimals; coordinates with two.
pub fn build_request_url(request: &SearchRequest) -> String {
    format!(
        "{}?dataSource=metars&requestType=retrieve&format=xml\
         &radialDistance={:.0};{:.2},{:.2}\
         &hoursBeforeNow=2&mostRecent=true\
         &fields=raw_text,station_id,latitude,longitude,altim_in_hg",
        AWC_METAR_URL,
        request.radius_nm * SM_PER_NM,
        request.center.longitude,
        request.center.latitude,
    )
}

// ---------------------------------------------------------------------------
// Fetch cycle
// ---------------------------------------------------------------------------

/// One GET with the bounded revocation fallback: a transport failure
/// matching a revocation signature earns exactly one retry with
/// revocation checking disabled. Any other transport failure is
/// terminal immediately.
fn perform_request(transport: &dyn Transport, url: &str) -> Result<HttpReply, FetchError> {
    match transport.get(url, true) {
        Err(FetchError::Transport(message)) if is_revocation_error(&message) => {
            logging::warn(
                DataSource::Awc,
                None,
                "Querying revocation list failed - retrying once with revocation checking disabled",
            );
            transport.get(url, false)
        }
        other => other,
    }
}

/// Runs the full fetch cycle for one request.
///
/// Returns `true` once an observation was decoded and published. An
/// empty result below the radius ceiling earns one repeat of the whole
/// cycle at the ceiling; transport, protocol, and service errors are
/// all terminal without a radius retry.
pub fn fetch_observation(
    transport: &dyn Transport,
    sink: &dyn WeatherSink,
    location: Location,
    radius_nm: f64,
) -> bool {
    let mut request = SearchRequest {
        center: location,
        radius_nm,
    };

    loop {
        let url = build_request_url(&request);

        let reply = match perform_request(transport, &url) {
            Ok(reply) => reply,
            Err(err) => {
                logging::log_fetch_failure(None, "weather request", &err);
                return false;
            }
        };

        if reply.status != 200 {
            logging::log_fetch_failure(None, "weather request", &FetchError::Http(reply.status));
            return false;
        }

        match decode::decode_response(&reply.body, sink) {
            Ok(true) => return true,
            Ok(false) => {
                if request.radius_nm < MAX_SEARCH_RADIUS_NM {
                    logging::warn(
                        DataSource::Awc,
                        None,
                        &format!(
                            "Found no weather in a {:.0}nm radius - widening search to {:.0}nm",
                            request.radius_nm, MAX_SEARCH_RADIUS_NM
                        ),
                    );
                    request.radius_nm = MAX_SEARCH_RADIUS_NM;
                    continue;
                }
                logging::warn(
                    DataSource::Awc,
                    None,
                    &format!("Found no weather in a {:.0}nm radius", request.radius_nm),
                );
                return false;
            }
            Err(err) => {
                logging::log_fetch_failure(None, "weather response", &err);
                return false;
            }
        }
    }
}

/// Worker entry point: contains any unexpected fault so that nothing
/// ever propagates past the thread boundary.
pub fn run_fetch_worker(
    transport: &dyn Transport,
    sink: &dyn WeatherSink,
    location: Location,
    radius_nm: f64,
) -> bool {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        fetch_observation(transport, sink, location, radius_nm)
    }));
    match outcome {
        Ok(found) => found,
        Err(_) => {
            logging::error(
                DataSource::Sys,
                None,
                "Fetching weather failed with an unexpected fault",
            );
            false
        }
    }
}
