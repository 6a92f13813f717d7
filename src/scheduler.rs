//! At-most-one-in-flight scheduling of weather fetches.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::fetch::{self, Transport};
use crate::model::Location;
use crate::sink::WeatherSink;

/// Owns the single outstanding fetch worker.
///
/// [`request_update`](WeatherScheduler::request_update) never blocks:
/// it polls the previous worker's handle and either refuses the new
/// request or replaces the handle. A launched fetch always runs to
/// completion; there is no cancellation, and its outcome surfaces only
/// through the sink and the log.
pub struct WeatherScheduler {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn WeatherSink>,
    in_flight: Option<JoinHandle<bool>>,
}

impl WeatherScheduler {
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn WeatherSink>) -> Self {
        WeatherScheduler {
            transport,
            sink,
            in_flight: None,
        }
    }

    /// Launches a fetch around the given position, unless one is still
    /// running or the latitude is outside the usable range.
    ///
    /// Returns whether the request was accepted. A refusal has no side
    /// effect and is not an error; callers simply try again on their
    /// next cycle.
    pub fn request_update(&mut self, location: Location, radius_nm: f64) -> bool {
        if !location.latitude_usable() {
            return false;
        }

        if let Some(handle) = &self.in_flight {
            if !handle.is_finished() {
                return false;
            }
        }

        // The previous worker (if any) has completed; reap it. Its
        // outcome was already logged on the worker side.
        if let Some(handle) = self.in_flight.take() {
            let _ = handle.join();
        }

        let transport = Arc::clone(&self.transport);
        let sink = Arc::clone(&self.sink);
        self.in_flight = Some(thread::spawn(move || {
            fetch::run_fetch_worker(transport.as_ref(), sink.as_ref(), location, radius_nm)
        }));
        true
    }

    /// True while a previously accepted fetch has not completed yet.
    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
