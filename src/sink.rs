//! The write interface to the shared weather state.
//!
//! The store itself belongs to the host; this module defines the
//! narrow contract the decoder publishes through plus a default
//! last-write-wins implementation.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

use crate::logging::{self, DataSource};
use crate::model::Observation;

/// A consumer of decoded observations.
///
/// Called from the fetch worker thread, never the scheduler's caller.
/// Last write wins; implementations make no delivery promises beyond
/// that.
pub trait WeatherSink: Send + Sync {
    fn set_weather(&self, observation: Observation);
}

/// The published state plus the time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherState {
    pub observation: Observation,
    pub updated_at: DateTime<Utc>,
}

/// Mutex-guarded last-write-wins weather store.
///
/// Only one fetch is ever in flight, so there is no concurrent writer;
/// the lock protects readers on other threads.
#[derive(Default)]
pub struct SharedWeather {
    state: Mutex<Option<WeatherState>>,
}

impl SharedWeather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the most recent observation, if any arrived yet.
    pub fn current(&self) -> Option<WeatherState> {
        self.state.lock().unwrap().clone()
    }
}

impl WeatherSink for SharedWeather {
    fn set_weather(&self, observation: Observation) {
        let mut state = self.state.lock().unwrap();

        let pressure_changed = match state.as_ref() {
            Some(prev) => (prev.observation.pressure_hpa - observation.pressure_hpa).abs() > 1e-9,
            None => true,
        };
        if pressure_changed {
            logging::info(
                DataSource::Awc,
                observation.station_id.as_deref(),
                &format!("Pressure now {:.1} hPa", observation.pressure_hpa),
            );
        }

        *state = Some(WeatherState {
            observation,
            updated_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(pressure_hpa: f64) -> Observation {
        Observation {
            pressure_hpa,
            station_id: Some("KPIA".to_string()),
            raw_text: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_starts_empty() {
        assert_eq!(SharedWeather::new().current(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = SharedWeather::new();
        store.set_weather(observation(1013.2));
        store.set_weather(observation(1009.8));

        let state = store.current().expect("a write happened");
        assert_eq!(state.observation.pressure_hpa, 1009.8);
    }

    #[test]
    fn test_update_is_timestamped() {
        let store = SharedWeather::new();
        let before = Utc::now();
        store.set_weather(observation(1013.2));
        let state = store.current().unwrap();
        assert!(state.updated_at >= before);
        assert!(state.updated_at <= Utc::now());
    }
}
