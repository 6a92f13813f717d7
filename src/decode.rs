//! Decoding of the dataserver response.
//!
//! The response carries more tags than we care about; we rely on its
//! fairly static structure and search directly for `<error>` and the
//! five field tags, in that order of interest. Pressure is decoded
//! first because an observation without pressure is worthless to the
//! physics side; everything else is best-effort.

use crate::extract::extract_field;
use crate::model::{FetchError, HPA_PER_INCH, Observation};
use crate::sink::WeatherSink;

const TAG_ERROR: &str = "<error>";
const TAG_PRESSURE: &str = "<altim_in_hg>";
const TAG_RAW_TEXT: &str = "<raw_text>";
const TAG_STATION_ID: &str = "<station_id>";
const TAG_LATITUDE: &str = "<latitude>";
const TAG_LONGITUDE: &str = "<longitude>";

/// Numeric fields fail soft: text that does not parse as a number
/// counts as absent for that field only.
fn parse_number(text: Option<&str>) -> Option<f64> {
    text.and_then(|t| t.trim().parse().ok())
}

/// Pulls an [`Observation`] out of one response body.
///
/// The error indicator is checked first; a non-empty error payload
/// wins over anything else in the body. A missing or unparseable
/// pressure value is the regular "no station in range" outcome
/// (`Ok(None)`), not an error.
pub fn parse_observation(body: &str) -> Result<Option<Observation>, FetchError> {
    let mut cursor = 0;
    if let Some(err_text) = extract_field(body, TAG_ERROR, &mut cursor) {
        if !err_text.is_empty() {
            return Err(FetchError::Service(err_text.to_string()));
        }
    }

    cursor = 0;
    let pressure_in_hg = match parse_number(extract_field(body, TAG_PRESSURE, &mut cursor)) {
        Some(value) => value,
        None => return Ok(None),
    };

    // The remaining fields appear in document order; restart at the
    // top of the buffer and walk them with one shared cursor.
    cursor = 0;
    let raw_text = extract_field(body, TAG_RAW_TEXT, &mut cursor)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let station_id = extract_field(body, TAG_STATION_ID, &mut cursor)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let latitude = parse_number(extract_field(body, TAG_LATITUDE, &mut cursor));
    let longitude = parse_number(extract_field(body, TAG_LONGITUDE, &mut cursor));

    Ok(Some(Observation {
        pressure_hpa: pressure_in_hg * HPA_PER_INCH,
        station_id,
        raw_text,
        latitude,
        longitude,
    }))
}

/// Decodes `body` and forwards any observation to the sink.
///
/// `Ok(true)` means an observation was published; `Ok(false)` is the
/// well-formed empty result. The sink is not called on either the
/// empty result or a service error.
pub fn decode_response(body: &str, sink: &dyn WeatherSink) -> Result<bool, FetchError> {
    match parse_observation(body)? {
        Some(observation) => {
            sink.set_weather(observation);
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_is_converted_to_hectopascals() {
        let body = "<METAR><altim_in_hg>29.92126</altim_in_hg></METAR>";
        let obs = parse_observation(body).unwrap().unwrap();
        assert!((obs.pressure_hpa - 1013.25).abs() < 1e-9);
    }

    #[test]
    fn test_secondary_fields_are_individually_optional() {
        // Station id present, everything else missing.
        let body = "<METAR><station_id>KPIA</station_id>\
                    <altim_in_hg>30.01</altim_in_hg></METAR>";
        let obs = parse_observation(body).unwrap().unwrap();
        assert_eq!(obs.station_id.as_deref(), Some("KPIA"));
        assert_eq!(obs.raw_text, None);
        assert_eq!(obs.latitude, None);
        assert_eq!(obs.longitude, None);
    }

    #[test]
    fn test_malformed_latitude_fails_soft() {
        let body = "<METAR><altim_in_hg>29.92</altim_in_hg>\
                    <latitude>north-ish</latitude><longitude>-89.68</longitude></METAR>";
        let obs = parse_observation(body).unwrap().unwrap();
        assert_eq!(obs.latitude, None, "unparseable latitude is absent, not an error");
        assert_eq!(obs.longitude, Some(-89.68));
    }

    #[test]
    fn test_malformed_pressure_is_not_found() {
        let body = "<METAR><altim_in_hg>n/a</altim_in_hg><station_id>KPIA</station_id></METAR>";
        assert_eq!(parse_observation(body).unwrap(), None);
    }

    #[test]
    fn test_empty_error_element_is_not_an_error() {
        // The no-error response carries an empty <errors/> element;
        // a literal empty <error></error> must not trip the error path.
        let body = "<error></error><data num_results=\"0\"/>";
        assert_eq!(parse_observation(body).unwrap(), None);
    }

    #[test]
    fn test_error_payload_is_a_service_error() {
        let body = "<errors><error>Query must be constrained by time</error></errors>";
        assert_eq!(
            parse_observation(body),
            Err(FetchError::Service(
                "Query must be constrained by time".to_string()
            ))
        );
    }
}
