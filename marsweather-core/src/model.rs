use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Wind direction reported when the rover could not determine it.
pub const UNKNOWN_WIND_DIRECTION: &str = "--";

/// One daily weather observation from the rover.
///
/// Any value the upstream service did not record may come back as JSON
/// `null`. Numbers are kept as `None` rather than being defaulted to zero;
/// text fields fall back to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Earth date of the observation, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub terrestrial_date: String,
    /// Mission sol number.
    pub sol: Option<f64>,
    /// Areocentric solar longitude.
    pub ls: Option<f64>,
    pub min_temp: Option<f64>,
    pub min_temp_fahrenheit: Option<f64>,
    pub max_temp: Option<f64>,
    pub max_temp_fahrenheit: Option<f64>,
    pub pressure: Option<f64>,
    /// Qualitative pressure trend, e.g. "Higher" or "Lower".
    #[serde(default, deserialize_with = "null_as_default")]
    pub pressure_string: String,
    pub abs_humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "atmo_opacity")]
    pub atmospheric_opacity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunrise: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunset: String,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Report {
    /// Parse `terrestrial_date` as a calendar date.
    pub fn terrestrial_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.terrestrial_date, "%Y-%m-%d").ok()
    }

    pub fn sunrise_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.sunrise)
    }

    pub fn sunset_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.sunset)
    }

    /// Wind direction, or `None` for the "--" placeholder and empty values.
    pub fn wind_direction_known(&self) -> Option<&str> {
        match self.wind_direction.as_str() {
            "" | UNKNOWN_WIND_DIRECTION => None,
            dir => Some(dir),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Envelope returned by the latest endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReport {
    pub report: Report,
}

/// One page of the archive listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivePage {
    /// Total number of reports across all pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Report>,
}

impl ArchivePage {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const LATEST_JSON: &str = r#"{
        "report": {
            "terrestrial_date": "2013-05-01",
            "sol": 261,
            "ls": 310.5,
            "min_temp": -69.75,
            "min_temp_fahrenheit": -93.55,
            "max_temp": -4.48,
            "max_temp_fahrenheit": 23.94,
            "pressure": 868.05,
            "pressure_string": "Higher",
            "abs_humidity": null,
            "wind_speed": null,
            "wind_direction": "--",
            "atmo_opacity": "Sunny",
            "season": "Month 11",
            "sunrise": "2013-05-01T11:00:00Z",
            "sunset": "2013-05-01T22:00:00Z"
        }
    }"#;

    #[test]
    fn decodes_latest_envelope() {
        let latest: LatestReport = serde_json::from_str(LATEST_JSON).expect("valid payload");
        let r = &latest.report;

        assert_eq!(r.terrestrial_date, "2013-05-01");
        assert_eq!(r.sol, Some(261.0));
        assert_eq!(r.ls, Some(310.5));
        assert_eq!(r.min_temp, Some(-69.75));
        assert_eq!(r.max_temp_fahrenheit, Some(23.94));
        assert_eq!(r.pressure, Some(868.05));
        assert_eq!(r.pressure_string, "Higher");
        assert_eq!(r.abs_humidity, None);
        assert_eq!(r.wind_speed, None);
        assert_eq!(r.wind_direction, "--");
        assert_eq!(r.atmospheric_opacity, "Sunny");
        assert_eq!(r.season, "Month 11");
    }

    #[test]
    fn missing_measurements_are_none_not_zero() {
        let json = r#"{"terrestrial_date":"2015-04-19","sol":960,"ls":42.0}"#;
        let r: Report = serde_json::from_str(json).expect("minimal report");

        assert_eq!(r.min_temp, None);
        assert_eq!(r.pressure, None);
        assert_eq!(r.abs_humidity, None);
        assert!(r.wind_direction.is_empty());
    }

    #[test]
    fn explicit_nulls_decode_as_absent() {
        let json = r#"{
            "terrestrial_date": null,
            "sol": null,
            "ls": null,
            "min_temp": null,
            "min_temp_fahrenheit": null,
            "max_temp": null,
            "max_temp_fahrenheit": null,
            "pressure": null,
            "pressure_string": null,
            "abs_humidity": null,
            "wind_speed": null,
            "wind_direction": null,
            "atmo_opacity": null,
            "season": null,
            "sunrise": null,
            "sunset": null
        }"#;
        let r: Report = serde_json::from_str(json).expect("nulls are tolerated");

        assert_eq!(r.sol, None);
        assert_eq!(r.ls, None);
        assert_eq!(r.min_temp, None);
        assert_eq!(r.min_temp_fahrenheit, None);
        assert_eq!(r.max_temp, None);
        assert_eq!(r.max_temp_fahrenheit, None);
        assert_eq!(r.pressure, None);
        assert_eq!(r.abs_humidity, None);
        assert_eq!(r.wind_speed, None);
        assert!(r.terrestrial_date.is_empty());
        assert!(r.pressure_string.is_empty());
        assert!(r.wind_direction.is_empty());
        assert!(r.atmospheric_opacity.is_empty());
        assert!(r.season.is_empty());
        assert!(r.sunrise.is_empty());
        assert!(r.sunset.is_empty());
        assert_eq!(r.wind_direction_known(), None);
        assert_eq!(r.sunrise_utc(), None);
    }

    #[test]
    fn null_count_and_results_decode_as_empty_page() {
        let json = r#"{"count":null,"next":null,"previous":null,"results":null}"#;
        let page: ArchivePage = serde_json::from_str(json).expect("nulls are tolerated");

        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn wrong_type_is_still_rejected() {
        let json = r#"{"terrestrial_date":"2015-04-19","sol":"many","ls":42.0}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"count":0,"next":null,"previous":null,"results":[],"extra":{"a":1}}"#;
        let page: ArchivePage = serde_json::from_str(json).expect("extra fields tolerated");
        assert_eq!(page.count, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn report_survives_reencoding() {
        let latest: LatestReport = serde_json::from_str(LATEST_JSON).unwrap();
        let encoded = serde_json::to_string(&latest).unwrap();
        assert!(encoded.contains("\"abs_humidity\":null"));
        assert!(encoded.contains("\"atmo_opacity\":\"Sunny\""));

        let decoded: LatestReport = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, latest);
    }

    #[test]
    fn accessors_parse_dates() {
        let latest: LatestReport = serde_json::from_str(LATEST_JSON).unwrap();
        let r = &latest.report;

        assert_eq!(r.terrestrial_day(), NaiveDate::from_ymd_opt(2013, 5, 1));
        assert_eq!(r.sunrise_utc().map(|t| t.hour()), Some(11));
        assert_eq!(r.sunset_utc().map(|t| t.hour()), Some(22));
        assert_eq!(r.wind_direction_known(), None);
    }

    #[test]
    fn wind_direction_known_passes_real_values() {
        let mut r: Report =
            serde_json::from_str(r#"{"terrestrial_date":"x","sol":1,"ls":1}"#).unwrap();
        r.wind_direction = "NE".to_string();
        assert_eq!(r.wind_direction_known(), Some("NE"));
        assert_eq!(r.terrestrial_day(), None);
    }
}
