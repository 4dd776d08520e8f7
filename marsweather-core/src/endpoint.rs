use std::{fmt, num::NonZeroU32};

use chrono::Datelike;

/// Host of the public MAAS service.
pub const DEFAULT_BASE_URL: &str = "http://marsweather.ingenology.com";

/// The three queries the service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Latest,
    ArchivePage(NonZeroU32),
    ArchiveDateRange { start: ArchiveDate, end: ArchiveDate },
}

impl Endpoint {
    pub fn date_range(from: &impl Datelike, to: &impl Datelike) -> Self {
        Endpoint::ArchiveDateRange {
            start: ArchiveDate::from_datelike(from),
            end: ArchiveDate::from_datelike(to),
        }
    }

    /// Full request URL against `base_url`; a trailing slash on the base is ignored.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Endpoint::Latest => format!("{base}/v1/latest/"),
            Endpoint::ArchivePage(page) => format!("{base}/v1/archive/?page={page}"),
            Endpoint::ArchiveDateRange { start, end } => format!(
                "{base}/v1/archive/?terrestrial_date_start={start}&terrestrial_date_end={end}"
            ),
        }
    }
}

/// Calendar date as the archive filter expects it.
///
/// Only the year, month and day are kept, taken in whatever time zone the
/// source value carries, so `2015-04-19T23:30:00+05:00` stays on the 19th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArchiveDate {
    year: i32,
    month: u32,
    day: u32,
}

impl ArchiveDate {
    pub fn from_datelike(date: &impl Datelike) -> Self {
        Self { year: date.year(), month: date.month(), day: date.day() }
    }
}

impl fmt::Display for ArchiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    const BASE: &str = "http://mars.test";

    #[test]
    fn latest_url() {
        assert_eq!(Endpoint::Latest.url(BASE), "http://mars.test/v1/latest/");
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        assert_eq!(Endpoint::Latest.url("http://mars.test/"), "http://mars.test/v1/latest/");
    }

    #[test]
    fn archive_page_is_placed_verbatim() {
        let page = NonZeroU32::new(2).unwrap();
        let url = Endpoint::ArchivePage(page).url(BASE);

        assert_eq!(url, "http://mars.test/v1/archive/?page=2");
        assert!(url.contains("?page=2"));
    }

    #[test]
    fn date_range_from_naive_dates() {
        let from = NaiveDate::from_ymd_opt(2015, 4, 19).unwrap();
        let to = NaiveDate::from_ymd_opt(2015, 4, 22).unwrap();

        assert_eq!(
            Endpoint::date_range(&from, &to).url(BASE),
            "http://mars.test/v1/archive/?terrestrial_date_start=2015-04-19&terrestrial_date_end=2015-04-22"
        );
    }

    #[test]
    fn date_range_ignores_time_of_day_and_offset() {
        let from = DateTime::parse_from_rfc3339("2015-04-19T23:30:00+05:00").unwrap();
        let to = Utc.with_ymd_and_hms(2015, 4, 22, 0, 0, 1).unwrap();

        let url = Endpoint::date_range(&from, &to).url(BASE);
        assert!(url.contains("terrestrial_date_start=2015-04-19"));
        assert!(url.contains("terrestrial_date_end=2015-04-22"));
    }

    #[test]
    fn archive_date_pads_components() {
        let d = NaiveDate::from_ymd_opt(812, 1, 3).unwrap();
        assert_eq!(ArchiveDate::from_datelike(&d).to_string(), "0812-01-03");
    }

    #[test]
    fn reversed_range_is_not_reordered() {
        let from = NaiveDate::from_ymd_opt(2015, 4, 22).unwrap();
        let to = NaiveDate::from_ymd_opt(2015, 4, 19).unwrap();

        let url = Endpoint::date_range(&from, &to).url(BASE);
        assert!(url.ends_with("terrestrial_date_start=2015-04-22&terrestrial_date_end=2015-04-19"));
    }
}
