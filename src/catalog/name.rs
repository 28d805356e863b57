//! Archive name parsing
//!
//! Archive names follow `<source>[_<timestamp>][_<tag>...]`. Tags may also be
//! joined with commas inside one segment; both forms parse to the same set.

use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::{Captures, Regex};
use tracing::warn;

use crate::error::{ShelfError, ShelfResult};

/// Default time stamp format embedded in archive names
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Metadata carried by an archive's name
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveNameData {
    pub source_name: String,
    /// Seconds since the epoch, when the name carries a time stamp
    pub time_stamp: Option<f64>,
    /// Alphanumeric tags, sorted and de-duplicated
    pub tags: BTreeSet<String>,
}

impl ArchiveNameData {
    /// Parse a suffix-free archive name
    pub fn parse(name: &str, matcher: &TimestampMatcher) -> Self {
        let parts: Vec<&str> = name.split('_').collect();
        let source_name = parts[0].to_string();

        let mut time_stamp = None;
        let mut tags = BTreeSet::new();
        if parts.len() >= 2 {
            let raw_tags = match matcher.parse(parts[1]) {
                Some(parsed) => {
                    time_stamp = Some(parsed);
                    parts[2..].join(",")
                }
                None => parts[1..].join(","),
            };
            for tag in raw_tags.split(',') {
                if is_valid_tag(tag) {
                    tags.insert(tag.to_string());
                } else if !tag.is_empty() {
                    warn!(tag, name, "ignoring non-alphanumeric tag");
                }
            }
        }

        Self {
            source_name,
            time_stamp,
            tags,
        }
    }
}

/// Tags must be non-empty and purely alphanumeric
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(char::is_alphanumeric)
}

/// Time zone used to interpret wall-clock time stamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StampZone {
    #[default]
    Local,
    Utc,
}

impl StampZone {
    /// Epoch seconds for a wall-clock time in this zone
    ///
    /// Ambiguous local times resolve to the earlier instant; times skipped by a
    /// daylight saving change move forward by the gap.
    pub fn to_epoch(&self, naive: NaiveDateTime) -> f64 {
        match self {
            Self::Utc => Utc.from_utc_datetime(&naive).timestamp() as f64,
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
                .map(|dt| dt.timestamp() as f64)
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive).timestamp() as f64),
        }
    }

    /// Format the current time in this zone
    pub fn format_now(&self, format: &str) -> String {
        match self {
            Self::Utc => Utc::now().format(format).to_string(),
            Self::Local => Local::now().format(format).to_string(),
        }
    }
}

/// Recognizes time stamps written with a strftime-style format
///
/// Supports `%Y %m %d %H %M %S` and `%%`; everything else is literal. Matching
/// is anchored at the start of the text only.
#[derive(Debug, Clone)]
pub struct TimestampMatcher {
    format: String,
    regex: Regex,
    zone: StampZone,
}

impl TimestampMatcher {
    /// Build a matcher for `format`, interpreting times in local time
    pub fn new(format: &str) -> ShelfResult<Self> {
        let mut pattern = String::from("^");
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                pattern.push_str(&regex::escape(&c.to_string()));
                continue;
            }
            let group = match chars.next() {
                Some('Y') => r"(?P<year>\d{4})",
                Some('m') => r"(?P<month>\d{2})",
                Some('d') => r"(?P<day>\d{2})",
                Some('H') => r"(?P<hours>\d{2})",
                Some('M') => r"(?P<minutes>\d{2})",
                Some('S') => r"(?P<seconds>\d{2})",
                Some('%') => "%",
                other => {
                    return Err(ShelfError::Config(format!(
                        "Unsupported directive \"%{}\" in time stamp format \"{}\"",
                        other.map(String::from).unwrap_or_default(),
                        format
                    )))
                }
            };
            pattern.push_str(group);
        }

        let regex = Regex::new(&pattern)
            .map_err(|e| ShelfError::Config(format!("Bad time stamp format \"{}\": {}", format, e)))?;
        Ok(Self {
            format: format.to_string(),
            regex,
            zone: StampZone::Local,
        })
    }

    /// Interpret matched time stamps in `zone` instead of local time
    pub fn with_zone(mut self, zone: StampZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn zone(&self) -> StampZone {
        self.zone
    }

    /// Parse a time stamp at the start of `text` into epoch seconds
    ///
    /// Out-of-range fields roll over into the next unit, so day 32 of December
    /// is January 1 of the following year.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let caps = self.regex.captures(text)?;
        let naive = normalized_datetime(
            field(&caps, "year", 1970),
            field(&caps, "month", 1),
            field(&caps, "day", 1),
            field(&caps, "hours", 0),
            field(&caps, "minutes", 0),
            field(&caps, "seconds", 0),
        )?;
        Some(self.zone.to_epoch(naive))
    }

    /// Current time formatted for embedding in an archive name
    pub fn format_now(&self) -> String {
        self.zone.format_now(&self.format)
    }
}

fn field(caps: &Captures<'_>, name: &str, default: i64) -> i64 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default)
}

fn normalized_datetime(
    year: i64,
    month: i64,
    day: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
) -> Option<NaiveDateTime> {
    let month_index = month - 1;
    let year = year + month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) + 1;
    let base = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month as u32, 1)?
        .and_hms_opt(0, 0, 0)?;
    base.checked_add_signed(
        Duration::days(day - 1)
            + Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::seconds(seconds),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_matcher() -> TimestampMatcher {
        TimestampMatcher::new(DEFAULT_TIMESTAMP_FORMAT)
            .unwrap()
            .with_zone(StampZone::Utc)
    }

    fn tags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_source_only() {
        let data = ArchiveNameData::parse("project", &utc_matcher());
        assert_eq!(data.source_name, "project");
        assert_eq!(data.time_stamp, None);
        assert!(data.tags.is_empty());
    }

    #[test]
    fn test_timestamp_and_underscore_tags() {
        let data = ArchiveNameData::parse("proj_20200301-120000_beta_alpha_beta", &utc_matcher());
        assert_eq!(data.source_name, "proj");
        assert_eq!(data.time_stamp, Some(1_583_064_000.0));
        assert_eq!(data.tags, tags(&["alpha", "beta"]));
    }

    #[test]
    fn test_comma_tags_after_timestamp() {
        let data = ArchiveNameData::parse("proj_20200301-120000_the,a,the", &utc_matcher());
        assert_eq!(data.tags, tags(&["a", "the"]));
    }

    #[test]
    fn test_tags_without_timestamp() {
        let data = ArchiveNameData::parse("proj_release_v2,rc1", &utc_matcher());
        assert_eq!(data.time_stamp, None);
        assert_eq!(data.tags, tags(&["rc1", "release", "v2"]));
    }

    #[test]
    fn test_non_alphanumeric_tags_dropped() {
        let data = ArchiveNameData::parse("proj_20200301-120000_ok_not-ok_fi.ne", &utc_matcher());
        assert_eq!(data.tags, tags(&["ok"]));

        let data = ArchiveNameData::parse("proj_a+b_good", &utc_matcher());
        assert_eq!(data.tags, tags(&["good"]));
    }

    #[test]
    fn test_empty_tag_segment() {
        let data = ArchiveNameData::parse("test_20200331-230001_", &utc_matcher());
        assert!(data.time_stamp.is_some());
        assert!(data.tags.is_empty());
    }

    #[test]
    fn test_timestamp_prefix_match() {
        // Matching is anchored at the start only.
        let data = ArchiveNameData::parse("test_20200329-020458.fluff,muggle", &utc_matcher());
        assert!(data.time_stamp.is_some());
        assert!(data.tags.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let matcher = utc_matcher();
        let stamp = NaiveDate::from_ymd_opt(2023, 7, 14)
            .unwrap()
            .and_hms_opt(8, 9, 10)
            .unwrap();
        let name = format!("src_{}_zeta_alpha_zeta", stamp.format(DEFAULT_TIMESTAMP_FORMAT));
        let data = ArchiveNameData::parse(&name, &matcher);
        assert_eq!(data.source_name, "src");
        assert_eq!(data.time_stamp, Some(StampZone::Utc.to_epoch(stamp)));
        assert_eq!(data.tags, tags(&["alpha", "zeta"]));
    }

    #[test]
    fn test_day_rollover() {
        let matcher = utc_matcher();
        assert_eq!(
            matcher.parse("20191232-000000"),
            matcher.parse("20200101-000000")
        );
        assert_eq!(
            matcher.parse("20191301-000000"),
            matcher.parse("20200101-000000")
        );
    }

    #[test]
    fn test_custom_format() {
        let matcher = TimestampMatcher::new("%Y.%m.%d")
            .unwrap()
            .with_zone(StampZone::Utc);
        assert_eq!(matcher.parse("2020.01.02"), Some(1_577_923_200.0));
        assert_eq!(matcher.parse("2020x01x02"), None);
    }

    #[test]
    fn test_unsupported_directive() {
        let err = TimestampMatcher::new("%Y-%j").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_local_zone_round_trip() {
        let matcher = TimestampMatcher::new(DEFAULT_TIMESTAMP_FORMAT).unwrap();
        let naive = NaiveDate::from_ymd_opt(2021, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let expected = Local.from_local_datetime(&naive).earliest().unwrap().timestamp() as f64;
        assert_eq!(matcher.parse("20210115-100000"), Some(expected));
    }
}
