//! Core data types for the energy usage dashboard
//!
//! This module defines the canonical shapes shared by every layer:
//! - `UsageRecord`: a single (region, timestamp, usage) observation
//! - `RegionFilter`: the optional region constraint of a usage request
//! - `LabelZone`: the time zone used to interpret and label timestamps

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

/// A single usage observation
///
/// Immutable once received. The dataset is a plain sequence of these with no
/// uniqueness constraint, so duplicate regions and timestamps are preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageRecord {
    /// Region identifier
    pub region: String,
    /// ISO-8601 timestamp exactly as received
    #[serde(rename = "datetime")]
    pub timestamp: String,
    /// Usage in megawatts
    #[serde(rename = "usage_mw")]
    pub usage_mw: f64,
}

impl UsageRecord {
    pub fn new(region: impl Into<String>, timestamp: impl Into<String>, usage_mw: f64) -> Self {
        Self {
            region: region.into(),
            timestamp: timestamp.into(),
            usage_mw,
        }
    }

    /// Parse the timestamp into an instant, interpreting zone-less wall
    /// times in `zone`. Returns `None` when the string is not ISO-8601.
    pub fn instant(&self, zone: &LabelZone) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp, zone)
    }
}

/// Optional region constraint for a usage request
///
/// An empty string means "no filter", the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RegionFilter(Option<String>);

impl RegionFilter {
    /// No constraint: all regions
    pub fn all() -> Self {
        Self(None)
    }

    pub fn region(region: impl Into<String>) -> Self {
        Self::from(Some(region.into()))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for RegionFilter {
    fn from(region: Option<String>) -> Self {
        Self(region.filter(|r| !r.is_empty()))
    }
}

impl From<Option<&str>> for RegionFilter {
    fn from(region: Option<&str>) -> Self {
        Self::from(region.map(str::to_string))
    }
}

/// Time zone used for zone-less timestamps and for date labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelZone {
    /// The system's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl LabelZone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Parse an offset of the form `+HH:MM`, `-HH:MM` or `Z`
    pub fn parse_offset(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
            return Some(Self::utc());
        }
        let (sign, rest) = match raw.as_bytes().first() {
            Some(b'+') => (1, &raw[1..]),
            Some(b'-') => (-1, &raw[1..]),
            _ => return None,
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours: i32 = hours.parse().ok()?;
        let minutes: i32 = minutes.parse().ok()?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(Self::Fixed)
    }

    /// Resolve a wall-clock time in this zone to an instant
    ///
    /// Ambiguous wall times (DST fold) resolve to the earlier instant.
    /// Wall times skipped by a DST gap keep the offset in force before the
    /// gap, which moves them forward by its length.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => resolve_in(&Local, naive),
            Self::Fixed(offset) => resolve_in(offset, naive),
        }
    }

    /// Format an instant in this zone with a strftime pattern
    pub fn format(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Self::Local => instant.with_timezone(&Local).format(pattern).to_string(),
            Self::Fixed(offset) => instant.with_timezone(offset).format(pattern).to_string(),
        }
    }
}

fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Some(dt.with_timezone(&Utc));
    }

    // Skipped wall time: find the offset just before the gap
    let before = (1..=48)
        .find_map(|step| tz.from_local_datetime(&(naive - Duration::minutes(30 * step))).earliest())?;
    let offset = before.offset().fix();
    Some(Utc.from_utc_datetime(&(naive - Duration::seconds(offset.local_minus_utc().into()))))
}

/// Date-times with an explicit offset that RFC 3339 parsing rejects
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp
///
/// - with an offset (`2024-01-01T00:00:00Z`): that exact instant
/// - without one (`2024-01-01T00:00:00`, `2024-01-01 00:00:00`): wall time in `zone`
/// - date only (`2024-01-01`): midnight UTC
pub fn parse_timestamp(raw: &str, zone: &LabelZone) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return zone.resolve(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names() {
        let json = r#"{"region":"north","datetime":"2024-01-01T00:00:00Z","usage_mw":10}"#;
        let record: UsageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, UsageRecord::new("north", "2024-01-01T00:00:00Z", 10.0));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["datetime"], "2024-01-01T00:00:00Z");
        assert_eq!(back["usage_mw"], 10.0);
    }

    #[test]
    fn test_region_filter_empty_is_all() {
        assert!(RegionFilter::from(Some(String::new())).is_all());
        assert!(RegionFilter::from(None::<String>).is_all());
        assert_eq!(RegionFilter::region("west").as_deref(), Some("west"));
    }

    #[test]
    fn test_parse_rfc3339() {
        let zone = LabelZone::Local;
        let a = parse_timestamp("2024-01-01T00:00:00Z", &zone).unwrap();
        let b = parse_timestamp("2024-01-01T02:00:00+02:00", &zone).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_offset_without_colon() {
        let zone = LabelZone::Local;
        let utc = parse_timestamp("2024-01-01T00:00:00Z", &zone).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:00:00+0000", &zone), Some(utc));
        assert_eq!(parse_timestamp("2024-01-01T02:00:00+0200", &zone), Some(utc));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00.000+0000", &zone), Some(utc));
        assert_eq!(parse_timestamp("2024-01-01 02:00:00+02:00", &zone), Some(utc));
    }

    /// -05:00 until 2024-03-10 02:00 local, then -04:00
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn switch_local() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> chrono::LocalResult<FixedOffset> {
            chrono::LocalResult::Single(Self::before())
        }

        fn offset_from_local_datetime(
            &self,
            local: &NaiveDateTime,
        ) -> chrono::LocalResult<FixedOffset> {
            let switch = Self::switch_local();
            if *local < switch {
                chrono::LocalResult::Single(Self::before())
            } else if *local < switch + Duration::hours(1) {
                chrono::LocalResult::None
            } else {
                chrono::LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            Self::before()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_local() + Duration::hours(5) {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn test_resolve_in_dst_gap_moves_forward() {
        let in_gap = NaiveDateTime::parse_from_str("2024-03-10 02:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let instant = resolve_in(&SpringForward, in_gap).unwrap();
        // 02:30 at -05:00 is 07:30Z, i.e. 03:30 on the far side of the gap
        assert_eq!(instant.to_rfc3339(), "2024-03-10T07:30:00+00:00");

        let outside = NaiveDateTime::parse_from_str("2024-03-10 04:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(
            resolve_in(&SpringForward, outside).unwrap().to_rfc3339(),
            "2024-03-10T08:00:00+00:00"
        );
    }

    #[test]
    fn test_parse_naive_uses_zone() {
        let zone = LabelZone::parse_offset("+05:00").unwrap();
        let instant = parse_timestamp("2024-01-01 05:00:00", &zone).unwrap();
        assert_eq!(instant, parse_timestamp("2024-01-01T00:00:00Z", &zone).unwrap());

        let with_t = parse_timestamp("2024-01-01T05:00:00.000", &zone).unwrap();
        assert_eq!(with_t, instant);
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let zone = LabelZone::parse_offset("-08:00").unwrap();
        let instant = parse_timestamp("2024-03-10", &zone).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-03-10T00:00:00+00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday", &LabelZone::utc()).is_none());
        assert!(parse_timestamp("", &LabelZone::utc()).is_none());
    }

    #[test]
    fn test_label_zone_format() {
        let instant = parse_timestamp("2024-01-01T03:00:00Z", &LabelZone::utc()).unwrap();
        let west = LabelZone::parse_offset("-05:00").unwrap();
        assert_eq!(west.format(instant, "%Y-%m-%d"), "2023-12-31");
        assert_eq!(LabelZone::utc().format(instant, "%-m/%-d/%Y"), "1/1/2024");
        assert_eq!(LabelZone::parse_offset("Z"), Some(LabelZone::utc()));
        assert_eq!(LabelZone::parse_offset("nope"), None);
    }
}
