use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One country/timezone's daylight-saving-time status for the queried year.
///
/// Records are built fresh from each response and are immutable afterwards.
/// A record with no transition dates is a real answer: the region does not
/// observe DST in the queried year (or observes it all year, see
/// [`DstEntry::special`]).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DstEntry {
    /// Country the entry belongs to.
    pub country: Country,

    /// Human-readable description of the region covered ("All locations",
    /// "most locations", ...).
    pub region_description: Option<String>,

    /// Name of the most populous place in the region, when the service
    /// names one.
    pub biggest_place: Option<String>,

    /// Timezone in effect outside DST. Its offset is the UTC offset before
    /// the transition.
    pub std_timezone: TdTimeZone,

    /// Timezone in effect during DST. Absent when the region does not
    /// observe DST in the queried year.
    pub dst_timezone: Option<TdTimeZone>,

    /// Instant DST comes into effect. Absent when not observed.
    pub dst_start: Option<DateTime<Utc>>,

    /// Instant DST ends. Absent when not observed, or when DST runs all
    /// year.
    pub dst_end: Option<DateTime<Utc>>,

    /// Special DST rule for irregular regions ("DST all year").
    pub special: Option<String>,

    /// Places sharing this entry's DST status. Populated only when place
    /// listing was requested; non-empty when present.
    pub places: Option<Vec<Place>>,

    /// Discrete UTC-offset change events within the year, in chronological
    /// order. Populated only when time-change listing was requested.
    pub time_changes: Option<Vec<TimeChange>>,
}

impl DstEntry {
    /// Whether the region observes DST at some point in the queried year.
    pub fn observes_dst(&self) -> bool {
        self.dst_start.is_some() || self.dst_end.is_some() || self.special.is_some()
    }
}

/// ISO-3166-1 country identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    /// Two-letter country code, lowercase.
    pub id: String,
    /// English country name.
    pub name: String,
}

/// A timezone as the service describes it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TdTimeZone {
    /// Abbreviation ("CET", "PST").
    pub abbreviation: String,
    /// Full zone name, when given.
    pub name: Option<String>,
    /// Offset from UTC in seconds.
    pub offset_seconds: i32,
}

/// A place sharing a DST entry's status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    /// Numeric place id usable with the other location-based services.
    pub id: i64,
    /// Place name.
    pub name: String,
    /// State or administrative area, where applicable.
    pub state: Option<String>,
}

/// A single UTC-offset change event within the queried year.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeChange {
    /// Instant of the change in UTC.
    pub utc_time: DateTime<Utc>,
    /// Wall-clock time immediately before the change.
    pub old_local_time: Option<NaiveDateTime>,
    /// Wall-clock time immediately after the change.
    pub new_local_time: Option<NaiveDateTime>,
    /// Offset from UTC in seconds after the change.
    pub new_offset_seconds: i32,
}

#[cfg(test)]
mod tests {
    use super::{Country, DstEntry, TdTimeZone};

    #[test]
    fn test_entry_serializes_with_absent_fields() {
        let entry = DstEntry {
            country: Country {
                id: "qa".to_string(),
                name: "Qatar".to_string(),
            },
            region_description: None,
            biggest_place: None,
            std_timezone: TdTimeZone {
                abbreviation: "AST".to_string(),
                name: None,
                offset_seconds: 10800,
            },
            dst_timezone: None,
            dst_start: None,
            dst_end: None,
            special: None,
            places: None,
            time_changes: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["country"]["id"], "qa");
        assert_eq!(json["dst_start"], serde_json::Value::Null);
        assert!(!entry.observes_dst());

        let back: DstEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
