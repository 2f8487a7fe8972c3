use chrono::{DateTime, NaiveDateTime, Utc};

/// Wire format for every timestamp the service emits: ISO 8601 in UTC with a
/// literal `Z` and second precision, e.g. `2023-01-01T00:00:00Z`.
pub const ISO_8601_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(ISO_8601_UTC_FORMAT).to_string()
}

/// Serde adapter applying [`ISO_8601_UTC_FORMAT`] to `DateTime<Utc>` fields
/// via `#[serde(with = "crate::util::iso8601_utc")]`.
pub mod iso8601_utc {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::*;

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_datetime(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, ISO_8601_UTC_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn format_drops_fractional_seconds() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(format_datetime(&dt), "2023-01-01T00:00:00Z");
    }

    #[test]
    fn format_zero_pads_all_fields() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-07T09:05:02Z");
    }

    #[test]
    fn serde_adapter_round_trips() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Stamp {
            #[serde(with = "iso8601_utc")]
            at: DateTime<Utc>,
        }

        let stamp = Stamp {
            at: Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&stamp).unwrap();
        assert_eq!(json, r#"{"at":"2023-06-01T08:00:00Z"}"#);

        let back: Stamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, stamp.at);
    }
}
