// ── API-to-domain type conversions ──
//
// Bridges raw `peek_api` wire records into canonical `model` types.

use chrono::{DateTime, NaiveDateTime, Utc};

use peek_api::{ScreenRecord, ScreenStats};

use crate::model::{DashboardStats, Screen, ScreenStatus};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO-8601 the backend emits for
/// `datetime.utcnow()`; offset-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl From<ScreenRecord> for Screen {
    fn from(r: ScreenRecord) -> Self {
        Self {
            last_check: r.last_check.as_deref().and_then(parse_timestamp),
            status: ScreenStatus::from(r.status),
            id: r.id,
            name: r.name,
            image_url: r.image_url.filter(|u| !u.is_empty()),
            response_time_ms: r.response_time,
        }
    }
}

impl From<ScreenStats> for DashboardStats {
    fn from(s: ScreenStats) -> Self {
        Self {
            total: s.total_screens,
            online: s.online_screens,
            offline: s.offline_screens,
            error: s.error_screens,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn naive_timestamps_are_utc() {
        let dt = parse_timestamp("2025-03-01T10:15:30.123456").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 15);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn rfc3339_offsets_are_normalised() {
        let dt = parse_timestamp("2025-03-01T12:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn garbage_timestamps_are_dropped() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn screen_record_converts() {
        let screen = Screen::from(ScreenRecord {
            id: "7".into(),
            name: "Lobby".into(),
            image_url: Some(String::new()),
            status: "error".into(),
            last_check: Some("2025-03-01 08:00:00".into()),
            response_time: Some(87.5),
        });

        assert_eq!(screen.status, ScreenStatus::Error);
        assert!(screen.image_url.is_none());
        assert_eq!(screen.last_check.unwrap().hour(), 8);
        assert_eq!(screen.response_time_ms, Some(87.5));
    }

    #[test]
    fn stats_convert_field_by_field() {
        let stats = DashboardStats::from(ScreenStats {
            total_screens: 10,
            online_screens: 6,
            offline_screens: 2,
            error_screens: 1,
        });
        assert_eq!(stats.total, 10);
        assert_eq!(stats.other(), 1);
    }
}
