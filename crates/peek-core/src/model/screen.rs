// ── Screen domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Reported health of a screen.
///
/// The backend may grow new states; anything unrecognised is kept
/// verbatim in `Other` rather than rejected.
///
/// Matching is exact and case-sensitive: `"Online"` is an unknown state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScreenStatus {
    Online,
    Offline,
    Error,
    Other(String),
}

/// Visual tone a status is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Warning,
    Error,
    #[strum(serialize = "default")]
    #[serde(rename = "default")]
    Neutral,
}

impl ScreenStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Online => StatusTone::Success,
            Self::Offline => StatusTone::Warning,
            Self::Error => StatusTone::Error,
            Self::Other(_) => StatusTone::Neutral,
        }
    }
}

impl StatusTone {
    /// Total mapping from a raw status string to its tone.
    pub fn for_status(status: &str) -> Self {
        ScreenStatus::from(status).tone()
    }
}

impl From<&str> for ScreenStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "online" => Self::Online,
            "offline" => Self::Offline,
            "error" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ScreenStatus {
    fn from(raw: String) -> Self {
        match Self::from(raw.as_str()) {
            Self::Other(_) => Self::Other(raw),
            known => known,
        }
    }
}

impl From<ScreenStatus> for String {
    fn from(status: ScreenStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for ScreenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed physical display.
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub status: ScreenStatus,
    pub last_check: Option<DateTime<Utc>>,
    /// Milliseconds taken by the last health probe.
    pub response_time_ms: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_tone_mapping_is_total() {
        assert_eq!(StatusTone::for_status("online"), StatusTone::Success);
        assert_eq!(StatusTone::for_status("offline"), StatusTone::Warning);
        assert_eq!(StatusTone::for_status("error"), StatusTone::Error);
        assert_eq!(StatusTone::for_status("unknown"), StatusTone::Neutral);
        assert_eq!(StatusTone::for_status(""), StatusTone::Neutral);
        assert_eq!(StatusTone::for_status("Online"), StatusTone::Neutral);
    }

    #[test]
    fn tone_names_match_widget_palette() {
        assert_eq!(StatusTone::Success.as_ref(), "success");
        assert_eq!(StatusTone::Warning.to_string(), "warning");
        assert_eq!(StatusTone::Error.to_string(), "error");
        assert_eq!(StatusTone::Neutral.to_string(), "default");
    }

    #[test]
    fn unknown_status_keeps_raw_label() {
        let status = ScreenStatus::from("maintenance");
        assert_eq!(status, ScreenStatus::Other("maintenance".into()));
        assert_eq!(status.to_string(), "maintenance");
    }

    #[test]
    fn known_statuses_convert_from_owned_and_borrowed() {
        assert_eq!(ScreenStatus::from("online"), ScreenStatus::Online);
        assert_eq!(ScreenStatus::from(String::from("error")), ScreenStatus::Error);
        assert_eq!(
            ScreenStatus::from(String::from("Offline")),
            ScreenStatus::Other("Offline".into())
        );
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&ScreenStatus::Offline).unwrap();
        assert_eq!(json, "\"offline\"");
        let back: ScreenStatus = serde_json::from_str("\"rebooting\"").unwrap();
        assert_eq!(back, ScreenStatus::Other("rebooting".into()));
    }
}
