// ── Domain model ──
//
// Canonical types consumed by views and the CLI. Built from the wire
// records in `peek_api::models` by `crate::convert`.

pub mod dashboard;
pub mod screen;

pub use dashboard::DashboardStats;
pub use screen::{Screen, ScreenStatus, StatusTone};
