// ── Dashboard aggregate ──

use serde::Serialize;

/// Screen counts by status. No identity; replaced wholesale on every fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
    pub error: u64,
}

impl DashboardStats {
    /// Screens reporting none of the three known statuses.
    pub fn other(&self) -> u64 {
        let known = self
            .online
            .saturating_add(self.offline)
            .saturating_add(self.error);
        self.total.saturating_sub(known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_never_overflows() {
        let stats = DashboardStats {
            total: 10,
            online: u64::MAX,
            offline: u64::MAX,
            error: 1,
        };
        assert_eq!(stats.other(), 0);

        let stats = DashboardStats {
            total: 7,
            online: 3,
            offline: 1,
            error: 1,
        };
        assert_eq!(stats.other(), 2);
    }
}
