// ── Dashboard view ──

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use peek_api::ApiClient;

use crate::model::DashboardStats;
use crate::view::LoadState;

/// Screen status counts for the landing page.
pub struct DashboardView {
    api: Arc<ApiClient>,
    lifecycle: CancellationToken,
    state: watch::Sender<LoadState>,
    stats: DashboardStats,
}

impl DashboardView {
    pub(crate) fn new(api: Arc<ApiClient>, lifecycle: CancellationToken) -> Self {
        Self {
            api,
            lifecycle,
            state: watch::channel(LoadState::Idle).0,
            stats: DashboardStats::default(),
        }
    }

    /// Fetch the counts once.
    ///
    /// Failure is logged and leaves the zeroed defaults in place; it never
    /// escapes the view. Subscribers see `Loading` while the request runs.
    pub async fn load(&mut self) -> LoadState {
        self.state.send_replace(LoadState::Loading);
        let result = self.api.screen_stats().await;

        if self.lifecycle.is_cancelled() {
            debug!("dashboard unmounted, discarding stats response");
            self.state.send_replace(LoadState::Discarded);
            return LoadState::Discarded;
        }

        let state = match result {
            Ok(stats) => {
                self.stats = stats.into();
                LoadState::Loaded
            }
            Err(e) => {
                warn!(error = %e, "failed to load dashboard stats");
                LoadState::Failed {
                    message: e.to_string(),
                }
            }
        };
        self.state.send_replace(state.clone());
        state
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Subscribe to load state changes, including the pending phase.
    pub fn watch_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// `true` while the initial fetch is pending.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Stop applying responses to this view.
    pub fn unmount(&self) {
        self.lifecycle.cancel();
    }
}
