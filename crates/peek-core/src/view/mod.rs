// ── Views ──
//
// UI-agnostic state holders for each page. A view is created by the
// `Portal`, initialised with an explicit `load()`, and owns its state
// exclusively. Each carries a lifecycle token derived from the portal's;
// once it is cancelled (unmount, or a 401 anywhere) late responses are
// dropped instead of applied. Pending state is published on watch
// channels so a frontend can render it while a request is in flight.

pub mod dashboard;
pub mod register;
pub mod screens;

pub use dashboard::DashboardView;
pub use register::{RegistrationFlow, RegistrationForm};
pub use screens::{ScreenDraft, ScreensView, SubmitState};

/// Outcome of a view's initial fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// `load()` has not been called.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the view shows its default data.
    Failed { message: String },
    /// The view was unmounted before the response arrived.
    Discarded,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed { .. } | Self::Discarded)
    }
}
