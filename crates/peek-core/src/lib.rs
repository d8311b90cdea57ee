//! Session, navigation, and view state between `peek-api` and frontends.
//!
//! - **[`Portal`]**: Facade for one backend. Builds the authenticated
//!   [`ApiClient`](peek_api::ApiClient) with an injected session store and
//!   wires its unauthorized hook to a [`Navigator`]: a 401 anywhere sends the
//!   user to [`Route::Login`] and abandons in-flight view updates.
//!
//! - **Views** ([`view`]): [`DashboardView`], [`ScreensView`] and
//!   [`RegistrationFlow`]. Each is initialised with an explicit async
//!   `load()`/`submit()` and reports a [`LoadState`] instead of relying on a
//!   render lifecycle. Load failures degrade to default data.
//!
//! - **Domain model** ([`model`]): [`Screen`], [`ScreenStatus`] with its
//!   total [`StatusTone`] mapping, and [`DashboardStats`].

pub mod config;
pub mod convert;
pub mod error;
pub mod messages;
pub mod model;
pub mod navigation;
pub mod portal;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BACKEND_URL, PortalConfig, TlsVerification};
pub use error::CoreError;
pub use model::{DashboardStats, Screen, ScreenStatus, StatusTone};
pub use navigation::{History, Navigator, Route};
pub use portal::Portal;
pub use view::{
    DashboardView, LoadState, RegistrationFlow, RegistrationForm, ScreenDraft, ScreensView,
    SubmitState,
};

// Types frontends need from the transport layer.
pub use peek_api::{
    ImageUpload, MemorySessionStore, NewUser, SessionStore, SessionStoreError, Tenant, User,
};
