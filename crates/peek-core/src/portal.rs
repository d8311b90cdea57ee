// ── Portal facade ──
//
// Owns the authenticated API client for one backend and hands out views.
// The client's unauthorized hook is wired here: a 401 anywhere sends the
// user to the login route and cancels the lifecycle token every live
// view was derived from.

use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use peek_api::{ApiClient, NewUser, SessionStore, UnauthorizedHook, User};

use crate::config::PortalConfig;
use crate::error::CoreError;
use crate::navigation::{Navigator, Route};
use crate::view::{DashboardView, RegistrationFlow, ScreensView};

/// Shared, swappable lifecycle token.
type Lifecycle = Arc<Mutex<CancellationToken>>;

fn current_token(lifecycle: &Lifecycle) -> CancellationToken {
    lifecycle
        .lock()
        .map(|t| t.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

/// Cancel the current token and install a fresh one for views created later.
fn restart(lifecycle: &Lifecycle) {
    let mut guard = lifecycle
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.cancel();
    *guard = CancellationToken::new();
}

/// Entry point for frontends.
///
/// Cheaply cloneable. Views created from it share its API client but own
/// their state.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    api: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    lifecycle: Lifecycle,
}

impl Portal {
    /// Build the API client for `config`, wiring the session store and the
    /// navigation side effect of a 401.
    pub fn new(
        config: PortalConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, CoreError> {
        let lifecycle: Lifecycle = Arc::new(Mutex::new(CancellationToken::new()));

        let hook: UnauthorizedHook = {
            let navigator = Arc::clone(&navigator);
            let lifecycle = Arc::clone(&lifecycle);
            Arc::new(move || {
                info!("session rejected by backend, returning to login");
                restart(&lifecycle);
                navigator.navigate(Route::Login);
            })
        };

        let api = ApiClient::new(
            config.url.as_str(),
            &config.transport(),
            Arc::clone(&session),
            hook,
        )?;

        Ok(Self {
            inner: Arc::new(PortalInner {
                config,
                api: Arc::new(api),
                session,
                navigator,
                lifecycle,
            }),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// The underlying API client, for calls no view covers.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.inner.api
    }

    /// Whether a session token is currently stored.
    pub fn has_session(&self) -> bool {
        matches!(self.inner.session.load(), Ok(Some(_)))
    }

    fn child_lifecycle(&self) -> CancellationToken {
        current_token(&self.inner.lifecycle).child_token()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Sign in and persist the returned token, then go to the dashboard.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        let token = self.inner.api.login(email, password).await?;
        self.inner.session.save(&token)?;
        restart(&self.inner.lifecycle);
        info!(email, "signed in");
        self.inner.navigator.navigate(Route::Dashboard);
        Ok(())
    }

    /// Forget the stored token and go to the login route.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.inner.session.clear()?;
        restart(&self.inner.lifecycle);
        debug!("signed out");
        self.inner.navigator.navigate(Route::Login);
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, CoreError> {
        Ok(self.inner.api.me().await?)
    }

    pub async fn users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.inner.api.list_users().await?)
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, CoreError> {
        Ok(self.inner.api.create_user(user).await?)
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn registration(&self) -> RegistrationFlow {
        RegistrationFlow::new(
            Arc::clone(&self.inner.api),
            Arc::clone(&self.inner.navigator),
        )
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(Arc::clone(&self.inner.api), self.child_lifecycle())
    }

    pub fn screens(&self) -> ScreensView {
        ScreensView::new(Arc::clone(&self.inner.api), self.child_lifecycle())
    }
}
