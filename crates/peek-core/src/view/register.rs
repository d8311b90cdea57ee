// ── Registration flow ──

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use peek_api::{ApiClient, Registration, Tenant};

use crate::error::CoreError;
use crate::messages;
use crate::navigation::{Navigator, Route};

/// Raw sign-up form input. `confirm_password` is checked locally and
/// never leaves the process.
pub struct RegistrationForm {
    pub name: String,
    pub description: String,
    pub owner_email: String,
    pub owner_full_name: String,
    pub owner_password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    fn passwords_match(&self) -> bool {
        self.owner_password.expose_secret() == self.confirm_password.expose_secret()
    }

    fn to_registration(&self) -> Registration {
        let description = self.description.trim();
        Registration {
            name: self.name.trim().to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            owner_email: self.owner_email.trim().to_owned(),
            owner_password: self.owner_password.clone(),
            owner_full_name: self.owner_full_name.trim().to_owned(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("owner_email", &self.owner_email)
            .field("owner_full_name", &self.owner_full_name)
            .finish_non_exhaustive()
    }
}

/// Organization sign-up.
pub struct RegistrationFlow {
    api: Arc<ApiClient>,
    navigator: Arc<dyn Navigator>,
    error: Option<String>,
}

impl RegistrationFlow {
    pub(crate) fn new(api: Arc<ApiClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            error: None,
        }
    }

    /// Validate and submit the form.
    ///
    /// A password mismatch fails locally without touching the network. On
    /// success the user is sent to the login route; on failure the
    /// displayable message is kept in [`error`](Self::error).
    ///
    /// Any 2xx counts as success, so the returned tenant is only present
    /// when the backend echoed one.
    pub async fn submit(&mut self, form: &RegistrationForm) -> Result<Option<Tenant>, CoreError> {
        self.error = None;

        if !form.passwords_match() {
            self.error = Some(messages::PASSWORD_MISMATCH.to_owned());
            return Err(CoreError::ValidationFailed {
                message: messages::PASSWORD_MISMATCH.to_owned(),
            });
        }

        match self.api.register(&form.to_registration()).await {
            Ok(tenant) => {
                match &tenant {
                    Some(t) => info!(tenant = %t.id, "organization registered"),
                    None => info!(name = %form.name.trim(), "organization registered"),
                }
                self.navigator.navigate(Route::Login);
                Ok(tenant)
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                let err = CoreError::from(e);
                self.error = Some(err.user_message(messages::REGISTRATION_FAILED));
                Err(err)
            }
        }
    }

    /// Message from the last failed submit, cleared on the next one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
