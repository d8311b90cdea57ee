// Auth endpoints
//
// Registration and login are anonymous endpoints but still go through the
// client's hooks like everything else.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{NewUser, Registration, Tenant, User};

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    owner_email: &'a str,
    owner_password: &'a str,
    owner_full_name: &'a str,
}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AccessToken {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Serialize)]
struct NewUserBody<'a> {
    email: &'a str,
    full_name: &'a str,
    password: &'a str,
    role: &'a str,
}

impl ApiClient {
    /// Register a new organization and its owner account.
    ///
    /// `POST /api/auth/register`. Any 2xx means the account exists; the
    /// tenant record is returned only when the body carries one.
    pub async fn register(&self, registration: &Registration) -> Result<Option<Tenant>, Error> {
        debug!(name = %registration.name, "registering organization");
        let body = RegisterBody {
            name: &registration.name,
            description: registration.description.as_deref(),
            owner_email: &registration.owner_email,
            owner_password: registration.owner_password.expose_secret(),
            owner_full_name: &registration.owner_full_name,
        };
        self.post_accepting("/api/auth/register", &body).await
    }

    /// Exchange email + password for a bearer token.
    ///
    /// `POST /api/auth/token` (form-encoded). The token is returned, not
    /// stored; persisting it is the caller's decision.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SecretString, Error> {
        debug!(email, "requesting access token");
        let form = LoginForm {
            username: email,
            password: password.expose_secret(),
        };
        let token: AccessToken = self.post_form("/api/auth/token", &form).await?;
        if let Some(kind) = token.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                debug!(token_type = kind, "unexpected token type, using it as bearer anyway");
            }
        }
        Ok(SecretString::from(token.access_token))
    }

    /// The authenticated account.
    ///
    /// `GET /api/auth/me`
    pub async fn me(&self) -> Result<User, Error> {
        self.get("/api/auth/me").await
    }

    /// Users in the caller's tenant (admin only).
    ///
    /// `GET /api/auth/users`
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        debug!("listing users");
        self.get("/api/auth/users").await
    }

    /// Create a user in the caller's tenant (admin only).
    ///
    /// `POST /api/auth/users`
    pub async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        debug!(email = %user.email, role = %user.role, "creating user");
        let body = NewUserBody {
            email: &user.email,
            full_name: &user.full_name,
            password: user.password.expose_secret(),
            role: &user.role,
        };
        self.post("/api/auth/users", &body).await
    }
}
