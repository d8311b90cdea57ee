// Peek API HTTP client
//
// Wraps `reqwest::Client` with the fixed base origin and the two
// cross-cutting hooks every request goes through: bearer-token injection
// on the way out, 401 interception on the way back. Endpoint methods live
// in `auth.rs` and `screens.rs` as inherent impls.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::session::{SessionStore, UnauthorizedHook};
use crate::transport::TransportConfig;

/// Error body shape used by the backend: `{"detail": "..."}`.
///
/// Validation failures put a list under `detail`; only a plain string
/// counts as a displayable message.
#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Authenticated HTTP client for the Peek backend.
///
/// The session store and unauthorized hook are injected so the transport
/// never reaches for global state. Every endpoint method routes through
/// [`send`](Self::send); there is no unauthenticated side door.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    on_unauthorized: UnauthorizedHook,
}

impl ApiClient {
    /// Build a client from a base origin and transport config.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        session: Arc<dyn SessionStore>,
        on_unauthorized: UnauthorizedHook,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session, on_unauthorized))
    }

    /// Wrap a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for default headers on `http`; see
    /// [`default_headers`](crate::transport::default_headers).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        session: Arc<dyn SessionStore>,
        on_unauthorized: UnauthorizedHook,
    ) -> Self {
        Self {
            http,
            base_url,
            session,
            on_unauthorized,
        }
    }

    /// The backend origin all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The injected session store.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an absolute API path (e.g. `/api/screens`) on the origin.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Hooks ────────────────────────────────────────────────────────

    /// Outgoing-request hook: attach `Authorization: Bearer <token>` when a
    /// token is stored. A failing store read degrades to an anonymous
    /// request instead of failing it.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = match self.session.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "session token unreadable, sending request anonymously");
                None
            }
        };

        let Some(token) = token else {
            trace!("no session token, sending anonymously");
            return builder;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                builder.header(AUTHORIZATION, value)
            }
            Err(_) => {
                warn!("stored session token is not a valid header value, ignoring it");
                builder
            }
        }
    }

    /// Incoming-response hook.
    ///
    /// A 401 clears the stored token, fires the unauthorized hook once, and
    /// still fails the call. Other non-success statuses become
    /// [`Error::Api`]; success passes through untouched.
    async fn intercept(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = parse_detail(&body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            debug!("received 401, invalidating session");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "failed to clear session token");
            }
            (self.on_unauthorized)();
            return Err(Error::Unauthorized { detail });
        }

        debug!(status = status.as_u16(), ?detail, "request failed");
        Err(Error::Api {
            status: status.as_u16(),
            detail,
            body,
        })
    }

    /// Apply both hooks around a single request.
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let resp = self.authorize(builder).send().await?;
        self.intercept(resp).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");
        let resp = self.send(self.http.get(url)).await?;
        decode(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let resp = self.send(self.http.post(url).json(body)).await?;
        decode(resp).await
    }

    /// POST a JSON body where any 2xx counts as success.
    ///
    /// The payload is decoded when it parses as `T`; an empty or
    /// differently shaped body yields `None` rather than an error.
    pub(crate) async fn post_accepting<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let resp = self.send(self.http.post(url).json(body)).await?;
        match decode(resp).await {
            Ok(value) => Ok(Some(value)),
            Err(Error::Deserialization { message, .. }) => {
                debug!(%message, "success response carried no usable payload");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub(crate) async fn post_form<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (form)");
        let resp = self.send(self.http.post(url).form(form)).await?;
        decode(resp).await
    }

    /// POST a multipart body, discarding the response payload.
    ///
    /// The multipart boundary content type replaces the JSON default for
    /// this call only.
    pub(crate) async fn post_multipart(&self, path: &str, form: Form) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");
        let _resp = self.send(self.http.post(url).multipart(form)).await?;
        Ok(())
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Deserialize a success body, keeping the raw text for diagnostics.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}
