// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend. Never touches disk: the CLI (via
// peek-config) constructs a `PortalConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// Origin used when no profile or flag overrides it.
pub const DEFAULT_BACKEND_URL: &str = "https://peekevent.xyz";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging backends).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend origin (e.g., `https://peekevent.xyz`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl PortalConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> peek_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => peek_api::TlsMode::System,
            TlsVerification::CustomCa(path) => peek_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => peek_api::TlsMode::DangerAcceptInvalid,
        };
        peek_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        let url = Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid");
        Self::new(url)
    }
}
