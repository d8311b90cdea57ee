//! CLI configuration: thin wrapper around `peek_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --server, --insecure, --timeout).

use std::sync::Arc;

use peek_core::{PortalConfig, SessionStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use peek_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Everything needed to build a `Portal` for this invocation.
pub struct Resolved {
    pub profile_name: String,
    pub profile: Profile,
    pub portal: PortalConfig,
    pub session: Arc<dyn SessionStore>,
}

/// Pick the active profile and apply flag overrides.
///
/// Without a config file the built-in profile (public backend, file token
/// store) is used; naming a missing profile with `--profile` is an error.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    // Flag > env > profile
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let portal = peek_config::profile_to_portal_config(&profile, &cfg.defaults)?;
    let session = peek_config::session_store(&profile, &profile_name)?;

    Ok(Resolved {
        profile_name,
        profile,
        portal,
        session,
    })
}
