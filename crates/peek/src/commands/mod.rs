//! Command dispatch: bridges CLI args -> portal views -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod screens;
pub mod util;

use std::sync::Arc;

use peek_core::{History, Portal, Route};

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Per-invocation state shared by backend-bound handlers.
pub struct Context {
    pub portal: Portal,
    pub history: Arc<History>,
    pub resolved: Resolved,
}

impl Context {
    /// Whether a 401 already sent the session back to the login route.
    pub fn session_rejected(&self) -> bool {
        self.history.count(Route::Login) > 0
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(ctx, args, global).await,
        Command::Dashboard => dashboard::handle(ctx, global).await,
        Command::Screens(args) => screens::handle(ctx, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
